//! In-memory node tree implementing [`PanelHost`].
//!
//! Nodes live in a slot vector; removing a node frees its whole subtree and
//! the ids are never reused, so a stale [`NodeId`] simply stops resolving.

use std::collections::BTreeSet;

use crate::host::{ControlRole, Indicator, NodeId, PanelHost, Position};

#[derive(Debug, Clone, Default)]
struct Node {
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    roles: Vec<ControlRole>,
    indicators: BTreeSet<Indicator>,
    position: Position,
    width: u16,
    height: u16,
    stacking: u64,
    grabbed: Option<bool>,
    focus_order: Option<i32>,
}

/// Node ids of a panel built by [`Document::build_panel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelNodes {
    pub root: NodeId,
    pub handle: NodeId,
    pub body: NodeId,
    pub close: Option<NodeId>,
    pub minimize: Option<NodeId>,
}

/// Shape of a panel subtree to build.
#[derive(Debug, Clone)]
pub struct PanelBlueprint {
    pub title: String,
    pub width: u16,
    pub height: u16,
    pub closable: bool,
    pub minimizable: bool,
    pub focus_order: Option<i32>,
}

impl PanelBlueprint {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: 32,
            height: 8,
            closable: true,
            minimizable: true,
            focus_order: None,
        }
    }

    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn minimizable(mut self, minimizable: bool) -> Self {
        self.minimizable = minimizable;
        self
    }

    pub fn focus_order(mut self, order: i32) -> Self {
        self.focus_order = Some(order);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    roots: Vec<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached top-level node.
    pub fn create_element(&mut self, label: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node {
            label: label.into(),
            ..Node::default()
        }));
        self.roots.push(id);
        id
    }

    /// Move `child` under `parent`. Ignored when either node is gone or when
    /// it would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) || self.is_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    pub fn create_child(&mut self, parent: NodeId, label: impl Into<String>) -> NodeId {
        let child = self.create_element(label);
        self.append_child(parent, child);
        child
    }

    pub fn add_role(&mut self, node: NodeId, role: ControlRole) {
        if let Some(node) = self.node_mut(node)
            && !node.roles.contains(&role)
        {
            node.roles.push(role);
        }
    }

    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.label.as_str())
    }

    pub fn set_size(&mut self, node: NodeId, width: u16, height: u16) {
        if let Some(node) = self.node_mut(node) {
            node.width = width;
            node.height = height;
        }
    }

    /// `(width, height)` of `node`, zero when unknown.
    pub fn size(&self, node: NodeId) -> (u16, u16) {
        self.node(node).map_or((0, 0), |n| (n.width, n.height))
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Top-level nodes still attached, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.iter().copied().filter(|id| self.contains(*id))
    }

    /// Pre-order traversal of `node` and its descendants.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if !self.contains(id) {
                continue;
            }
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Build the canonical panel subtree: a root holding a header handle
    /// (with optional minimize and close controls) and a body.
    pub fn build_panel(&mut self, blueprint: &PanelBlueprint) -> PanelNodes {
        let root = self.create_element(blueprint.title.clone());
        self.set_size(root, blueprint.width, blueprint.height);

        let handle = self.create_child(root, blueprint.title.clone());
        self.add_role(handle, ControlRole::Handle);
        if let Some(order) = blueprint.focus_order {
            self.set_focus_order(handle, order);
        }

        let minimize = blueprint.minimizable.then(|| {
            let id = self.create_child(root, "_");
            self.add_role(id, ControlRole::Minimize);
            id
        });
        let close = blueprint.closable.then(|| {
            let id = self.create_child(root, "x");
            self.add_role(id, ControlRole::Close);
            id
        });
        let body = self.create_child(root, "body");

        PanelNodes {
            root,
            handle,
            body,
            close,
            minimize,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn detach(&mut self, child: NodeId) {
        let parent = self.node(child).and_then(|n| n.parent);
        match parent {
            Some(parent) => {
                if let Some(node) = self.node_mut(parent) {
                    node.children.retain(|c| *c != child);
                }
            }
            None => self.roots.retain(|r| *r != child),
        }
    }
}

impl PanelHost for Document {
    fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn has_role(&self, node: NodeId, role: ControlRole) -> bool {
        self.node(node).is_some_and(|n| n.roles.contains(&role))
    }

    fn find_control(&self, panel: NodeId, role: ControlRole) -> Option<NodeId> {
        self.descendants(panel)
            .into_iter()
            .skip(1)
            .find(|id| self.has_role(*id, role))
    }

    fn position(&self, panel: NodeId) -> Position {
        self.node(panel).map(|n| n.position).unwrap_or_default()
    }

    fn set_position(&mut self, panel: NodeId, position: Position) {
        if let Some(node) = self.node_mut(panel) {
            node.position = position;
        }
    }

    fn stacking(&self, panel: NodeId) -> u64 {
        self.node(panel).map_or(0, |n| n.stacking)
    }

    fn set_stacking(&mut self, panel: NodeId, value: u64) {
        if let Some(node) = self.node_mut(panel) {
            node.stacking = value;
        }
    }

    fn set_indicator(&mut self, node: NodeId, indicator: Indicator, on: bool) {
        if let Some(node) = self.node_mut(node) {
            if on {
                node.indicators.insert(indicator);
            } else {
                node.indicators.remove(&indicator);
            }
        }
    }

    fn has_indicator(&self, node: NodeId, indicator: Indicator) -> bool {
        self.node(node)
            .is_some_and(|n| n.indicators.contains(&indicator))
    }

    fn grabbed(&self, handle: NodeId) -> Option<bool> {
        self.node(handle).and_then(|n| n.grabbed)
    }

    fn set_grabbed(&mut self, handle: NodeId, grabbed: bool) {
        if let Some(node) = self.node_mut(handle) {
            node.grabbed = Some(grabbed);
        }
    }

    fn focus_order(&self, handle: NodeId) -> Option<i32> {
        self.node(handle).and_then(|n| n.focus_order)
    }

    fn set_focus_order(&mut self, handle: NodeId, order: i32) {
        if let Some(node) = self.node_mut(handle) {
            node.focus_order = Some(order);
        }
    }

    fn remove(&mut self, node: NodeId) {
        if !self.contains(node) {
            return;
        }
        self.detach(node);
        for id in self.descendants(node) {
            if let Some(slot) = self.nodes.get_mut(id.0) {
                *slot = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_panel_locates_controls() {
        let mut doc = Document::new();
        let nodes = doc.build_panel(&PanelBlueprint::new("one"));
        assert_eq!(
            doc.find_control(nodes.root, ControlRole::Handle),
            Some(nodes.handle)
        );
        assert_eq!(doc.find_control(nodes.root, ControlRole::Close), nodes.close);
        assert_eq!(
            doc.find_control(nodes.root, ControlRole::Minimize),
            nodes.minimize
        );
        assert_eq!(doc.parent(nodes.body), Some(nodes.root));
    }

    #[test]
    fn optional_controls_can_be_omitted() {
        let mut doc = Document::new();
        let blueprint = PanelBlueprint::new("bare").closable(false).minimizable(false);
        let nodes = doc.build_panel(&blueprint);
        assert!(nodes.close.is_none());
        assert!(nodes.minimize.is_none());
        assert_eq!(doc.find_control(nodes.root, ControlRole::Close), None);
    }

    #[test]
    fn remove_frees_subtree() {
        let mut doc = Document::new();
        let nodes = doc.build_panel(&PanelBlueprint::new("gone"));
        doc.remove(nodes.root);
        assert!(!doc.contains(nodes.root));
        assert!(!doc.contains(nodes.handle));
        assert_eq!(doc.roots().count(), 0);
        // a fresh node never reuses a freed id
        let fresh = doc.create_element("fresh");
        assert!(fresh.0 > nodes.body.0);
    }

    #[test]
    fn append_child_rejects_cycles() {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        let b = doc.create_child(a, "b");
        doc.append_child(b, a);
        assert_eq!(doc.parent(a), None);
        assert_eq!(doc.parent(b), Some(a));
    }

    #[test]
    fn indicators_toggle() {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        doc.set_indicator(a, Indicator::Moving, true);
        assert!(doc.has_indicator(a, Indicator::Moving));
        assert!(!doc.has_indicator(a, Indicator::Hidden));
        doc.set_indicator(a, Indicator::Moving, false);
        assert!(!doc.has_indicator(a, Indicator::Moving));
    }
}
