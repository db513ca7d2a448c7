//! Panel registry and the [`PanelManager`] that owns it.
//!
//! A node becomes a panel through [`PanelManager::init`], which records the
//! panel's controls and the caller's lifecycle callbacks in a
//! [`PanelEntry`]. Lifecycle operations live in `lifecycle`, the named
//! operation surface in `ops`.

mod lifecycle;
mod manager;
mod ops;

use std::collections::BTreeMap;
use std::fmt;

use crate::host::{ControlRole, NodeId, PanelHost};

pub use manager::PanelManager;
pub use ops::PanelOp;

/// Lifecycle hook. Receives read access to the host so the panel can be
/// inspected at the point the hook runs. Returns whether the caller handled
/// the notification.
pub type PanelCallback = Box<dyn FnMut(&dyn PanelHost, NodeId) -> bool>;

fn unhandled() -> PanelCallback {
    Box::new(|_, _| false)
}

/// Optional lifecycle hooks supplied at init. Missing hooks do nothing.
#[derive(Default)]
pub struct PanelConfig {
    on_init: Option<PanelCallback>,
    on_minimize: Option<PanelCallback>,
    on_close: Option<PanelCallback>,
    on_restore: Option<PanelCallback>,
}

impl PanelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_init<F>(mut self, f: F) -> Self
    where
        F: FnMut(&dyn PanelHost, NodeId) -> bool + 'static,
    {
        self.on_init = Some(Box::new(f));
        self
    }

    pub fn on_minimize<F>(mut self, f: F) -> Self
    where
        F: FnMut(&dyn PanelHost, NodeId) -> bool + 'static,
    {
        self.on_minimize = Some(Box::new(f));
        self
    }

    pub fn on_close<F>(mut self, f: F) -> Self
    where
        F: FnMut(&dyn PanelHost, NodeId) -> bool + 'static,
    {
        self.on_close = Some(Box::new(f));
        self
    }

    pub fn on_restore<F>(mut self, f: F) -> Self
    where
        F: FnMut(&dyn PanelHost, NodeId) -> bool + 'static,
    {
        self.on_restore = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for PanelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelConfig")
            .field("on_init", &self.on_init.is_some())
            .field("on_minimize", &self.on_minimize.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_restore", &self.on_restore.is_some())
            .finish()
    }
}

pub(crate) struct PanelCallbacks {
    pub(crate) on_init: PanelCallback,
    pub(crate) on_minimize: PanelCallback,
    pub(crate) on_close: PanelCallback,
    pub(crate) on_restore: PanelCallback,
}

impl PanelCallbacks {
    /// The hook that runs after `op` takes effect.
    pub(crate) fn hook(&mut self, op: PanelOp) -> &mut PanelCallback {
        match op {
            PanelOp::Init => &mut self.on_init,
            PanelOp::Minimize => &mut self.on_minimize,
            PanelOp::Restore => &mut self.on_restore,
            PanelOp::Close => &mut self.on_close,
        }
    }
}

impl From<PanelConfig> for PanelCallbacks {
    fn from(config: PanelConfig) -> Self {
        Self {
            on_init: config.on_init.unwrap_or_else(unhandled),
            on_minimize: config.on_minimize.unwrap_or_else(unhandled),
            on_close: config.on_close.unwrap_or_else(unhandled),
            on_restore: config.on_restore.unwrap_or_else(unhandled),
        }
    }
}

/// Per-panel record created at init.
pub struct PanelEntry {
    root: NodeId,
    handle: NodeId,
    close: Option<NodeId>,
    minimize: Option<NodeId>,
    pub(crate) callbacks: PanelCallbacks,
}

impl PanelEntry {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn handle(&self) -> NodeId {
        self.handle
    }

    pub fn close_control(&self) -> Option<NodeId> {
        self.close
    }

    pub fn minimize_control(&self) -> Option<NodeId> {
        self.minimize
    }

    /// The node bound to `role`, if this panel has one.
    pub fn control(&self, role: ControlRole) -> Option<NodeId> {
        match role {
            ControlRole::Handle => Some(self.handle),
            ControlRole::Close => self.close,
            ControlRole::Minimize => self.minimize,
        }
    }
}

impl fmt::Debug for PanelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelEntry")
            .field("root", &self.root)
            .field("handle", &self.handle)
            .field("close", &self.close)
            .field("minimize", &self.minimize)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct PanelRegistry {
    entries: BTreeMap<NodeId, PanelEntry>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, panel: NodeId) -> bool {
        self.entries.contains_key(&panel)
    }

    pub fn get(&self, panel: NodeId) -> Option<&PanelEntry> {
        self.entries.get(&panel)
    }

    pub(crate) fn get_mut(&mut self, panel: NodeId) -> Option<&mut PanelEntry> {
        self.entries.get_mut(&panel)
    }

    pub(crate) fn insert(&mut self, entry: PanelEntry) -> Option<PanelEntry> {
        self.entries.insert(entry.root, entry)
    }

    pub(crate) fn remove(&mut self, panel: NodeId) -> Option<PanelEntry> {
        self.entries.remove(&panel)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.keys().copied()
    }

    /// Closest registered panel at or above `node`.
    pub fn nearest_panel<H: PanelHost + ?Sized>(&self, host: &H, node: NodeId) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if !host.contains(id) {
                return None;
            }
            if self.contains(id) {
                return Some(id);
            }
            current = host.parent(id);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, PanelBlueprint};

    fn entry_for(root: NodeId, handle: NodeId) -> PanelEntry {
        PanelEntry {
            root,
            handle,
            close: None,
            minimize: None,
            callbacks: PanelConfig::new().into(),
        }
    }

    #[test]
    fn default_callbacks_report_unhandled() {
        let doc = Document::new();
        let mut callbacks: PanelCallbacks = PanelConfig::new().into();
        assert!(!(callbacks.on_init)(&doc, NodeId(0)));
        assert!(!(callbacks.on_close)(&doc, NodeId(0)));
    }

    #[test]
    fn supplied_callback_is_kept() {
        let doc = Document::new();
        let mut callbacks: PanelCallbacks = PanelConfig::new().on_restore(|_, _| true).into();
        assert!((callbacks.on_restore)(&doc, NodeId(3)));
        assert!(!(callbacks.on_minimize)(&doc, NodeId(3)));
    }

    #[test]
    fn nearest_panel_walks_up_from_target() {
        let mut doc = Document::new();
        let outer = doc.build_panel(&PanelBlueprint::new("outer"));
        let inner = doc.build_panel(&PanelBlueprint::new("inner"));
        doc.append_child(outer.body, inner.root);

        let mut registry = PanelRegistry::new();
        registry.insert(entry_for(outer.root, outer.handle));
        assert_eq!(registry.nearest_panel(&doc, inner.handle), Some(outer.root));

        registry.insert(entry_for(inner.root, inner.handle));
        assert_eq!(registry.nearest_panel(&doc, inner.handle), Some(inner.root));
        assert_eq!(registry.nearest_panel(&doc, inner.root), Some(inner.root));
    }

    #[test]
    fn nearest_panel_outside_any_panel() {
        let mut doc = Document::new();
        let stray = doc.create_element("stray");
        let registry = PanelRegistry::new();
        assert_eq!(registry.nearest_panel(&doc, stray), None);
    }
}
