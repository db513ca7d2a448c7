//! The node capabilities the panel core needs from its environment.
//!
//! The core never walks a concrete tree or toggles concrete class names. It
//! only asks a [`PanelHost`] for a handful of capabilities: locating a
//! panel's controls, reading and writing geometry and stacking, flipping
//! named indicators, and managing the accessibility state of the drag handle.
//! [`crate::document::Document`] is the in-memory implementation used by the
//! terminal host, the benchmark and the tests.

use std::fmt;

/// Opaque handle to a node owned by a [`PanelHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Top-left offset of a panel. `y` grows downward.
///
/// Signed because pointer drags are not clamped and may carry a panel past
/// the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Position {
    pub top: i32,
    pub left: i32,
}

impl Position {
    pub const fn new(top: i32, left: i32) -> Self {
        Self { top, left }
    }

    /// Offset by a pointer delta.
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            top: self.top.saturating_add(dy),
            left: self.left.saturating_add(dx),
        }
    }

    /// Pull both axes back to zero independently.
    pub fn clamped_to_origin(self) -> Self {
        Self {
            top: self.top.max(0),
            left: self.left.max(0),
        }
    }
}

/// Role a descendant node plays inside a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControlRole {
    Handle,
    Close,
    Minimize,
}

/// Named state flags a host applies to a panel root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Indicator {
    /// The panel is the target of an in-progress drag.
    Moving,
    /// The panel is minimized.
    Hidden,
    /// The node has been registered as a panel root.
    Panel,
}

pub trait PanelHost {
    /// Whether `node` is still attached to the document.
    fn contains(&self, node: NodeId) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn has_role(&self, node: NodeId, role: ControlRole) -> bool;

    /// First descendant of `panel` carrying `role`.
    fn find_control(&self, panel: NodeId, role: ControlRole) -> Option<NodeId>;

    fn position(&self, panel: NodeId) -> Position;
    fn set_position(&mut self, panel: NodeId, position: Position);

    fn stacking(&self, panel: NodeId) -> u64;
    fn set_stacking(&mut self, panel: NodeId, value: u64);

    fn set_indicator(&mut self, node: NodeId, indicator: Indicator, on: bool);
    fn has_indicator(&self, node: NodeId, indicator: Indicator) -> bool;

    /// Accessibility "grabbed" state of a drag handle. `None` until assigned.
    fn grabbed(&self, handle: NodeId) -> Option<bool>;
    fn set_grabbed(&mut self, handle: NodeId, grabbed: bool);

    fn focus_order(&self, handle: NodeId) -> Option<i32>;
    fn set_focus_order(&mut self, handle: NodeId, order: i32);

    /// Detach `node` and its subtree permanently.
    fn remove(&mut self, node: NodeId);
}

impl<T: PanelHost + ?Sized> PanelHost for &mut T {
    fn contains(&self, node: NodeId) -> bool {
        (**self).contains(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        (**self).parent(node)
    }

    fn has_role(&self, node: NodeId, role: ControlRole) -> bool {
        (**self).has_role(node, role)
    }

    fn find_control(&self, panel: NodeId, role: ControlRole) -> Option<NodeId> {
        (**self).find_control(panel, role)
    }

    fn position(&self, panel: NodeId) -> Position {
        (**self).position(panel)
    }

    fn set_position(&mut self, panel: NodeId, position: Position) {
        (**self).set_position(panel, position)
    }

    fn stacking(&self, panel: NodeId) -> u64 {
        (**self).stacking(panel)
    }

    fn set_stacking(&mut self, panel: NodeId, value: u64) {
        (**self).set_stacking(panel, value)
    }

    fn set_indicator(&mut self, node: NodeId, indicator: Indicator, on: bool) {
        (**self).set_indicator(node, indicator, on)
    }

    fn has_indicator(&self, node: NodeId, indicator: Indicator) -> bool {
        (**self).has_indicator(node, indicator)
    }

    fn grabbed(&self, handle: NodeId) -> Option<bool> {
        (**self).grabbed(handle)
    }

    fn set_grabbed(&mut self, handle: NodeId, grabbed: bool) {
        (**self).set_grabbed(handle, grabbed)
    }

    fn focus_order(&self, handle: NodeId) -> Option<i32> {
        (**self).focus_order(handle)
    }

    fn set_focus_order(&mut self, handle: NodeId, order: i32) {
        (**self).set_focus_order(handle, order)
    }

    fn remove(&mut self, node: NodeId) {
        (**self).remove(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_is_per_axis() {
        assert_eq!(
            Position::new(-3, 7).clamped_to_origin(),
            Position::new(0, 7)
        );
        assert_eq!(
            Position::new(4, -1).clamped_to_origin(),
            Position::new(4, 0)
        );
    }

    #[test]
    fn translate_adds_delta() {
        let p = Position::new(10, 20).translated(-25, 5);
        assert_eq!(p, Position::new(15, -5));
    }
}
