use super::{EventOutcome, PointerEvent};
use crate::host::{ControlRole, NodeId, PanelHost};
use crate::panel::PanelManager;
use crate::state::{GrabSource, Session};

impl<H: PanelHost> PanelManager<H> {
    /// Pointer-down or touch-start. Any press inside a panel brings it to the
    /// front; a press on the drag handle also starts a drag.
    pub(super) fn handle_press(&mut self, ev: PointerEvent, source: GrabSource) -> EventOutcome {
        let Some(target) = ev.target else {
            return EventOutcome::IGNORED;
        };
        let Some(panel) = self.nearest_panel(target) else {
            return EventOutcome::IGNORED;
        };
        let stacking = self.raise(panel);

        if !self.is_panel_handle(panel, target) {
            tracing::trace!(panel = ?panel, stacking, "raised panel");
            return EventOutcome::CONSUMED;
        }

        self.state.set_pointer(ev.x, ev.y);
        self.begin_session(Session {
            panel,
            handle: target,
            source,
        });
        EventOutcome::PREVENT_DEFAULT
    }

    /// Pointer or touch move. Applies the delta since the last sample; no
    /// clamping on this path.
    pub(super) fn handle_move(&mut self, ev: PointerEvent) -> EventOutcome {
        let Some(session) = self.state.session() else {
            return EventOutcome::IGNORED;
        };
        if !session.source.tracks_pointer() {
            return EventOutcome::IGNORED;
        }
        if !self.host.contains(session.panel) {
            self.state.end();
            return EventOutcome::IGNORED;
        }

        let (last_x, last_y) = self.state.pointer();
        let dx = ev.x.saturating_sub(last_x);
        let dy = ev.y.saturating_sub(last_y);
        let position = self.host.position(session.panel).translated(dx, dy);
        self.host.set_position(session.panel, position);
        self.state.set_pointer(ev.x, ev.y);
        tracing::trace!(
            panel = ?session.panel,
            dx,
            dy,
            top = position.top,
            left = position.left,
            "dragged panel"
        );
        EventOutcome::CONSUMED
    }

    /// Pointer-up or touch-end anywhere ends whatever session is active.
    pub(super) fn handle_release(&mut self) -> EventOutcome {
        match self.end_session() {
            Some(_) => EventOutcome::CONSUMED,
            None => EventOutcome::IGNORED,
        }
    }

    pub(crate) fn is_panel_handle(&self, panel: NodeId, node: NodeId) -> bool {
        self.host.has_role(node, ControlRole::Handle)
            && self
                .registry
                .get(panel)
                .is_some_and(|entry| entry.handle() == node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, PanelBlueprint, PanelNodes};
    use crate::host::{Indicator, Position};
    use crate::input::InputEvent;
    use crate::panel::PanelConfig;

    fn setup(count: usize) -> (PanelManager<Document>, Vec<PanelNodes>) {
        let mut doc = Document::new();
        let nodes: Vec<PanelNodes> = (0..count)
            .map(|i| doc.build_panel(&PanelBlueprint::new(format!("p{i}"))))
            .collect();
        let mut pm = PanelManager::new(doc);
        for n in &nodes {
            pm.init(n.root, PanelConfig::new()).unwrap();
        }
        (pm, nodes)
    }

    #[test]
    fn drag_applies_deltas() {
        let (mut pm, nodes) = setup(1);
        let p = nodes[0];
        let start = pm.host().position(p.root);

        let out = pm.handle_event(InputEvent::PointerDown(PointerEvent::at(p.handle, 50, 50)));
        assert!(out.prevent_default);
        assert!(pm.host().has_indicator(p.root, Indicator::Moving));
        assert_eq!(pm.host().grabbed(p.handle), Some(true));

        pm.handle_event(InputEvent::PointerMove(PointerEvent::nowhere(60, 45)));
        pm.handle_event(InputEvent::PointerMove(PointerEvent::nowhere(30, 400)));
        pm.handle_event(InputEvent::PointerUp(PointerEvent::nowhere(30, 400)));

        assert_eq!(
            pm.host().position(p.root),
            Position::new(start.top + 350, start.left - 20)
        );
        assert!(!pm.host().has_indicator(p.root, Indicator::Moving));
        assert_eq!(pm.host().grabbed(p.handle), Some(false));
        assert!(!pm.is_dragging());
    }

    #[test]
    fn pointer_drag_is_not_clamped() {
        let (mut pm, nodes) = setup(1);
        let p = nodes[0];
        pm.handle_event(InputEvent::PointerDown(PointerEvent::at(p.handle, 500, 500)));
        pm.handle_event(InputEvent::PointerMove(PointerEvent::nowhere(0, 0)));
        let pos = pm.host().position(p.root);
        assert!(pos.top < 0);
        assert!(pos.left < 0);
    }

    #[test]
    fn press_on_body_raises_without_dragging() {
        let (mut pm, nodes) = setup(2);
        let (a, b) = (nodes[0], nodes[1]);
        let out = pm.handle_event(InputEvent::PointerDown(PointerEvent::at(a.body, 1, 1)));
        assert_eq!(out, EventOutcome::CONSUMED);
        assert!(!pm.is_dragging());
        assert!(pm.host().stacking(a.root) > pm.host().stacking(b.root));
        assert_eq!(pm.panels().last(), Some(&a.root));
    }

    #[test]
    fn press_on_handle_raises_once() {
        let (mut pm, nodes) = setup(1);
        let p = nodes[0];
        let expected = pm.state().peek_stacking();
        pm.handle_event(InputEvent::PointerDown(PointerEvent::at(p.handle, 0, 0)));
        assert_eq!(pm.host().stacking(p.root), expected);
        assert_eq!(pm.state().peek_stacking(), expected + 1);
    }

    #[test]
    fn move_and_release_while_idle_are_noops() {
        let (mut pm, nodes) = setup(1);
        let before = pm.host().position(nodes[0].root);
        assert_eq!(
            pm.handle_event(InputEvent::PointerMove(PointerEvent::nowhere(5, 5))),
            EventOutcome::IGNORED
        );
        assert_eq!(
            pm.handle_event(InputEvent::TouchEnd(PointerEvent::nowhere(5, 5))),
            EventOutcome::IGNORED
        );
        assert_eq!(pm.host().position(nodes[0].root), before);
    }

    #[test]
    fn touch_drag_behaves_like_pointer() {
        let (mut pm, nodes) = setup(1);
        let p = nodes[0];
        let start = pm.host().position(p.root);
        pm.handle_event(InputEvent::TouchStart(PointerEvent::at(p.handle, 10, 10)));
        pm.handle_event(InputEvent::TouchMove(PointerEvent::nowhere(15, 12)));
        pm.handle_event(InputEvent::TouchEnd(PointerEvent::nowhere(15, 12)));
        assert_eq!(
            pm.host().position(p.root),
            Position::new(start.top + 2, start.left + 5)
        );
    }

    #[test]
    fn second_press_moves_the_session() {
        let (mut pm, nodes) = setup(2);
        let (a, b) = (nodes[0], nodes[1]);
        pm.handle_event(InputEvent::PointerDown(PointerEvent::at(a.handle, 0, 0)));
        pm.handle_event(InputEvent::TouchStart(PointerEvent::at(b.handle, 0, 0)));
        assert!(!pm.host().has_indicator(a.root, Indicator::Moving));
        assert_eq!(pm.host().grabbed(a.handle), Some(false));
        assert!(pm.host().has_indicator(b.root, Indicator::Moving));
        assert_eq!(pm.active_panel(), Some(b.root));
    }

    #[test]
    fn press_outside_panels_is_ignored() {
        let (mut pm, _) = setup(1);
        let stray = pm.host_mut().create_element("stray");
        assert_eq!(
            pm.handle_event(InputEvent::PointerDown(PointerEvent::at(stray, 0, 0))),
            EventOutcome::IGNORED
        );
        assert_eq!(
            pm.handle_event(InputEvent::PointerDown(PointerEvent::nowhere(0, 0))),
            EventOutcome::IGNORED
        );
    }

    #[test]
    fn closing_dragged_panel_clears_session() {
        let (mut pm, nodes) = setup(1);
        let p = nodes[0];
        pm.handle_event(InputEvent::PointerDown(PointerEvent::at(p.handle, 0, 0)));
        pm.close(p.root).unwrap();
        assert!(!pm.is_dragging());
        assert_eq!(
            pm.handle_event(InputEvent::PointerMove(PointerEvent::nowhere(9, 9))),
            EventOutcome::IGNORED
        );
    }
}
