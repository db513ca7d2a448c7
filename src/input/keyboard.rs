use super::{EventOutcome, Key, KeyEvent};
use crate::host::{NodeId, PanelHost};
use crate::panel::PanelManager;
use crate::state::{GrabSource, Session};

impl<H: PanelHost> PanelManager<H> {
    /// Keyboard grabbing and stepping. Only keys aimed at a panel's drag
    /// handle are considered; everything else passes through.
    pub(super) fn handle_key(&mut self, ev: KeyEvent) -> EventOutcome {
        let Some(panel) = self.nearest_panel(ev.target) else {
            return EventOutcome::IGNORED;
        };
        if !self.is_panel_handle(panel, ev.target) {
            return EventOutcome::IGNORED;
        }

        match ev.key {
            Key::Space | Key::Enter => {
                self.toggle_keyboard_grab(panel, ev.target);
                EventOutcome::PREVENT_DEFAULT
            }
            // Let go so focus can move on; the host still performs its tab
            // navigation.
            Key::Tab => match self.end_session() {
                Some(_) => EventOutcome::CONSUMED,
                None => EventOutcome::IGNORED,
            },
            Key::Up | Key::Down | Key::Left | Key::Right => {
                if self.state.active_panel() != Some(panel) {
                    return EventOutcome::IGNORED;
                }
                let step = self.settings.steps.for_modifiers(ev.modifiers);
                self.step_panel(panel, ev.key, step);
                EventOutcome::PREVENT_DEFAULT
            }
            Key::Other => EventOutcome::IGNORED,
        }
    }

    fn toggle_keyboard_grab(&mut self, panel: NodeId, handle: NodeId) {
        if self.state.active_panel() == Some(panel) {
            self.end_session();
            return;
        }
        self.raise(panel);
        self.begin_session(Session {
            panel,
            handle,
            source: GrabSource::Keyboard,
        });
    }

    /// Move one step along the key's axis, then pull each axis back to zero.
    fn step_panel(&mut self, panel: NodeId, key: Key, step: i32) {
        let (dx, dy) = match key {
            Key::Up => (0, -step),
            Key::Down => (0, step),
            Key::Left => (-step, 0),
            Key::Right => (step, 0),
            _ => return,
        };
        let position = self
            .host
            .position(panel)
            .translated(dx, dy)
            .clamped_to_origin();
        self.host.set_position(panel, position);
        tracing::trace!(
            panel = ?panel,
            step,
            top = position.top,
            left = position.left,
            "stepped panel"
        );
    }
}
