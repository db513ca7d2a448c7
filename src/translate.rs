//! Turns crossterm mouse and key events into [`InputEvent`]s for the panel
//! manager, and performs the host's default actions (focus traversal,
//! clicks, dock restores) that a browser would otherwise provide.
use crossterm::event::{
    Event, KeyCode, KeyEvent as TermKeyEvent, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;

use crate::chrome::{dock_entries, hit_test};
use crate::document::Document;
use crate::host::{NodeId, PanelHost};
use crate::input::{EventOutcome, InputEvent, Key, KeyEvent, Modifiers, PointerEvent};
use crate::panel::PanelManager;

#[derive(Debug, Default)]
pub struct Translator {
    /// Handle holding keyboard focus.
    focused: Option<NodeId>,
    /// Node under the last left-button press, for click detection.
    pressed: Option<NodeId>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn set_focus(&mut self, handle: Option<NodeId>) {
        self.focused = handle;
    }

    pub fn handle(
        &mut self,
        pm: &mut PanelManager<Document>,
        event: &Event,
        screen: Rect,
    ) -> EventOutcome {
        let outcome = match event {
            Event::Mouse(mouse) => self.handle_mouse(pm, mouse, screen),
            Event::Key(key) => self.handle_key(pm, key),
            Event::FocusLost => {
                // the release will never reach us
                pm.reset_interaction();
                self.pressed = None;
                EventOutcome::IGNORED
            }
            _ => EventOutcome::IGNORED,
        };
        if self.focused.is_some_and(|h| !is_visible_handle(pm, h)) {
            self.focused = None;
        }
        outcome
    }

    fn handle_mouse(
        &mut self,
        pm: &mut PanelManager<Document>,
        mouse: &MouseEvent,
        screen: Rect,
    ) -> EventOutcome {
        let x = mouse.column as i32;
        let y = mouse.row as i32;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(entry) = dock_entries(pm, screen)
                    .into_iter()
                    .find(|entry| entry.rect.contains(x, y))
                {
                    self.pressed = None;
                    return self.restore_from_dock(pm, entry.panel);
                }
                let target = hit_test(pm, x, y);
                self.pressed = target;
                let panel = target.and_then(|t| pm.registry().nearest_panel(pm.host(), t));
                if let Some(panel) = panel {
                    self.focus_panel(pm, panel);
                }
                pm.handle_event(InputEvent::PointerDown(PointerEvent { target, x, y }))
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                let target = hit_test(pm, x, y);
                pm.handle_event(InputEvent::PointerMove(PointerEvent { target, x, y }))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let target = hit_test(pm, x, y);
                let mut outcome =
                    pm.handle_event(InputEvent::PointerUp(PointerEvent { target, x, y }));
                if let Some(pressed) = self.pressed.take()
                    && target == Some(pressed)
                {
                    let click = pm.handle_event(InputEvent::Click { target: pressed });
                    outcome.consumed |= click.consumed;
                    outcome.prevent_default |= click.prevent_default;
                }
                outcome
            }
            _ => EventOutcome::IGNORED,
        }
    }

    fn handle_key(
        &mut self,
        pm: &mut PanelManager<Document>,
        key: &TermKeyEvent,
    ) -> EventOutcome {
        let mapped = map_key(key.code);
        let modifiers = Modifiers {
            shift: key.modifiers.contains(KeyModifiers::SHIFT),
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        };
        let outcome = match self.focused {
            Some(handle) if pm.host().contains(handle) => pm.handle_event(InputEvent::KeyDown(
                KeyEvent::new(handle, mapped).with_modifiers(modifiers),
            )),
            _ => EventOutcome::IGNORED,
        };
        if !outcome.prevent_default {
            match key.code {
                KeyCode::Tab => self.cycle_focus(pm, true),
                KeyCode::BackTab => self.cycle_focus(pm, false),
                _ => {}
            }
        }
        outcome
    }

    fn restore_from_dock(
        &mut self,
        pm: &mut PanelManager<Document>,
        panel: NodeId,
    ) -> EventOutcome {
        if let Err(err) = pm.restore(panel) {
            tracing::warn!(panel = ?panel, error = %err, "dock restore failed");
            return EventOutcome::IGNORED;
        }
        self.focus_panel(pm, panel);
        EventOutcome::CONSUMED
    }

    fn focus_panel(&mut self, pm: &PanelManager<Document>, panel: NodeId) {
        if let Some(entry) = pm.entry(panel) {
            self.focused = Some(entry.handle());
        }
    }

    /// Move focus to the next (or previous) visible handle, ordered by focus
    /// order and then tree order.
    fn cycle_focus(&mut self, pm: &PanelManager<Document>, forward: bool) {
        let handles = focus_ring(pm);
        if handles.is_empty() {
            self.focused = None;
            return;
        }
        let current = self
            .focused
            .and_then(|f| handles.iter().position(|h| *h == f));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % handles.len(),
            (Some(i), false) => (i + handles.len() - 1) % handles.len(),
            (None, true) => 0,
            (None, false) => handles.len() - 1,
        };
        self.focused = Some(handles[next]);
    }
}

/// A hidden element cannot keep focus: the handle must still be attached and
/// its panel not minimized.
fn is_visible_handle(pm: &PanelManager<Document>, handle: NodeId) -> bool {
    pm.host().contains(handle)
        && pm
            .registry()
            .nearest_panel(pm.host(), handle)
            .is_none_or(|panel| !pm.is_minimized(panel))
}

/// Handles of visible panels in traversal order.
pub fn focus_ring(pm: &PanelManager<Document>) -> Vec<NodeId> {
    let default_order = pm.settings().default_focus_order;
    let mut handles: Vec<(i32, NodeId)> = pm
        .registry()
        .ids()
        .filter(|id| pm.host().contains(*id) && !pm.is_minimized(*id))
        .filter_map(|id| pm.entry(id))
        .map(|entry| {
            let order = pm.host().focus_order(entry.handle()).unwrap_or(default_order);
            (order, entry.handle())
        })
        .collect();
    handles.sort();
    handles.into_iter().map(|(_, handle)| handle).collect()
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelSettings;
    use crate::document::{PanelBlueprint, PanelNodes};
    use crate::host::{Indicator, Position};
    use crate::panel::PanelConfig;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    fn desk(count: usize) -> (PanelManager<Document>, Vec<PanelNodes>) {
        let mut doc = Document::new();
        let nodes: Vec<PanelNodes> = (0..count)
            .map(|i| doc.build_panel(&PanelBlueprint::new(format!("t{i}")).size(20, 6)))
            .collect();
        let settings = PanelSettings::new().with_base_left(0).with_tile_offset(0, 0);
        let mut pm = PanelManager::with_settings(doc, settings);
        for (i, n) in nodes.iter().enumerate() {
            pm.init(n.root, PanelConfig::new()).unwrap();
            pm.host_mut().set_position(n.root, Position::new(0, i as i32 * 25));
        }
        (pm, nodes)
    }

    fn left_down(column: u16, row: u16) -> Event {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn left_drag(column: u16, row: u16) -> Event {
        mouse(MouseEventKind::Drag(MouseButton::Left), column, row)
    }

    fn left_up(column: u16, row: u16) -> Event {
        mouse(MouseEventKind::Up(MouseButton::Left), column, row)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(TermKeyEvent::new(code, modifiers))
    }

    #[test]
    fn header_drag_moves_panel() {
        let (mut pm, nodes) = desk(1);
        let mut tr = Translator::new();
        let down = tr.handle(&mut pm, &left_down(2, 0), SCREEN);
        assert!(down.prevent_default);
        assert_eq!(tr.focused(), Some(nodes[0].handle));
        tr.handle(&mut pm, &left_drag(7, 3), SCREEN);
        tr.handle(&mut pm, &left_up(7, 3), SCREEN);
        assert_eq!(pm.host().position(nodes[0].root), Position::new(3, 5));
        assert!(!pm.is_dragging());
    }

    #[test]
    fn click_on_close_closes() {
        let (mut pm, nodes) = desk(1);
        let mut tr = Translator::new();
        tr.handle(&mut pm, &left_down(17, 0), SCREEN);
        let out = tr.handle(&mut pm, &left_up(17, 0), SCREEN);
        assert!(out.consumed);
        assert!(!pm.host().contains(nodes[0].root));
        assert_eq!(tr.focused(), None);
    }

    #[test]
    fn release_off_control_is_not_a_click() {
        let (mut pm, nodes) = desk(1);
        let mut tr = Translator::new();
        tr.handle(&mut pm, &left_down(14, 0), SCREEN);
        tr.handle(&mut pm, &left_up(5, 3), SCREEN);
        assert!(!pm.is_minimized(nodes[0].root));
    }

    #[test]
    fn minimize_then_restore_from_dock() {
        let (mut pm, nodes) = desk(1);
        let mut tr = Translator::new();
        tr.handle(&mut pm, &left_down(14, 0), SCREEN);
        tr.handle(&mut pm, &left_up(14, 0), SCREEN);
        assert!(pm.is_minimized(nodes[0].root));

        // dock entry "[t0]" starts at column 1 of the last row
        let out = tr.handle(&mut pm, &left_down(2, 23), SCREEN);
        assert_eq!(out, EventOutcome::CONSUMED);
        assert!(!pm.is_minimized(nodes[0].root));
        assert_eq!(tr.focused(), Some(nodes[0].handle));
    }

    #[test]
    fn minimizing_drops_focus_from_the_hidden_handle() {
        let (mut pm, nodes) = desk(1);
        let mut tr = Translator::new();
        tr.handle(&mut pm, &left_down(14, 0), SCREEN);
        tr.handle(&mut pm, &left_up(14, 0), SCREEN);
        assert!(pm.is_minimized(nodes[0].root));
        assert_eq!(tr.focused(), None);

        let start = pm.host().position(nodes[0].root);
        tr.handle(&mut pm, &key(KeyCode::Enter, KeyModifiers::NONE), SCREEN);
        tr.handle(&mut pm, &key(KeyCode::Down, KeyModifiers::SHIFT), SCREEN);
        assert!(!pm.is_dragging());
        assert_eq!(pm.host().position(nodes[0].root), start);
    }

    #[test]
    fn focus_lost_releases_a_pointer_drag() {
        let (mut pm, nodes) = desk(1);
        let mut tr = Translator::new();
        tr.handle(&mut pm, &left_down(2, 0), SCREEN);
        assert!(pm.is_dragging());
        tr.handle(&mut pm, &Event::FocusLost, SCREEN);
        assert!(!pm.is_dragging());
        assert!(!pm.host().has_indicator(nodes[0].root, Indicator::Moving));
        assert_eq!(pm.host().grabbed(nodes[0].handle), Some(false));

        // the button comes back up elsewhere; the panel stays put
        let start = pm.host().position(nodes[0].root);
        tr.handle(&mut pm, &left_drag(9, 4), SCREEN);
        assert_eq!(pm.host().position(nodes[0].root), start);
    }

    #[test]
    fn keyboard_grab_through_focus() {
        let (mut pm, nodes) = desk(2);
        let mut tr = Translator::new();
        tr.handle(&mut pm, &key(KeyCode::Tab, KeyModifiers::NONE), SCREEN);
        assert_eq!(tr.focused(), Some(nodes[0].handle));

        let start = pm.host().position(nodes[0].root);
        tr.handle(&mut pm, &key(KeyCode::Enter, KeyModifiers::NONE), SCREEN);
        tr.handle(&mut pm, &key(KeyCode::Down, KeyModifiers::SHIFT), SCREEN);
        assert_eq!(
            pm.host().position(nodes[0].root),
            Position::new(start.top + 100, start.left)
        );

        // Tab releases the grab and still moves focus
        tr.handle(&mut pm, &key(KeyCode::Tab, KeyModifiers::NONE), SCREEN);
        assert!(!pm.is_dragging());
        assert_eq!(tr.focused(), Some(nodes[1].handle));
    }

    #[test]
    fn focus_ring_respects_focus_order_and_skips_minimized() {
        let (mut pm, nodes) = desk(3);
        pm.host_mut().set_focus_order(nodes[2].handle, -1);
        pm.minimize(nodes[1].root).unwrap();
        assert_eq!(focus_ring(&pm), vec![nodes[2].handle, nodes[0].handle]);

        let mut tr = Translator::new();
        tr.handle(&mut pm, &key(KeyCode::BackTab, KeyModifiers::NONE), SCREEN);
        assert_eq!(tr.focused(), Some(nodes[0].handle));
        tr.handle(&mut pm, &key(KeyCode::BackTab, KeyModifiers::NONE), SCREEN);
        assert_eq!(tr.focused(), Some(nodes[2].handle));
    }

    #[test]
    fn keys_without_focus_are_ignored() {
        let (mut pm, _) = desk(1);
        let mut tr = Translator::new();
        let out = tr.handle(&mut pm, &key(KeyCode::Enter, KeyModifiers::NONE), SCREEN);
        assert_eq!(out, EventOutcome::IGNORED);
        assert!(!pm.is_dragging());
    }
}
