//! Interaction dispatch: turning document-level input into panel moves,
//! stacking changes and lifecycle operations.
//!
//! Pointer and touch input run a two-state machine (idle, dragging) in
//! `pointer`; keyboard grabbing and stepping lives in `keyboard`. Both share
//! the single [`crate::state::Session`] held by the manager, so at most one
//! panel is ever being moved.

mod keyboard;
mod pointer;

use crate::host::{NodeId, PanelHost};
use crate::panel::PanelManager;
use crate::state::GrabSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub target: NodeId,
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(target: NodeId, key: Key) -> Self {
        Self {
            target,
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Pointer or touch sample in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Node under the pointer, if any.
    pub target: Option<NodeId>,
    pub x: i32,
    pub y: i32,
}

impl PointerEvent {
    pub fn at(target: NodeId, x: i32, y: i32) -> Self {
        Self {
            target: Some(target),
            x,
            y,
        }
    }

    pub fn nowhere(x: i32, y: i32) -> Self {
        Self { target: None, x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    TouchStart(PointerEvent),
    TouchMove(PointerEvent),
    TouchEnd(PointerEvent),
    /// Activation (click) of a node.
    Click { target: NodeId },
    KeyDown(KeyEvent),
}

/// What the dispatcher did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// The event changed panel or session state.
    pub consumed: bool,
    /// The host should suppress its default action for the event.
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const IGNORED: EventOutcome = EventOutcome {
        consumed: false,
        prevent_default: false,
    };
    pub const CONSUMED: EventOutcome = EventOutcome {
        consumed: true,
        prevent_default: false,
    };
    pub const PREVENT_DEFAULT: EventOutcome = EventOutcome {
        consumed: true,
        prevent_default: true,
    };
}

impl<H: PanelHost> PanelManager<H> {
    /// Single entry point for every input event. Each call runs to completion
    /// and leaves the session either fully started, fully updated or cleared.
    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        match event {
            InputEvent::PointerDown(ev) => self.handle_press(ev, GrabSource::Pointer),
            InputEvent::TouchStart(ev) => self.handle_press(ev, GrabSource::Touch),
            InputEvent::PointerMove(ev) | InputEvent::TouchMove(ev) => self.handle_move(ev),
            InputEvent::PointerUp(_) | InputEvent::TouchEnd(_) => self.handle_release(),
            InputEvent::Click { target } => self.handle_click(target),
            InputEvent::KeyDown(ev) => self.handle_key(ev),
        }
    }

    /// Route an activated close or minimize control to its lifecycle operation.
    fn handle_click(&mut self, target: NodeId) -> EventOutcome {
        let Some(panel) = self.nearest_panel(target) else {
            return EventOutcome::IGNORED;
        };
        let Some(entry) = self.registry.get(panel) else {
            return EventOutcome::IGNORED;
        };
        let Some(op) = self
            .controls
            .iter()
            .find(|(role, _)| entry.control(**role) == Some(target))
            .map(|(_, op)| *op)
        else {
            return EventOutcome::IGNORED;
        };
        match self.apply(op, panel) {
            Ok(()) => EventOutcome::CONSUMED,
            Err(err) => {
                tracing::warn!(panel = ?panel, op = %op, error = %err, "control activation failed");
                EventOutcome::IGNORED
            }
        }
    }
}
