//! Floating panels: draggable, minimizable, closable panels driven by
//! pointer, touch and keyboard input.
//!
//! [`panel::PanelManager`] holds every piece of state and works against any
//! [`host::PanelHost`]. [`document::Document`] is an in-memory host; the
//! terminal front end (`chrome`, `render`, `translate`, `runner`) draws a
//! document with ratatui and feeds it crossterm events.

pub mod chrome;
pub mod config;
pub mod constants;
pub mod document;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod host;
pub mod input;
pub mod panel;
pub mod render;
pub mod runner;
pub mod state;
pub mod theme;
pub mod tracing_sub;
pub mod translate;
pub mod ui;

pub use document::{Document, PanelBlueprint, PanelNodes};
pub use error::{PanelError, PanelResult};
pub use host::{ControlRole, Indicator, NodeId, PanelHost, Position};
pub use input::{EventOutcome, InputEvent, Key, KeyEvent, Modifiers, PointerEvent};
pub use panel::{PanelConfig, PanelManager, PanelOp};
