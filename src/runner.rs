//! The interactive desk: a document of floating panels wired to a terminal.
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

use crate::config::PanelSettings;
use crate::document::{Document, PanelBlueprint};
use crate::drivers::{InputDriver, OutputDriver};
use crate::error::PanelResult;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::host::{NodeId, PanelHost};
use crate::panel::{PanelConfig, PanelManager};
use crate::render::{DeskView, render_desk};
use crate::translate::Translator;
use crate::ui::UiFrame;

pub const PANEL_WIDTH: u16 = 30;
pub const PANEL_HEIGHT: u16 = 7;

type StatusLine = Rc<RefCell<String>>;

pub struct Desk {
    manager: PanelManager<Document>,
    translator: Translator,
    status: StatusLine,
    screen: Rect,
}

impl Desk {
    /// A desk with `count` panels titled "Panel 1", "Panel 2", ...
    pub fn with_panels(settings: PanelSettings, count: usize) -> PanelResult<Self> {
        let mut doc = Document::new();
        let roots: Vec<(NodeId, String)> = (1..=count)
            .map(|i| {
                let title = format!("Panel {i}");
                let blueprint = PanelBlueprint::new(title.clone()).size(PANEL_WIDTH, PANEL_HEIGHT);
                (doc.build_panel(&blueprint).root, title)
            })
            .collect();

        let status = StatusLine::default();
        let mut manager = PanelManager::with_settings(doc, settings);
        for (root, title) in roots {
            manager.init(root, status_callbacks(&status, &title))?;
        }
        Ok(Self {
            manager,
            translator: Translator::new(),
            status,
            screen: Rect::default(),
        })
    }

    pub fn manager(&self) -> &PanelManager<Document> {
        &self.manager
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.translator.focused()
    }

    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        if let Event::Key(key) = event
            && is_quit(key)
        {
            return ControlFlow::Quit;
        }
        self.translator.handle(&mut self.manager, event, self.screen);
        ControlFlow::Continue
    }

    pub fn draw(&mut self, frame: &mut UiFrame<'_>) {
        self.screen = frame.area();
        let status = self.status.borrow();
        let view = DeskView {
            focused: self.translator.focused(),
            status: status.as_str(),
        };
        render_desk(frame, &self.manager, view);
    }
}

fn status_callbacks(status: &StatusLine, title: &str) -> PanelConfig {
    let report = |verb: &'static str| {
        let status = status.clone();
        let title = title.to_string();
        move |_: &dyn PanelHost, _: NodeId| {
            *status.borrow_mut() = format!("{verb} {title}");
            true
        }
    };
    PanelConfig::new()
        .on_minimize(report("minimized"))
        .on_restore(report("restored"))
        .on_close(report("closed"))
}

pub fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
}

/// Run the desk until a quit key arrives, restoring the terminal on the way
/// out even when the loop fails.
pub fn run_desk<O, D>(
    output: &mut O,
    input: D,
    desk: &mut Desk,
    poll_interval: Duration,
) -> io::Result<()>
where
    O: OutputDriver,
    D: InputDriver,
{
    output.enter()?;
    let result = pump(output, input, desk, poll_interval);
    output.exit()?;
    result
}

fn pump<O, D>(output: &mut O, input: D, desk: &mut Desk, poll_interval: Duration) -> io::Result<()>
where
    O: OutputDriver,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(input, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;
    event_loop.run(|_, event| match event {
        Some(event) => Ok(desk.handle_event(&event)),
        None => {
            output.draw(|mut frame| desk.draw(&mut frame))?;
            Ok(ControlFlow::Continue)
        }
    })
}
