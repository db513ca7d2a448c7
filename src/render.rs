//! Draws the desk: panels back to front, then the dock row.
use crate::chrome::{DockEntry, FloatRect, PanelChrome, desk_area, dock_entries, dock_row};
use crate::document::Document;
use crate::host::{ControlRole, NodeId, PanelHost};
use crate::panel::PanelManager;
use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};

pub const KEY_HELP: &str = "Tab focus | Enter grab | arrows move | Ctrl+Q quit";

/// What the renderer needs besides the panels themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeskView<'a> {
    /// Handle that currently has keyboard focus.
    pub focused: Option<NodeId>,
    /// Latest status line, shown in the dock.
    pub status: &'a str,
}

pub fn render_desk(frame: &mut UiFrame<'_>, pm: &PanelManager<Document>, view: DeskView<'_>) {
    let screen = frame.area();
    frame.fill(
        FloatRect {
            x: screen.x as i32,
            y: screen.y as i32,
            width: screen.width,
            height: screen.height,
        },
        theme::desk(),
    );

    {
        let mut desk = frame.clipped(desk_area(screen));
        for panel in pm.panels() {
            if pm.is_minimized(panel) {
                continue;
            }
            if let Some(chrome) = PanelChrome::of(pm, panel) {
                draw_panel(&mut desk, pm, &chrome, view.focused);
            }
        }
    }

    draw_dock(frame, &dock_entries(pm, screen), view.status);
}

fn draw_panel(
    frame: &mut UiFrame<'_>,
    pm: &PanelManager<Document>,
    chrome: &PanelChrome,
    focused: Option<NodeId>,
) {
    let doc = pm.host();
    let outer = chrome.outer;
    if outer.width < 2 || outer.height < 2 {
        return;
    }
    let moving = pm.active_panel() == Some(chrome.panel);
    let border = if moving {
        theme::moving_border()
    } else {
        theme::border()
    };
    frame.fill(outer, theme::panel_body());

    // sides and bottom edge; the header row is the top edge
    let inner_width = outer.width as usize - 2;
    for y in outer.y + 1..outer.bottom() - 1 {
        frame.put_str(outer.x, y, "│", border);
        frame.put_str(outer.right() - 1, y, "│", border);
    }
    let bottom = format!("└{}┘", "─".repeat(inner_width));
    frame.put_str(outer.x, outer.bottom() - 1, &bottom, border);

    let handle = doc.find_control(chrome.panel, ControlRole::Handle);
    let grabbed = handle.and_then(|h| doc.grabbed(h)).unwrap_or(false);
    let header_style = if grabbed {
        theme::header_grabbed()
    } else if handle.is_some() && handle == focused {
        theme::header_focused()
    } else {
        theme::header()
    };
    frame.fill(chrome.header, header_style);

    let controls = [chrome.minimize, chrome.close].into_iter().flatten().count();
    let title_room = inner_width.saturating_sub(controls * 3 + 1);
    let title = doc.label(chrome.panel).unwrap_or_default();
    let marker = if grabbed { "+ " } else { "" };
    let title = truncate_to_width(&format!("{marker}{title}"), title_room);
    frame.put_str(outer.x + 1, outer.y, &title, header_style);

    if let Some((_, rect)) = chrome.minimize {
        frame.put_str(rect.x, rect.y, "[_]", theme::control());
    }
    if let Some((_, rect)) = chrome.close {
        frame.put_str(rect.x, rect.y, "[x]", theme::control());
    }

    let position = doc.position(chrome.panel);
    let lines = [
        format!("top {} left {}", position.top, position.left),
        format!("z {}", doc.stacking(chrome.panel)),
    ];
    let rows = (outer.height as i32 - 2).max(0) as usize;
    for (row, line) in lines.iter().take(rows).enumerate() {
        let text = truncate_to_width(line, inner_width.saturating_sub(1));
        frame.put_str(outer.x + 2, outer.y + 1 + row as i32, &text, theme::panel_body());
    }
}

fn draw_dock(frame: &mut UiFrame<'_>, entries: &[DockEntry], status: &str) {
    let screen = frame.area();
    let Some(row) = dock_row(screen) else {
        return;
    };
    let row_rect = FloatRect {
        x: screen.x as i32,
        y: row as i32,
        width: screen.width,
        height: 1,
    };
    frame.fill(row_rect, theme::dock());

    let mut end = screen.x as i32 + 1;
    for entry in entries {
        frame.put_str(entry.rect.x, entry.rect.y, &entry.label, theme::dock_entry());
        end = entry.rect.right() + 1;
    }

    let text = if status.is_empty() {
        KEY_HELP.to_string()
    } else {
        format!("{status} | {KEY_HELP}")
    };
    let room = (row_rect.right() - end - 1).max(0) as usize;
    let text = truncate_to_width(&text, room);
    let x = row_rect.right() - 1 - text.chars().count() as i32;
    frame.put_str(x, row as i32, &text, theme::dock());
}
