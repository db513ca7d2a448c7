//! Cell geometry of panels in the terminal host: where the header, the
//! controls and the dock entries sit. Shared by hit testing and rendering so
//! both agree on every cell.

use ratatui::layout::Rect;

use crate::document::Document;
use crate::host::{ControlRole, NodeId, PanelHost};
use crate::panel::PanelManager;

/// Signed rectangle origin with unsigned size. Panels dragged past the
/// top-left corner keep negative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// The visible part inside `bounds`, if any.
    pub fn clip(&self, bounds: Rect) -> Option<Rect> {
        let x0 = self.x.max(bounds.x as i32);
        let y0 = self.y.max(bounds.y as i32);
        let x1 = self.right().min(bounds.x as i32 + bounds.width as i32);
        let y1 = self.bottom().min(bounds.y as i32 + bounds.height as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }
}

/// Width of a `[_]` / `[x]` control glyph.
pub const CONTROL_WIDTH: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelChrome {
    pub panel: NodeId,
    pub outer: FloatRect,
    /// Top border row; pressing it grabs the panel.
    pub header: FloatRect,
    pub minimize: Option<(NodeId, FloatRect)>,
    pub close: Option<(NodeId, FloatRect)>,
}

impl PanelChrome {
    pub fn of(pm: &PanelManager<Document>, panel: NodeId) -> Option<Self> {
        let entry = pm.entry(panel)?;
        let doc = pm.host();
        let position = doc.position(panel);
        let (width, height) = doc.size(panel);
        let outer = FloatRect {
            x: position.left,
            y: position.top,
            width,
            height,
        };
        let header = FloatRect { height: 1, ..outer };

        // Controls sit right-aligned in the header, inside the corner.
        let mut slot = outer.right() - 1;
        let mut place = |node: Option<NodeId>| {
            node.filter(|_| width > CONTROL_WIDTH * 2 + 4).map(|id| {
                slot -= CONTROL_WIDTH as i32;
                let rect = FloatRect {
                    x: slot,
                    y: outer.y,
                    width: CONTROL_WIDTH,
                    height: 1,
                };
                (id, rect)
            })
        };
        let close = place(entry.control(ControlRole::Close));
        let minimize = place(entry.control(ControlRole::Minimize));

        Some(Self {
            panel,
            outer,
            header,
            minimize,
            close,
        })
    }

    /// Node under `(x, y)` within this panel, or `None` outside it.
    pub fn hit(&self, doc: &Document, x: i32, y: i32) -> Option<NodeId> {
        if !self.outer.contains(x, y) {
            return None;
        }
        for (node, rect) in [self.close, self.minimize].into_iter().flatten() {
            if rect.contains(x, y) {
                return Some(node);
            }
        }
        if self.header.contains(x, y) {
            return doc.find_control(self.panel, ControlRole::Handle);
        }
        Some(body_of(doc, self.panel))
    }
}

/// The first child that is not a control, falling back to the root.
pub fn body_of(doc: &Document, panel: NodeId) -> NodeId {
    doc.children(panel)
        .iter()
        .copied()
        .find(|id| {
            ![ControlRole::Handle, ControlRole::Close, ControlRole::Minimize]
                .into_iter()
                .any(|role| doc.has_role(*id, role))
        })
        .unwrap_or(panel)
}

/// Topmost visible node under `(x, y)`.
pub fn hit_test(pm: &PanelManager<Document>, x: i32, y: i32) -> Option<NodeId> {
    pm.panels()
        .into_iter()
        .rev()
        .filter(|id| !pm.is_minimized(*id))
        .filter_map(|id| PanelChrome::of(pm, id))
        .find_map(|chrome| chrome.hit(pm.host(), x, y))
}

/// Screen rows reserved for the panels (everything above the dock).
pub fn desk_area(screen: Rect) -> Rect {
    Rect {
        height: screen.height.saturating_sub(1),
        ..screen
    }
}

pub fn dock_row(screen: Rect) -> Option<u16> {
    (screen.height > 0).then(|| screen.y + screen.height - 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockEntry {
    pub panel: NodeId,
    pub label: String,
    pub rect: FloatRect,
}

/// Dock labels for minimized panels, left to right.
pub fn dock_entries(pm: &PanelManager<Document>, screen: Rect) -> Vec<DockEntry> {
    let Some(row) = dock_row(screen) else {
        return Vec::new();
    };
    let mut x = screen.x as i32 + 1;
    let mut ids: Vec<NodeId> = pm
        .panels()
        .into_iter()
        .filter(|id| pm.is_minimized(*id))
        .collect();
    ids.sort();
    ids.into_iter()
        .map(|id| {
            let title = pm.host().label(id).unwrap_or_default();
            let label = format!("[{title}]");
            let width = label.chars().count() as u16;
            let rect = FloatRect {
                x,
                y: row as i32,
                width,
                height: 1,
            };
            x += width as i32 + 1;
            DockEntry {
                panel: id,
                label,
                rect,
            }
        })
        .collect()
}
