//! UiFrame: a thin wrapper around a ratatui buffer that clips every write to
//! the visible area.
//!
//! Panels carry signed positions and may hang off any edge of the screen.
//! Drawing through `UiFrame` lets the renderer address cells with signed
//! coordinates without guarding each write.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::chrome::FloatRect;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer(&self) -> &Buffer {
        self.buffer
    }

    /// Restrict further drawing to `area` (intersected with the current one).
    pub fn clipped(&mut self, area: Rect) -> UiFrame<'_> {
        UiFrame {
            area: area.intersection(self.area),
            buffer: &mut *self.buffer,
        }
    }

    /// Paint every visible cell of `rect` with a blank in `style`.
    pub fn fill(&mut self, rect: FloatRect, style: Style) {
        let Some(visible) = rect.clip(self.area) else {
            return;
        };
        for y in visible.y..visible.y.saturating_add(visible.height) {
            for x in visible.x..visible.x.saturating_add(visible.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }

    /// Write `text` starting at signed `(x, y)`, dropping whatever falls
    /// outside the visible area.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, style: Style) {
        let top = self.area.y as i32;
        let bottom = top + self.area.height as i32;
        if y < top || y >= bottom {
            return;
        }
        let left = self.area.x as i32;
        let right = left + self.area.width as i32;
        for (i, ch) in text.chars().enumerate() {
            let cx = x + i as i32;
            if cx < left {
                continue;
            }
            if cx >= right {
                break;
            }
            if let Some(cell) = self.buffer.cell_mut((cx as u16, y as u16)) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
    }
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}
