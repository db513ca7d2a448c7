use ratatui::style::{Color, Modifier, Style};

// Centralized styles for the desk. Rendering and tests both read them from
// here so a restyle is a one-file change.

pub fn desk() -> Style {
    Style::default().bg(Color::Reset)
}

pub fn panel_body() -> Style {
    Style::default().bg(Color::Black).fg(Color::Gray)
}

pub fn border() -> Style {
    Style::default().bg(Color::Black).fg(Color::DarkGray)
}

pub fn moving_border() -> Style {
    Style::default()
        .bg(Color::Black)
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn header() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn header_focused() -> Style {
    Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn header_grabbed() -> Style {
    Style::default()
        .bg(Color::Yellow)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

pub fn control() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::Gray)
}

pub fn dock() -> Style {
    Style::default().bg(Color::Gray).fg(Color::Black)
}

pub fn dock_entry() -> Style {
    Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}
