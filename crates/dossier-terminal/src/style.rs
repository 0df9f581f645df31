//! Terminal style helpers using crossterm ANSI escape sequences.

use crossterm::style::{Attribute, Color, SetAttribute, SetForegroundColor};

/// Wrap text in bold.
pub fn bold(text: &str) -> String {
    format!(
        "{}{}{}",
        SetAttribute(Attribute::Bold),
        text,
        SetAttribute(Attribute::Reset)
    )
}

/// Wrap text in dim (faint).
pub fn dim(text: &str) -> String {
    format!(
        "{}{}{}",
        SetAttribute(Attribute::Dim),
        text,
        SetAttribute(Attribute::Reset)
    )
}

/// Wrap text in a foreground color.
pub fn fg_color(text: &str, color: Color) -> String {
    format!(
        "{}{}{}",
        SetForegroundColor(color),
        text,
        SetForegroundColor(Color::Reset)
    )
}

/// Render an answer-section title: bold cyan.
pub fn section_title(text: &str) -> String {
    fg_color(&bold(text), Color::Cyan)
}

/// Render the company header above a structured answer: bold green.
pub fn company_header(text: &str) -> String {
    fg_color(&bold(text), Color::Green)
}
