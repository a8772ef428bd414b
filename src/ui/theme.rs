//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use flip_tabs::core::TabColor;

/// Central theme; every widget takes its styles from here.
pub struct Theme;

impl Theme {
    // ── tab strip ──────────────────────────────────────────────
    /// Label style for a tab painted with `color`.
    pub fn tab_style(color: TabColor, active: bool) -> Style {
        let style = Style::default().fg(Self::color(color));
        if active {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Label style before the control has painted the tab.
    pub fn unpainted_tab_style() -> Style {
        Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
    }

    pub fn indicator_style(color: TabColor) -> Style {
        Style::default().fg(Self::color(color))
    }

    pub fn color(color: TabColor) -> Color {
        Color::Rgb(color.r, color.g, color.b)
    }

    // ── pages ──────────────────────────────────────────────────
    pub fn page_title_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn page_body_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn command_input_style() -> Style {
        Style::default().fg(Color::Yellow)
    }
}
