//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout: tab strip on top, pages below, status bar last.
pub struct AppLayout {
    /// Label row followed by the indicator row.
    pub strip_area: Rect,
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // tab labels + indicator
                Constraint::Min(3),    // pages (takes all remaining space)
                Constraint::Length(1), // status / command bar
            ])
            .split(area);

        Self {
            strip_area: chunks[0],
            page_area: chunks[1],
            status_area: chunks[2],
        }
    }

    /// Column inside the strip when `(column, row)` hits the label row.
    pub fn strip_column(&self, column: u16, row: u16) -> Option<u16> {
        let area = self.strip_area;
        let on_labels = row == area.y && column >= area.x && column < area.x + area.width;
        on_labels.then(|| column - area.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_label_row_is_clickable() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 40, 20));
        assert_eq!(layout.strip_column(5, 0), Some(5));
        assert_eq!(layout.strip_column(5, 1), None);
        assert_eq!(layout.strip_column(40, 0), None);
    }
}
