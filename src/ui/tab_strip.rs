//! Ratatui widget that draws the tab strip from a [`TuiHost`] record.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use flip_tabs::core::{TabColor, TabState};

use super::tab_host::TuiHost;
use super::theme::Theme;

/// Labels on the first row, indicator bar on the second.
pub struct TabStrip<'a> {
    host: &'a TuiHost,
    indicator_color: TabColor,
}

impl<'a> TabStrip<'a> {
    pub fn new(host: &'a TuiHost, indicator_color: TabColor) -> Self {
        Self { host, indicator_color }
    }
}

impl Widget for TabStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let scroll = i32::from(self.host.scroll());

        for index in 0..self.host.len() {
            let Some((start, width)) = self.host.tab_span(index) else {
                continue;
            };
            let x = i32::from(start) - scroll;
            if x + i32::from(width) <= 0 {
                continue;
            }
            if x >= i32::from(area.width) {
                break;
            }
            let style = match self.host.paint(index) {
                Some((state, color)) => Theme::tab_style(color, state == TabState::Active),
                None => Theme::unpainted_tab_style(),
            };
            let label = self.host.label(index).unwrap_or_default();
            let cells = usize::from(width);
            let text: String = format!("{label:^cells$}").chars().take(cells).collect();
            put_clipped(buf, area, x, area.y, &text, style);
        }

        if area.height < 2 {
            return;
        }
        let (indicator_x, indicator_width) = self.host.indicator();
        let x = indicator_x.round() as i32 - scroll;
        let bar = "━".repeat(indicator_width.round().max(0.0) as usize);
        put_clipped(buf, area, x, area.y + 1, &bar, Theme::indicator_style(self.indicator_color));
    }
}

/// Write `text` starting at column `x` relative to `area`, dropping every
/// cell that falls outside it.
pub(crate) fn put_clipped(buf: &mut Buffer, area: Rect, x: i32, y: u16, text: &str, style: Style) {
    if y < area.y || y >= area.y + area.height {
        return;
    }
    for (offset, ch) in text.chars().enumerate() {
        let column = x + offset as i32;
        if column < 0 || column >= i32::from(area.width) {
            continue;
        }
        if let Some(cell) = buf.cell_mut((area.x + column as u16, y)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flip_tabs::core::TabHost;

    #[test]
    fn draws_labels_and_indicator_under_the_scroll() {
        let mut host = TuiHost::new(vec!["one".into(), "two".into(), "six".into()]);
        for slot in 0..host.len() {
            host.measure(&slot);
            host.set_width(&slot, 5.0);
        }
        host.set_indicator_width(5.0);
        host.translate_indicator(5.0);
        host.paint_tab(&1, TabState::Active, TabColor::DEEP_PINK);
        host.settle_scroll(Some(1), 10);

        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        TabStrip::new(&host, TabColor::DEEP_PINK).render(area, &mut buf);

        let row = |y: u16| (0..10).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>();
        assert_eq!(row(0), " one  two ");
        assert_eq!(row(1), "     ━━━━━");
        assert_eq!(buf[(6, 0)].fg, Theme::color(TabColor::DEEP_PINK));
    }
}
