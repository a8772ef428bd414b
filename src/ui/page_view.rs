//! The paged content under the strip.  Two neighbouring pages slide side by
//! side as the pager position moves between them.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};

use super::tab_strip::put_clipped;
use super::theme::Theme;

pub struct PageView<'a> {
    titles: &'a [String],
    position: f64,
    block: Option<Block<'a>>,
}

impl<'a> PageView<'a> {
    pub fn new(titles: &'a [String], position: f64) -> Self {
        Self {
            titles,
            position,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn render_page(&self, page: usize, x: i32, area: Rect, buf: &mut Buffer) {
        let Some(title) = self.titles.get(page) else {
            return;
        };
        let body = format!("page {} of {}", page + 1, self.titles.len());
        let middle = area.y + area.height / 2;
        for (row, text, style) in [
            (middle.saturating_sub(1), title.as_str(), Theme::page_title_style()),
            (middle, body.as_str(), Theme::page_body_style()),
        ] {
            let len = text.chars().count() as i32;
            let left = x + (i32::from(area.width) - len).max(0) / 2;
            put_clipped(buf, area, left, row, text, style);
        }
    }
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height == 0 || self.position < 0.0 {
            return;
        }
        let page = self.position.floor();
        let shift = ((self.position - page) * f64::from(inner.width)).round() as i32;
        let page = page as usize;
        self.render_page(page, -shift, inner, buf);
        if shift > 0 {
            self.render_page(page + 1, i32::from(inner.width) - shift, inner, buf);
        }
    }
}
