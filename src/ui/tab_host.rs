//! Terminal implementation of [`TabHost`].
//!
//! Widths are terminal cells.  The host only records what the control asks
//! for (widths, highlights, indicator placement, scroll requests); the
//! [`super::tab_strip::TabStrip`] widget draws from that record.

use ratatui::text::Span;

use flip_tabs::core::feedback::{FeedbackEvent, TabPalette};
use flip_tabs::core::{ScrollAlignment, TabColor, TabHost, TabState};

/// Container handle: the tab's slot in the strip.  Every tab is realized up
/// front, so slots never move.
pub type TabSlot = usize;

/// Horizontal padding around each label, in cells.
const LABEL_PADDING: f64 = 2.0;

#[derive(Debug, Default)]
pub struct TuiHost {
    labels: Vec<String>,
    desired: Vec<f64>,
    widths: Vec<f64>,
    paints: Vec<Option<(TabState, TabColor)>>,
    indicator_x: f64,
    indicator_width: f64,
    /// First visible cell of the strip.
    scroll: u16,
    pending_scroll: Option<(usize, ScrollAlignment)>,
}

impl TuiHost {
    pub fn new(labels: Vec<String>) -> Self {
        let count = labels.len();
        Self {
            labels,
            desired: vec![0.0; count],
            widths: vec![0.0; count],
            paints: vec![None; count],
            ..Self::default()
        }
    }

    /// Replace every tab, dropping all recorded state.
    pub fn set_labels(&mut self, labels: Vec<String>) {
        *self = Self::new(labels);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn paint(&self, index: usize) -> Option<(TabState, TabColor)> {
        self.paints.get(index).copied().flatten()
    }

    pub fn indicator(&self) -> (f64, f64) {
        (self.indicator_x, self.indicator_width)
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Cell span `(start, width)` of a tab on the unscrolled strip.
    pub fn tab_span(&self, index: usize) -> Option<(u16, u16)> {
        if index >= self.len() {
            return None;
        }
        let start = (0..index).map(|i| self.tab_cells(i)).fold(0, u16::saturating_add);
        Some((start, self.tab_cells(index)))
    }

    fn tab_cells(&self, index: usize) -> u16 {
        let assigned = self.widths[index];
        let width = if assigned > 0.0 {
            assigned
        } else {
            // Not measured yet: natural width.
            label_cells(&self.labels[index])
        };
        width.round().max(1.0) as u16
    }

    fn total_cells(&self) -> u16 {
        (0..self.len()).map(|i| self.tab_cells(i)).fold(0, u16::saturating_add)
    }

    /// Tab under a column of the strip viewport.
    pub fn hit_test(&self, column: u16) -> Option<usize> {
        let absolute = self.scroll.saturating_add(column);
        (0..self.len()).find(|&index| {
            self.tab_span(index)
                .is_some_and(|(start, width)| absolute >= start && absolute < start.saturating_add(width))
        })
    }

    /// Apply a pending scroll request, then keep `selected` in view.
    pub fn settle_scroll(&mut self, selected: Option<usize>, viewport: u16) {
        if let Some((index, alignment)) = self.pending_scroll.take() {
            self.reveal(index, alignment, viewport);
        }
        if let Some(index) = selected {
            self.reveal(index, ScrollAlignment::Default, viewport);
        }
        let max = self.total_cells().saturating_sub(viewport);
        self.scroll = self.scroll.min(max);
    }

    fn reveal(&mut self, index: usize, alignment: ScrollAlignment, viewport: u16) {
        let Some((start, width)) = self.tab_span(index) else {
            return;
        };
        match alignment {
            ScrollAlignment::Leading => self.scroll = start,
            ScrollAlignment::Default => {
                if start < self.scroll {
                    self.scroll = start;
                } else if start.saturating_add(width) > self.scroll.saturating_add(viewport) {
                    self.scroll = start.saturating_add(width).saturating_sub(viewport);
                }
            }
        }
    }

    /// Highlight the endpoints of a notified selection change ourselves.
    pub fn apply_event(&mut self, event: &FeedbackEvent<TabSlot>, palette: TabPalette) {
        if let Some(old) = event.old_container {
            self.paint_tab(&old, TabState::Inactive, palette.inactive);
        }
        if let Some(new) = event.new_container {
            self.paint_tab(&new, TabState::Active, palette.selected);
        }
        let width = self.widths.get(event.new_index).copied().unwrap_or(0.0);
        self.indicator_width = width;
        self.indicator_x = width * event.new_index as f64;
    }
}

fn label_cells(label: &str) -> f64 {
    Span::raw(label).width() as f64 + LABEL_PADDING
}

impl TabHost for TuiHost {
    type Container = TabSlot;

    fn container_for_index(&mut self, index: usize) -> Option<TabSlot> {
        (index < self.len()).then_some(index)
    }

    fn index_for_container(&self, container: &TabSlot) -> Option<usize> {
        (*container < self.len()).then_some(*container)
    }

    fn measure(&mut self, container: &TabSlot) {
        if let Some(label) = self.labels.get(*container) {
            self.desired[*container] = label_cells(label);
        }
    }

    fn desired_width(&self, container: &TabSlot) -> f64 {
        self.desired.get(*container).copied().unwrap_or(0.0)
    }

    fn set_width(&mut self, container: &TabSlot, width: f64) {
        if let Some(slot) = self.widths.get_mut(*container) {
            *slot = width;
        }
    }

    fn scroll_into_view(&mut self, index: usize, alignment: ScrollAlignment) {
        self.pending_scroll = Some((index, alignment));
    }

    fn paint_tab(&mut self, container: &TabSlot, state: TabState, color: TabColor) {
        if let Some(slot) = self.paints.get_mut(*container) {
            *slot = Some((state, color));
        }
    }

    fn translate_indicator(&mut self, x: f64) {
        self.indicator_x = x;
    }

    fn set_indicator_width(&mut self, width: f64) {
        self.indicator_width = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> TuiHost {
        let mut host = TuiHost::new(vec!["a".into(), "bbbb".into(), "cc".into()]);
        for slot in 0..host.len() {
            host.measure(&slot);
        }
        host
    }

    #[test]
    fn desired_width_includes_padding() {
        let host = host();
        assert_eq!(host.desired_width(&1), 6.0);
    }

    #[test]
    fn hit_test_follows_scroll() {
        let mut host = host();
        for slot in 0..host.len() {
            host.set_width(&slot, 6.0);
        }
        assert_eq!(host.hit_test(7), Some(1));
        host.scroll_into_view(2, ScrollAlignment::Leading);
        host.settle_scroll(None, 6);
        assert_eq!(host.scroll(), 12);
        assert_eq!(host.hit_test(0), Some(2));
        assert_eq!(host.hit_test(6), None);
    }

    #[test]
    fn selected_tab_is_kept_in_view() {
        let mut host = host();
        for slot in 0..host.len() {
            host.set_width(&slot, 6.0);
        }
        host.settle_scroll(Some(2), 8);
        assert_eq!(host.scroll(), 10);
        host.settle_scroll(Some(0), 8);
        assert_eq!(host.scroll(), 0);
    }
}
