//! A host with no screen: it fakes measurement and records every call.
//!
//! Useful for driving the control from tests or from a process that only
//! wants selection events.

use std::collections::HashMap;

use super::host::{ScrollAlignment, TabColor, TabHost, TabState};

/// Container handle handed out by [`HeadlessHost`].
pub type HeadlessContainer = u64;

/// One outbound call, in the order the control made it.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Measure(HeadlessContainer),
    SetWidth(HeadlessContainer, f64),
    ScrollIntoView(usize, ScrollAlignment),
    Paint(HeadlessContainer, TabState, TabColor),
    TranslateIndicator(f64),
    IndicatorWidth(f64),
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    desired: Vec<f64>,
    realized: Vec<Option<HeadlessContainer>>,
    next_id: HeadlessContainer,
    widths: HashMap<HeadlessContainer, f64>,
    paint: HashMap<HeadlessContainer, TabState>,
    indicator_x: f64,
    calls: Vec<HostCall>,
}

impl HeadlessHost {
    /// A host with every tab realized and the given desired widths.
    pub fn with_widths(desired: Vec<f64>) -> Self {
        let mut host = Self {
            realized: vec![None; desired.len()],
            desired,
            ..Self::default()
        };
        for index in 0..host.desired.len() {
            host.realize(index);
        }
        host
    }

    /// `count` realized tabs, all `width` wide.
    pub fn uniform(count: usize, width: f64) -> Self {
        Self::with_widths(vec![width; count])
    }

    /// Give `index` a fresh container, dropping any previous one.
    pub fn realize(&mut self, index: usize) -> Option<HeadlessContainer> {
        let slot = self.realized.get_mut(index)?;
        let id = self.next_id;
        self.next_id += 1;
        *slot = Some(id);
        Some(id)
    }

    /// Drop the container for `index`, as a virtualizing host would.
    pub fn unrealize(&mut self, index: usize) {
        if let Some(slot) = self.realized.get_mut(index) {
            *slot = None;
        }
    }

    /// Move the container of `from` over to `to`, as a recycling host would.
    pub fn recycle(&mut self, from: usize, to: usize) -> Option<HeadlessContainer> {
        if to >= self.realized.len() {
            return None;
        }
        let id = self.realized.get_mut(from)?.take()?;
        self.realized[to] = Some(id);
        Some(id)
    }

    pub fn container(&self, index: usize) -> Option<HeadlessContainer> {
        self.realized.get(index).copied().flatten()
    }

    /// Last highlight applied to the tab currently at `index`.
    pub fn tab_state(&self, index: usize) -> Option<TabState> {
        self.container(index).and_then(|c| self.paint.get(&c).copied())
    }

    pub fn width_of(&self, index: usize) -> Option<f64> {
        self.container(index).and_then(|c| self.widths.get(&c).copied())
    }

    pub fn indicator_x(&self) -> f64 {
        self.indicator_x
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Paint calls recorded so far, as `(index, state)` pairs.
    pub fn paints(&self) -> Vec<(usize, TabState)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Paint(c, state, _) => self.index_for_container(c).map(|i| (i, *state)),
                _ => None,
            })
            .collect()
    }
}

impl TabHost for HeadlessHost {
    type Container = HeadlessContainer;

    fn container_for_index(&mut self, index: usize) -> Option<HeadlessContainer> {
        self.container(index)
    }

    fn index_for_container(&self, container: &HeadlessContainer) -> Option<usize> {
        self.realized.iter().position(|slot| *slot == Some(*container))
    }

    fn measure(&mut self, container: &HeadlessContainer) {
        self.calls.push(HostCall::Measure(*container));
    }

    fn desired_width(&self, container: &HeadlessContainer) -> f64 {
        self.index_for_container(container)
            .and_then(|i| self.desired.get(i).copied())
            .unwrap_or(0.0)
    }

    fn set_width(&mut self, container: &HeadlessContainer, width: f64) {
        self.widths.insert(*container, width);
        self.calls.push(HostCall::SetWidth(*container, width));
    }

    fn scroll_into_view(&mut self, index: usize, alignment: ScrollAlignment) {
        self.calls.push(HostCall::ScrollIntoView(index, alignment));
    }

    fn paint_tab(&mut self, container: &HeadlessContainer, state: TabState, color: TabColor) {
        self.paint.insert(*container, state);
        self.calls.push(HostCall::Paint(*container, state, color));
    }

    fn translate_indicator(&mut self, x: f64) {
        self.indicator_x = x;
        self.calls.push(HostCall::TranslateIndicator(x));
    }

    fn set_indicator_width(&mut self, width: f64) {
        self.calls.push(HostCall::IndicatorWidth(width));
    }
}
