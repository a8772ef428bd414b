//! Central application state.
//!
//! Everything the event loop mutates lives here.  The tab control itself is
//! a shared handle, so navigation tasks hold clones of it.

use std::sync::Arc;

use ratatui::layout::Rect;

use flip_tabs::config::AppConfig;
use flip_tabs::core::feedback::TabPalette;
use flip_tabs::core::{FeedbackPolicy, TabFlipView, TabTemplate};

use crate::ui::smooth_scroll::PageScroll;
use crate::ui::tab_host::TuiHost;

use super::event::{AppEvent, EventSender};

pub type TabView = TabFlipView<String, TuiHost>;

/// Damping for the pager animation at the 16 ms tick.
const PAGER_SPEED: f64 = 0.3;

/// Top-level application state.
pub struct AppState {
    pub view: TabView,
    /// Bumped on every rebuild of `view`, to drop events from older ones.
    pub view_generation: u64,
    /// Page titles, also the tab items.
    pub titles: Vec<String>,
    pub pager: PageScroll,
    pub config: AppConfig,
    /// Tab number typed so far, confirmed with Enter.
    pub typed: String,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Last known terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
    /// The strip is drawn but not yet measured by the control.
    pub needs_measure: bool,
    pub events: EventSender,
}

impl AppState {
    pub fn new(titles: Vec<String>, config: AppConfig, start: usize, events: EventSender) -> Self {
        let view = build_view(&titles, &config, start, 0, &events);
        Self {
            pager: PageScroll::new(titles.len(), start, PAGER_SPEED),
            view,
            view_generation: 0,
            titles,
            config,
            typed: String::new(),
            should_quit: false,
            status_message: None,
            terminal_area: Rect::default(),
            needs_measure: true,
            events,
        }
    }

    /// Swap the feedback policy.  The control fixes its policy at
    /// construction, so a fresh one is built at the current selection.
    pub fn toggle_feedback(&mut self) {
        self.config.feedback = match self.config.feedback {
            FeedbackPolicy::DirectPaint => FeedbackPolicy::Notify,
            FeedbackPolicy::Notify => FeedbackPolicy::DirectPaint,
        };
        let start = self.view.selected_index().unwrap_or(0);
        self.view.cancel_navigation();
        self.view_generation += 1;
        self.view = build_view(&self.titles, &self.config, start, self.view_generation, &self.events);
        self.needs_measure = true;
        tracing::debug!(policy = %self.config.feedback, start, "tab control rebuilt");
    }

    pub fn palette(&self) -> TabPalette {
        TabPalette {
            selected: self.view.selected_tab_color(),
            inactive: self.view.inactive_tab_color(),
        }
    }

    /// Advance the pager one frame, feeding swipe offsets to the control and
    /// otherwise keeping the pager on the selected page.
    pub fn advance_pager(&mut self) {
        if !self.pager.is_swiping() {
            if let Some(selected) = self.view.selected_index() {
                self.pager.follow(selected);
            }
        }
        if let Some(position) = self.pager.tick() {
            self.view.on_offset_changing(self.config.offset_baseline + position);
            if !self.pager.is_animating() {
                self.view.on_offset_changed();
            }
        }
    }
}

/// Tab header for a page title.
fn header_template() -> TabTemplate<String> {
    Arc::new(|title: &String| title.clone())
}

fn build_view(titles: &[String], config: &AppConfig, start: usize, generation: u64, events: &EventSender) -> TabView {
    let view = TabFlipView::new(TuiHost::default(), titles.to_vec(), config.control_options(start));
    view.set_tab_template(Some(header_template()));

    let labels: Vec<String> = (0..titles.len())
        .map(|index| view.tab_label(index).unwrap_or_default())
        .collect();
    view.with_host(|host| host.set_labels(labels));

    let tx = events.clone();
    view.on_tab_selection_changed(move |event| {
        let _ = tx.send(AppEvent::Selection {
            generation,
            event: event.clone(),
        });
    });
    view
}
