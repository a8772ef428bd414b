//! Construction-time options for [`super::TabFlipView`].

use std::time::Duration;

use super::feedback::FeedbackPolicy;
use super::host::TabColor;
use super::navigation::{NavigationPolicy, DEFAULT_STEP_DELAY};
use super::offset::{DEFAULT_BASELINE, DEFAULT_EPSILON};

#[derive(Debug, Clone, PartialEq)]
pub struct ControlOptions {
    pub feedback: FeedbackPolicy,
    pub navigation: NavigationPolicy,
    /// Pause between two steps of a walk.
    pub step_delay: Duration,
    /// Host offset of the first page.
    pub offset_baseline: f64,
    /// Bias added to corrected offsets.
    pub offset_epsilon: f64,
    pub selected_tab_color: TabColor,
    pub inactive_tab_color: TabColor,
    pub indicator_color: TabColor,
    /// Index selected once the strip is measured.
    pub initial_index: usize,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            feedback: FeedbackPolicy::default(),
            navigation: NavigationPolicy::default(),
            step_delay: DEFAULT_STEP_DELAY,
            offset_baseline: DEFAULT_BASELINE,
            offset_epsilon: DEFAULT_EPSILON,
            selected_tab_color: TabColor::DEEP_PINK,
            inactive_tab_color: TabColor::DARK_GRAY,
            indicator_color: TabColor::DEEP_PINK,
            initial_index: 0,
        }
    }
}
