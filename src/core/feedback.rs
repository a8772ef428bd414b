//! Visual feedback for selection changes.
//!
//! Two policies:
//!
//! * **Direct paint**: the control itself colors the affected tabs through
//!   [`TabHost::paint_tab`] and slides the indicator bar with every sample.
//! * **Notify**: the control only emits a [`FeedbackEvent`]; the host decides
//!   how a selected tab looks.

use std::fmt;
use std::str::FromStr;

use super::host::{TabColor, TabHost, TabState};
use super::offset::OffsetSample;
use super::resolver::SelectionChange;
use super::tab_set::TabSet;

/// How resolved selection changes reach the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackPolicy {
    DirectPaint,
    #[default]
    Notify,
}

impl FeedbackPolicy {
    pub const ALL: &[FeedbackPolicy] = &[FeedbackPolicy::DirectPaint, FeedbackPolicy::Notify];

    pub fn label(self) -> &'static str {
        match self {
            FeedbackPolicy::DirectPaint => "paint",
            FeedbackPolicy::Notify => "notify",
        }
    }
}

impl fmt::Display for FeedbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FeedbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paint" | "direct" | "direct-paint" => Ok(FeedbackPolicy::DirectPaint),
            "notify" | "event" => Ok(FeedbackPolicy::Notify),
            other => Err(format!("unknown feedback policy `{other}`")),
        }
    }
}

/// Emitted once per resolved selection change under [`FeedbackPolicy::Notify`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackEvent<C> {
    pub old_index: Option<usize>,
    pub old_container: Option<C>,
    pub new_index: usize,
    /// `None` when the host has no realized container for the new tab.
    pub new_container: Option<C>,
}

/// Active / inactive colors used by the direct-paint policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabPalette {
    pub selected: TabColor,
    pub inactive: TabColor,
}

impl TabPalette {
    pub fn color_for(&self, state: TabState) -> TabColor {
        match state {
            TabState::Active => self.selected,
            TabState::Inactive => self.inactive,
        }
    }
}

/// One tab to repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabPaint {
    pub index: usize,
    pub state: TabState,
}

/// Indicator translation for a sample.
///
/// The bar sits under the current page and only slides towards the next one
/// when a next page exists, so overscrolling past the last tab never pushes
/// it off the strip.  Overscroll before the first page pins it at zero.
pub fn indicator_offset(sample: OffsetSample, item_width: f64, items_count: usize) -> f64 {
    if sample.page_index < 0 {
        return 0.0;
    }
    let last = items_count.saturating_sub(1) as i64;
    let page = sample.page_index.min(last);
    let mut offset = item_width * page as f64;
    if page < last {
        offset += item_width * sample.fractional_part;
    }
    offset
}

/// Tabs to repaint after the scroll resolved `change` from `sample`.
///
/// Of the two pages straddling the sample, the resolved one turns active and
/// the other inactive.  A previously selected tab outside that pair (a fast
/// fling skipping pages) is turned off as well.  Indices past the last tab
/// are dropped.
pub fn scroll_paints(sample: OffsetSample, change: SelectionChange, items_count: usize) -> Vec<TabPaint> {
    let mut paints = Vec::with_capacity(3);
    let push_inactive = |index: i64, paints: &mut Vec<TabPaint>| {
        if index < 0 || index as usize >= items_count {
            return;
        }
        let index = index as usize;
        if index == change.new || paints.iter().any(|p: &TabPaint| p.index == index) {
            return;
        }
        paints.push(TabPaint {
            index,
            state: TabState::Inactive,
        });
    };

    if let Some(old) = change.old {
        push_inactive(old as i64, &mut paints);
    }
    push_inactive(sample.page_index, &mut paints);
    push_inactive(sample.page_index.saturating_add(1), &mut paints);

    if change.new < items_count {
        paints.push(TabPaint {
            index: change.new,
            state: TabState::Active,
        });
    }
    paints
}

/// Tabs to repaint after a programmatic change: the old tab off, the new on.
pub fn jump_paints(change: SelectionChange) -> Vec<TabPaint> {
    let mut paints = Vec::with_capacity(2);
    if let Some(old) = change.old.filter(|&old| old != change.new) {
        paints.push(TabPaint {
            index: old,
            state: TabState::Inactive,
        });
    }
    paints.push(TabPaint {
        index: change.new,
        state: TabState::Active,
    });
    paints
}

/// Push `paints` to the host.  Tabs without a realized container are skipped
/// and the rest are still painted.  Returns how many tabs were painted.
pub fn apply_paints<H: TabHost>(
    host: &mut H,
    tabs: &TabSet<H::Container>,
    paints: &[TabPaint],
    palette: TabPalette,
) -> usize {
    let mut painted = 0;
    for paint in paints {
        let Some(container) = tabs.container(paint.index) else {
            tracing::trace!(index = paint.index, "no realized container, skipping paint");
            continue;
        };
        host.paint_tab(container, paint.state, palette.color_for(paint.state));
        painted += 1;
    }
    painted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(page: i64, fraction: f64) -> OffsetSample {
        OffsetSample {
            page_index: page,
            fractional_part: fraction,
        }
    }

    #[test]
    fn indicator_tracks_fraction_between_pages() {
        assert_eq!(indicator_offset(sample(0, 0.0), 20.0, 5), 0.0);
        assert_eq!(indicator_offset(sample(0, 0.5), 20.0, 5), 10.0);
        assert_eq!(indicator_offset(sample(2, 0.25), 20.0, 5), 45.0);
    }

    #[test]
    fn indicator_stops_at_last_page() {
        assert_eq!(indicator_offset(sample(4, 0.8), 20.0, 5), 80.0);
        assert_eq!(indicator_offset(sample(7, 0.3), 20.0, 5), 80.0);
        assert_eq!(indicator_offset(sample(i64::MAX, 0.0), 20.0, 5), 80.0);
    }

    #[test]
    fn indicator_never_goes_negative() {
        assert_eq!(indicator_offset(sample(-1, 0.9), 20.0, 5), 0.0);
        assert_eq!(indicator_offset(sample(-3, 0.1), 20.0, 5), 0.0);
    }

    #[test]
    fn crossing_half_swaps_the_pair() {
        let paints = scroll_paints(sample(0, 0.6), SelectionChange { old: Some(0), new: 1 }, 5);
        assert_eq!(
            paints,
            vec![
                TabPaint { index: 0, state: TabState::Inactive },
                TabPaint { index: 1, state: TabState::Active },
            ]
        );
    }

    #[test]
    fn fling_turns_off_stale_selection() {
        let paints = scroll_paints(sample(3, 0.2), SelectionChange { old: Some(0), new: 3 }, 5);
        assert!(paints.contains(&TabPaint { index: 0, state: TabState::Inactive }));
        assert!(paints.contains(&TabPaint { index: 4, state: TabState::Inactive }));
        assert_eq!(paints.last(), Some(&TabPaint { index: 3, state: TabState::Active }));
    }

    #[test]
    fn last_page_keeps_an_active_tab() {
        let paints = scroll_paints(sample(4, 0.7), SelectionChange { old: Some(3), new: 4 }, 5);
        assert_eq!(
            paints,
            vec![
                TabPaint { index: 3, state: TabState::Inactive },
                TabPaint { index: 4, state: TabState::Active },
            ]
        );
    }

    #[test]
    fn jump_paints_only_the_endpoints() {
        let paints = jump_paints(SelectionChange { old: Some(1), new: 9 });
        assert_eq!(
            paints,
            vec![
                TabPaint { index: 1, state: TabState::Inactive },
                TabPaint { index: 9, state: TabState::Active },
            ]
        );
    }

    #[test]
    fn policy_parses_aliases() {
        assert_eq!("Paint".parse::<FeedbackPolicy>(), Ok(FeedbackPolicy::DirectPaint));
        assert_eq!("notify".parse::<FeedbackPolicy>(), Ok(FeedbackPolicy::Notify));
        assert!("glow".parse::<FeedbackPolicy>().is_err());
    }
}
