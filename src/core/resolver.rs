//! Selection resolver: which page dominates the current offset.
//!
//! A page becomes active once the scroll has covered at least half of the way
//! towards it.  The resolver keeps its own copy of the last resolved page so
//! sub-pixel jitter around the same page never produces a second change.

use super::offset::OffsetSample;

/// Fraction of a page that must be covered before the next page wins.
pub const SELECTION_THRESHOLD: f64 = 0.5;

/// Page a sample resolves to, clamped into `[0, items_count - 1]`.
///
/// Exactly at the threshold the next page wins.  Returns `None` when there
/// are no pages at all.
pub fn resolve_candidate(sample: OffsetSample, items_count: usize) -> Option<usize> {
    if items_count == 0 {
        return None;
    }
    let candidate = if sample.fractional_part >= SELECTION_THRESHOLD {
        sample.page_index.saturating_add(1)
    } else {
        sample.page_index
    };
    let last = (items_count - 1) as i64;
    Some(candidate.clamp(0, last) as usize)
}

/// A resolved change of the dominant page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub old: Option<usize>,
    pub new: usize,
}

/// Hysteresis state: the last page handed to feedback.
#[derive(Debug, Clone, Default)]
pub struct SelectionResolver {
    tracked: Option<usize>,
    previous: Option<usize>,
}

impl SelectionResolver {
    pub fn tracked(&self) -> Option<usize> {
        self.tracked
    }

    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Seed the tracking copy without recording a change.
    pub fn seed(&mut self, index: usize) {
        self.tracked = Some(index);
    }

    /// Resolve a scroll sample.  `None` means nothing changed.
    pub fn resolve(&mut self, sample: OffsetSample, items_count: usize) -> Option<SelectionChange> {
        let candidate = resolve_candidate(sample, items_count)?;
        self.commit(candidate)
    }

    /// Move the tracking copy to `index`.  `None` when it is already there.
    pub fn commit(&mut self, index: usize) -> Option<SelectionChange> {
        if self.tracked == Some(index) {
            return None;
        }
        let old = self.tracked;
        if old.is_some() {
            self.previous = old;
        }
        self.tracked = Some(index);
        Some(SelectionChange { old, new: index })
    }
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
    fn below_half_keeps_current_page() {
        for f in [0.0, 0.1, 0.25, 0.49, 0.4999] {
            assert_eq!(resolve_candidate(sample(2, f), 5), Some(2), "fraction {f}");
        }
    }

    #[test]
    fn half_and_above_moves_to_next_page() {
        for f in [0.5, 0.51, 0.75, 0.99] {
            assert_eq!(resolve_candidate(sample(2, f), 5), Some(3), "fraction {f}");
        }
    }

    #[test]
    fn candidate_is_clamped_to_last_page() {
        assert_eq!(resolve_candidate(sample(4, 0.7), 5), Some(4));
        assert_eq!(resolve_candidate(sample(9, 0.1), 5), Some(4));
    }

    #[test]
    fn overscroll_before_first_page_clamps_to_zero() {
        assert_eq!(resolve_candidate(sample(-1, 0.2), 5), Some(0));
        assert_eq!(resolve_candidate(sample(-1, 0.8), 5), Some(0));
    }

    #[test]
    fn no_pages_resolves_nothing() {
        assert_eq!(resolve_candidate(sample(0, 0.0), 0), None);
    }

    #[test]
    fn repeated_samples_on_same_page_do_not_fire() {
        let mut resolver = SelectionResolver::default();
        resolver.seed(0);
        assert_eq!(resolver.resolve(sample(0, 0.1), 5), None);
        assert_eq!(resolver.resolve(sample(0, 0.3), 5), None);
        assert_eq!(
            resolver.resolve(sample(0, 0.6), 5),
            Some(SelectionChange { old: Some(0), new: 1 })
        );
        assert_eq!(resolver.resolve(sample(1, 0.0), 5), None);
        assert_eq!(resolver.previous(), Some(0));
    }

    #[test]
    fn previous_is_unset_until_first_change() {
        let mut resolver = SelectionResolver::default();
        resolver.seed(3);
        assert_eq!(resolver.previous(), None);
        resolver.commit(2);
        assert_eq!(resolver.previous(), Some(3));
        assert_eq!(resolver.tracked(), Some(2));
    }
}
