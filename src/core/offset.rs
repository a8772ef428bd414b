//! Scroll offset tracking: raw host offsets to `(page, fraction)` samples.
//!
//! The host reports its horizontal offset in page units, but the first page
//! does not sit at zero: the flip view's scroll surface starts at a fixed
//! baseline.  A small epsilon is added on top so the last page still resolves
//! when the host stops reporting exactly on the boundary.

/// Offset of the first page on the host scroll surface.
pub const DEFAULT_BASELINE: f64 = 2.0;

/// Bias added to every corrected offset.
pub const DEFAULT_EPSILON: f64 = 0.02;

/// Instantaneous position between two pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetSample {
    /// `floor(offset)`.  Negative while overscrolling before the first page.
    pub page_index: i64,
    /// `offset - page_index`, always in `[0, 1)`.
    pub fractional_part: f64,
}

impl OffsetSample {
    /// Split a corrected offset into page and fraction.  Returns `None` for
    /// NaN or infinite offsets.
    pub fn from_offset(offset: f64) -> Option<Self> {
        if !offset.is_finite() {
            return None;
        }
        let page = offset.floor();
        Some(Self {
            page_index: page as i64,
            fractional_part: offset - page,
        })
    }

    /// The sample sitting exactly on `page`.
    pub fn at_page(page: usize) -> Self {
        Self {
            page_index: page as i64,
            fractional_part: 0.0,
        }
    }
}

/// Converts raw host offsets into corrected offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetTracker {
    baseline: f64,
    epsilon: f64,
}

impl Default for OffsetTracker {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE, DEFAULT_EPSILON)
    }
}

impl OffsetTracker {
    pub fn new(baseline: f64, epsilon: f64) -> Self {
        Self { baseline, epsilon }
    }

    pub fn corrected(&self, raw: f64) -> f64 {
        raw - self.baseline + self.epsilon
    }

    /// Correct and split a raw host offset.
    pub fn sample(&self, raw: f64) -> Option<OffsetSample> {
        OffsetSample::from_offset(self.corrected(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_offset_into_page_and_fraction() {
        let s = OffsetSample::from_offset(3.25).unwrap();
        assert_eq!(s.page_index, 3);
        assert!((s.fractional_part - 0.25).abs() < 1e-9);
    }

    #[test]
    fn negative_offsets_floor_downwards() {
        let s = OffsetSample::from_offset(-0.25).unwrap();
        assert_eq!(s.page_index, -1);
        assert!((s.fractional_part - 0.75).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_finite_offsets() {
        assert!(OffsetSample::from_offset(f64::NAN).is_none());
        assert!(OffsetSample::from_offset(f64::INFINITY).is_none());
    }

    #[test]
    fn tracker_removes_baseline_and_adds_bias() {
        let tracker = OffsetTracker::default();
        let s = tracker.sample(DEFAULT_BASELINE).unwrap();
        assert_eq!(s.page_index, 0);
        assert!((s.fractional_part - DEFAULT_EPSILON).abs() < 1e-9);

        // Host settling a hair short of the last page still lands on it.
        let s = tracker.sample(DEFAULT_BASELINE + 4.0 - 0.01).unwrap();
        assert_eq!(s.page_index, 4);
    }
}
