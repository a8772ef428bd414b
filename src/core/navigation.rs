//! Navigation driver: jump or walk to a requested tab.
//!
//! Adjacent targets are always a single jump.  Farther targets are either
//! walked one page per tick (so every page in between is visibly selected)
//! or jumped to directly, depending on the [`NavigationPolicy`].
//!
//! Walks are tagged with a generation.  Every new request bumps the
//! generation, and a walk that wakes up to find a newer generation stops
//! where it is instead of fighting the newer walk for the selection.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default pause between two walk steps.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(10);

/// Default longest distance that still walks under [`NavigationPolicy::AnimateNear`].
pub const DEFAULT_NEAR_DISTANCE: usize = 4;

/// When a request walks instead of jumping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    /// Walk whenever the target is more than one page away.
    AnimateFar,
    /// Walk only when `1 < distance <= max_distance`; jump otherwise.
    AnimateNear { max_distance: usize },
}

impl Default for NavigationPolicy {
    fn default() -> Self {
        NavigationPolicy::AnimateNear {
            max_distance: DEFAULT_NEAR_DISTANCE,
        }
    }
}

impl NavigationPolicy {
    pub fn label(self) -> &'static str {
        match self {
            NavigationPolicy::AnimateFar => "far",
            NavigationPolicy::AnimateNear { .. } => "near",
        }
    }

    fn walks(self, distance: usize) -> bool {
        match self {
            NavigationPolicy::AnimateFar => distance > 1,
            NavigationPolicy::AnimateNear { max_distance } => distance > 1 && distance <= max_distance,
        }
    }
}

impl fmt::Display for NavigationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationPolicy::AnimateFar => f.write_str("far"),
            NavigationPolicy::AnimateNear { max_distance } => write!(f, "near:{max_distance}"),
        }
    }
}

impl FromStr for NavigationPolicy {
    type Err = String;

    /// Accepts `far`, `near` and `near:N`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.split_once(':') {
            None if s == "far" => Ok(NavigationPolicy::AnimateFar),
            None if s == "near" => Ok(NavigationPolicy::default()),
            Some(("near", n)) => n
                .trim()
                .parse::<usize>()
                .map(|max_distance| NavigationPolicy::AnimateNear { max_distance })
                .map_err(|_| format!("invalid walk distance `{n}`")),
            _ => Err(format!("unknown navigation policy `{s}`")),
        }
    }
}

/// What a navigation request will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPlan {
    /// Target invalid or control not ready.
    Ignore,
    /// Target is the current selection.
    Stay,
    Jump { from: usize, to: usize },
    Walk { from: usize, to: usize },
}

impl NavigationPlan {
    pub fn decide(policy: NavigationPolicy, current: Option<usize>, target: usize, items_count: usize) -> Self {
        let Some(current) = current else {
            return NavigationPlan::Ignore;
        };
        if target >= items_count {
            return NavigationPlan::Ignore;
        }
        let distance = current.abs_diff(target);
        if distance == 0 {
            NavigationPlan::Stay
        } else if policy.walks(distance) {
            NavigationPlan::Walk { from: current, to: target }
        } else {
            NavigationPlan::Jump { from: current, to: target }
        }
    }
}

/// Next index one step from `current` towards `target`.
pub fn step_towards(current: usize, target: usize) -> usize {
    if current > target {
        current - 1
    } else if current < target {
        current + 1
    } else {
        current
    }
}

/// Result of [`crate::core::TabFlipView::scroll_to_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Target out of range, no tabs, or the strip is not measured yet.
    Ignored,
    /// Target was already selected.
    Unchanged,
    /// Selection now equals the target.
    Completed,
    /// A newer request (or an explicit cancel) took over mid-walk.
    Superseded,
}

/// Monotonic navigation generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationToken(u64);

impl NavigationToken {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
