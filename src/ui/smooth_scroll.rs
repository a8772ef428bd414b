//! Page-offset smooth scroll with exponential ease-out.
//!
//! Stands in for a touch flip view: a swipe moves the target page and each
//! tick the position closes a fixed share of the remaining distance, so the
//! offset stream passes through every fraction on the way.

/// Who moved the target last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDriver {
    /// The user swiped; the offsets are forwarded to the tab control.
    Swipe,
    /// The pager is catching up with a programmatic selection.
    Follow,
}

/// Page-position animator.
#[derive(Debug, Clone)]
pub struct PageScroll {
    /// Current position in pages (`1.5` = halfway between pages 1 and 2).
    position: f64,
    target: usize,
    pages: usize,
    driver: ScrollDriver,
    /// Damping: the gap shrinks by `speed` each tick.
    speed: f64,
}

impl PageScroll {
    pub fn new(pages: usize, start: usize, speed: f64) -> Self {
        let start = start.min(pages.saturating_sub(1));
        Self {
            position: start as f64,
            target: start,
            pages,
            driver: ScrollDriver::Follow,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Move the target by `delta` pages, clamped to the strip.
    pub fn swipe(&mut self, delta: isize) {
        let last = self.pages.saturating_sub(1) as isize;
        self.target = (self.target as isize + delta).clamp(0, last.max(0)) as usize;
        self.driver = ScrollDriver::Swipe;
    }

    /// Glide to `page` without reporting the motion.
    pub fn follow(&mut self, page: usize) {
        if page == self.target || self.pages == 0 {
            return;
        }
        self.target = page.min(self.pages - 1);
        self.driver = ScrollDriver::Follow;
    }

    /// Advance one frame.  Returns the new position while a swipe is in
    /// motion, `None` otherwise.
    pub fn tick(&mut self) -> Option<f64> {
        if !self.is_animating() {
            return None;
        }
        let gap = self.target as f64 - self.position;
        self.position += gap * self.speed;
        if (self.target as f64 - self.position).abs() < 0.002 {
            self.position = self.target as f64;
        }
        (self.driver == ScrollDriver::Swipe).then_some(self.position)
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// True while a swipe is still gliding.
    pub fn is_swiping(&self) -> bool {
        self.driver == ScrollDriver::Swipe && self.is_animating()
    }

    /// True while the position has not reached the target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_reports_every_frame_until_settled() {
        let mut scroll = PageScroll::new(3, 0, 0.5);
        scroll.swipe(1);
        let mut frames = Vec::new();
        while let Some(position) = scroll.tick() {
            frames.push(position);
        }
        assert!(frames.len() > 3);
        assert!(frames.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(scroll.position(), 1.0);
    }

    #[test]
    fn follow_moves_silently() {
        let mut scroll = PageScroll::new(10, 0, 0.5);
        scroll.follow(4);
        assert!(scroll.is_animating());
        assert_eq!(scroll.tick(), None);
        assert!(scroll.position() > 0.0);
    }

    #[test]
    fn swipe_is_clamped_to_the_strip() {
        let mut scroll = PageScroll::new(2, 1, 0.5);
        scroll.swipe(1);
        assert!(!scroll.is_animating());
        assert_eq!(scroll.tick(), None);
        assert_eq!(scroll.position(), 1.0);
    }
}
