//! Per-tab bookkeeping: realized containers and their measured widths.
//!
//! Entries are keyed by index, never by container identity, because hosts
//! that virtualize may hand out a recycled container for a different item.

/// One tab in the header row.
#[derive(Debug, Clone)]
pub struct TabEntry<C> {
    pub container: Option<C>,
    pub measured_width: f64,
}

impl<C> Default for TabEntry<C> {
    fn default() -> Self {
        Self {
            container: None,
            measured_width: 0.0,
        }
    }
}

/// Ordered tab entries plus the uniform item width.
#[derive(Debug, Clone)]
pub struct TabSet<C> {
    entries: Vec<TabEntry<C>>,
    item_width: f64,
}

impl<C> Default for TabSet<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            item_width: 0.0,
        }
    }
}

impl<C: Clone + PartialEq> TabSet<C> {
    /// Reset to `count` empty entries.
    pub fn reset(&mut self, count: usize) {
        self.entries = (0..count).map(|_| TabEntry::default()).collect();
        self.item_width = 0.0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store a freshly measured container.  The running maximum becomes the
    /// uniform item width.  Out-of-range indices are ignored.
    pub fn register(&mut self, index: usize, container: C, measured_width: f64) {
        let Some(entry) = self.entries.get_mut(index) else {
            return;
        };
        entry.container = Some(container);
        if measured_width.is_finite() && measured_width > 0.0 {
            entry.measured_width = measured_width;
            self.item_width = self.item_width.max(measured_width);
        }
    }

    /// Replace the container for `index` without touching widths.  Used when
    /// the host realizes a tab after measurement has finished.  A recycled
    /// container is dropped from whichever entry held it before.
    pub fn replace_container(&mut self, index: usize, container: C) {
        if index >= self.entries.len() {
            return;
        }
        for entry in &mut self.entries {
            if entry.container.as_ref() == Some(&container) {
                entry.container = None;
            }
        }
        self.entries[index].container = Some(container);
    }

    pub fn container(&self, index: usize) -> Option<&C> {
        self.entries.get(index).and_then(|e| e.container.as_ref())
    }

    /// Index of the entry currently holding `container`.
    pub fn index_of(&self, container: &C) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.container.as_ref() == Some(container))
    }

    pub fn item_width(&self) -> f64 {
        self.item_width
    }

    pub fn entries(&self) -> &[TabEntry<C>] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_width_is_the_widest_measurement() {
        let mut set: TabSet<u32> = TabSet::default();
        set.reset(3);
        set.register(0, 10, 12.0);
        set.register(1, 11, 30.0);
        set.register(2, 12, 8.0);
        assert_eq!(set.item_width(), 30.0);
        assert_eq!(set.entries()[2].measured_width, 8.0);
    }

    #[test]
    fn ignores_out_of_range_and_bogus_widths() {
        let mut set: TabSet<u32> = TabSet::default();
        set.reset(1);
        set.register(5, 1, 100.0);
        set.register(0, 1, f64::NAN);
        assert_eq!(set.item_width(), 0.0);
        assert_eq!(set.container(0), Some(&1));
    }

    #[test]
    fn recycled_container_moves_to_new_index() {
        let mut set: TabSet<u32> = TabSet::default();
        set.reset(3);
        set.register(0, 7, 10.0);
        set.replace_container(2, 7);
        assert_eq!(set.index_of(&7), Some(2));
        assert_eq!(set.container(0), None);
        assert_eq!(set.index_of(&42), None);
    }
}
