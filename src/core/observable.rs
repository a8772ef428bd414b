//! Bindable properties: a value plus the callbacks that watch it.

use std::fmt;

type Listener<T> = Box<dyn FnMut(&T, &T) + Send>;

/// A value that tells its subscribers `(old, new)` whenever it changes.
///
/// Setting an equal value is silent.
pub struct Observable<T> {
    value: T,
    listeners: Vec<Listener<T>>,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T, &T) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }
}

impl<T: PartialEq> Observable<T> {
    /// Store `value`, notifying subscribers.  Returns whether it changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        let old = std::mem::replace(&mut self.value, value);
        for listener in &mut self.listeners {
            listener(&old, &self.value);
        }
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
