//! Single-slot observable values
//!
//! A [`Binding`] holds the last value it was given and fans every new value out
//! to its observers, synchronously and in registration order. Observers only
//! see values set after they registered; nothing is replayed.

use std::fmt;

type Observer<T> = Box<dyn FnMut(&T)>;

/// Observable container over a single value
pub struct Binding<T> {
    value: Option<T>,
    observers: Vec<Observer<T>>,
}

impl<T> Binding<T> {
    /// Create an unset binding
    pub fn new() -> Self {
        Self {
            value: None,
            observers: Vec::new(),
        }
    }

    /// Create a binding that already holds `value`
    pub fn with_value(value: T) -> Self {
        Self {
            value: Some(value),
            observers: Vec::new(),
        }
    }

    /// Register an observer for subsequent `set` calls
    pub fn on_change<F>(&mut self, observer: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Store `value` and notify every registered observer
    pub fn set(&mut self, value: T) {
        for observer in self.observers.iter_mut() {
            observer(&value);
        }
        self.value = Some(value);
    }

    /// The last stored value, `None` if never set
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<T: Clone> Binding<T> {
    /// Copy of the last stored value
    pub fn value(&self) -> Option<T> {
        self.value.clone()
    }
}

impl<T> Default for Binding<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .finish()
    }
}
