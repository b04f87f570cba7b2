//! Scope-Preserving Iteration
//!
//! Iteration and mapping helpers that thread the receiver back into the
//! callback, so handlers keep working on their own state while walking a
//! sequence or a key/value collection.

use std::collections::HashMap;

use crate::Component;

/// Iteration helpers that keep the receiver's scope
pub trait Scoped: Sized {
    /// Call `f(self, item, index)` for each item
    fn for_each<T, F>(&mut self, items: &[T], mut f: F)
    where
        F: FnMut(&mut Self, &T, usize),
    {
        for (index, item) in items.iter().enumerate() {
            f(self, item, index);
        }
    }

    /// Call `f(self, value, key)` for each entry
    fn for_pairs<K, V, F>(&mut self, pairs: &HashMap<K, V>, mut f: F)
    where
        F: FnMut(&mut Self, &V, &K),
    {
        for (key, value) in pairs {
            f(self, value, key);
        }
    }

    /// Collect `f(self, item, index)` for each item
    fn map_each<T, R, F>(&mut self, items: &[T], mut f: F) -> Vec<R>
    where
        F: FnMut(&mut Self, &T, usize) -> R,
    {
        let mut result = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            result.push(f(self, item, index));
        }
        result
    }

    /// Collect `f(self, value, key)` for each entry
    fn map_pairs<K, V, R, F>(&mut self, pairs: &HashMap<K, V>, mut f: F) -> Vec<R>
    where
        F: FnMut(&mut Self, &V, &K) -> R,
    {
        let mut result = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            result.push(f(self, value, key));
        }
        result
    }
}

impl<C: Component> Scoped for C {}
