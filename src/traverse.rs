//! Closure-driven traversal and transformation of a [`Vector`].

use crate::error::Result;
use crate::vector::Vector;

impl<T> Vector<T> {
    /// Applies `f` to every live element in index order.
    pub fn for_each<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        self.iter_mut().for_each(f);
    }

    /// Applies `f(index, element)` to every live element in ascending index order.
    pub fn enumerate<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &mut T),
    {
        for (i, value) in self.iter_mut().enumerate() {
            f(i, value);
        }
    }

    /// Removes every element for which `f(index, element)` returns false.
    ///
    /// Elements are visited from `len - 1` down to 1, then index 0 last. A removal
    /// only shifts elements that were already visited, so every element is seen
    /// exactly once and the index passed to `f` is its position before filtering.
    /// Kept elements keep their relative order.
    pub fn filter<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &T) -> bool,
    {
        if self.is_empty() {
            return;
        }

        for i in (1..self.len()).rev() {
            self.retain_at(i, &mut f);
        }
        self.retain_at(0, &mut f);
    }

    fn retain_at<F>(&mut self, i: usize, f: &mut F)
    where
        F: FnMut(usize, &T) -> bool,
    {
        let keep = match self.at(i) {
            Ok(value) => f(i, value),
            Err(_) => return,
        };
        if !keep {
            // In bounds: just checked above
            let _ = self.remove(i);
        }
    }

    /// Builds a new vector of the same length and capacity whose elements are
    /// `f(index, element)` of this one. `self` is left untouched, so on failure
    /// nothing changes.
    pub fn map<U, F>(&self, mut f: F) -> Result<Vector<U>>
    where
        F: FnMut(usize, &T) -> U,
    {
        let mut mapped = Vector::with_capacity(self.capacity())?;
        for (i, value) in self.iter().enumerate() {
            // capacity() >= len(), so there is always a free slot
            unsafe { mapped.write_next(f(i, value)) };
        }
        Ok(mapped)
    }
}
