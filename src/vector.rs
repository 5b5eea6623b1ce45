use std::fmt;
use std::mem;
use std::ptr;
use std::slice;

use log::debug;

use crate::error::{Result, VectorError};
use crate::growth::{bulk_capacity, doubled_capacity, from_slice_capacity, DEFAULT_CAPACITY};
use crate::raw::RawBuf;

/// A contiguous, owned, growable array with independent length and capacity.
///
/// Every operation that needs memory returns a [`Result`] and leaves the vector
/// unchanged on failure. Operations that reallocate (growing, shrinking, `push`,
/// `insert` and their bulk forms) invalidate previously obtained references; the
/// borrow checker enforces this.
///
/// Not synchronized: share it across threads only behind an external lock.
pub struct Vector<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> Vector<T> {
    /// Creates an empty vector with capacity 0. Does not allocate.
    pub const fn new() -> Self {
        Vector {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Creates an empty vector with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Vector {
            buf: RawBuf::with_capacity(capacity)?,
            len: 0,
        })
    }

    /// Creates an empty vector with room for [`DEFAULT_CAPACITY`] elements.
    pub fn with_default_capacity() -> Result<Self> {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Clones `source` into a fresh buffer.
    ///
    /// The capacity is the next power of two strictly above `source.len()`,
    /// at least [`MIN_SLICE_CAPACITY`](crate::MIN_SLICE_CAPACITY).
    pub fn from_slice(source: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        let mut vector = Self::with_capacity(from_slice_capacity(source.len())?)?;
        vector.clone_into_tail(source);
        Ok(vector)
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of elements the buffer holds before it must reallocate.
    pub fn capacity(&self) -> usize {
        self.buf.cap()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes *reserved* by the buffer: `capacity * size_of::<T>()`.
    ///
    /// This is not the number of bytes in use; that is `len() * size_of::<T>()`.
    pub fn size(&self) -> usize {
        self.buf.cap() * mem::size_of::<T>()
    }

    /// The live elements, or `None` when there are none.
    pub fn data(&self) -> Option<&[T]> {
        if self.len == 0 {
            None
        } else {
            Some(self.as_slice())
        }
    }

    pub fn as_slice(&self) -> &[T] {
        // ptr is dangling but aligned when nothing is allocated
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Returns the element at `p`.
    pub fn at(&self, p: usize) -> Result<&T> {
        self.check_index(p)?;
        Ok(unsafe { &*self.buf.ptr().add(p) })
    }

    /// Returns the element at `p` mutably.
    pub fn at_mut(&mut self, p: usize) -> Result<&mut T> {
        self.check_index(p)?;
        Ok(unsafe { &mut *self.buf.ptr().add(p) })
    }

    /// Returns the first element. Fails with [`VectorError::Empty`] on an empty vector.
    pub fn front(&self) -> Result<&T> {
        if self.len == 0 {
            return Err(VectorError::Empty);
        }
        self.at(0)
    }

    /// Returns the last element. Fails with [`VectorError::Empty`] on an empty vector.
    pub fn back(&self) -> Result<&T> {
        match self.len.checked_sub(1) {
            Some(last) => self.at(last),
            None => Err(VectorError::Empty),
        }
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        match self.len.checked_sub(1) {
            Some(last) => self.at_mut(last),
            None => Err(VectorError::Empty),
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(value)
    }

    // ------------------------------------------------------------------
    // Capacity management
    // ------------------------------------------------------------------

    /// Reallocates to exactly `n` slots if `n` exceeds the current capacity.
    pub fn grow(&mut self, n: usize) -> Result<()> {
        if n > self.buf.cap() {
            self.buf.resize(n)?;
        }
        Ok(())
    }

    /// Shrinks the capacity to `n` slots.
    ///
    /// `n == 0` releases the buffer entirely. `n >= capacity` is a no-op.
    ///
    /// DANGER: may truncate live elements. When `n < len` the elements at
    /// `[n, len)` are dropped and the length becomes `n`.
    pub fn shrink(&mut self, n: usize) -> Result<()> {
        if n == 0 {
            self.clear();
            return Ok(());
        }
        if n >= self.buf.cap() {
            return Ok(());
        }

        // Relocate first so a failed allocation leaves every element in place
        let fresh = RawBuf::with_capacity(n)?;
        let kept = self.len.min(n);
        unsafe {
            ptr::copy_nonoverlapping(self.buf.ptr(), fresh.ptr(), kept);
        }
        let old = mem::replace(&mut self.buf, fresh);
        let old_len = mem::replace(&mut self.len, kept);
        if old_len > kept {
            debug!("shrink to {} drops {} live elements", n, old_len - kept);
            unsafe {
                ptr::drop_in_place(slice::from_raw_parts_mut(
                    old.ptr().add(kept),
                    old_len - kept,
                ));
            }
        }
        // `old` frees its memory here without touching the moved elements
        drop(old);
        Ok(())
    }

    /// Shrinks the capacity down to the length. No-op when already tight.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if self.buf.cap() > self.len {
            return self.shrink(self.len);
        }
        Ok(())
    }

    /// Ensures room for `additional` more elements using the bulk growth policy.
    fn reserve_bulk(&mut self, additional: usize) -> Result<()> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(VectorError::CapacityOverflow)?;
        if required > self.buf.cap() {
            let cap = bulk_capacity(self.buf.cap(), required)?;
            self.buf.resize(cap)?;
        }
        Ok(())
    }

    /// Doubles the capacity when the buffer is full.
    fn reserve_one(&mut self) -> Result<()> {
        if self.len >= self.buf.cap() {
            let cap = doubled_capacity(self.buf.cap())?;
            self.buf.resize(cap)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Single-element mutation
    // ------------------------------------------------------------------

    /// Overwrites the element at `p`, dropping the old value.
    pub fn assign(&mut self, value: T, p: usize) -> Result<()> {
        *self.at_mut(p)? = value;
        Ok(())
    }

    /// Appends `value`, doubling the capacity first if the buffer is full.
    pub fn push(&mut self, value: T) -> Result<()> {
        self.reserve_one()?;
        unsafe {
            ptr::write(self.buf.ptr().add(self.len), value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element, or `None` if empty.
    /// The capacity is kept.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            unsafe { Some(ptr::read(self.buf.ptr().add(self.len))) }
        }
    }

    /// Inserts `value` at `p`, shifting `[p, len)` one slot right.
    /// `p == len` appends.
    pub fn insert(&mut self, value: T, p: usize) -> Result<()> {
        if p > self.len {
            return Err(VectorError::OutOfBounds {
                index: p,
                len: self.len,
            });
        }
        if p == self.len {
            return self.push(value);
        }

        self.reserve_one()?;
        unsafe {
            let slot = self.buf.ptr().add(p);
            ptr::copy(slot, slot.add(1), self.len - p);
            ptr::write(slot, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at `p`, shifting `(p, len)` one slot left.
    pub fn remove(&mut self, p: usize) -> Result<T> {
        self.check_index(p)?;
        if p == self.len - 1 {
            return self.pop().ok_or(VectorError::Empty);
        }

        unsafe {
            let slot = self.buf.ptr().add(p);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - p - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    // ------------------------------------------------------------------
    // Bulk mutation
    // ------------------------------------------------------------------

    /// Appends clones of every element of `data`.
    pub fn push_n(&mut self, data: &[T]) -> Result<()>
    where
        T: Clone,
    {
        self.reserve_bulk(data.len())?;
        self.clone_into_tail(data);
        Ok(())
    }

    /// Appends clones of every element of `other`.
    pub fn concat(&mut self, other: &Vector<T>) -> Result<()>
    where
        T: Clone,
    {
        self.push_n(other.as_slice())
    }

    /// Drops the elements at `[n, len)`. The capacity is kept.
    ///
    /// Fails with [`VectorError::InvalidArgument`] unless `n < len`.
    pub fn truncate(&mut self, n: usize) -> Result<()> {
        if n >= self.len {
            return Err(VectorError::InvalidArgument(
                "truncate length must be below the current length",
            ));
        }
        let tail = self.len - n;
        // Shorten first: a panicking Drop then leaks the rest instead of double-dropping
        self.len = n;
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(self.buf.ptr().add(n), tail));
        }
        Ok(())
    }

    /// Inserts clones of every element of `data` at `p`, shifting `[p, len)` right.
    ///
    /// Fails with [`VectorError::InvalidArgument`] when `data` is empty.
    pub fn insert_n(&mut self, data: &[T], p: usize) -> Result<()>
    where
        T: Clone,
    {
        let n = data.len();
        if n == 0 {
            return Err(VectorError::InvalidArgument("nothing to insert"));
        }
        if p > self.len {
            return Err(VectorError::OutOfBounds {
                index: p,
                len: self.len,
            });
        }
        if n == 1 {
            return self.insert(data[0].clone(), p);
        }
        if p == self.len {
            return self.push_n(data);
        }

        self.reserve_bulk(n)?;
        let old_len = self.len;
        unsafe {
            let gap = self.buf.ptr().add(p);
            ptr::copy(gap, gap.add(n), old_len - p);
            // The shifted tail leaks if a clone panics
            self.len = p;
            for (i, value) in data.iter().enumerate() {
                ptr::write(gap.add(i), value.clone());
            }
        }
        self.len = old_len + n;
        Ok(())
    }

    /// Removes the **inclusive** range `[start, stop]`, shifting the tail left.
    pub fn remove_range(&mut self, start: usize, stop: usize) -> Result<()> {
        if start >= self.len || stop >= self.len || start > stop {
            return Err(VectorError::InvalidRange {
                start,
                stop,
                len: self.len,
            });
        }
        if start == stop {
            return self.remove(start).map(drop);
        }
        if stop == self.len - 1 {
            return self.truncate(start);
        }

        let count = stop - start + 1;
        let old_len = self.len;
        unsafe {
            let first = self.buf.ptr().add(start);
            self.len = start;
            ptr::drop_in_place(slice::from_raw_parts_mut(first, count));
            ptr::copy(first.add(count), first, old_len - start - count);
        }
        self.len = old_len - count;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Utilities
    // ------------------------------------------------------------------

    /// Exchanges the elements at `i` and `j` without allocating.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        self.as_mut_slice().swap(i, j);
        Ok(())
    }

    /// Resets to empty: drops every element and releases the buffer,
    /// so the capacity is 0 afterwards, not just the length.
    pub fn clear(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(self.buf.ptr(), len));
        }
        self.buf.release();
    }

    /// True iff both vectors hold storage, have the same length and equal elements.
    ///
    /// Unlike `==`, a vector without storage never equals anything.
    pub fn equals(&self, other: &Vector<T>) -> bool
    where
        T: PartialEq,
    {
        self.buf.is_allocated()
            && other.buf.is_allocated()
            && self.len == other.len
            && self.as_slice() == other.as_slice()
    }

    /// Deep copy with the same capacity and no shared storage.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
    {
        let mut copy = Self::with_capacity(self.buf.cap())?;
        copy.clone_into_tail(self.as_slice());
        Ok(copy)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn check_index(&self, p: usize) -> Result<()> {
        if p < self.len {
            Ok(())
        } else {
            Err(VectorError::OutOfBounds {
                index: p,
                len: self.len,
            })
        }
    }

    /// Clones `source` after the last element. Capacity must already fit.
    fn clone_into_tail(&mut self, source: &[T])
    where
        T: Clone,
    {
        debug_assert!(self.len + source.len() <= self.buf.cap());
        for value in source {
            unsafe {
                ptr::write(self.buf.ptr().add(self.len), value.clone());
            }
            self.len += 1;
        }
    }

    /// Writes `value` into slot `len` of a buffer with spare room.
    pub(crate) unsafe fn write_next(&mut self, value: T) {
        debug_assert!(self.len < self.buf.cap());
        ptr::write(self.buf.ptr().add(self.len), value);
        self.len += 1;
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        // Drop the elements; RawBuf frees the memory
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
        }
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
