// Allocation half of the vector: owns the memory, never the elements.
use std::alloc::{alloc, dealloc, realloc, Layout};
use std::mem;
use std::ptr::NonNull;

use log::{trace, warn};

use crate::error::{Result, VectorError};

/// Manages raw memory for `cap` values of `T`.
/// Does NOT track which slots are initialized; dropping elements is the owner's job.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>, // Dangling while cap == 0
    cap: usize,
}

impl<T> RawBuf<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Creates an empty buffer with no allocation.
    pub(crate) const fn new() -> Self {
        RawBuf {
            ptr: NonNull::dangling(),
            cap: 0,
        }
    }

    /// Allocates memory for exactly `cap` elements.
    pub(crate) fn with_capacity(cap: usize) -> Result<Self> {
        let mut buf = Self::new();
        buf.resize(cap)?;
        Ok(buf)
    }

    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    pub(crate) fn cap(&self) -> usize {
        self.cap
    }

    /// True when the buffer holds storage, i.e. `cap > 0`.
    pub(crate) fn is_allocated(&self) -> bool {
        self.cap > 0
    }

    fn layout(cap: usize) -> Result<Layout> {
        Layout::array::<T>(cap).map_err(|_| VectorError::CapacityOverflow)
    }

    /// Moves the allocation to exactly `new_cap` slots, keeping the first
    /// `min(cap, new_cap)` slots' bytes.
    ///
    /// On failure the buffer is left untouched.
    pub(crate) fn resize(&mut self, new_cap: usize) -> Result<()> {
        if new_cap == self.cap {
            return Ok(());
        }
        if new_cap == 0 {
            self.release();
            return Ok(());
        }
        if Self::IS_ZST {
            self.cap = new_cap;
            return Ok(());
        }

        let new_layout = Self::layout(new_cap)?;
        let new_ptr = if self.cap == 0 {
            unsafe { alloc(new_layout) }
        } else {
            let old_layout = Self::layout(self.cap)?;
            unsafe {
                realloc(
                    self.ptr.as_ptr() as *mut u8, // realloc works with u8 pointers
                    old_layout,
                    new_layout.size(),
                )
            }
        };

        match NonNull::new(new_ptr as *mut T) {
            Some(ptr) => {
                trace!(
                    "buffer resized: {} -> {} slots ({} bytes)",
                    self.cap,
                    new_cap,
                    new_layout.size()
                );
                self.ptr = ptr;
                self.cap = new_cap;
                Ok(())
            }
            None => {
                warn!("allocation of {} bytes failed", new_layout.size());
                Err(VectorError::OutOfMemory {
                    bytes: new_layout.size(),
                })
            }
        }
    }

    /// Frees the allocation. The buffer is empty and reusable afterwards.
    pub(crate) fn release(&mut self) {
        if self.cap != 0 && !Self::IS_ZST {
            // The layout was valid when this allocation was made
            if let Ok(layout) = Self::layout(self.cap) {
                unsafe {
                    dealloc(self.ptr.as_ptr() as *mut u8, layout);
                }
            }
            trace!("buffer released: {} slots", self.cap);
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        self.release();
    }
}

// Safety: RawBuf<T> is a uniquely owned allocation of T
unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unallocated() {
        let buf: RawBuf<u64> = RawBuf::new();
        assert_eq!(buf.cap(), 0);
        assert!(!buf.is_allocated());
    }

    #[test]
    fn test_resize_keeps_prefix() {
        let mut buf: RawBuf<u32> = RawBuf::with_capacity(4).unwrap();
        for i in 0..4 {
            unsafe { buf.ptr().add(i).write(i as u32 * 10) };
        }

        buf.resize(64).unwrap();
        assert_eq!(buf.cap(), 64);
        for i in 0..4 {
            assert_eq!(unsafe { buf.ptr().add(i).read() }, i as u32 * 10);
        }

        buf.resize(2).unwrap();
        assert_eq!(buf.cap(), 2);
        assert_eq!(unsafe { buf.ptr().add(1).read() }, 10);
    }

    #[test]
    fn test_resize_to_zero_releases() {
        let mut buf: RawBuf<u8> = RawBuf::with_capacity(8).unwrap();
        buf.resize(0).unwrap();
        assert!(!buf.is_allocated());

        // Reusable after release
        buf.resize(3).unwrap();
        assert_eq!(buf.cap(), 3);
    }

    #[test]
    fn test_overflowing_layout() {
        let mut buf: RawBuf<u64> = RawBuf::new();
        assert_eq!(buf.resize(usize::MAX), Err(VectorError::CapacityOverflow));
        assert_eq!(buf.cap(), 0);
    }

    #[test]
    fn test_zero_sized_never_allocates() {
        let mut buf: RawBuf<()> = RawBuf::with_capacity(1000).unwrap();
        assert_eq!(buf.cap(), 1000);
        buf.release();
        assert_eq!(buf.cap(), 0);
    }
}
