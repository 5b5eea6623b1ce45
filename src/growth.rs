//! Capacity policies.
//!
//! Capacities produced here are "large enough", not strictly powers of two: only
//! [`from_slice_capacity`] and growth out of an empty buffer round to a power of two.
//! Doubling and bulk growth multiply whatever capacity the vector already has.

use crate::error::{Result, VectorError};

/// Capacity of [`Vector::with_default_capacity`](crate::Vector::with_default_capacity).
pub const DEFAULT_CAPACITY: usize = 16;

/// Smallest capacity [`Vector::from_slice`](crate::Vector::from_slice) allocates.
pub const MIN_SLICE_CAPACITY: usize = 16;

/// Capacity for a vector built from `len` existing elements.
///
/// Always at least one power-of-two step above `len`, so a 16 element slice gets 32.
pub fn from_slice_capacity(len: usize) -> Result<usize> {
    len.checked_add(1)
        .and_then(usize::checked_next_power_of_two)
        .map(|cap| cap.max(MIN_SLICE_CAPACITY))
        .ok_or(VectorError::CapacityOverflow)
}

/// Capacity after a single-element push into a full buffer.
pub fn doubled_capacity(cap: usize) -> Result<usize> {
    cap.max(1)
        .checked_mul(2)
        .ok_or(VectorError::CapacityOverflow)
}

/// Capacity able to hold `required` elements, reached by repeated doubling of `cap`.
///
/// Computed in one step as `cap * 2^(floor(log2(required / cap)) + 1)`.
/// An empty buffer grows to `required` rounded up to a power of two.
pub fn bulk_capacity(cap: usize, required: usize) -> Result<usize> {
    if required <= cap {
        return Ok(cap);
    }
    if cap == 0 {
        return required
            .checked_next_power_of_two()
            .ok_or(VectorError::CapacityOverflow);
    }

    // required > cap, so the quotient is at least 1
    let shift = (required / cap).ilog2() + 1;
    1usize
        .checked_shl(shift)
        .and_then(|factor| cap.checked_mul(factor))
        .ok_or(VectorError::CapacityOverflow)
}
