//! Growable Array
//!
//! `Vector<T>` is a contiguous, owned, resizable buffer with independent length and
//! capacity counters, built directly on `std::alloc`.
//!
//! ## What It Offers
//!
//! 1. **Access** - `at`, `front`, `back`, `data`, bounds-checked and never panicking
//! 2. **Capacity Management** - `grow`, `shrink`, `shrink_to_fit`
//! 3. **Single-Element Mutation** - `assign`, `push`, `pop`, `insert`, `remove`
//! 4. **Bulk Mutation** - `push_n`, `truncate`, `insert_n`, `remove_range` (inclusive)
//! 5. **Utilities** - `swap`, `clear`, `equals`, `try_clone`, `concat`, `contains`
//! 6. **Traversal** - `for_each`, `enumerate`, `filter`, `map`
//!
//! Every operation that can fail returns [`Result`]; allocation failure is reported as
//! [`VectorError::OutOfMemory`] and never aborts. A failed call leaves the vector as it was.
//!
//! ```
//! use vector::Vector;
//!
//! let mut v = Vector::from_slice(&[1, 2, 3]).unwrap();
//! v.push(4).unwrap();
//! v.insert(0, 0).unwrap();
//! v.remove_range(1, 2).unwrap();
//! assert_eq!(v.as_slice(), &[0, 3, 4]);
//!
//! let squares = v.map(|_, x| x * x).unwrap();
//! assert_eq!(squares.as_slice(), &[0, 9, 16]);
//! ```
//!
//! The library logs buffer traffic through the `log` facade and never installs a logger.

pub mod error;
pub mod growth;
mod raw;
mod traverse;
pub mod vector;

pub use error::{Result, VectorError};
pub use growth::{DEFAULT_CAPACITY, MIN_SLICE_CAPACITY};
pub use vector::Vector;
