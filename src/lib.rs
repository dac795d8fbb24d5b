//! Fixed-capacity ring buffer with overwrite-on-full semantics at both ends.
//!
//! ```
//! use circlebuf::RingBuffer;
//!
//! let mut buf = RingBuffer::<u32, 4>::new();
//! buf.extend([1, 2, 3, 4, 5]);
//! assert_eq!(buf, [2, 3, 4, 5]);
//!
//! buf.push_front(10);
//! assert_eq!(buf, [10, 2, 3, 4]);
//! ```

pub mod error;
mod util;

pub use error::{Result, RingBufferError};
pub use util::{CircularIndexer, Cursor, IntoIter, Iter, IterMut, RingBuffer};
