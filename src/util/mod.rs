mod indexer;
mod iter;
mod ringbuf;

pub use indexer::*;
pub use iter::*;
pub use ringbuf::*;
