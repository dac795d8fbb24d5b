use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingBufferError {
    #[error("ring buffer is empty")]
    Empty,

    #[error("slot {index} out of range for capacity {capacity}")]
    OutOfRange { index: usize, capacity: usize },
}

pub type Result<T, E = RingBufferError> = std::result::Result<T, E>;
