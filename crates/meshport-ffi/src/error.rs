/// Errors raised while reading foreign arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("index {index} out of bounds for foreign array of length {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("foreign array of length {len} has a null base address")]
    NullBase { len: usize },

    #[error("foreign pointer array has a null entry at index {index}")]
    NullElement { index: usize },
}
