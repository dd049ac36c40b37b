use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("out of bounds")]
    OutOfBounds,
    #[error("volume dimensions {width}x{height}x{depth} overflow usize")]
    DimensionOverflow {
        width: usize,
        height: usize,
        depth: usize,
    },
}
