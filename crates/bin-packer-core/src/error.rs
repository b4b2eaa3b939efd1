use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("Invalid bin dimensions: width and height must be greater than 0 (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Unknown heuristic: {0}")]
    UnknownHeuristic(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Item '{id}' ({width}x{height}) exceeds bin dimensions ({bin_width}x{bin_height})")]
    ItemTooLarge {
        id: String,
        width: u32,
        height: u32,
        bin_width: u32,
        bin_height: u32,
    },
}

pub type Result<T> = std::result::Result<T, PackError>;
