use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),
    #[error("Unreadable {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
    #[error("Page index {index} out of range ({count} pages)")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("Already optimized: {0} exists")]
    AlreadyOptimized(PathBuf),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BookError {
    /// Sequence edges are expected while prefetching and are not reported.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, BookError::IndexOutOfRange { .. })
    }
}
