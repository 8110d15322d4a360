//! Error type for fallible overlay operations
//!
//! Nothing here is fatal to the host: UI code paths log these and carry on.

use thiserror::Error;

/// Error type for overlay setup, image loading and preference I/O
#[derive(Debug, Error)]
pub enum OverlayError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// RON parse error
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// RON serialization error
    #[error("serialization error: {0}")]
    Serialize(#[from] ron::Error),
    /// Image decode error
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    /// A second panel tried to take the draw handle on this thread
    #[error("draw handle already held by another panel")]
    DrawHandleHeld,
}
