//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors of transfer function construction and editing.
///
/// Every operation returning this error leaves the transfer function untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TfError {
    /// Less than two colors supplied
    #[error("transfer function needs at least 2 colors, got {got}")]
    InvalidArgument { got: usize },

    /// Stop index does not exist
    #[error("stop index {index} out of range (transfer function has {len} stops)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Color string could not be parsed
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// Palette is not present in the palette table
    #[error("unknown palette '{0}'")]
    UnknownPalette(String),
}

/// Errors of volume loading.
///
/// Raised before a volume exists, so a partially loaded volume can never be rendered.
#[derive(Error, Debug)]
pub enum VolumeError {
    #[error("path {0:?} does not lead to a file")]
    NotAFile(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("volume has zero sized dimension {0:?}")]
    ZeroDimension([usize; 3]),

    #[error("volume dimensions {0:?} overflow the sample count")]
    TooLarge([usize; 3]),

    #[error("volume data size mismatch: expected {expected} samples, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("volume header error: {0}")]
    Header(&'static str),

    #[error("no volumetric data passed")]
    NoData,

    #[error("no volume size passed")]
    NoSize,
}
