//! Error types for pincell.

use std::fmt;

/// Result type alias for pincell operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pincell operations.
#[derive(Debug)]
pub enum Error {
    /// The selection/clipboard customization hook is installed at
    /// construction and may not be replaced afterwards; masked PIN entry
    /// requires copy/paste to stay disabled.
    SelectionHookLocked,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectionHookLocked => {
                write!(f, "selection hook is locked and cannot be replaced")
            }
        }
    }
}

impl std::error::Error for Error {}
