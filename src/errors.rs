//! Errors that can happen while using `bevy_parley`.

use thiserror::Error;

/// Errors when loading a dialogue script.
///
/// A failed load disables the dialogue feature for the zone that owns the
/// script; it never propagates past the subsystem boundary.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// The dialogue file could not be read.
    #[error("dialogue file could not be read: {0}")]
    Io(#[from] std::io::Error),
    /// The dialogue script was not valid RON.
    #[error("dialogue script could not be parsed: {0}")]
    Parse(#[from] serde_ron::error::SpannedError),
    /// The script parsed but contains no entries.
    #[error("dialogue script has no entries")]
    EmptyScript,
}
