//! Crate-wide error type.
//!
//! Mirrors the five error kinds of the component this crate implements:
//! configuration, I/O, format, phase-ordering ("state"), and not-found.
//! `NotFound` is returned as a value by path-finding helpers and is not
//! meant to propagate through `?` in most callers.

use crate::builder::BuildState;

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, StrgraphError>;

#[derive(thiserror::Error, Debug)]
pub enum StrgraphError {
    /// Read count exceeds a representation limit, a read's length exceeds
    /// the maximum encodable overhang, or an out-degree would overflow.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed on-disk data: unknown header byte, bad token count, a
    /// truncated record, or a word-size mismatch between the file and this
    /// build.
    #[error("format error in {path}: {detail}{}", offset.map(|o| format!(" (at byte {o})")).unwrap_or_default())]
    Format {
        path: String,
        detail: String,
        offset: Option<u64>,
    },

    /// An operation was invoked while the graph was in the wrong phase of
    /// the counting/allocation/insertion/sort protocol.
    #[error("operation `{op}` requires state {required:?}, graph is in state {actual:?}")]
    State {
        op: &'static str,
        required: BuildState,
        actual: BuildState,
    },

    /// A traversal query had no reachable destination. Most callers should
    /// prefer matching on `None`/`Option` rather than this variant; it
    /// exists so fallible APIs that must return a `Result` have something
    /// to return.
    #[error("no path found")]
    NotFound,
}

impl StrgraphError {
    pub fn format(path: impl Into<String>, detail: impl Into<String>) -> Self {
        StrgraphError::Format {
            path: path.into(),
            detail: detail.into(),
            offset: None,
        }
    }

    pub fn format_at(path: impl Into<String>, detail: impl Into<String>, offset: u64) -> Self {
        StrgraphError::Format {
            path: path.into(),
            detail: detail.into(),
            offset: Some(offset),
        }
    }

    pub fn state(op: &'static str, required: BuildState, actual: BuildState) -> Self {
        StrgraphError::State {
            op,
            required,
            actual,
        }
    }
}
