//! Error types for card session operations.

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by state transitions. Route handlers render these as
/// notification fragments; nothing here is fatal to the session.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Uploaded image was not a usable `data:image/*;base64,` URI.
    #[error("画像を読み込めませんでした: {0}")]
    InvalidImage(String),

    /// The rasterizer handed back something that is not a PNG.
    #[error("PNGの生成に失敗しました: {0}")]
    InvalidPng(String),

    /// No pending export carries this ticket.
    #[error("Unknown export ticket: {0}")]
    UnknownExport(u32),

    /// Configuration JSON failed to parse or validate.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Replacement question pool failed to parse.
    #[error("Invalid question pool: {0}")]
    InvalidQuestionPool(String),
}
