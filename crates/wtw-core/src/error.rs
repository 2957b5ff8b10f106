use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The live-status cache is not valid JSON or lacks the `data` collection.
    #[error("malformed subscription cache: {0}")]
    MalformedCache(String),

    /// The wtwitch config document is missing a field or has the wrong shape.
    #[error("malformed wtwitch config: {0}")]
    MalformedConfig(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Neither a confirmation nor an error frame was found in tool output.
    #[error("could not extract a result from wtwitch output")]
    ExtractionAmbiguous,

    /// wtwitch reported an error instead of the requested listing.
    #[error("wtwitch: {0}")]
    ToolFailed(String),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch {}: {source}", .binary.display())]
    Launch {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
