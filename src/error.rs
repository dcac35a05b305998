//! Startup errors. The frame loop itself only ever fails on terminal I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce an image or sound the game needs before it can start.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("unknown asset: {0}")]
    Unknown(String),

    #[error("i/o error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
