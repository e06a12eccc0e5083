// src/error.rs
// =============================================================================
// Fatal errors: anything in here stops the whole run.
//
// Per-URL problems (a server that refuses the connection, a body that can't
// be read) are NOT in this enum. Workers log those and move on to the next
// URL. See harvest/worker.rs.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    /// The URL list couldn't be opened or read
    #[error("Error reading URL list file {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file couldn't be created
    #[error("Error creating output file {}: {source}", .path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or flushing the output file failed
    #[error("Error writing to output file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The shared HTTP client couldn't be built (e.g. TLS backend failed to load)
    #[error("Error creating HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// A worker task panicked instead of returning
    #[error("Worker task failed: {0}")]
    WorkerPanicked(#[from] tokio::task::JoinError),
}

impl HarvestError {
    /// Process exit code for this failure kind
    ///
    /// 0 is success, 1 is reserved for unexpected failures
    pub fn exit_code(&self) -> i32 {
        match self {
            HarvestError::Load { .. } => 2,
            HarvestError::OutputOpen { .. } => 3,
            HarvestError::Write { .. } => 4,
            HarvestError::Client(_) | HarvestError::WorkerPanicked(_) => 1,
        }
    }
}
