//! Error types surfaced to the command line.

use std::path::PathBuf;

use thiserror::Error;

/// Exit status used when no product handler matches the repository.
pub const NO_HANDLER_EXIT_CODE: i32 = 2;

/// Errors with a meaning beyond "some I/O went wrong".
#[derive(Debug, Error)]
pub enum AutogenError {
    #[error("no handler for this repository")]
    NoHandler { identity: String },

    #[error("unknown product `{name}` (known: {})", .known.join(", "))]
    UnknownProduct { name: String, known: Vec<String> },

    #[error("the directory {} does not exist", .path.display())]
    MissingSourceRoot { path: PathBuf },

    #[error(
        "refusing to regenerate {}: removing it would delete {}",
        .include.display(),
        .protected.display()
    )]
    UnsafeIncludeDir { include: PathBuf, protected: PathBuf },

    #[error("could not determine the repository identity: {reason}")]
    NoRepositoryIdentity { reason: String },
}

impl AutogenError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AutogenError::NoHandler { .. } => NO_HANDLER_EXIT_CODE,
            _ => 1,
        }
    }
}
