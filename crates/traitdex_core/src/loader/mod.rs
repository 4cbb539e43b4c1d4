//! Generated shard script loading.
//!
//! # Responsibility
//! - Replay generated shard scripts (`trait.impl/**/trait.<Name>.js`) into
//!   `ShardPayload` values.
//! - Keep generated-format quirks out of registry and index code.
//!
//! # Invariants
//! - Capability names derive from shard paths, never from script contents.
//! - An empty payload object loads as an empty bucket, not as "no shard".

use std::error::Error;
use std::fmt::{Display, Formatter};

mod script;
mod tree;

pub use script::{capability_from_path, parse_shard_payload, parse_shard_script};
pub use tree::{load_shard_dir, load_shard_file};

pub type LoaderResult<T> = Result<T, LoaderError>;

/// Shard loading and parsing errors.
#[derive(Debug)]
pub enum LoaderError {
    /// Path does not look like a generated shard script location.
    InvalidShardPath(String),
    /// Shard file or directory could not be read.
    UnreadableShard {
        path: String,
        source: std::io::Error,
    },
    /// Script or payload text does not match the generated shape.
    MalformedPayload { capability: String, message: String },
    /// A descriptor entry is neither a markup string nor an array carrying
    /// one.
    UnsupportedDescriptor { capability: String, package: String },
}

impl Display for LoaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidShardPath(path) => write!(f, "path is not a shard script: {path}"),
            Self::UnreadableShard { path, source } => {
                write!(f, "failed to read shard at `{path}`: {source}")
            }
            Self::MalformedPayload {
                capability,
                message,
            } => write!(f, "malformed shard payload for `{capability}`: {message}"),
            Self::UnsupportedDescriptor {
                capability,
                package,
            } => write!(
                f,
                "unsupported descriptor encoding for `{capability}` in package `{package}`"
            ),
        }
    }
}

impl Error for LoaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnreadableShard { source, .. } => Some(source),
            Self::InvalidShardPath(_)
            | Self::MalformedPayload { .. }
            | Self::UnsupportedDescriptor { .. } => None,
        }
    }
}
