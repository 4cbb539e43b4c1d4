//! Core shard registry logic for traitdex.
//! This crate is the single source of truth for shard forwarding invariants.

pub mod index;
pub mod loader;
pub mod logging;
pub mod model;
pub mod registry;

pub use index::cumulative::{install_index, ImplementorIndex, SharedIndex};
pub use loader::{
    capability_from_path, load_shard_dir, load_shard_file, parse_shard_payload,
    parse_shard_script, LoaderError, LoaderResult,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::shard::{ImplementorDescriptor, PackageBucket, ShardPayload};
pub use registry::deferred::{ShardConsumer, ShardRegistry};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
