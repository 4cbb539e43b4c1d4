//! Consumer-side cumulative view over forwarded shards.
//!
//! # Responsibility
//! - Fold the forwarded shard stream into one queryable capability index.
//! - Keep the replacement convention out of the registry itself.
//!
//! # See also
//! - docs/architecture/registry.md

pub mod cumulative;
