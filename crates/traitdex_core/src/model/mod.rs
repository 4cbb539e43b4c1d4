//! Shard domain model shared by loader, registry and consumer index.
//!
//! # Responsibility
//! - Define the canonical shard shape every other module passes around.
//! - Keep descriptor markup opaque to core logic.
//!
//! # Invariants
//! - Every shard names exactly one capability.
//! - Descriptor order inside one package is display order and is preserved.
//!
//! # See also
//! - docs/architecture/registry.md

pub mod shard;
