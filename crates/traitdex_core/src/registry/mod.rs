//! Deferred registration wiring between shard sources and the consumer.
//!
//! # Responsibility
//! - Accumulate independently loaded shard payloads in arrival order.
//! - Hand every payload to exactly one late-binding consumer.
//!
//! # Invariants
//! - Binding state moves Unbound → Bound exactly once and never back.
//! - Forwarded order equals submission order, across the install boundary.
//!
//! # See also
//! - docs/architecture/registry.md

pub mod deferred;
