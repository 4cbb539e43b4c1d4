//! Shard payload records.
//!
//! # Responsibility
//! - Model one capability's contribution: package → ordered implementors.
//! - Round-trip the generated payload shape without interpreting markup.
//!
//! # Invariants
//! - An empty package bucket is a legal shard body, distinct from "no shard".
//! - Duplicate descriptors are legal and preserved in order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque rendered markup for one implementor row.
///
/// Core never inspects the fragment; it is produced upstream and consumed by
/// whatever renders the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplementorDescriptor(String);

impl ImplementorDescriptor {
    /// Wraps one rendered implementor fragment.
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Returns the raw markup fragment.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Package name → ordered implementor descriptors.
///
/// Package key order carries no meaning; descriptor order within one package
/// does.
pub type PackageBucket = BTreeMap<String, Vec<ImplementorDescriptor>>;

/// One self-contained contribution: a single capability plus the packages
/// implementing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardPayload {
    /// Capability name, e.g. `core::fmt::Binary`.
    pub capability: String,
    /// Implementors grouped per package. May be empty.
    pub packages: PackageBucket,
}

impl ShardPayload {
    /// Creates a shard with an empty package bucket.
    pub fn new(capability: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            packages: PackageBucket::new(),
        }
    }

    /// Creates a shard from an already-built package bucket.
    pub fn with_packages(capability: impl Into<String>, packages: PackageBucket) -> Self {
        Self {
            capability: capability.into(),
            packages,
        }
    }

    /// Appends one descriptor to a package, creating the package entry on
    /// first use.
    pub fn push_implementor(
        &mut self,
        package: impl Into<String>,
        descriptor: ImplementorDescriptor,
    ) {
        self.packages
            .entry(package.into())
            .or_default()
            .push(descriptor);
    }

    /// Returns the number of packages in this shard.
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Returns the total descriptor count across all packages.
    pub fn implementor_count(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }
}
