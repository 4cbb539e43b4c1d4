//! Cumulative capability index, the reference shard consumer.

use crate::model::shard::{PackageBucket, ShardPayload};
use crate::registry::deferred::ShardRegistry;
use log::debug;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Shared handle to an index fed by an installed consumer.
pub type SharedIndex = Rc<RefCell<ImplementorIndex>>;

/// Capability → package bucket view built from forwarded shards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImplementorIndex {
    capabilities: BTreeMap<String, PackageBucket>,
}

impl ImplementorIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one forwarded shard.
    ///
    /// A shard whose capability is already present replaces that capability's
    /// bucket wholesale. Sources ship one shard per capability per load, so a
    /// repeat arrival is a regeneration and the latest payload is
    /// authoritative. Buckets are never unioned across shards.
    pub fn apply(&mut self, shard: ShardPayload) {
        let replaced = self
            .capabilities
            .insert(shard.capability.clone(), shard.packages)
            .is_some();
        if replaced {
            debug!(
                "event=capability_replaced module=index capability={}",
                shard.capability
            );
        }
    }

    /// Returns the bucket for one capability.
    pub fn get(&self, capability: &str) -> Option<&PackageBucket> {
        self.capabilities.get(capability)
    }

    /// Returns whether the capability has been indexed, even with an empty
    /// bucket.
    pub fn contains(&self, capability: &str) -> bool {
        self.capabilities.contains_key(capability)
    }

    /// Returns capability names in sorted order.
    pub fn capability_names(&self) -> Vec<&str> {
        self.capabilities.keys().map(String::as_str).collect()
    }

    /// Returns the number of indexed capabilities.
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Returns whether nothing has been indexed yet.
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Returns the descriptor count for one capability.
    pub fn implementor_count(&self, capability: &str) -> Option<usize> {
        self.get(capability)
            .map(|bucket| bucket.values().map(Vec::len).sum())
    }
}

/// Installs a consumer that folds every forwarded shard into a shared index.
///
/// Returns the index handle; shard sources keep submitting through the
/// registry while the caller reads the handle.
pub fn install_index(registry: &ShardRegistry) -> SharedIndex {
    let index: SharedIndex = Rc::new(RefCell::new(ImplementorIndex::new()));
    let sink = Rc::clone(&index);
    registry.install(move |shard| sink.borrow_mut().apply(shard));
    index
}

#[cfg(test)]
mod tests {
    use super::{install_index, ImplementorIndex};
    use crate::model::shard::{ImplementorDescriptor, ShardPayload};
    use crate::registry::deferred::ShardRegistry;

    fn shard(capability: &str, package: &str, markup: &str) -> ShardPayload {
        let mut shard = ShardPayload::new(capability);
        shard.push_implementor(package, ImplementorDescriptor::new(markup));
        shard
    }

    #[test]
    fn apply_replaces_existing_capability_bucket() {
        let mut index = ImplementorIndex::new();
        index.apply(shard("core::fmt::Binary", "tinyvec", "impl Binary for A"));
        index.apply(shard(
            "core::fmt::Binary",
            "openssl",
            "impl Binary for OcspFlag",
        ));

        assert_eq!(index.len(), 1);
        let bucket = index.get("core::fmt::Binary").expect("indexed capability");
        assert!(bucket.contains_key("openssl"));
        assert!(!bucket.contains_key("tinyvec"));
    }

    #[test]
    fn empty_bucket_is_indexed_not_dropped() {
        let mut index = ImplementorIndex::new();
        index.apply(ShardPayload::new("core::fmt::Binary"));

        assert!(index.contains("core::fmt::Binary"));
        assert_eq!(index.implementor_count("core::fmt::Binary"), Some(0));
    }

    #[test]
    fn capability_names_are_sorted() {
        let mut index = ImplementorIndex::new();
        index.apply(shard("std::io::Seek", "either", "impl Seek for Either"));
        index.apply(shard("core::fmt::Binary", "tinyvec", "impl Binary for A"));

        assert_eq!(
            index.capability_names(),
            ["core::fmt::Binary", "std::io::Seek"]
        );
    }

    #[test]
    fn install_index_receives_buffered_and_later_shards() {
        let registry = ShardRegistry::new();
        registry.submit(shard("core::fmt::Binary", "tinyvec", "impl Binary for A"));

        let index = install_index(&registry);
        registry.submit(shard("std::io::Seek", "either", "impl Seek for Either"));

        let index = index.borrow();
        assert_eq!(index.len(), 2);
        assert_eq!(index.implementor_count("std::io::Seek"), Some(1));
    }
}
