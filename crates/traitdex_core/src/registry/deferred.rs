//! Deferred shard registration registry.
//!
//! Shard sources and the consumer that renders them load in an order the host
//! controls, not this crate. The registry absorbs that: shards submitted
//! before a consumer exists are buffered in submission order; once a consumer
//! installs, the buffer drains to it and every later submission is forwarded
//! synchronously.

use crate::model::shard::ShardPayload;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;

/// Consumer callback invoked once per forwarded shard.
///
/// The same capability can arrive more than once when a source is
/// regenerated; each invocation is an authoritative replacement for that
/// capability, not an additive merge.
pub type ShardConsumer = Rc<dyn Fn(ShardPayload)>;

/// Registry binding state. `Bound` is terminal for the process lifetime.
enum RegistryState {
    /// No consumer yet; submissions accumulate in submission order.
    Unbound { pending: Vec<ShardPayload> },
    /// Consumer installed; submissions forward synchronously.
    Bound { consumer: ShardConsumer },
}

/// Cloneable handle to one shard registry.
///
/// Clones share state. Hand one clone to every shard source and one to the
/// consumer site; the registry itself never lives in ambient global state.
#[derive(Clone)]
pub struct ShardRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl Default for ShardRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ShardRegistry {
    /// Creates an unbound registry with an empty pending buffer.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(RegistryState::Unbound {
                pending: Vec::new(),
            })),
        }
    }

    /// Submits one shard payload.
    ///
    /// Buffers while no consumer is installed, otherwise invokes the consumer
    /// synchronously before returning. Never fails: duplicate or odd
    /// capability names are accepted as-is and resolved downstream, where the
    /// latest payload for a capability wins.
    pub fn submit(&self, shard: ShardPayload) {
        // Decide under the borrow, invoke outside it: the consumer may
        // re-enter `submit` synchronously.
        let consumer = {
            let mut state = self.state.borrow_mut();
            match &mut *state {
                RegistryState::Unbound { pending } => {
                    debug!(
                        "event=shard_buffered module=registry capability={} pending={}",
                        shard.capability,
                        pending.len() + 1
                    );
                    pending.push(shard);
                    return;
                }
                RegistryState::Bound { consumer } => Rc::clone(consumer),
            }
        };

        debug!(
            "event=shard_forwarded module=registry capability={}",
            shard.capability
        );
        consumer(shard);
    }

    /// Installs the consumer and drains everything buffered so far, in
    /// original submission order.
    ///
    /// Only the first installation ever binds; later calls are ignored so
    /// exactly one consumer observes the shard stream. Shards submitted from
    /// inside the consumer while the drain runs are forwarded immediately,
    /// because the registry is already bound at that point.
    pub fn install(&self, consumer: impl Fn(ShardPayload) + 'static) {
        let consumer: ShardConsumer = Rc::new(consumer);
        let drained = {
            let mut state = self.state.borrow_mut();
            let bound = RegistryState::Bound {
                consumer: Rc::clone(&consumer),
            };
            match std::mem::replace(&mut *state, bound) {
                RegistryState::Unbound { pending } => pending,
                RegistryState::Bound { consumer: first } => {
                    // First consumer wins; restore it and drop the newcomer.
                    *state = RegistryState::Bound { consumer: first };
                    warn!("event=install_ignored module=registry status=noop reason=already_bound");
                    return;
                }
            }
        };

        info!(
            "event=consumer_installed module=registry status=ok drained={}",
            drained.len()
        );
        for shard in drained {
            consumer(shard);
        }
    }

    /// Returns whether a consumer has been installed.
    pub fn is_bound(&self) -> bool {
        matches!(&*self.state.borrow(), RegistryState::Bound { .. })
    }

    /// Returns the number of shards waiting for a consumer. Zero once bound.
    pub fn pending_len(&self) -> usize {
        match &*self.state.borrow() {
            RegistryState::Unbound { pending } => pending.len(),
            RegistryState::Bound { .. } => 0,
        }
    }
}
