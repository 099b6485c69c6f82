use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Invoked on every tick with the tick's instant, so every display derives
/// its label from the same `now`.
pub type TickCallback = Box<dyn Fn(OffsetDateTime) + Send + Sync + 'static>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: Vec<(u64, Arc<TickCallback>)>,
}

/// A single shared heartbeat for every on-screen timer. One instance is
/// constructed per process by the composition root; handles are cheap
/// clones around the same registry, in the mold of the store handles in
/// the rest of this workspace.
#[derive(Clone)]
pub struct SyncedTicker {
    registry: Arc<Mutex<Registry>>,
    driver: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Default for SyncedTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncedTicker {
    /// A ticker with no background driver. Ticks only happen through
    /// [`SyncedTicker::trigger`] (or a driver started later); used directly
    /// in tests to drive simulated ticks.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::default())),
            driver: Arc::new(Mutex::new(None)),
        }
    }

    /// A ticker driven by a background interval task firing every `period`.
    /// Must be called within a tokio runtime. The task holds only a weak
    /// reference to the registry, so dropping every handle stops it; call
    /// [`SyncedTicker::shutdown`] to stop it explicitly.
    pub fn start(period: Duration) -> Self {
        let ticker = Self::new();
        let registry: Weak<Mutex<Registry>> = Arc::downgrade(&ticker.registry);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick fires immediately; skip it so the
            // schedule starts one full period after construction.
            interval.tick().await;
            loop {
                interval.tick().await;
                let Some(registry) = registry.upgrade() else {
                    break;
                };
                tick_registry(&registry, OffsetDateTime::now_utc());
            }
        });
        *ticker
            .driver
            .lock()
            .expect("ticker driver lock poisoned") = Some(handle);
        ticker
    }

    /// Register a callback invoked on every tick. Cancelling the returned
    /// subscription never affects other subscriptions.
    pub fn subscribe(&self, callback: TickCallback) -> TickSubscription {
        let mut registry = self
            .registry
            .lock()
            .expect("ticker registry lock poisoned");
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.push((id, Arc::new(callback)));
        TickSubscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Invoke all currently registered callbacks once, immediately and
    /// synchronously, outside the regular schedule. Newly mounted displays
    /// use this to show a correct value before the first natural tick.
    pub fn trigger(&self) {
        self.tick_at(OffsetDateTime::now_utc());
    }

    /// Run one tick as if it happened at `now`.
    pub(crate) fn tick_at(&self, now: OffsetDateTime) {
        tick_registry(&self.registry, now);
    }

    /// Stop the background driver, if one is running. Idempotent.
    pub fn shutdown(&self) {
        if let Some(handle) = self
            .driver
            .lock()
            .expect("ticker driver lock poisoned")
            .take()
        {
            handle.abort();
        }
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.registry
            .lock()
            .expect("ticker registry lock poisoned")
            .callbacks
            .len()
    }
}

/// Invoke every registered callback with `now`, iterating over a snapshot
/// so subscribe/cancel from within a callback cannot corrupt the pass, and
/// isolating each invocation so one panicking callback cannot starve the
/// rest.
fn tick_registry(registry: &Mutex<Registry>, now: OffsetDateTime) {
    let snapshot: Vec<(u64, Arc<TickCallback>)> = registry
        .lock()
        .expect("ticker registry lock poisoned")
        .callbacks
        .clone();

    for (id, callback) in snapshot {
        if catch_unwind(AssertUnwindSafe(|| callback(now))).is_err() {
            tracing::error!(subscription_id = id, "tick callback panicked");
        }
    }
}

/// Handle to one registered tick callback. Cancelling is idempotent and
/// safe to call from within a callback; dropping the handle also cancels,
/// so the subscription is released on every exit path.
pub struct TickSubscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl TickSubscription {
    pub fn cancel(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .expect("ticker registry lock poisoned")
                .callbacks
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for TickSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
