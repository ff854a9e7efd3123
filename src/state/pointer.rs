//! Pointer listener lifetime.
//!
//! While a split is being resized the host must forward pointer moves and
//! releases to the editor. That forwarding is modeled as a subscription
//! whose lifetime is an RAII guard, so ending the resize or dropping the
//! editor always unsubscribes.

use std::cell::Cell;
use std::rc::Rc;
use tracing::trace;

/// Shared count of live pointer subscriptions.
///
/// Clones observe the same count.
#[derive(Debug, Clone, Default)]
pub struct ListenerGauge {
    live: Rc<Cell<usize>>,
}

impl ListenerGauge {
    /// Gauge with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subscriptions currently held.
    pub fn live(&self) -> usize {
        self.live.get()
    }

    /// Acquire a subscription. Released when the guard drops.
    pub fn subscribe(&self) -> PointerSubscription {
        self.live.set(self.live.get() + 1);
        trace!(live = self.live.get(), "Pointer subscription acquired");
        PointerSubscription {
            gauge: self.clone(),
        }
    }
}

/// Guard for one pointer subscription.
#[derive(Debug)]
pub struct PointerSubscription {
    gauge: ListenerGauge,
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        let live = self.gauge.live.get().saturating_sub(1);
        self.gauge.live.set(live);
        trace!(live, "Pointer subscription released");
    }
}
