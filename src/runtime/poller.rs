use std::sync::Arc;
use std::time::Duration;

use crate::api::MarketApi;
use crate::notify::Notifier;
use crate::scanner::{CapacityChecker, CheckOutcome, StoreChecker};

/// Outcomes of both checkers for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub store: CheckOutcome,
    pub capacity: CheckOutcome,
}

/// Drives both checkers every tick, then sleeps for the configured interval.
///
/// Ticks never overlap: the next one starts only after both checkers finished
/// and the sleep elapsed. A slow tick simply delays the next one.
pub struct Poller {
    api: Arc<dyn MarketApi>,
    notifier: Arc<dyn Notifier>,
    store: StoreChecker,
    capacity: CapacityChecker,
    interval: Duration,
    ticks: u64,
}

impl Poller {
    pub fn new(
        api: Arc<dyn MarketApi>,
        notifier: Arc<dyn Notifier>,
        store: StoreChecker,
        interval: Duration,
    ) -> Self {
        Self {
            api,
            notifier,
            store,
            capacity: CapacityChecker::new(),
            interval,
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn store(&self) -> &StoreChecker {
        &self.store
    }

    /// Runs both checkers concurrently. Each absorbs its own failures, so one
    /// failing never cancels the other.
    pub async fn tick(&mut self) -> TickReport {
        let api: &dyn MarketApi = &*self.api;
        let notifier: &dyn Notifier = &*self.notifier;

        let (store, capacity) = tokio::join!(
            self.store.check(api, notifier),
            self.capacity.check(api, notifier),
        );

        self.ticks += 1;
        let report = TickReport { store, capacity };
        tracing::debug!("Tick {} finished: {:?}", self.ticks, report);
        report
    }

    /// Polls forever.
    pub async fn run(mut self) {
        tracing::info!(
            "🔍 Monitoring store listings and regional capacity every {:.3}s",
            self.interval.as_secs_f64()
        );

        loop {
            self.tick().await;
            tokio::time::sleep(self.interval).await;
        }
    }
}
