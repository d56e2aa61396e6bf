//! Tick-driven processing loop.
//!
//! One cycle pulls a bar from the feed, runs the stream processor and
//! publishes the result. Cycles never overlap: a cycle that starts while
//! another is active is rejected, and late ticks are delayed rather than
//! bunched up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, watch, Mutex};
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::services::signals::{CycleOutcome, StreamProcessor};
use crate::sources::BarFeed;
use crate::types::{Analysis, Bar, NotificationEvent};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Clears the active-cycle flag when dropped.
struct CycleGuard<'a>(&'a AtomicBool);

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives a [`StreamProcessor`] from a [`BarFeed`] on a fixed interval.
pub struct SignalRunner<F: BarFeed> {
    processor: Mutex<StreamProcessor>,
    feed: Mutex<F>,
    tick_interval: Duration,
    cycle_active: AtomicBool,
    analysis_tx: watch::Sender<Option<Arc<Analysis>>>,
    events_tx: broadcast::Sender<NotificationEvent>,
    shutdown_tx: broadcast::Sender<()>,
}

impl<F: BarFeed + 'static> SignalRunner<F> {
    pub fn new(processor: StreamProcessor, feed: F, tick_interval: Duration) -> Arc<Self> {
        let (analysis_tx, _) = watch::channel(None);
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (shutdown_tx, _) = broadcast::channel(1);

        Arc::new(Self {
            processor: Mutex::new(processor),
            feed: Mutex::new(feed),
            tick_interval,
            cycle_active: AtomicBool::new(false),
            analysis_tx,
            events_tx,
            shutdown_tx,
        })
    }

    /// Latest analysis; `None` while history is insufficient.
    pub fn subscribe_analysis(&self) -> watch::Receiver<Option<Arc<Analysis>>> {
        self.analysis_tx.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events_tx.subscribe()
    }

    /// Load initial history and publish the first analysis, without events.
    pub async fn seed(&self, bars: Vec<Bar>) -> Option<Arc<Analysis>> {
        let count = bars.len();
        let analysis = self.processor.lock().await.seed(bars);
        info!(
            "Seeded {} bars, analysis {}",
            count,
            if analysis.is_some() { "available" } else { "unavailable" }
        );
        self.analysis_tx.send_replace(analysis.clone());
        analysis
    }

    /// Run one cycle. Returns `None` without touching any state if another
    /// cycle is still in progress.
    pub async fn run_cycle(&self) -> Option<CycleOutcome> {
        let _guard = self.try_begin_cycle()?;

        let bar = self.feed.lock().await.next_bar().await;
        let outcome = self.processor.lock().await.on_bar(bar);

        self.analysis_tx.send_replace(outcome.analysis.clone());
        for event in &outcome.events {
            // No subscribers is fine.
            let _ = self.events_tx.send(event.clone());
        }

        Some(outcome)
    }

    /// Run cycles every `tick_interval` until [`SignalRunner::shutdown`].
    pub async fn run(self: Arc<Self>) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut ticker = interval_at(Instant::now() + self.tick_interval, self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("Signal runner started ({:?} interval)", self.tick_interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.run_cycle().await.is_none() {
                        warn!("Skipped tick: previous cycle still running");
                    }
                }
                _ = shutdown_rx.recv() => {
                    debug!("Signal runner received shutdown");
                    break;
                }
            }
        }

        info!("Signal runner stopped");
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    fn try_begin_cycle(&self) -> Option<CycleGuard<'_>> {
        self.cycle_active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CycleGuard(&self.cycle_active))
    }
}
