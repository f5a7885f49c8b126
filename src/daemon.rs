/// Scheduler for the two collection modes.
///
/// This module drives the fetch → classify → store → notify cycle:
/// 1. History sync: one pass per station over a caller-supplied time window,
///    then done.
/// 2. Poll: an indefinite fixed-cadence loop fetching the latest report per
///    station, compensating the sleep for however long the round took so
///    round starts stay approximately periodic.
///
/// Stations are processed strictly sequentially within a round; total round
/// latency is the sum of per-station fetch latencies. All runtime failures
/// are contained per station and per round — nothing in steady state aborts
/// the process. The only way out of the poll loop is the shutdown flag,
/// checked between stations and across the (sliced) round-boundary sleep.

use crate::db::SampleStore;
use crate::ingest::{self, HistoryFilter, VivaClient};
use crate::model::VivaError;
use crate::notify::Notifier;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Scheduler configuration.
pub struct DaemonConfig {
    /// Stations to collect, in processing order.
    pub station_ids: Vec<u32>,
    /// Target time between round starts in poll mode.
    pub poll_interval: Duration,
}

// ---------------------------------------------------------------------------
// Daemon
// ---------------------------------------------------------------------------

/// The collection scheduler. Owns the store handle for its whole lifetime;
/// the upstream client and notifier are injected so tests can script them.
pub struct Daemon<C: VivaClient, N: Notifier> {
    config: DaemonConfig,
    client: C,
    notifier: N,
    store: SampleStore,
    shutdown: Arc<AtomicBool>,
}

/// Sleep in short slices so a shutdown request is honored at the sleep
/// boundary instead of after a full poll interval.
const SLEEP_SLICE: Duration = Duration::from_millis(500);

/// Computes the round-boundary sleep that keeps round starts periodic.
///
/// Returns `None` when the round already overran the interval — the caller
/// warns and starts the next round immediately. There is deliberately no
/// further backoff; overruns signal a configuration problem (too many
/// stations for the interval), not a condition to self-correct.
pub fn remaining_sleep(interval: Duration, elapsed: Duration) -> Option<Duration> {
    interval.checked_sub(elapsed).filter(|d| !d.is_zero())
}

impl<C: VivaClient, N: Notifier> Daemon<C, N> {
    pub fn new(
        config: DaemonConfig,
        client: C,
        notifier: N,
        store: SampleStore,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            client,
            notifier,
            store,
            shutdown,
        }
    }

    /// Fetches, classifies, stores, and notifies for a single station report.
    ///
    /// Returns the number of rows newly inserted, or `None` when the fetch or
    /// store failed (already logged). The notifier runs only after a
    /// successful write of a non-empty batch.
    fn collect(
        &mut self,
        station_id: u32,
        fetched: Result<ingest::StationReport, VivaError>,
    ) -> Option<usize> {
        let report = match fetched {
            Ok(report) => report,
            Err(e) => {
                warn!(station_id, error = %e, "fetch failed, skipping station");
                return None;
            }
        };

        let samples = ingest::build_samples(station_id, &report);
        if samples.is_empty() {
            info!(station_id, "no storable samples this cycle");
            return Some(0);
        }

        match self.store.write_batch(&samples) {
            Ok(inserted) => {
                info!(
                    station_id,
                    station = %report.station_name,
                    samples = samples.len(),
                    inserted,
                    "stored batch"
                );
                self.notifier.notify(&report.station_name);
                Some(inserted)
            }
            Err(e) => {
                error!(station_id, error = %e, "batch write failed, rolled back");
                None
            }
        }
    }

    /// History-sync mode: one historical fetch per station over
    /// `[from, until)`, then return. A failure for one station never blocks
    /// the others; this always runs to completion.
    pub fn sync_history(&mut self, from: DateTime<Utc>, until: DateTime<Utc>) {
        info!(
            stations = ?self.config.station_ids,
            %from,
            %until,
            "syncing station history"
        );

        for station_id in self.config.station_ids.clone() {
            let fetched = self
                .client
                .fetch_history(station_id, from, until, HistoryFilter::All);
            self.collect(station_id, fetched);
        }

        match self.store.sample_count() {
            Ok(total) => info!(total, "history sync complete"),
            Err(e) => warn!(error = %e, "history sync complete, count unavailable"),
        }
    }

    /// One poll round: fetch the latest report for every configured station,
    /// sequentially. Returns per-station inserted counts; stations whose
    /// cycle failed are absent from the map.
    pub fn poll_round(&mut self) -> HashMap<u32, usize> {
        let mut results = HashMap::new();

        for station_id in self.config.station_ids.clone() {
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }
            let fetched = self.client.fetch_latest(station_id);
            if let Some(inserted) = self.collect(station_id, fetched) {
                results.insert(station_id, inserted);
            }
        }

        results
    }

    /// Poll mode: loops until the shutdown flag is set.
    ///
    /// Each round records its start instant; after the round the sleep is
    /// shortened by the round's elapsed time. A round that exceeds the
    /// interval emits a warning and the next round starts immediately.
    pub fn run_poll(&mut self) {
        info!(
            interval_secs = self.config.poll_interval.as_secs(),
            stations = self.config.station_ids.len(),
            "starting poll loop"
        );

        while !self.shutdown.load(Ordering::Relaxed) {
            let started = Instant::now();
            let results = self.poll_round();
            let elapsed = started.elapsed();

            let inserted: usize = results.values().sum();
            info!(
                stations_ok = results.len(),
                inserted,
                elapsed_ms = elapsed.as_millis() as u64,
                "poll round complete"
            );

            match remaining_sleep(self.config.poll_interval, elapsed) {
                Some(sleep_for) => self.interruptible_sleep(sleep_for),
                None => warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    interval_secs = self.config.poll_interval.as_secs(),
                    "polling all stations took longer than the poll interval, \
                     consider increasing it"
                ),
            }
        }

        info!("poll loop terminated");
    }

    fn interruptible_sleep(&self, total: Duration) {
        let deadline = Instant::now() + total;
        while !self.shutdown.load(Ordering::Relaxed) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            std::thread::sleep(SLEEP_SLICE.min(deadline - now));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
