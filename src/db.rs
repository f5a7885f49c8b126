/// SQLite sample store.
///
/// A single-owner connection, opened once at startup and used for schema
/// creation and every batch write. De-duplication lives in the schema: the
/// UNIQUE constraint over (station_id, sample_tstamp, sample_type) with
/// ON CONFLICT IGNORE silently absorbs rows from repeated or overlapping
/// fetches, which is what makes ingestion idempotent.
///
/// Timestamps are stored as unix seconds UTC. `store_tstamp` records when we
/// learned a fact, `sample_tstamp` when it was true — later analysis needs to
/// tell those apart.

use crate::model::{Sample, StoreError};
use chrono::{TimeZone, Utc};
use rusqlite::{Connection, params};
use std::path::Path;
use tracing::debug;

/// A stored row, as read back for analysis tooling.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSample {
    pub station_id: u32,
    pub station_name: String,
    /// When this row was ingested (unix seconds UTC).
    pub store_tstamp: i64,
    /// When the measurement was taken (unix seconds UTC).
    pub sample_tstamp: i64,
    pub sample_type: String,
    pub sample_value: String,
}

/// Owned handle to the local sample database.
pub struct SampleStore {
    conn: Connection,
}

impl SampleStore {
    /// Opens (creating if necessary) the database file and ensures the
    /// schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Creates the samples table unless it is already present. Safe to call
    /// on every startup.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS viva_samples (
                station_id INTEGER,
                station_name TEXT,
                store_tstamp INTEGER,
                sample_tstamp INTEGER,
                sample_type TEXT,
                sample_value TEXT,
                UNIQUE (station_id, sample_tstamp, sample_type) ON CONFLICT IGNORE
            )",
            [],
        )?;
        Ok(())
    }

    /// Writes a batch of samples in one transaction.
    ///
    /// Either every row lands (rows violating the uniqueness triple are
    /// silently ignored and counted as zero inserts) or, on any other write
    /// error mid-batch, the whole transaction rolls back and the error is
    /// returned. No partial batch is ever left committed.
    ///
    /// Returns the number of rows actually inserted.
    pub fn write_batch(&mut self, samples: &[Sample]) -> Result<usize, StoreError> {
        let now = Utc::now().timestamp();
        let tx = self.conn.transaction()?;

        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO viva_samples
                 (station_id, station_name, store_tstamp, sample_tstamp, sample_type, sample_value)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;

            for sample in samples {
                debug!(%sample, "insert");
                inserted += stmt.execute(params![
                    sample.station_id,
                    sample.station_name,
                    now,
                    sample.timestamp.timestamp(),
                    sample.sample_type.as_str(),
                    sample.value,
                ])?;
            }
        }

        tx.commit()?;
        Ok(inserted)
    }

    /// Total number of stored samples.
    pub fn sample_count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM viva_samples", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// All stored rows for one station, ordered by measurement time. Read
    /// side of the store, used by analysis tooling.
    pub fn samples_for_station(&self, station_id: u32) -> Result<Vec<StoredSample>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT station_id, station_name, store_tstamp, sample_tstamp, sample_type, sample_value
             FROM viva_samples
             WHERE station_id = ?1
             ORDER BY sample_tstamp, sample_type",
        )?;

        let rows = stmt.query_map([station_id], |row| {
            Ok(StoredSample {
                station_id: row.get(0)?,
                station_name: row.get(1)?,
                store_tstamp: row.get(2)?,
                sample_tstamp: row.get(3)?,
                sample_type: row.get(4)?,
                sample_value: row.get(5)?,
            })
        })?;

        let mut samples = Vec::new();
        for row in rows {
            samples.push(row?);
        }
        Ok(samples)
    }
}

impl StoredSample {
    /// Measurement instant as a UTC datetime.
    pub fn sample_time(&self) -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(self.sample_tstamp, 0).single().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
