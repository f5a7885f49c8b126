/// Upstream data ingestion.
///
/// `viva` implements the concrete SOAP client. This module defines the client
/// contract the scheduler works against (so tests can substitute a scripted
/// client) and the ingestion pipeline that turns a fetched report into
/// storable samples.

pub mod viva;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::classify;
use crate::model::{RawMeasurement, Sample, Station, VivaError};
use chrono::{DateTime, Utc};
use tracing::debug;

// ---------------------------------------------------------------------------
// Client contract
// ---------------------------------------------------------------------------

/// History type filter for `fetch_history`, matching the service's ViVaTyp
/// codes. The service accepts further codes, but these are the only ones
/// with a known meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFilter {
    All,
    AvgWind,
    GustWind,
    WindDirection,
    WaterLevel,
    AirTemp,
    WaterTemp,
}

impl HistoryFilter {
    /// Wire code sent in the ViVaTyp request field.
    pub fn code(&self) -> u32 {
        match self {
            HistoryFilter::All => 0,
            HistoryFilter::AvgWind => 11,
            HistoryFilter::GustWind => 12,
            HistoryFilter::WindDirection => 13,
            HistoryFilter::WaterLevel => 14,
            HistoryFilter::AirTemp => 15,
            HistoryFilter::WaterTemp => 16,
        }
    }
}

/// One station's worth of raw measurements from a single fetch, along with
/// the display name the response carried for that station.
#[derive(Debug, Clone)]
pub struct StationReport {
    pub station_name: String,
    pub measurements: Vec<RawMeasurement>,
}

/// The upstream service boundary.
///
/// All three operations block until the service responds or the transport
/// fails; the implementation applies a per-request timeout so one
/// unresponsive station cannot stall a poll round indefinitely.
pub trait VivaClient {
    /// Fetch the global station directory.
    fn list_stations(&self) -> Result<Vec<Station>, VivaError>;

    /// Fetch the latest recorded measurements for one station.
    ///
    /// Returns `VivaError::Station` when the service reports an error for the
    /// station, omits its name, or returns no measurements at all — any of
    /// these is a total failure for the station's fetch cycle, distinct from
    /// an empty history window.
    fn fetch_latest(&self, station_id: u32) -> Result<StationReport, VivaError>;

    /// Fetch historic measurements for one station in `[from, until)`.
    ///
    /// An empty window is a successful zero-measurement report.
    fn fetch_history(
        &self,
        station_id: u32,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        filter: HistoryFilter,
    ) -> Result<StationReport, VivaError>;
}

// ---------------------------------------------------------------------------
// Ingestion pipeline
// ---------------------------------------------------------------------------

/// Classifies a fetched report into storable samples.
///
/// Each measurement runs through the canonical type lookup; unrecognized
/// (type, unit) pairs are dropped with a debug log and the rest of the batch
/// proceeds. Output order matches input order. Duplicates across overlapping
/// fetches are expected here — the store's uniqueness constraint absorbs them
/// at write time.
pub fn build_samples(station_id: u32, report: &StationReport) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(report.measurements.len());

    for m in &report.measurements {
        match classify::classify(&m.type_name, &m.unit) {
            Some(sample_type) => {
                let sample = Sample {
                    station_id,
                    station_name: report.station_name.clone(),
                    sample_type,
                    value: m.value.clone(),
                    timestamp: m.timestamp,
                };
                debug!(%sample, "classified");
                samples.push(sample);
            }
            None => {
                debug!(
                    station_id,
                    type_name = %m.type_name,
                    unit = %m.unit,
                    "ignored measurement of unknown type"
                );
            }
        }
    }

    samples
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
