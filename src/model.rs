/// Shared data types for the ViVa collection pipeline.
///
/// The sample model is deliberately string-heavy: measurement values are kept
/// as the verbatim strings reported by the service, never coerced to floats,
/// so precision and formatting survive the round trip into the store.

use chrono::{DateTime, Utc};
use std::fmt;

// ---------------------------------------------------------------------------
// Station directory
// ---------------------------------------------------------------------------

/// One entry in the ViVa station directory. Fetched for display/listing only,
/// never persisted locally.
#[derive(Debug, Clone)]
pub struct Station {
    /// ViVa station id (PlatsId).
    pub id: u32,
    /// Display name (Platsnamn), e.g. "Landsort Norra".
    pub name: String,
    /// Latitude as the verbatim decimal string reported by the service.
    pub latitude: String,
    /// Longitude, same representation as `latitude`.
    pub longitude: String,
}

// ---------------------------------------------------------------------------
// Measurements and samples
// ---------------------------------------------------------------------------

/// A single raw measurement as reported by the service, before classification.
///
/// The wall-clock timestamp from the wire (always CET/CEST) has already been
/// normalized to UTC by the parser.
#[derive(Debug, Clone)]
pub struct RawMeasurement {
    /// Measurement type name as reported, e.g. "MEDELVIND".
    pub type_name: String,
    /// Unit string as reported, e.g. "m/s" or "°".
    pub unit: String,
    /// Verbatim value string.
    pub value: String,
    /// Instant the measurement was taken.
    pub timestamp: DateTime<Utc>,
}

/// The closed set of canonical sample types. A `Sample` can only be built with
/// one of these, so unrecognized upstream types never reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    AvgWind,
    GustWind,
    WindDirection,
    WaterTemp,
    Visibility,
    AirTemp,
    AirHumidity,
    AirPressure,
    WaterLevel,
    WaterCurrent2mDir,
    WaterCurrent2mSpeed,
    WaterCurrent4mDir,
    WaterCurrent4mSpeed,
    WaterCurrent6mDir,
    WaterCurrent6mSpeed,
    WaterCurrentSurfaceDir,
    WaterCurrentSurfaceSpeed,
}

impl SampleType {
    /// Canonical name, as stored in the `sample_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleType::AvgWind => "AVG_WIND",
            SampleType::GustWind => "GUST_WIND",
            SampleType::WindDirection => "WIND_DIRECTION",
            SampleType::WaterTemp => "WATER_TEMP",
            SampleType::Visibility => "VISIBILITY",
            SampleType::AirTemp => "AIR_TEMP",
            SampleType::AirHumidity => "AIR_HUMIDITY",
            SampleType::AirPressure => "AIR_PRESSURE",
            SampleType::WaterLevel => "WATER_LEVEL",
            SampleType::WaterCurrent2mDir => "WATER_CURRENT_2M_DIR",
            SampleType::WaterCurrent2mSpeed => "WATER_CURRENT_2M_SPEED",
            SampleType::WaterCurrent4mDir => "WATER_CURRENT_4M_DIR",
            SampleType::WaterCurrent4mSpeed => "WATER_CURRENT_4M_SPEED",
            SampleType::WaterCurrent6mDir => "WATER_CURRENT_6M_DIR",
            SampleType::WaterCurrent6mSpeed => "WATER_CURRENT_6M_SPEED",
            SampleType::WaterCurrentSurfaceDir => "WATER_CURRENT_SURFACE_DIR",
            SampleType::WaterCurrentSurfaceSpeed => "WATER_CURRENT_SURFACE_SPEED",
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified measurement, ready for persistence.
///
/// Transient: built per fetch cycle, handed to the store, then discarded. The
/// durable representation is the row in `viva_samples`.
#[derive(Debug, Clone)]
pub struct Sample {
    pub station_id: u32,
    /// Display name from the fetch response that produced this sample.
    pub station_name: String,
    pub sample_type: SampleType,
    /// Verbatim value string from upstream.
    pub value: String,
    /// Instant the measurement was taken (UTC).
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) -- {} = {} at {}",
            self.station_name, self.station_id, self.sample_type, self.value, self.timestamp
        )
    }
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Failures talking to the ViVa service. Both variants are contained per
/// station and per round by the scheduler; neither is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum VivaError {
    /// Service unreachable or the response could not be parsed.
    #[error("transport error: {0}")]
    Transport(String),
    /// Service responded but reported an error for the station, or the
    /// response was missing required fields (station name, measurements).
    #[error("station error: {0}")]
    Station(String),
}

/// Store-level failure. A failed batch write is rolled back in full.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
