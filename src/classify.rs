/// Canonical sample type lookup.
///
/// ViVa identifies a measurement by a Swedish type name plus a unit string;
/// the same type name can map to different canonical types depending on the
/// unit (current measurements report both a direction in ° and a speed in
/// knop under one name). The table below is the single source of truth for
/// that mapping — all other modules should classify through `classify` rather
/// than matching on wire strings.
///
/// Stations report evolving sets of measurement types, several of which are
/// not yet mapped. Unknown pairs are therefore rejected, not treated as
/// errors: the caller drops the measurement and keeps processing the batch.

use crate::model::SampleType;

/// The closed (type name, unit) → canonical type mapping. Type names are
/// uppercase; lookups uppercase their input before comparing.
pub static SAMPLE_LUT: &[(&str, &str, SampleType)] = &[
    ("MEDELVIND", "m/s", SampleType::AvgWind),
    ("BYVIND", "m/s", SampleType::GustWind),
    ("RIKTNING", "°", SampleType::WindDirection),
    ("VATTENTEMPERATUR", "°", SampleType::WaterTemp),
    ("SIKT", "m", SampleType::Visibility),
    ("LUFTTEMPERATUR", "°", SampleType::AirTemp),
    ("LUFTFUKTIGHET", "%", SampleType::AirHumidity),
    ("LUFTTRYCK", "mbar", SampleType::AirPressure),
    ("VATTENSTÅND", "cm", SampleType::WaterLevel),
    ("STRÖM 2M", "°", SampleType::WaterCurrent2mDir),
    ("STRÖM 2M", "knop", SampleType::WaterCurrent2mSpeed),
    ("STRÖM 4M", "°", SampleType::WaterCurrent4mDir),
    ("STRÖM 4M", "knop", SampleType::WaterCurrent4mSpeed),
    ("STRÖM 6M", "°", SampleType::WaterCurrent6mDir),
    ("STRÖM 6M", "knop", SampleType::WaterCurrent6mSpeed),
    ("STRÖM YTA", "°", SampleType::WaterCurrentSurfaceDir),
    ("STRÖM YTA", "knop", SampleType::WaterCurrentSurfaceSpeed),
];

/// Maps a raw (type name, unit) pair to its canonical sample type.
///
/// Type names are compared case-insensitively (the uppercasing is
/// Unicode-aware, so "vattenstånd" matches "VATTENSTÅND"); units must match
/// exactly. Returns `None` for unrecognized pairs.
pub fn classify(type_name: &str, unit: &str) -> Option<SampleType> {
    let upper = type_name.to_uppercase();
    SAMPLE_LUT
        .iter()
        .find(|(name, u, _)| *name == upper && *u == unit)
        .map(|(_, _, stype)| *stype)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
