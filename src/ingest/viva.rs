/// ViVa SOAP API client: envelope construction + XML response parsing.
///
/// The service is a classic SOAP 1.1 endpoint (vivadata.asmx) with three
/// operations:
///   GetViVaPoints  — station directory
///   GetViVaDataT   — latest measurements for one station
///   GetViVaDataTH  — historic measurements for one station in a time range
///
/// Responses are parsed by local element name rather than with a schema-aware
/// toolkit; the handful of elements we consume (see `fixtures.rs` for
/// annotated payloads) have unambiguous names within each response. All
/// wall-clock timestamps on the wire are CET/CEST and are converted to UTC
/// here, before anything else touches them.

use crate::ingest::{HistoryFilter, StationReport, VivaClient};
use crate::model::{RawMeasurement, Station, VivaError};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::CET;
use std::time::Duration;
use tracing::trace;

/// Production service endpoint.
pub const VIVA_URL: &str = "http://161.54.134.239/vivadata.asmx";

/// User agent presented to the service.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64)";

/// Wall-clock format used in both requests and responses.
const VIVA_DATEFORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const SOAP_NS: &str = "http://www.sjofartsverket.se/webservice/VaderService/ViVaData.wsdl";

/// One unresponsive station must not stall a whole poll round.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Request envelopes
// ---------------------------------------------------------------------------

/// Request body for the station directory (GetViVaPoints).
pub fn build_list_request() -> String {
    "\
<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\">
    <s:Body xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\">
        <GetViVaPoints xmlns=\"http://www.sjofartsverket.se/webservice/VaderService/ViVaData.wsdl\" />
    </s:Body>
</s:Envelope>"
        .to_string()
}

/// Request body for the latest measurements of one station (GetViVaDataT).
pub fn build_latest_request(station_id: u32) -> String {
    format!(
        "\
<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\">
    <s:Body xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\">
        <GetViVaDataT xmlns=\"http://www.sjofartsverket.se/webservice/VaderService/ViVaData.wsdl\">
            <PlatsId>{station_id}</PlatsId>
        </GetViVaDataT>
    </s:Body>
</s:Envelope>"
    )
}

/// Request body for historic measurements (GetViVaDataTH).
///
/// The service expects the range bounds as CET wall-clock times; callers pass
/// UTC instants and the conversion happens here.
pub fn build_history_request(
    station_id: u32,
    filter: HistoryFilter,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
) -> String {
    let str_from = from.with_timezone(&CET).format(VIVA_DATEFORMAT);
    let str_until = until.with_timezone(&CET).format(VIVA_DATEFORMAT);
    format!(
        "\
<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\">
    <s:Body xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\">
        <GetViVaDataTH xmlns=\"http://www.sjofartsverket.se/webservice/VaderService/ViVaData.wsdl\">
            <PlatsId>{station_id}</PlatsId>
            <ViVaTyp>{}</ViVaTyp>
            <TidFOM>{str_from}</TidFOM>
            <TidTOM>{str_until}</TidTOM>
        </GetViVaDataTH>
    </s:Body>
</s:Envelope>",
        filter.code()
    )
}

// ---------------------------------------------------------------------------
// Timestamp normalization
// ---------------------------------------------------------------------------

/// Parses a ViVa wall-clock timestamp ("2014-05-01T10:00:00", CET/CEST) into
/// a UTC instant.
///
/// The autumn DST fallback repeats one local hour; those ambiguous times are
/// resolved to the earlier instant so conversion stays deterministic.
pub fn parse_viva_timestamp(raw: &str) -> Result<DateTime<Utc>, VivaError> {
    let naive = NaiveDateTime::parse_from_str(raw, VIVA_DATEFORMAT)
        .map_err(|e| VivaError::Transport(format!("bad timestamp '{}': {}", raw, e)))?;

    CET.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            // Spring-forward gap: the wall-clock time never existed in CET.
            VivaError::Transport(format!("nonexistent local time '{}'", raw))
        })
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

fn parse_document(xml: &str) -> Result<roxmltree::Document<'_>, VivaError> {
    roxmltree::Document::parse(xml)
        .map_err(|e| VivaError::Transport(format!("unparseable response: {}", e)))
}

fn require_attr<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> Result<&'a str, VivaError> {
    node.attribute(name).ok_or_else(|| {
        VivaError::Transport(format!(
            "element <{}> missing attribute '{}'",
            node.tag_name().name(),
            name
        ))
    })
}

/// Parses a GetViVaPoints response into the station directory.
pub fn parse_station_list(xml: &str) -> Result<Vec<Station>, VivaError> {
    let doc = parse_document(xml)?;

    let mut stations = Vec::new();
    for node in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "ViVaPoint")
    {
        let raw_id = require_attr(node, "PlatsId")?;
        let id: u32 = raw_id
            .parse()
            .map_err(|_| VivaError::Transport(format!("bad station id '{}'", raw_id)))?;

        stations.push(Station {
            id,
            name: require_attr(node, "Platsnamn")?.to_string(),
            latitude: require_attr(node, "Latitude")?.to_string(),
            longitude: require_attr(node, "Longitude")?.to_string(),
        });
    }

    Ok(stations)
}

/// Parses a GetViVaDataT response into a latest-measurements report.
///
/// # Errors
/// - `VivaError::Station` — the response carries a Felmeddelande element,
///   omits the station name, or contains no measurements. Any of these is a
///   total failure for the station's fetch cycle.
/// - `VivaError::Transport` — malformed XML or missing attributes.
pub fn parse_latest_report(xml: &str, station_id: u32) -> Result<StationReport, VivaError> {
    let doc = parse_document(xml)?;

    if let Some(err) = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "Felmeddelande")
    {
        return Err(VivaError::Station(format!(
            "service reported an error for station {}: {}",
            station_id,
            err.text().unwrap_or("(no message)").trim()
        )));
    }

    let station_name = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "PlatsNamn")
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            VivaError::Station(format!("no location name for station {}", station_id))
        })?
        .to_string();

    let mut measurements = Vec::new();
    for node in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "ViVaDataT")
    {
        measurements.push(RawMeasurement {
            type_name: require_attr(node, "Typ")?.to_string(),
            unit: require_attr(node, "Enhet")?.to_string(),
            value: require_attr(node, "Varde")?.to_string(),
            timestamp: parse_viva_timestamp(require_attr(node, "Tid")?)?,
        });
    }

    if measurements.is_empty() {
        return Err(VivaError::Station(format!(
            "no measurements for station '{}' ({})",
            station_name, station_id
        )));
    }

    Ok(StationReport {
        station_name,
        measurements,
    })
}

/// Parses a GetViVaDataTH response into a history report.
///
/// An empty window is not an error: the report simply carries zero
/// measurements (and an empty display name, which nothing downstream uses
/// for an empty report).
pub fn parse_history_report(xml: &str) -> Result<StationReport, VivaError> {
    let doc = parse_document(xml)?;

    let mut station_name = String::new();
    let mut measurements = Vec::new();
    for node in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "ViVaPoint")
    {
        if station_name.is_empty() {
            station_name = require_attr(node, "Namn")?.to_string();
        }
        measurements.push(RawMeasurement {
            type_name: require_attr(node, "TypNamn")?.to_string(),
            unit: require_attr(node, "Enhet")?.to_string(),
            value: require_attr(node, "Data")?.to_string(),
            timestamp: parse_viva_timestamp(require_attr(node, "Tid")?)?,
        });
    }

    Ok(StationReport {
        station_name,
        measurements,
    })
}

// ---------------------------------------------------------------------------
// HTTP transport
// ---------------------------------------------------------------------------

/// Blocking SOAP client for the ViVa service.
pub struct ViVaSoapClient {
    http: reqwest::blocking::Client,
    url: String,
}

impl ViVaSoapClient {
    /// Client against the production endpoint.
    pub fn new() -> Result<Self, VivaError> {
        Self::with_url(VIVA_URL)
    }

    /// Client against an alternate endpoint (used by tests and mirrors).
    pub fn with_url(url: &str) -> Result<Self, VivaError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| VivaError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    fn post(&self, action: &str, body: String) -> Result<String, VivaError> {
        let soap_action = format!("\"{}/{}\"", SOAP_NS, action);
        let response = self
            .http
            .post(&self.url)
            .header("SOAPAction", soap_action)
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(body)
            .send()
            .map_err(|e| VivaError::Transport(format!("{} request failed: {}", action, e)))?
            .error_for_status()
            .map_err(|e| VivaError::Transport(format!("{} returned error status: {}", action, e)))?;

        let text = response
            .text()
            .map_err(|e| VivaError::Transport(format!("{} body read failed: {}", action, e)))?;
        trace!(action, bytes = text.len(), "soap response received");
        Ok(text)
    }
}

impl VivaClient for ViVaSoapClient {
    fn list_stations(&self) -> Result<Vec<Station>, VivaError> {
        let xml = self.post("GetViVaPoints", build_list_request())?;
        parse_station_list(&xml)
    }

    fn fetch_latest(&self, station_id: u32) -> Result<StationReport, VivaError> {
        let xml = self.post("GetViVaDataT", build_latest_request(station_id))?;
        parse_latest_report(&xml, station_id)
    }

    fn fetch_history(
        &self,
        station_id: u32,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        filter: HistoryFilter,
    ) -> Result<StationReport, VivaError> {
        let xml = self.post(
            "GetViVaDataTH",
            build_history_request(station_id, filter, from, until),
        )?;
        parse_history_report(&xml)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
