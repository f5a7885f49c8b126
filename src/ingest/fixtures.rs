/// Test fixtures: representative SOAP payloads from the ViVa service.
///
/// These are structurally complete but truncated to the minimum needed to
/// exercise the parser. They reflect the real envelopes returned by
/// vivadata.asmx for the three operations.
///
/// Response shapes:
///   GetViVaPoints  — ViVaPoint elements with PlatsId/Platsnamn/Latitude/Longitude attributes
///   GetViVaDataT   — PlatsNamn element + ViVaDataT elements (Typ/Varde/Enhet/Tid attributes),
///                    or a Felmeddelande element on service-side errors
///   GetViVaDataTH  — ViVaPoint elements with Namn/TypNamn/Enhet/Data/Tid attributes
///
/// Note: all Tid values are CET/CEST wall-clock times without an offset.
/// Parsers must normalize them to UTC.

/// Three-station directory slice: Landsort Norra, Trubaduren, Marviken.
#[cfg(test)]
pub(crate) fn fixture_station_list_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <GetViVaPointsResponse xmlns="http://www.sjofartsverket.se/webservice/VaderService/ViVaData.wsdl">
      <GetViVaPointsResult xmlns="http://www.sjofartsverket.se/scheman/vaderdata/ViVaPointsSchema.xsd">
        <ViVaPoint PlatsId="33" Platsnamn="Landsort Norra" Latitude="58.7758" Longitude="17.8623" />
        <ViVaPoint PlatsId="7" Platsnamn="Trubaduren" Latitude="57.5951" Longitude="11.6353" />
        <ViVaPoint PlatsId="108" Platsnamn="Marviken" Latitude="58.5540" Longitude="16.8369" />
      </GetViVaPointsResult>
    </GetViVaPointsResponse>
  </soap:Body>
</soap:Envelope>"#
}

/// Latest report for Landsort Norra (33): wind triple plus water level.
/// Timestamps are 10:00 CEST = 08:00 UTC.
#[cfg(test)]
pub(crate) fn fixture_latest_landsort_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <GetViVaDataTResponse xmlns="http://www.sjofartsverket.se/webservice/VaderService/ViVaData.wsdl">
      <GetViVaDataTResult xmlns="http://www.sjofartsverket.se/scheman/vaderdata/ViVaOutputSchema.xsd">
        <PlatsNamn>Landsort Norra</PlatsNamn>
        <ViVaDataT Typ="Medelvind" Varde="7.2" Enhet="m/s" Tid="2014-05-01T10:00:00" />
        <ViVaDataT Typ="Byvind" Varde="11.5" Enhet="m/s" Tid="2014-05-01T10:00:00" />
        <ViVaDataT Typ="Riktning" Varde="213" Enhet="&#176;" Tid="2014-05-01T09:58:00" />
        <ViVaDataT Typ="Vattenst&#229;nd" Varde="-08.50" Enhet="cm" Tid="2014-05-01T09:45:00" />
      </GetViVaDataTResult>
    </GetViVaDataTResponse>
  </soap:Body>
</soap:Envelope>"#
}

/// Service-side error for an unknown station id. The parser must surface the
/// Felmeddelande rather than returning an empty report.
#[cfg(test)]
pub(crate) fn fixture_latest_error_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <GetViVaDataTResponse xmlns="http://www.sjofartsverket.se/webservice/VaderService/ViVaData.wsdl">
      <GetViVaDataTResult xmlns="http://www.sjofartsverket.se/scheman/vaderdata/ViVaOutputSchema.xsd">
        <Felmeddelande>Ingen plats med angivet PlatsId</Felmeddelande>
      </GetViVaDataTResult>
    </GetViVaDataTResponse>
  </soap:Body>
</soap:Envelope>"#
}

/// Malformed latest report: measurements present but no PlatsNamn element.
/// Observed when the service is in a degraded state; must fail the cycle.
#[cfg(test)]
pub(crate) fn fixture_latest_missing_name_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <GetViVaDataTResponse xmlns="http://www.sjofartsverket.se/webservice/VaderService/ViVaData.wsdl">
      <GetViVaDataTResult xmlns="http://www.sjofartsverket.se/scheman/vaderdata/ViVaOutputSchema.xsd">
        <ViVaDataT Typ="Medelvind" Varde="4.0" Enhet="m/s" Tid="2014-05-01T10:00:00" />
      </GetViVaDataTResult>
    </GetViVaDataTResponse>
  </soap:Body>
</soap:Envelope>"#
}

/// Named station with zero measurement elements — a sensor outage. Treated
/// as a failed fetch cycle, distinct from an empty history window.
#[cfg(test)]
pub(crate) fn fixture_latest_no_samples_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <GetViVaDataTResponse xmlns="http://www.sjofartsverket.se/webservice/VaderService/ViVaData.wsdl">
      <GetViVaDataTResult xmlns="http://www.sjofartsverket.se/scheman/vaderdata/ViVaOutputSchema.xsd">
        <PlatsNamn>Landsort Norra</PlatsNamn>
      </GetViVaDataTResult>
    </GetViVaDataTResponse>
  </soap:Body>
</soap:Envelope>"#
}

/// History slice for Landsort Norra: three points across two types. Note the
/// uppercase TypNamn spelling in history responses and the verbatim
/// leading-zero water level value.
#[cfg(test)]
pub(crate) fn fixture_history_landsort_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <GetViVaDataTHResponse xmlns="http://www.sjofartsverket.se/webservice/VaderService/ViVaData.wsdl">
      <GetViVaDataTHResult>
        <ViVaPoint Namn="Landsort Norra" TypNamn="MEDELVIND" Enhet="m/s" Data="6.8" Tid="2014-05-01T09:00:00" />
        <ViVaPoint Namn="Landsort Norra" TypNamn="MEDELVIND" Enhet="m/s" Data="7.2" Tid="2014-05-01T10:00:00" />
        <ViVaPoint Namn="Landsort Norra" TypNamn="VATTENST&#197;ND" Enhet="cm" Data="-08.50" Tid="2014-05-01T09:45:00" />
      </GetViVaDataTHResult>
    </GetViVaDataTHResponse>
  </soap:Body>
</soap:Envelope>"#
}

/// History response for a window with no recorded samples — a successful
/// zero-measurement report.
#[cfg(test)]
pub(crate) fn fixture_history_empty_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <GetViVaDataTHResponse xmlns="http://www.sjofartsverket.se/webservice/VaderService/ViVaData.wsdl">
      <GetViVaDataTHResult />
    </GetViVaDataTHResponse>
  </soap:Body>
</soap:Envelope>"#
}
