/// vivamon_service: ViVa coastal weather sample collection daemon.
///
/// Polls the Sjöfartsverket "Vind och Vatten" (ViVa) SOAP service for maritime
/// weather stations along the Swedish coast, normalizes the heterogeneous
/// measurement reports into a uniform sample model, and warehouses the samples
/// de-duplicated in a local SQLite database for later analysis.
///
/// # Module structure
///
/// ```text
/// vivamon_service
/// ├── model     — shared data types (Station, RawMeasurement, Sample, VivaError, …)
/// ├── classify  — canonical sample type lookup by (type name, unit)
/// ├── ingest
/// │   ├── viva  — ViVa SOAP API: envelope construction + XML parsing
/// │   └── fixtures (test only) — representative SOAP response payloads
/// ├── db        — SQLite sample store (idempotent schema, transactional batches)
/// ├── daemon    — scheduler (one-shot history sync + fixed-cadence poll loop)
/// ├── notify    — callback executable invoked after successful stores
/// └── pidfile   — single-instance guard for poll mode
/// ```

pub mod classify;
pub mod daemon;
pub mod db;
pub mod ingest;
pub mod model;
pub mod notify;
pub mod pidfile;
