use thiserror::Error;

/// Error type for eagrid-rs operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EagridError {
    /// An inverse sine was asked for a value outside [-1, 1], which means the
    /// requested row lies beyond the poles.
    #[error("Domain error in {operation}: {value} is outside [-1, 1]")]
    Domain { operation: &'static str, value: f64 },
    /// A latitude or longitude was NaN or infinite.
    #[error("Invalid coordinate: ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },
    /// The cell identifier has an invalid length.
    #[error("Invalid identifier length")]
    InvalidIdentifierLength,
    /// The cell identifier checksum validation failed.
    #[error("Invalid checksum")]
    InvalidChecksum,
    /// The identifier version is not supported.
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u8),
    /// Failed to decode Base64 identifier.
    #[error("Base64 decode error")]
    Base64DecodeError,
    /// A grid builder was finished without an extent.
    #[error("Grid extent must be set")]
    MissingExtent,
    /// The requested extent would produce more cells than a grid may hold.
    #[error("Extent covers {requested} cells, limit is {limit}")]
    TooManyCells { requested: u64, limit: u64 },
    /// File I/O or serialization error.
    #[error("IO error: {0}")]
    IoError(String),
    /// CSV parsing or reading error.
    #[error("CSV error: {0}")]
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParseError(String),
}
