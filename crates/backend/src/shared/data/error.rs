use thiserror::Error;

/// Startup load failure. Every variant is fatal: the server does not start.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Source file not found at {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Sheet '{sheet}' has no column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("Sheet '{sheet}', row {row}: invalid {column} value '{value}'")]
    InvalidValue {
        sheet: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("Geography fetch failed: {0}")]
    GeoFetch(#[from] reqwest::Error),

    #[error("Invalid GeoJSON document: {0}")]
    InvalidGeoJson(String),
}
