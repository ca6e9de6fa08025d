//! Error types for loading world data and settings.
//!
//! The simulation itself never fails; these only surface while reading
//! room manifests or settings files before a run starts.

use thiserror::Error;

/// Errors that can occur when loading or validating a world manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// File could not be read.
    #[error("Failed to read manifest '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing failed.
    #[error("Manifest parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Room key was not of the form `"col,row"`.
    #[error("Invalid room key '{0}', expected \"col,row\"")]
    BadRoomKey(String),

    /// Room lies outside the declared world dimensions.
    #[error("Room {key} is outside the {cols}x{rows} world")]
    RoomOutOfBounds { key: String, cols: usize, rows: usize },

    /// A room's tile grid has the wrong shape.
    #[error("Room {key} tile grid is {actual_cols}x{actual_rows}, expected {expected_cols}x{expected_rows}")]
    GridMismatch {
        key: String,
        expected_cols: usize,
        expected_rows: usize,
        actual_cols: usize,
        actual_rows: usize,
    },

    /// Tile id not in the tile table.
    #[error("Unknown tile id {0}")]
    UnknownTile(u8),
}

/// Errors that can occur when loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File could not be read.
    #[error("Failed to read settings '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing failed.
    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
