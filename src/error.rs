use thiserror::Error;

#[derive(Debug, Error)]
pub enum RtsError {
    #[error("grid dimensions must be positive, got {columns}x{rows}")]
    InvalidDimensions { columns: u32, rows: u32 },
    #[error("tile size must be positive")]
    InvalidTileSize,
    #[error("tile data does not describe a {columns}x{rows} grid ({found} tiles)")]
    TileLayout { columns: u32, rows: u32, found: usize },
    #[error("zoom step must be greater than 1, got {0}")]
    InvalidZoomStep(f64),
    #[error("max zoom ratio must be at least 1, got {0}")]
    InvalidZoomRatio(f64),
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RtsError>;
