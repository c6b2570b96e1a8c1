use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid SVG document: {0}")]
    InvalidSvg(#[from] roxmltree::Error),

    #[error("no embedded chart found in SVG document")]
    MissingChartMetadata,

    #[error("unknown tooth id: {0}")]
    UnknownTooth(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("no tooth is being edited")]
    NotEditing,

    #[error("tooth {0} is already open in the editor")]
    AlreadyEditing(String),

    #[error("symbol not in taxonomy: {0}")]
    UnknownSymbol(String),

    #[error("unknown tooth id: {0}")]
    UnknownTooth(String),
}
