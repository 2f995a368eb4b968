use thiserror::Error;

/// Crate-level error type.
///
/// Structural misuse of the layout engine or row formatter (bad widths,
/// degenerate wrap limits) fails fast with one of the first variants — those
/// are caller bugs, not runtime conditions. I/O and JSON errors only arise in
/// the template loader and exporter.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid row width {0} (must be 1..=40)")]
    InvalidWidth(usize),

    #[error("invalid wrap limit: {0}")]
    InvalidWrapLimit(String),

    #[error("row number {0} out of range")]
    RowOutOfRange(usize),

    #[error("table columns declare {got} cells, row holds {max}")]
    TableTooWide { got: usize, max: usize },

    #[error("table column '{0}' has zero width")]
    ZeroWidthColumn(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
