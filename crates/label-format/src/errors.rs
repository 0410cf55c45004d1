/// Errors during labeled geometry export.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("geometry export failed: {0}")]
    GeometryFailed(String),
}
