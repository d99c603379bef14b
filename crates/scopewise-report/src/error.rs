/// Report generation failures. No partial output is returned.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The PDF writer rejected the document.
    #[error("PDF encoding failed: {0}")]
    Encode(String),

    #[error("layout failed: {0}")]
    Layout(String),
}
