use thiserror::Error;

/// Errors surfaced by the checker's public API.
///
/// Per-request problems (schema violations, backend failures, malformed
/// replies) never show up here; they are folded into the report.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The operation is declared but permanently unavailable. Do not retry.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// The assessment backend could not be constructed.
    #[error("assessment backend unavailable: {0}")]
    Backend(#[from] apicheck_models::Error),
}
