use thiserror::Error;

/// Failures surfaced by the identity engine. Hash collisions and
/// duplicate-suffix retries are handled internally and never appear
/// here.
#[derive(Debug, Clone, Error)]
pub enum RecordError {
    #[error("date '{0}' is not a valid YYYY-MM-DD calendar date")]
    BadDate(String),
    #[error("amount '{0}' does not contain a valid number")]
    BadAmount(String),
    #[error("account field is empty or whitespace-only")]
    MissingAccount,
    #[error("'{0}' is not a valid account name")]
    BadAccountName(String),
    #[error("both payee and narration are empty; at least one must be set ({0})")]
    EmptyDescription(String),
    #[error("record has no postings")]
    NoPostings,
}
