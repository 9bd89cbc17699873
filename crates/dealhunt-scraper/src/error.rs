use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from a vendor. The display form is what ends up in
    /// the per-vendor failure descriptor, so it embeds code and reason phrase.
    #[error("HTTP {status}: {reason}")]
    UnexpectedStatus { status: u16, reason: String },
}
