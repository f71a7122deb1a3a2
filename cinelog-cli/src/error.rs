use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Durable document could not be read or written
    #[error("Store error: {0}")]
    Store(#[from] cinelog_store::StoreError),

    /// Ingestion run failed
    #[error("Scrape error: {0}")]
    Scrape(#[from] cinelog_scraper::ScrapeError),

    /// Unknown community, user, or film
    #[error("{0}")]
    NotFound(String),
}

impl CliError {
    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
