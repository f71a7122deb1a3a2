//! Rating ingestion pipeline: fetch, extract, walk, merge.
//!
//! A run walks one member's film-log listing pages in order, extracts each
//! rating-log node, resolves film titles through the title cache (one static
//! fetch per unseen film, ever), and merges every entry into the rating
//! ledger. Listing pages need client-side rendering, so they go through a
//! headless browser; film pages are plain GETs.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod ingest;
pub mod report;

pub use error::ScrapeError;
pub use extract::{PageLogs, RawLog, extract_film_logs, parse_film_title};
pub use fetch::{BrowserFetcher, PageFetcher, USER_AGENT};
pub use ingest::{IngestOptions, ingest_user};
pub use report::IngestReport;
