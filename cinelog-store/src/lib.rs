//! Durable JSON documents for cinelog.
//!
//! Three documents live under the data root: the community registry
//! (`registry.json`), the rating ledger (`ratings.json`), and the
//! title/release cache (`cache.json`). Each is loaded fully into memory,
//! mutated, and rewritten by full overwrite; a missing file always reads
//! as an empty document.

pub mod cache;
pub mod error;
pub mod ledger;
pub mod paths;
pub mod registry;

mod util;

pub use cache::{ResolvedTitle, TitleCache};
pub use error::StoreError;
pub use ledger::{Ledger, most_watched_first, shuffled_keys};
pub use paths::{DataPaths, resolve_data_root, save_data_root, settings_path};
pub use registry::RegistryStore;
