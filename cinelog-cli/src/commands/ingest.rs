//! The update command: run the ingestion pipeline for one or all members.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinelog_scraper::{BrowserFetcher, IngestOptions, IngestReport, PageFetcher};
use cinelog_store::{DataPaths, Ledger, RegistryStore, TitleCache};

use crate::error::CliError;

/// Re-ingest one member's history, or every registered member's when
/// `user` is `None`. Runs are strictly sequential — one member's walk
/// completes and persists before the next starts.
pub(crate) fn run_update(
    paths: &DataPaths,
    community: &str,
    user: Option<&str>,
    quiet: bool,
) -> Result<(), CliError> {
    let registry = RegistryStore::open(&paths.registry)?;

    let targets: Vec<(String, String)> = match user {
        Some(name) => {
            let start_ref = registry.start_ref(community, name).ok_or_else(|| {
                CliError::not_found(format!("{name} is not registered in {community}"))
            })?;
            vec![(name.to_string(), start_ref)]
        }
        None => {
            let users = registry.users(community);
            if users.is_empty() {
                return Err(CliError::not_found(format!(
                    "No users registered for {community}"
                )));
            }
            users
                .iter()
                .map(|(name, handle)| {
                    (
                        (*name).to_string(),
                        cinelog_core::site::films_first_page(handle),
                    )
                })
                .collect()
        }
    };

    let mut cache = TitleCache::open(&paths.cache)?;
    let mut ledger = Ledger::open(&paths.ratings)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let fetcher = BrowserFetcher::launch().await?;
        let result = async {
            for (name, start_ref) in &targets {
                let report = ingest_one(
                    &fetcher,
                    &mut cache,
                    &mut ledger,
                    community,
                    name,
                    start_ref,
                    quiet,
                )
                .await?;

                if let Err(e) = report.write_to_file(&paths.ratings.with_file_name("ingest.log")) {
                    log::debug!("Could not write ingest log: {e}");
                }
                println!(
                    "{} {}",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    report.summary(),
                );
            }
            Ok::<(), CliError>(())
        }
        .await;
        fetcher.close().await;
        result
    })
}

async fn ingest_one(
    fetcher: &dyn PageFetcher,
    cache: &mut TitleCache,
    ledger: &mut Ledger,
    community: &str,
    user: &str,
    start_ref: &str,
    quiet: bool,
) -> Result<IngestReport, CliError> {
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        pb.set_message(format!("Scraping {user}..."));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    };

    let result = cinelog_scraper::ingest_user(
        fetcher,
        cache,
        ledger,
        community,
        user,
        start_ref,
        &IngestOptions::default(),
    )
    .await;

    pb.finish_and_clear();
    Ok(result?)
}
