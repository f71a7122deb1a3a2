//! Member registration and removal.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinelog_store::{DataPaths, Ledger, RegistryStore};

use crate::commands::ingest;
use crate::error::CliError;

/// Register (or re-register) a member's letterboxd handle, then scrape
/// their history unless `no_sync` is set.
pub(crate) fn run_register(
    paths: &DataPaths,
    community: &str,
    user: &str,
    handle: &str,
    no_sync: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let mut registry = RegistryStore::open(&paths.registry)?;
    registry.add_community(community)?;
    let previous = registry.register(community, user, handle)?;

    match previous {
        Some(old) if old != handle => log::info!("Replaced {user}'s handle {old} with {handle}"),
        Some(_) => log::info!("{user} was already registered as {handle}"),
        None => log::info!("Registered {user} as {handle}"),
    }

    if no_sync {
        return Ok(());
    }
    ingest::run_update(paths, community, Some(user), quiet)
}

/// Remove a member from the registry and scrub their ratings from the
/// community's ledger.
pub(crate) fn run_remove(paths: &DataPaths, community: &str, user: &str) -> Result<(), CliError> {
    let mut registry = RegistryStore::open(&paths.registry)?;
    if !registry.remove(community, user)? {
        println!("{user} is not registered in {community}");
        return Ok(());
    }

    let mut ledger = Ledger::open(&paths.ratings)?;
    ledger.remove_user(community, user);
    ledger.save()?;

    println!(
        "{} Removed {user} from {community}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}
