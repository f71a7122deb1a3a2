//! Registry listing.

use cinelog_store::{DataPaths, RegistryStore};

use crate::error::CliError;

pub(crate) fn run_users(paths: &DataPaths, community: &str) -> Result<(), CliError> {
    let registry = RegistryStore::open(&paths.registry)?;
    let users = registry.users(community);

    if users.is_empty() {
        println!("No users registered for {community}");
        return Ok(());
    }

    for (user, handle) in users {
        println!("{user} \u{2192} {handle}");
    }
    Ok(())
}
