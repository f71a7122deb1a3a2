//! Data-directory settings.

use std::path::{Path, PathBuf};

use cinelog_store::{resolve_data_root, save_data_root, settings_path};

use crate::error::CliError;

pub(crate) fn run_show(cli_override: Option<PathBuf>) -> Result<(), CliError> {
    println!("Data root: {}", resolve_data_root(cli_override).display());
    println!("Settings:  {}", settings_path().display());
    Ok(())
}

pub(crate) fn run_set_root(path: &Path) -> Result<(), CliError> {
    save_data_root(Some(path))?;
    println!("Saved data root: {}", path.display());
    Ok(())
}

pub(crate) fn run_clear_root() -> Result<(), CliError> {
    save_data_root(None)?;
    println!("Cleared saved data root");
    Ok(())
}
