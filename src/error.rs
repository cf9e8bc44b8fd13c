use inventory::InventoryError;
use settings::SettingsError;
use ssh::{HostsError, WriteError};
use std::io;
use thiserror::Error;

/// Failures that abort a run with a non-zero exit code.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Hosts(#[from] HostsError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("no inventory given, pass --inventory or set \"inventory\" in ~/.invssh.json")]
    NoInventory,

    /// Every inventory host was skipped, or the inventory was empty.
    #[error("no host could be resolved from the inventory")]
    NoHosts,

    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),
}
