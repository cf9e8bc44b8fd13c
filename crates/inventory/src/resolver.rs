//! Normalizes raw inventory hosts into [`HostRecord`]s.
//!
//! Inputs are expected to be fully templated by the automation framework
//! before they get here. Nothing is interpolated; a leftover `{{ ... }}` is
//! only reported.

use crate::error::InventoryError;
use crate::types::{Defaults, HostRecord, Inventory, RawHost};
use log::{debug, warn};
use std::collections::HashSet;

/// Outcome of resolving an inventory.
///
/// Hosts that fail to resolve are skipped rather than aborting the run; the
/// caller decides what an empty `hosts` list means.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Resolved hosts, in inventory order.
    pub hosts: Vec<HostRecord>,
    /// Hosts that were left out, with the reason.
    pub skipped: Vec<InventoryError>,
}

/// Resolves every host of `inventory`, preserving input order.
pub fn resolve(inventory: &Inventory) -> Resolution {
    let mut resolution = Resolution::default();
    let mut names = HashSet::new();

    for (index, raw) in inventory.hosts.iter().enumerate() {
        let record = match resolve_host(index, raw, &inventory.defaults) {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping {e}");
                resolution.skipped.push(e);
                continue;
            }
        };

        if !names.insert(record.name.clone()) {
            let e = InventoryError::DuplicateName {
                index,
                name: record.name,
            };
            warn!("skipping {e}");
            resolution.skipped.push(e);
            continue;
        }

        debug!(
            "resolved {} -> {}:{} ({})",
            record.name, record.host, record.port, record.connection_type
        );
        resolution.hosts.push(record);
    }

    resolution
}

/// Resolves a single host against the inventory defaults.
///
/// # Errors
///
/// Returns `InventoryError::MissingRequiredAttribute` when neither `host`
/// nor `name` holds a usable value, and `InventoryError::InvalidAttribute`
/// when a value cannot be written into a stanza as is.
pub fn resolve_host(
    index: usize,
    raw: &RawHost,
    defaults: &Defaults,
) -> Result<HostRecord, InventoryError> {
    let (name, host) = match (present(raw.name.as_deref()), present(raw.host.as_deref())) {
        (Some(name), Some(host)) => (name, host),
        (Some(name), None) => (name, name),
        (None, Some(host)) => (host, host),
        (None, None) => return Err(InventoryError::MissingRequiredAttribute { index }),
    };

    if !is_alias(name) {
        return Err(InventoryError::InvalidAttribute {
            index,
            attribute: "name",
        });
    }
    if host.contains(|c: char| c.is_whitespace() || c.is_control()) {
        return Err(InventoryError::InvalidAttribute {
            index,
            attribute: "host",
        });
    }

    if raw.is_templated() {
        warn!("host {name} still contains template markers, values are used verbatim");
    }

    let user = present(raw.user.as_deref()).or_else(|| present(defaults.user.as_deref()));
    let identity_file = present(raw.identity_file.as_deref())
        .or_else(|| present(defaults.identity_file.as_deref()));
    if user.is_some_and(|v| v.contains(|c: char| c.is_whitespace() || c.is_control() || c == '#')) {
        return Err(InventoryError::InvalidAttribute {
            index,
            attribute: "user",
        });
    }
    if identity_file.is_some_and(|v| v.contains(char::is_control)) {
        return Err(InventoryError::InvalidAttribute {
            index,
            attribute: "identity_file",
        });
    }
    let common_args = raw
        .common_args
        .as_ref()
        .or(defaults.common_args.as_ref())
        .filter(|args| !args.is_blank())
        .cloned();

    Ok(HostRecord {
        name: name.to_string(),
        host: host.to_string(),
        user: user.map(str::to_string),
        port: raw
            .port
            .or(defaults.port)
            .unwrap_or(HostRecord::DEFAULT_PORT),
        identity_file: identity_file.map(str::to_string),
        common_args,
        connection_type: raw
            .connection_type
            .clone()
            .or_else(|| defaults.connection_type.clone())
            .unwrap_or_default(),
    })
}

/// A `Host` alias must be a single literal pattern.
fn is_alias(name: &str) -> bool {
    !name.contains(|c: char| c.is_whitespace() || c.is_control() || matches!(c, '*' | '?' | '!'))
}

/// Treats missing and whitespace-only values alike.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
