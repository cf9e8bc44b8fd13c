//! The generation pass: inventory in, SSH config out.

use crate::cli::GenerateArgs;
use crate::error::AppError;
use inventory::{Inventory, load_from_path, load_from_reader, resolve};
use log::{info, warn};
use settings::Settings;
use ssh::{aggregate, render, verify_blocks, write_atomic};
use std::io::{self, Write};
use std::path::Path;

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Hosts that resolved.
    pub resolved: usize,
    /// Hosts skipped by the resolver.
    pub skipped: usize,
    /// Stanzas written.
    pub blocks: usize,
    /// Stanzas whose connection arguments could not be translated or were
    /// rejected when parsed back.
    pub failed: usize,
}

/// Rendered config text and what went into it.
#[derive(Debug)]
pub struct Generated {
    pub text: String,
    pub summary: Summary,
}

/// Runs resolve, translate, aggregate and render over an inventory.
///
/// Every block is parsed back before rendering. A host whose options are
/// rejected keeps only its failure comment; the other hosts are unaffected.
///
/// # Errors
///
/// Returns `AppError::NoHosts` if no host resolves.
pub fn generate(inventory: &Inventory) -> Result<Generated, AppError> {
    let resolution = resolve(inventory);
    if resolution.hosts.is_empty() {
        return Err(AppError::NoHosts);
    }

    let blocks = verify_blocks(aggregate(&resolution.hosts));
    if blocks.is_empty() {
        warn!("no host uses an ssh connection, the generated config has no stanzas");
    }

    let text = render(&blocks);

    Ok(Generated {
        text,
        summary: Summary {
            resolved: resolution.hosts.len(),
            skipped: resolution.skipped.len(),
            blocks: blocks.len(),
            failed: blocks.iter().filter(|b| b.is_failed()).count(),
        },
    })
}

/// Handles `invssh generate`.
///
/// # Errors
///
/// Returns an error if the inventory cannot be loaded, no host resolves, or
/// the output cannot be written. Per-host translation failures are not
/// errors; they show up as comments in the output.
pub fn run_generate<W: Write>(
    args: &GenerateArgs,
    settings: &Settings,
    stdout: &mut W,
) -> Result<Summary, AppError> {
    let source = args
        .inventory
        .as_deref()
        .or(settings.inventory.as_deref())
        .ok_or(AppError::NoInventory)?;
    let inventory = load_inventory(source)?;

    let Generated { text, summary } = generate(&inventory)?;

    if args.stdout {
        stdout
            .write_all(text.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(AppError::Stdout)?;
    } else {
        let output = match &args.output {
            Some(path) => path.clone(),
            None => settings.output_path()?,
        };
        write_atomic(&output, &text)?;
        info!(
            "wrote {} host(s) to {} ({} skipped, {} with untranslatable arguments)",
            summary.blocks,
            output.display(),
            summary.skipped,
            summary.failed
        );
    }

    Ok(summary)
}

fn load_inventory(source: &Path) -> Result<Inventory, AppError> {
    if source == Path::new("-") {
        info!("reading inventory from stdin");
        return Ok(load_from_reader(io::stdin().lock())?);
    }

    info!("reading inventory from {}", source.display());
    Ok(load_from_path(source)?)
}
