//! Per-host stanzas.
//!
//! Connection settings from the inventory are written before the translated
//! options. ssh keeps the first value it reads, so a translated `HostName`,
//! `User` or `Port` that repeats one of them has no effect; such options are
//! reported with a warning and still written.

use crate::options::{TranslatedOption, translate_args};
use inventory::HostRecord;
use log::{debug, warn};
use std::fmt;

/// Directives written into every stanza after the connection settings.
pub const SECURITY_DEFAULTS: [(&str, &str); 3] = [
    ("UserKnownHostsFile", "/dev/null"),
    ("StrictHostKeyChecking", "no"),
    ("PasswordAuthentication", "yes"),
];

const INDENT: &str = "  ";
const OPTIONS_COMMENT: &str = "# Options extracted from connection arguments :";

/// What came out of translating a host's connection arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// Translated directives, in argument order. Empty if the host had none.
    Options(Vec<TranslatedOption>),
    /// Translation failed; the stanza carries a comment instead.
    Failed,
}

/// One `Host` stanza of the generated config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBlock {
    pub name: String,
    pub host_name: String,
    pub user: Option<String>,
    pub port: u16,
    pub identity_file: Option<String>,
    pub extracted: Extracted,
}

impl ConfigBlock {
    /// Builds the stanza for a host, translating its connection arguments.
    ///
    /// A translation failure only affects this block.
    pub fn from_host(host: &HostRecord) -> Self {
        let extracted = match host.common_args.as_ref().map(translate_args).transpose() {
            Ok(options) => Extracted::Options(options.unwrap_or_default()),
            Err(e) => {
                warn!("cannot translate connection arguments of {}: {e}", host.name);
                Extracted::Failed
            }
        };

        let block = Self {
            name: host.name.clone(),
            host_name: host.host.clone(),
            user: host.user.clone(),
            port: host.port,
            identity_file: host.identity_file.clone(),
            extracted,
        };
        for option in block.shadowed_options() {
            warn!(
                "{} of {} is ignored by ssh, the inventory value comes first",
                option, block.name
            );
        }
        block
    }

    /// Translated options that repeat a connection setting written above them.
    pub fn shadowed_options(&self) -> Vec<&TranslatedOption> {
        self.options()
            .iter()
            .filter(|o| {
                let directive = o.directive.as_str();
                directive.eq_ignore_ascii_case("HostName")
                    || directive.eq_ignore_ascii_case("Port")
                    || (self.user.is_some() && directive.eq_ignore_ascii_case("User"))
            })
            .collect()
    }

    /// Connection settings and security defaults, in output order.
    pub fn base_directives(&self) -> Vec<TranslatedOption> {
        let mut directives = vec![TranslatedOption::new("HostName", &self.host_name)];
        if let Some(user) = &self.user {
            directives.push(TranslatedOption::new("User", user));
        }
        directives.push(TranslatedOption::new("Port", self.port.to_string()));
        if let Some(identity_file) = &self.identity_file {
            directives.push(TranslatedOption::new("IdentityFile", identity_file));
        }
        directives.extend(
            SECURITY_DEFAULTS
                .iter()
                .map(|(directive, value)| TranslatedOption::new(*directive, *value)),
        );
        directives
    }

    /// Translated directives; empty when translation failed.
    pub fn options(&self) -> &[TranslatedOption] {
        match &self.extracted {
            Extracted::Options(options) => options,
            Extracted::Failed => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.extracted, Extracted::Failed)
    }

    /// Comment written in place of the options of a failed host.
    pub fn failure_comment(&self) -> String {
        format!(
            "# Script could not generate configuration for host {}, check connection arguments",
            self.name
        )
    }
}

/// Writes the stanza, without a trailing blank line.
impl fmt::Display for ConfigBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Host {}", self.name)?;
        for directive in self.base_directives() {
            writeln!(f, "{INDENT}{directive}")?;
        }

        match &self.extracted {
            Extracted::Options(options) if options.is_empty() => {}
            Extracted::Options(options) => {
                writeln!(f)?;
                writeln!(f, "{INDENT}{OPTIONS_COMMENT}")?;
                for option in options {
                    writeln!(f, "{INDENT}{option}")?;
                }
            }
            Extracted::Failed => {
                writeln!(f)?;
                writeln!(f, "{INDENT}{}", self.failure_comment())?;
            }
        }

        Ok(())
    }
}

/// Builds one block per SSH-reachable host, in input order.
///
/// Hosts with another connection type are left out. Hosts are never
/// reordered or merged, even when they share an address.
pub fn aggregate(hosts: &[HostRecord]) -> Vec<ConfigBlock> {
    hosts
        .iter()
        .filter(|host| {
            let keep = host.connection_type.uses_ssh();
            if !keep {
                debug!(
                    "leaving out {}: connection type {}",
                    host.name, host.connection_type
                );
            }
            keep
        })
        .map(ConfigBlock::from_host)
        .collect()
}
