use serde::{Deserialize, Serialize};
use std::fmt;

/// SSH command-line style arguments attached to a host.
///
/// Inventories carry these either as one shell-quoted string (Ansible's
/// `ansible_ssh_common_args`) or as an already split token list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CommonArgs {
    Line(String),
    Tokens(Vec<String>),
}

impl CommonArgs {
    /// Returns `true` if the arguments contain nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Line(line) => line.trim().is_empty(),
            Self::Tokens(tokens) => tokens.iter().all(|t| t.trim().is_empty()),
        }
    }

    fn is_templated(&self) -> bool {
        match self {
            Self::Line(line) => is_templated(line),
            Self::Tokens(tokens) => tokens.iter().any(|t| is_templated(t)),
        }
    }
}

/// How the automation framework connects to a host.
///
/// Only `ssh` and `network_cli` hosts end up in the generated config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionType {
    #[default]
    Ssh,
    NetworkCli,
    Other(String),
}

impl ConnectionType {
    /// Returns `true` for connection types reachable through an SSH client.
    pub fn uses_ssh(&self) -> bool {
        matches!(self, Self::Ssh | Self::NetworkCli)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Ssh => "ssh",
            Self::NetworkCli => "network_cli",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for ConnectionType {
    fn from(value: String) -> Self {
        match value.trim() {
            "ssh" => Self::Ssh,
            "network_cli" => Self::NetworkCli,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for ConnectionType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ConnectionType> for String {
    fn from(value: ConnectionType) -> Self {
        match value {
            ConnectionType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One host entry as found in the inventory document.
///
/// Every attribute is optional here; [`crate::resolve`] applies fallbacks
/// and defaults. Ansible variable names are accepted as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHost {
    #[serde(alias = "inventory_hostname")]
    pub name: Option<String>,

    #[serde(alias = "ansible_host")]
    pub host: Option<String>,

    #[serde(alias = "ansible_user", alias = "ansible_ssh_user")]
    pub user: Option<String>,

    #[serde(alias = "ansible_port", alias = "ansible_ssh_port")]
    pub port: Option<u16>,

    #[serde(
        alias = "identityFile",
        alias = "ansible_ssh_private_key_file",
        alias = "ansible_private_key_file"
    )]
    pub identity_file: Option<String>,

    #[serde(alias = "commonArgs", alias = "ansible_ssh_common_args")]
    pub common_args: Option<CommonArgs>,

    #[serde(alias = "connectionType", alias = "ansible_connection")]
    pub connection_type: Option<ConnectionType>,
}

impl RawHost {
    /// Returns `true` if any attribute still holds an unrendered template.
    pub(crate) fn is_templated(&self) -> bool {
        [&self.name, &self.host, &self.user, &self.identity_file]
            .into_iter()
            .flatten()
            .any(|v| is_templated(v))
            || self.common_args.as_ref().is_some_and(CommonArgs::is_templated)
    }
}

/// Inventory-wide values inherited by every host that leaves them unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Defaults {
    #[serde(alias = "ansible_user", alias = "ansible_ssh_user")]
    pub user: Option<String>,

    #[serde(alias = "ansible_port", alias = "ansible_ssh_port")]
    pub port: Option<u16>,

    #[serde(
        alias = "identityFile",
        alias = "ansible_ssh_private_key_file",
        alias = "ansible_private_key_file"
    )]
    pub identity_file: Option<String>,

    #[serde(alias = "commonArgs", alias = "ansible_ssh_common_args")]
    pub common_args: Option<CommonArgs>,

    #[serde(alias = "connectionType", alias = "ansible_connection")]
    pub connection_type: Option<ConnectionType>,
}

/// On-disk shapes accepted for an inventory document.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    List(Vec<RawHost>),
    Full {
        #[serde(default)]
        defaults: Defaults,
        hosts: Vec<RawHost>,
    },
}

/// A fully templated inventory: shared defaults plus hosts in input order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Document")]
pub struct Inventory {
    pub defaults: Defaults,
    pub hosts: Vec<RawHost>,
}

impl From<Document> for Inventory {
    fn from(document: Document) -> Self {
        match document {
            Document::List(hosts) => Self {
                defaults: Defaults::default(),
                hosts,
            },
            Document::Full { defaults, hosts } => Self { defaults, hosts },
        }
    }
}

impl From<Vec<RawHost>> for Inventory {
    fn from(hosts: Vec<RawHost>) -> Self {
        Self {
            defaults: Defaults::default(),
            hosts,
        }
    }
}

/// A resolved host, immutable for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    /// Unique inventory name, used as the `Host` alias.
    pub name: String,
    /// Address to connect to, used as `HostName`.
    pub host: String,
    pub user: Option<String>,
    pub port: u16,
    pub identity_file: Option<String>,
    pub common_args: Option<CommonArgs>,
    pub connection_type: ConnectionType,
}

impl HostRecord {
    /// Port used when neither the host nor the defaults set one.
    pub const DEFAULT_PORT: u16 = 22;
}

fn is_templated(value: &str) -> bool {
    value.contains("{{") || value.contains("{%")
}
