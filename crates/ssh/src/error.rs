use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised when connection arguments cannot be expressed as
/// `ssh_config` directives.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// A value flag was given no value.
    #[error("option -{0} requires a value")]
    MissingValue(char),

    /// `-p` value is not a port number.
    #[error("invalid port {0:?}")]
    InvalidPort(String),

    /// `-o` value (or a directive line) is not `Key=Value` / `Key Value`.
    #[error("malformed option {0:?}, expected Key=Value")]
    MalformedOption(String),

    /// A flag outside the supported table.
    #[error("unknown option -{0}")]
    UnknownFlag(char),

    /// A token that is not an option, such as a destination or command.
    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),

    /// A known ssh flag with no per-host directive equivalent.
    #[error("option -{0} has no ssh_config equivalent")]
    Unsupported(char),

    /// The argument string has unbalanced quotes.
    #[error("cannot split arguments: {0}")]
    Tokenize(#[from] shell_words::ParseError),
}

/// Error raised while writing the generated config to disk.
///
/// No partial file is left behind when any of these is returned.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Destination path has no file name.
    #[error("invalid destination {}", .path.display())]
    InvalidDestination { path: PathBuf },

    /// Temporary file could not be created next to the destination.
    #[error("cannot create a file next to {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },

    /// Writing or syncing the temporary file failed.
    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Renaming the temporary file over the destination failed.
    #[error("cannot replace {}: {source}", .path.display())]
    Persist { path: PathBuf, source: io::Error },
}

/// Error raised while reading back an SSH config file.
#[derive(Error, Debug)]
pub enum HostsError {
    #[error("failed to read SSH config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse SSH config: {0}")]
    Parse(String),

    /// A rendered stanza does not resolve to the values it was built from.
    #[error("host {name} resolves to an unexpected {field}")]
    Mismatch { name: String, field: &'static str },
}
