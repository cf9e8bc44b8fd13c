//! Translation of ssh command-line options into `ssh_config` directives.
//!
//! Supported flags:
//!
//! | flag | directive |
//! |------|-----------|
//! | `-i path` | `IdentityFile path` |
//! | `-p port` | `Port port` |
//! | `-o Key=Value` | `Key Value` |
//! | `-l user` | `User user` |
//! | `-J jump` | `ProxyJump jump` |
//! | `-c spec` | `Ciphers spec` |
//! | `-m spec` | `MACs spec` |
//! | `-b addr` | `BindAddress addr` |
//! | `-D spec` | `DynamicForward spec` |
//! | `-A` / `-a` | `ForwardAgent yes` / `no` |
//! | `-C` | `Compression yes` |
//! | `-X` / `-x` | `ForwardX11 yes` / `no` |
//! | `-Y` | `ForwardX11Trusted yes` |
//! | `-t` / `-T` | `RequestTTY yes` / `no` |
//! | `-4` / `-6` | `AddressFamily inet` / `inet6` |
//! | `-q` | `LogLevel QUIET` |
//!
//! Anything else, including positional arguments, fails the whole
//! translation so a host never ends up with a partial option list.

use crate::error::TranslateError;
use inventory::CommonArgs;
use std::fmt;
use std::str::FromStr;

/// Directives whose values are paths and get quoted when they hold spaces.
const PATH_DIRECTIVES: &[&str] = &[
    "IdentityFile",
    "CertificateFile",
    "UserKnownHostsFile",
    "GlobalKnownHostsFile",
    "ControlPath",
    "IdentityAgent",
];

/// One `ssh_config` keyword/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedOption {
    pub directive: String,
    pub value: String,
}

impl TranslatedOption {
    pub fn new(directive: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            directive: directive.into(),
            value: value.into(),
        }
    }

    fn is_path(&self) -> bool {
        PATH_DIRECTIVES
            .iter()
            .any(|d| d.eq_ignore_ascii_case(&self.directive))
    }
}

impl fmt::Display for TranslatedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_path() && self.value.contains(char::is_whitespace) {
            write!(f, "{} \"{}\"", self.directive, self.value)
        } else {
            write!(f, "{} {}", self.directive, self.value)
        }
    }
}

/// Parses a directive line as written by [`fmt::Display`].
impl FromStr for TranslatedOption {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut option = parse_key_value(s)?;
        if option.is_path()
            && let Some(unquoted) = option
                .value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
        {
            option.value = unquoted.to_string();
        }
        Ok(option)
    }
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    /// Takes a value, emitted verbatim under the directive.
    Value(&'static str),
    /// Takes a port number.
    Port,
    /// Takes a `Key=Value` pair.
    KeyValue,
    /// Takes no value and always emits the same directive.
    Fixed(&'static str, &'static str),
    /// Known to ssh but meaningless inside a `Host` block.
    Unsupported,
}

impl Flag {
    fn lookup(flag: char) -> Option<Self> {
        let spec = match flag {
            'i' => Self::Value("IdentityFile"),
            'p' => Self::Port,
            'o' => Self::KeyValue,
            'l' => Self::Value("User"),
            'J' => Self::Value("ProxyJump"),
            'c' => Self::Value("Ciphers"),
            'm' => Self::Value("MACs"),
            'b' => Self::Value("BindAddress"),
            'D' => Self::Value("DynamicForward"),
            'A' => Self::Fixed("ForwardAgent", "yes"),
            'a' => Self::Fixed("ForwardAgent", "no"),
            'C' => Self::Fixed("Compression", "yes"),
            'X' => Self::Fixed("ForwardX11", "yes"),
            'x' => Self::Fixed("ForwardX11", "no"),
            'Y' => Self::Fixed("ForwardX11Trusted", "yes"),
            't' => Self::Fixed("RequestTTY", "yes"),
            'T' => Self::Fixed("RequestTTY", "no"),
            '4' => Self::Fixed("AddressFamily", "inet"),
            '6' => Self::Fixed("AddressFamily", "inet6"),
            'q' => Self::Fixed("LogLevel", "QUIET"),
            'F' => Self::Unsupported,
            _ => return None,
        };
        Some(spec)
    }

    fn takes_value(self) -> bool {
        matches!(self, Self::Value(_) | Self::Port | Self::KeyValue)
    }

    fn apply(self, flag: char, value: &str) -> Result<TranslatedOption, TranslateError> {
        match self {
            Self::Value(directive) => Ok(TranslatedOption::new(directive, value)),
            Self::Port => {
                parse_port(value).map(|port| TranslatedOption::new("Port", port.to_string()))
            }
            Self::KeyValue => parse_key_value(value),
            Self::Fixed(directive, fixed) => Ok(TranslatedOption::new(directive, fixed)),
            Self::Unsupported => Err(TranslateError::Unsupported(flag)),
        }
    }
}

/// Translates ssh command-line tokens into directives, in token order.
///
/// Value flags accept the value attached (`-p2222`) or as the next token
/// (`-p 2222`); valueless flags may be clustered (`-AC`).
///
/// # Errors
///
/// Returns the first problem found. No directives are returned on error.
pub fn translate<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<TranslatedOption>, TranslateError> {
    let mut options = Vec::new();
    let mut tokens = tokens.iter().map(AsRef::as_ref);

    while let Some(token) = tokens.next() {
        let Some(cluster) = token
            .strip_prefix('-')
            .filter(|c| !c.is_empty() && !c.starts_with('-'))
        else {
            return Err(TranslateError::UnexpectedArgument(token.to_string()));
        };

        for (offset, flag) in cluster.char_indices() {
            let spec = Flag::lookup(flag).ok_or(TranslateError::UnknownFlag(flag))?;

            if !spec.takes_value() {
                options.push(spec.apply(flag, "")?);
                continue;
            }

            let attached = &cluster[offset + flag.len_utf8()..];
            let value = if attached.is_empty() {
                tokens
                    .next()
                    .filter(|next| !next.starts_with('-'))
                    .ok_or(TranslateError::MissingValue(flag))?
            } else {
                attached
            };

            if value.trim().is_empty() {
                return Err(TranslateError::MissingValue(flag));
            }
            if value.contains(char::is_control) {
                return Err(TranslateError::MalformedOption(value.to_string()));
            }

            options.push(spec.apply(flag, value)?);
            break;
        }
    }

    Ok(options)
}

/// Splits a single argument string with POSIX shell quoting rules.
///
/// # Errors
///
/// Returns `TranslateError::Tokenize` on unbalanced quotes or a trailing
/// backslash.
pub fn tokenize(line: &str) -> Result<Vec<String>, TranslateError> {
    Ok(shell_words::split(line)?)
}

/// Translates a host's connection arguments in either inventory form.
///
/// # Errors
///
/// See [`translate`] and [`tokenize`].
pub fn translate_args(args: &CommonArgs) -> Result<Vec<TranslatedOption>, TranslateError> {
    match args {
        CommonArgs::Line(line) => translate(tokenize(line)?.as_slice()),
        CommonArgs::Tokens(tokens) => translate(tokens.as_slice()),
    }
}

fn parse_port(value: &str) -> Result<u16, TranslateError> {
    match value.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(TranslateError::InvalidPort(value.to_string())),
    }
}

/// Splits `Key=Value` or `Key Value`, the same way ssh reads `-o`.
fn parse_key_value(input: &str) -> Result<TranslatedOption, TranslateError> {
    let malformed = || TranslateError::MalformedOption(input.to_string());

    let trimmed = input.trim();
    let split = trimmed
        .find(|c: char| c == '=' || c.is_whitespace())
        .ok_or_else(malformed)?;
    let (key, rest) = trimmed.split_at(split);
    let rest = rest.trim_start();
    let value = rest.strip_prefix('=').unwrap_or(rest).trim();

    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) || value.is_empty() {
        return Err(malformed());
    }

    Ok(TranslatedOption::new(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn opt(directive: &str, value: &str) -> TranslatedOption {
        TranslatedOption::new(directive, value)
    }

    #[test]
    fn test_translate_empty() {
        let tokens: [&str; 0] = [];
        assert!(translate(&tokens).unwrap().is_empty());
    }

    #[test]
    fn test_translate_identity_port_option() {
        let options = translate(&["-i", "my_id_rsa", "-p", "2222", "-o", "ServerAliveInterval=30"])
            .unwrap();
        assert_eq!(
            options,
            vec![
                opt("IdentityFile", "my_id_rsa"),
                opt("Port", "2222"),
                opt("ServerAliveInterval", "30"),
            ]
        );
    }

    #[test]
    fn test_translate_proxy_command_keeps_order() {
        let options = translate(&[
            "-o",
            "ProxyCommand=ssh -W %h:%p user@example.org -p 2222",
            "-i",
            "my_id_rsa",
        ])
        .unwrap();
        assert_eq!(
            options,
            vec![
                opt("ProxyCommand", "ssh -W %h:%p user@example.org -p 2222"),
                opt("IdentityFile", "my_id_rsa"),
            ]
        );
    }

    #[test]
    fn test_translate_attached_values() {
        let options = translate(&["-p2222", "-ikey.pem", "-oCompression=yes"]).unwrap();
        assert_eq!(
            options,
            vec![
                opt("Port", "2222"),
                opt("IdentityFile", "key.pem"),
                opt("Compression", "yes"),
            ]
        );
    }

    #[test]
    fn test_translate_clustered_flags() {
        let options = translate(&["-AC", "-qi", "key"]).unwrap();
        assert_eq!(
            options,
            vec![
                opt("ForwardAgent", "yes"),
                opt("Compression", "yes"),
                opt("LogLevel", "QUIET"),
                opt("IdentityFile", "key"),
            ]
        );
    }

    #[test]
    fn test_translate_option_with_space_separator() {
        let options = translate(&["-o", "User admin"]).unwrap();
        assert_eq!(options, vec![opt("User", "admin")]);
    }

    #[test]
    fn test_translate_option_keeps_key_verbatim() {
        let options = translate(&["-o", "stricthostkeychecking = accept-new"]).unwrap();
        assert_eq!(options, vec![opt("stricthostkeychecking", "accept-new")]);
    }

    #[test]
    fn test_translate_extended_flags() {
        let options = translate(&["-l", "root", "-J", "bastion", "-4", "-D", "1080"]).unwrap();
        assert_eq!(
            options,
            vec![
                opt("User", "root"),
                opt("ProxyJump", "bastion"),
                opt("AddressFamily", "inet"),
                opt("DynamicForward", "1080"),
            ]
        );
    }

    #[test]
    fn test_translate_missing_value() {
        assert!(matches!(
            translate(&["-i"]),
            Err(TranslateError::MissingValue('i'))
        ));
        assert!(matches!(
            translate(&["-i", "-p", "22"]),
            Err(TranslateError::MissingValue('i'))
        ));
        assert!(matches!(
            translate(&["-o", "  "]),
            Err(TranslateError::MissingValue('o'))
        ));
    }

    #[test]
    fn test_translate_invalid_port() {
        assert!(matches!(
            translate(&["-p", "ssh"]),
            Err(TranslateError::InvalidPort(_))
        ));
        assert!(matches!(
            translate(&["-p", "0"]),
            Err(TranslateError::InvalidPort(_))
        ));
        assert!(matches!(
            translate(&["-p", "65536"]),
            Err(TranslateError::InvalidPort(_))
        ));
    }

    #[test]
    fn test_translate_malformed_option() {
        for bad in ["Compression", "=yes", "Proxy-Command=x", "Key="] {
            assert!(
                matches!(
                    translate(&["-o", bad]),
                    Err(TranslateError::MalformedOption(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_translate_rejects_newlines() {
        assert!(matches!(
            translate(&["-i", "key\nHost *"]),
            Err(TranslateError::MalformedOption(_))
        ));
    }

    #[test]
    fn test_translate_unknown_and_unsupported_flags() {
        assert!(matches!(
            translate(&["-L", "8080:localhost:80"]),
            Err(TranslateError::UnknownFlag('L'))
        ));
        assert!(matches!(
            translate(&["-F", "/etc/ssh/other"]),
            Err(TranslateError::Unsupported('F'))
        ));
    }

    #[test]
    fn test_translate_positional_arguments() {
        assert!(matches!(
            translate(&["user@host"]),
            Err(TranslateError::UnexpectedArgument(_))
        ));
        assert!(matches!(
            translate(&["--"]),
            Err(TranslateError::UnexpectedArgument(_))
        ));
        assert!(matches!(
            translate(&["-C", "-"]),
            Err(TranslateError::UnexpectedArgument(_))
        ));
    }

    #[test]
    fn test_tokenize_quoted_values() {
        let tokens =
            tokenize(r#"-o 'ProxyCommand=ssh -W %h:%p bastion' -i "/keys/my key""#).unwrap();
        assert_eq!(
            tokens,
            vec![
                "-o",
                "ProxyCommand=ssh -W %h:%p bastion",
                "-i",
                "/keys/my key"
            ]
        );
    }

    #[test]
    fn test_tokenize_unbalanced_quote() {
        assert!(matches!(
            tokenize(r#"-o "ProxyCommand=ssh"#),
            Err(TranslateError::Tokenize(_))
        ));
    }

    #[test]
    fn test_translate_args_line_and_tokens_agree() {
        let line = CommonArgs::Line(r#"-o "ProxyJump=bastion" -p 2200"#.to_string());
        let tokens = CommonArgs::Tokens(vec![
            "-o".to_string(),
            "ProxyJump=bastion".to_string(),
            "-p".to_string(),
            "2200".to_string(),
        ]);
        assert_eq!(translate_args(&line).unwrap(), translate_args(&tokens).unwrap());
    }

    #[test]
    fn test_display_quotes_paths_with_spaces() {
        assert_eq!(
            opt("IdentityFile", "/keys/my key").to_string(),
            r#"IdentityFile "/keys/my key""#
        );
        assert_eq!(
            opt("ProxyCommand", "ssh -W %h:%p bastion").to_string(),
            "ProxyCommand ssh -W %h:%p bastion"
        );
    }

    #[test]
    fn test_directives_parse_back_to_same_options() {
        let options = translate(&[
            "-i",
            "/keys/my key",
            "-p",
            "2222",
            "-o",
            "ProxyCommand=ssh -W %h:%p user@example.org -p 2222",
            "-o",
            "ServerAliveCountMax 3",
        ])
        .unwrap();

        let reparsed: Vec<TranslatedOption> = options
            .iter()
            .map(|o| o.to_string().parse().unwrap())
            .collect();
        assert_eq!(reparsed, options);
    }
}
