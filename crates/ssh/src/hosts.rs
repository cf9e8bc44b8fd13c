use crate::block::{ConfigBlock, Extracted};
use crate::error::HostsError;
use log::warn;
use ssh2_config::{ParseRule, SshConfig};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Generated files carry options ssh2-config only knows by name.
const RULES: ParseRule = ParseRule::ALLOW_UNKNOWN_FIELDS.union(ParseRule::ALLOW_UNSUPPORTED_FIELDS);

fn parse<R: BufRead>(reader: &mut R) -> Result<SshConfig, HostsError> {
    SshConfig::default()
        .parse(reader, RULES)
        .map_err(|e| HostsError::Parse(e.to_string()))
}

/// Lists the concrete host aliases of an SSH config file.
///
/// Wildcard and negated patterns are skipped. Names are sorted
/// case-insensitively.
///
/// # Errors
///
/// Returns `HostsError::Io` if the file cannot be opened and
/// `HostsError::Parse` if it is malformed.
pub fn list_hosts(path: &Path) -> Result<Vec<String>, HostsError> {
    let mut reader = BufReader::new(File::open(path)?);
    Ok(host_names(&parse(&mut reader)?))
}

/// Same as [`list_hosts`], for config text already in memory.
///
/// # Errors
///
/// Returns `HostsError::Parse` if the text is malformed.
pub fn list_hosts_from_str(text: &str) -> Result<Vec<String>, HostsError> {
    let mut reader = text.as_bytes();
    Ok(host_names(&parse(&mut reader)?))
}

fn host_names(config: &SshConfig) -> Vec<String> {
    let mut hosts = Vec::new();

    for host in config.get_hosts() {
        for clause in &host.pattern {
            let name = clause.pattern.as_str();

            // Skip wildcards and patterns
            if name.contains('*') || name.contains('?') || name == "!" {
                continue;
            }

            if clause.negated {
                continue;
            }

            hosts.push(name.to_string());
        }
    }

    hosts.sort_by_key(|a| a.to_lowercase());
    hosts
}

/// Parses a block on its own and checks that it resolves to the address,
/// port and user it was rendered from.
///
/// A field also set through translated options is not checked, since which
/// occurrence wins is up to the parser.
///
/// # Errors
///
/// Returns `HostsError::Parse` if the stanza does not parse and
/// `HostsError::Mismatch` if it resolves differently.
pub fn verify_block(block: &ConfigBlock) -> Result<(), HostsError> {
    let text = block.to_string();
    let mut reader = text.as_bytes();
    let config = parse(&mut reader)?;

    let params = config.query(&block.name);
    let overridden = |directive: &str| {
        block
            .options()
            .iter()
            .any(|o| o.directive.eq_ignore_ascii_case(directive))
    };
    let mismatch = |field| HostsError::Mismatch {
        name: block.name.clone(),
        field,
    };

    if !overridden("HostName") && params.host_name.as_deref() != Some(block.host_name.as_str()) {
        return Err(mismatch("HostName"));
    }
    if !overridden("Port") && params.port != Some(block.port) {
        return Err(mismatch("Port"));
    }
    if !overridden("User") && block.user.is_some() && params.user != block.user {
        return Err(mismatch("User"));
    }

    Ok(())
}

/// Checks every block separately, keeping a bad block from affecting the
/// others.
///
/// A block whose translated options do not parse back loses them and gets
/// the failure comment instead. A block that still does not parse is left
/// out.
pub fn verify_blocks(blocks: Vec<ConfigBlock>) -> Vec<ConfigBlock> {
    blocks
        .into_iter()
        .filter_map(|mut block| {
            let Err(e) = verify_block(&block) else {
                return Some(block);
            };

            if !block.is_failed() {
                warn!("connection arguments of {} are rejected by ssh: {e}", block.name);
                block.extracted = Extracted::Failed;
                if verify_block(&block).is_ok() {
                    return Some(block);
                }
            }

            warn!("leaving out {}: {e}", block.name);
            None
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::aggregate;
    use crate::render::render;
    use inventory::{CommonArgs, ConnectionType, HostRecord};
    use std::fs;
    use tempfile::tempdir;

    fn record(name: &str, host: &str, port: u16) -> HostRecord {
        HostRecord {
            name: name.to_string(),
            host: host.to_string(),
            user: Some("deploy".to_string()),
            port,
            identity_file: Some("~/.ssh/id_ed25519".to_string()),
            common_args: Some(CommonArgs::Tokens(vec![
                "-o".to_string(),
                "ProxyCommand=ssh -W %h:%p user@example.org -p 2222".to_string(),
                "-C".to_string(),
            ])),
            connection_type: ConnectionType::Ssh,
        }
    }

    #[test]
    fn test_list_hosts_from_str_skips_patterns() {
        let text = "\
Host zulu
  HostName 10.0.0.26

Host alpha beta
  User root

Host *.internal web?
  Port 2222

Host !excluded
  Port 22
";
        let hosts = list_hosts_from_str(text).unwrap();
        assert_eq!(hosts, vec!["alpha", "beta", "zulu"]);
    }

    #[test]
    fn test_rendered_config_parses_back() {
        let blocks = aggregate(&[record("web1", "10.0.0.1", 22), record("db1", "10.0.0.2", 2200)]);
        let text = render(&blocks);

        assert_eq!(list_hosts_from_str(&text).unwrap(), vec!["db1", "web1"]);
        for block in &blocks {
            verify_block(block).unwrap();
        }
    }

    #[test]
    fn test_verify_block_detects_mismatch() {
        let mut block = ConfigBlock::from_host(&record("web1", "10.0.0.1", 22));
        block.host_name = "10.0.0.1 10.9.9.9".to_string();

        assert!(verify_block(&block).is_err());
    }

    #[test]
    fn test_verify_block_rejects_bad_option_value() {
        let mut bad = record("bad", "10.0.0.3", 22);
        bad.common_args = Some(CommonArgs::Line("-o ConnectTimeout=soon".to_string()));

        let block = ConfigBlock::from_host(&bad);
        assert!(!block.is_failed());
        assert!(matches!(verify_block(&block), Err(HostsError::Parse(_))));
    }

    #[test]
    fn test_verify_blocks_isolates_bad_option_value() {
        let mut bad = record("bad", "10.0.0.3", 22);
        bad.common_args = Some(CommonArgs::Line("-o Port=ssh".to_string()));

        let blocks = verify_blocks(aggregate(&[record("good", "10.0.0.1", 22), bad]));

        assert_eq!(blocks.len(), 2);
        assert!(!blocks[0].is_failed());
        assert!(!blocks[0].options().is_empty());
        assert!(blocks[1].is_failed());
        assert!(blocks[1].to_string().contains(
            "# Script could not generate configuration for host bad, check connection arguments"
        ));
    }

    #[test]
    fn test_list_hosts_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, render(&aggregate(&[record("app", "app.local", 22)]))).unwrap();

        assert_eq!(list_hosts(&path).unwrap(), vec!["app"]);
    }

    #[test]
    fn test_list_hosts_missing_file() {
        let result = list_hosts(Path::new("/nonexistent/ssh/config"));
        assert!(matches!(result, Err(HostsError::Io(_))));
    }
}
