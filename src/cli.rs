use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = concat!(env!("INVSSH_VERSION"), " ", env!("INVSSH_BUILD_HASH"));

#[derive(Debug, Parser)]
#[command(
    name = "invssh",
    version = VERSION,
    about = "Generate an SSH client config from resolved inventory data"
)]
pub struct Arguments {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the inventory into an SSH config file
    Generate(GenerateArgs),

    /// List the host aliases of an SSH config file
    Hosts {
        /// Config file to read [default: the configured output]
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },

    /// Create ~/.invssh.json with default settings if it does not exist
    Init,
}

#[derive(Debug, Default, Args)]
pub struct GenerateArgs {
    /// Inventory JSON file, or `-` for stdin [default: settings `inventory`]
    #[arg(short, long, value_name = "FILE")]
    pub inventory: Option<PathBuf>,

    /// Destination file [default: settings `output`, else ~/.ssh/config.d/invssh]
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the generated config instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_arguments_are_consistent() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let args =
            Arguments::try_parse_from(["invssh", "-vv", "generate", "-i", "hosts.json", "-o", "out"])
                .unwrap();
        assert_eq!(args.verbose, 2);
        match args.command {
            Command::Generate(generate) => {
                assert_eq!(generate.inventory, Some(PathBuf::from("hosts.json")));
                assert_eq!(generate.output, Some(PathBuf::from("out")));
                assert!(!generate.stdout);
            }
            other => panic!("Expected generate, got {other:?}"),
        }
    }

    #[test]
    fn test_output_conflicts_with_stdout() {
        let result = Arguments::try_parse_from(["invssh", "generate", "-o", "out", "--stdout"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_hosts_default_path() {
        let args = Arguments::try_parse_from(["invssh", "hosts"]).unwrap();
        assert!(matches!(args.command, Command::Hosts { path: None }));
    }
}
