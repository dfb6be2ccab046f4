use std::path::PathBuf;

use clap::{Args, Parser};

use crate::commands::Commands;
use crate::config::DEFAULT_CONFIG_FILE;

/// Name of the folder holding the credential cache
const CONFIG_FOLDER_NAME: &str = "pnc-bacon";

/// Bacon - command line client for PNC
#[derive(Parser)]
#[command(name = "bacon")]
#[command(about = "CLI for interacting with the PNC build service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub options: Options,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by all commands
#[derive(Args, Clone)]
pub struct Options {
    /// Path to the configuration file
    #[arg(short = 'c', long = "config", env = "BACON_CONFIG", default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    /// Folder holding the credential cache
    #[arg(long = "config-folder", env = "BACON_CONFIG_FOLDER", global = true)]
    pub config_folder: Option<PathBuf>,

    /// Verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

impl Options {
    /// The configured folder, or `$XDG_CONFIG_HOME/pnc-bacon` (`~/.config/pnc-bacon`)
    pub fn config_folder(&self) -> PathBuf {
        self.config_folder
            .clone()
            .unwrap_or_else(default_config_folder)
    }
}

fn default_config_folder() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_default();
    base.join(CONFIG_FOLDER_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ProductCommands;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_update_with_partial_fields() {
        let cli = Cli::try_parse_from([
            "bacon",
            "--config",
            "/tmp/c.yaml",
            "product",
            "update",
            "12",
            "--abbreviation",
            "Z",
            "-o",
        ])
        .unwrap();

        assert_eq!(cli.options.config, PathBuf::from("/tmp/c.yaml"));
        match cli.command {
            Commands::Product {
                command: ProductCommands::Update { id, fields, output },
            } => {
                assert_eq!(id, "12");
                assert_eq!(fields.abbreviation.as_deref(), Some("Z"));
                assert!(fields.name.is_none());
                assert!(fields.description.is_none());
                assert!(output.json);
            }
            _ => panic!("expected product update"),
        }
    }

    #[test]
    fn create_requires_abbreviation() {
        let result = Cli::try_parse_from(["bacon", "product", "create", "EAP"]);
        assert!(result.is_err());
    }

    #[test]
    fn list_accepts_sort_and_query() {
        let cli = Cli::try_parse_from([
            "bacon", "project", "list", "--sort", "=asc=name", "--query", "name==q*", "--json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Project { .. }));
    }

    #[test]
    fn explicit_config_folder_wins() {
        let cli = Cli::try_parse_from([
            "bacon",
            "--config-folder",
            "/tmp/bacon",
            "product",
            "get",
            "1",
        ])
        .unwrap();
        assert_eq!(cli.options.config_folder(), PathBuf::from("/tmp/bacon"));
    }
}
