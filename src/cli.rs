//! Command-line interface.

use capy_themes::Filter;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "capy-themes")]
#[command(about = "Browse and apply desktop themes and wallpapers", version)]
pub struct Cli {
    /// Config file (defaults to ~/.config/capy-themes/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log discovery and command details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List installed themes and the current theme's wallpapers
    List {
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the active theme name
    Current,
    /// Switch to a theme
    Apply { theme: String },
    /// Set a wallpaper from the current theme
    Wallpaper { name: String },
    /// Make a wallpaper the current theme's default
    SetDefault { name: String },
    /// Show resolved search paths and commands
    Paths,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    Themes,
    Wallpapers,
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Filter::All,
            FilterArg::Themes => Filter::Themes,
            FilterArg::Wallpapers => Filter::Wallpapers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_filter() {
        let cli = Cli::parse_from(["capy-themes", "list", "--filter", "wallpapers", "--json"]);
        match cli.command {
            Some(Commands::List { filter, json }) => {
                assert_eq!(Filter::from(filter), Filter::Wallpapers);
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_options_after_subcommand() {
        let cli = Cli::parse_from(["capy-themes", "apply", "nord", "-v", "--config", "/tmp/c.json"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
        assert!(matches!(cli.command, Some(Commands::Apply { theme }) if theme == "nord"));
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["capy-themes"]);
        assert!(cli.command.is_none());
    }
}
