//! CapyThemes - theme and wallpaper switcher for omarchy desktops
//!
//! Lists installed themes and the active theme's wallpapers, and applies
//! them through the `theme` and `swaybg` tools.

mod cli;
mod functions;
mod services;

use capy_themes::{Filter, ThemeController};
use clap::Parser;
use cli::{Cli, Commands};
use functions::formatting;
use std::error::Error;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let service = services::themes::start(cli.config.as_deref())?;

    let command = cli.command.unwrap_or(Commands::List {
        filter: cli::FilterArg::All,
        json: false,
    });

    let result = execute(&service.controller, command).await;
    service.shutdown().await;
    result
}

async fn execute(controller: &ThemeController, command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::List { filter, json } => {
            controller.set_filter(filter.into());
            list(controller, json).await?;
        }
        Commands::Current => {
            let snapshot = controller.refresh().await;
            if !snapshot.current_theme.is_empty() {
                println!("{}", snapshot.current_theme);
            }
        }
        Commands::Apply { theme } => {
            controller.refresh().await;
            println!("Switching Theme: {}", theme);
            controller.apply_theme(&theme).await?;
            println!("Theme Active: Now using {}", theme);
        }
        Commands::Wallpaper { name } => {
            controller.refresh().await;
            println!("Setting Wallpaper: {}", name);
            controller.apply_background(&name).await?;
            println!("Wallpaper Set: {}", name);
        }
        Commands::SetDefault { name } => {
            controller.refresh().await;
            controller.set_default_background(&name).await?;
            println!("Default Wallpaper: Set to {}", name);
        }
        Commands::Paths => {
            println!("{}", serde_json::to_string_pretty(controller.config())?);
        }
    }

    Ok(())
}

async fn list(controller: &ThemeController, json: bool) -> Result<(), Box<dyn Error>> {
    let snapshot = controller.refresh().await;
    let filter: Filter = controller.filter();

    if json {
        println!("{}", formatting::render_json(&snapshot, filter)?);
    } else {
        print!("{}", formatting::render_text(&snapshot, filter));
    }

    Ok(())
}
