//! capy-themes: theme and wallpaper switching for omarchy-style desktops.
//!
//! Provides:
//! - Theme discovery across prioritized roots (first match per name wins)
//! - Wallpaper discovery inside the active theme
//! - Activation through external tools (`theme`, `swaybg`) and symlinks
//! - A controller owning the discovered state, with change events

pub mod activation;
pub mod config;
pub mod controller;
pub mod discovery;
pub mod error;
pub mod runner;
pub mod types;

pub use config::Config;
pub use controller::{Snapshot, ThemeController, ThemeEvent};
pub use error::{Scan, SoftFailure, ThemeError};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use types::{Background, Filter, Theme, ThemeSource};
