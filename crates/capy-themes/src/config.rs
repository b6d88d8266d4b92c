//! Search paths, external commands and the optional JSON config file.
//!
//! Config is typically stored in ~/.config/capy-themes/config.json.
//! Every field is optional; missing fields fall back to the omarchy layout.

use crate::error::ThemeError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Theme roots in priority order (first match per name wins).
pub const DEFAULT_THEME_ROOTS: [&str; 4] = [
    "~/.config/omarchy/themes",
    "~/.local/share/omarchy/themes",
    "/usr/share/omarchy/themes",
    "/etc/omarchy/themes",
];

pub const DEFAULT_CURRENT_THEME_LINK: &str = "~/.config/omarchy/current/theme";
pub const DEFAULT_THEME_COMMAND: &str = "theme";
pub const DEFAULT_WALLPAPER_COMMAND: &str = "swaybg";
pub const DEFAULT_KILL_COMMAND: &str = "pkill";

/// Subdirectory of the current theme holding wallpapers.
pub const BACKGROUNDS_DIR: &str = "backgrounds";
/// Symlink inside the current theme pointing at the default wallpaper.
pub const DEFAULT_BACKGROUND_LINK: &str = "background";
pub const PREVIEW_FILE: &str = "preview.png";

/// On-disk representation. Paths may start with `~/`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub theme_roots: Option<Vec<String>>,
    pub current_theme_link: Option<String>,
    pub theme_command: Option<String>,
    pub wallpaper_command: Option<String>,
    pub kill_command: Option<String>,
}

/// Resolved configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Config {
    pub theme_roots: Vec<PathBuf>,
    pub current_theme_link: PathBuf,
    pub theme_command: String,
    pub wallpaper_command: String,
    pub kill_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(ConfigFile::default(), &home_dir())
    }
}

impl Config {
    /// Resolve a config file against a home directory.
    pub fn resolve(file: ConfigFile, home: &Path) -> Self {
        let theme_roots = match file.theme_roots {
            Some(roots) => roots.iter().map(|r| expand_home(r, home)).collect(),
            None => DEFAULT_THEME_ROOTS
                .iter()
                .map(|r| expand_home(r, home))
                .collect(),
        };

        let current_theme_link = expand_home(
            file.current_theme_link
                .as_deref()
                .unwrap_or(DEFAULT_CURRENT_THEME_LINK),
            home,
        );

        Self {
            theme_roots,
            current_theme_link,
            theme_command: file
                .theme_command
                .unwrap_or_else(|| DEFAULT_THEME_COMMAND.to_string()),
            wallpaper_command: file
                .wallpaper_command
                .unwrap_or_else(|| DEFAULT_WALLPAPER_COMMAND.to_string()),
            kill_command: file
                .kill_command
                .unwrap_or_else(|| DEFAULT_KILL_COMMAND.to_string()),
        }
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing or unreadable file yields the defaults. A file that exists
    /// but does not parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Cannot read config {}: {}. Using defaults.", path.display(), e);
                return Ok(Self::default());
            }
        };

        let file: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| ThemeError::Config(format!("{}: {}", path.display(), e)))?;

        Ok(Self::resolve(file, &home_dir()))
    }

    /// Backgrounds of the current theme, addressed through the link.
    pub fn backgrounds_dir(&self) -> PathBuf {
        self.current_theme_link.join(BACKGROUNDS_DIR)
    }

    pub fn default_background_link(&self) -> PathBuf {
        self.current_theme_link.join(DEFAULT_BACKGROUND_LINK)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("capy-themes").join("config.json"))
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default()
}

/// Expand a leading `~/` (or a bare `~`) against `home`.
pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        home.to_path_buf()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(raw)
    }
}
