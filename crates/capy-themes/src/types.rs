//! Core types for capy-themes

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where a theme was found. Only used for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSource {
    User,
    Local,
    System,
}

impl ThemeSource {
    /// Classify a search root by the path fragments it contains.
    /// `.local` is checked before `.config`; anything else is a system root.
    pub fn classify(root: &Path) -> Self {
        let root = root.to_string_lossy();
        if root.contains(".local") {
            ThemeSource::Local
        } else if root.contains(".config") {
            ThemeSource::User
        } else {
            ThemeSource::System
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeSource::User => "user",
            ThemeSource::Local => "local",
            ThemeSource::System => "system",
        }
    }
}

impl std::fmt::Display for ThemeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An installed theme directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Directory basename, unique across all roots.
    pub name: String,
    pub path: PathBuf,
    /// `preview.png` inside the theme directory, if present.
    pub preview_image: Option<PathBuf>,
    pub source: ThemeSource,
}

/// A wallpaper image inside the current theme's backgrounds directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Background {
    /// File basename including extension.
    pub name: String,
    pub path: PathBuf,
    /// Uppercase extension without the dot (e.g. "JPG").
    pub ext: String,
}

impl Background {
    /// Name without its last extension ("forest.dark.png" -> "forest.dark").
    pub fn title(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[..idx],
            None => &self.name,
        }
    }
}

/// Which collections the presentation layer shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Themes,
    Wallpapers,
}

impl Filter {
    pub fn shows_themes(&self) -> bool {
        matches!(self, Filter::All | Filter::Themes)
    }

    pub fn shows_wallpapers(&self) -> bool {
        matches!(self, Filter::All | Filter::Wallpapers)
    }
}
