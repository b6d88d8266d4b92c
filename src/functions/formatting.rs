//! Turns controller snapshots into display items.
//!
//! Mirrors the grid layout: a "Themes" section, a "Wallpapers" section and
//! empty-state hints when there is nothing to show.

use capy_themes::{Background, Filter, Snapshot, Theme};
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

pub const ACTIVE_LABEL: &str = "✦ Active";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GridItem {
    pub title: String,
    pub subtitle: String,
    pub path: PathBuf,
    /// Image to show for the item, if any.
    pub preview: Option<PathBuf>,
    pub active: bool,
    pub keywords: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub subtitle: String,
    pub items: Vec<GridItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub description: &'static str,
}

pub fn theme_item(theme: &Theme, active: bool) -> GridItem {
    GridItem {
        title: theme.name.clone(),
        subtitle: if active {
            ACTIVE_LABEL.to_string()
        } else {
            theme.source.to_string()
        },
        path: theme.path.clone(),
        preview: theme.preview_image.clone(),
        active,
        keywords: vec![
            "theme".to_string(),
            theme.name.clone(),
            theme.source.to_string(),
        ],
    }
}

pub fn background_item(bg: &Background) -> GridItem {
    GridItem {
        title: bg.title().to_string(),
        subtitle: bg.ext.clone(),
        path: bg.path.clone(),
        preview: Some(bg.path.clone()),
        active: false,
        keywords: vec![
            "wallpaper".to_string(),
            "background".to_string(),
            bg.name.clone(),
            bg.ext.clone(),
        ],
    }
}

/// Non-empty sections visible under `filter`.
pub fn sections(snapshot: &Snapshot, filter: Filter) -> Vec<Section> {
    let mut sections = Vec::new();

    let themes = snapshot.visible_themes(filter);
    if !themes.is_empty() {
        sections.push(Section {
            title: "Themes",
            subtitle: format!("{} installed", themes.len()),
            items: themes
                .iter()
                .map(|t| theme_item(t, snapshot.is_active(t)))
                .collect(),
        });
    }

    let backgrounds = snapshot.visible_backgrounds(filter);
    if !backgrounds.is_empty() {
        sections.push(Section {
            title: "Wallpapers",
            subtitle: format!("{} in current theme", backgrounds.len()),
            items: backgrounds.iter().map(background_item).collect(),
        });
    }

    sections
}

pub fn empty_states(snapshot: &Snapshot, filter: Filter) -> Vec<EmptyState> {
    if snapshot.loading {
        return Vec::new();
    }

    let mut states = Vec::new();

    if snapshot.themes.is_empty() && snapshot.backgrounds.is_empty() {
        states.push(EmptyState {
            title: "No Themes Found",
            description: "Add themes to ~/.config/omarchy/themes",
        });
    }
    if filter == Filter::Themes && snapshot.themes.is_empty() {
        states.push(EmptyState {
            title: "No Themes",
            description: "Install themes to get started",
        });
    }
    if filter == Filter::Wallpapers && snapshot.backgrounds.is_empty() {
        states.push(EmptyState {
            title: "No Wallpapers",
            description: "Add images to your current theme's backgrounds folder",
        });
    }

    states
}

/// Plain-text listing for the terminal.
pub fn render_text(snapshot: &Snapshot, filter: Filter) -> String {
    let mut out = String::new();

    for section in sections(snapshot, filter) {
        let width = section
            .items
            .iter()
            .map(|i| i.title.chars().count())
            .max()
            .unwrap_or(0);

        let _ = writeln!(out, "{} ({})", section.title, section.subtitle);
        for item in &section.items {
            let marker = if item.active { '✓' } else { ' ' };
            let _ = writeln!(
                out,
                "  {} {:<width$}  {}",
                marker,
                item.title,
                item.subtitle,
                width = width
            );
        }
        out.push('\n');
    }

    for state in empty_states(snapshot, filter) {
        let _ = writeln!(out, "{}: {}", state.title, state.description);
    }

    out
}

/// JSON listing: active theme, sections and empty states.
pub fn render_json(snapshot: &Snapshot, filter: Filter) -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct Listing<'a> {
        current_theme: Option<&'a str>,
        filter: Filter,
        sections: Vec<Section>,
        empty: Vec<EmptyState>,
    }

    let listing = Listing {
        current_theme: (!snapshot.current_theme.is_empty()).then_some(snapshot.current_theme.as_str()),
        filter,
        sections: sections(snapshot, filter),
        empty: empty_states(snapshot, filter),
    };

    serde_json::to_string_pretty(&listing)
}
