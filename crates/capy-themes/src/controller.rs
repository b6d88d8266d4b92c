//! Theme controller.
//!
//! Owns the discovered state and is the only entry point the presentation
//! layer needs: read the snapshot, refresh it, apply themes and wallpapers.

use crate::activation;
use crate::config::Config;
use crate::discovery;
use crate::error::{SoftFailure, ThemeError};
use crate::runner::{CommandRunner, SystemRunner};
use crate::types::{Background, Filter, Theme};
use log::{debug, info};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Broadcast channel capacity.
/// Lagging receivers skip old events; only the latest state matters.
pub const CHANNEL_CAPACITY: usize = 16;

/// Events emitted when the controller state changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThemeEvent {
    Refreshed,
    ThemeApplied(String),
    WallpaperApplied(String),
    DefaultBackgroundSet(String),
}

/// Everything one discovery pass found.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Snapshot {
    pub themes: Vec<Theme>,
    pub backgrounds: Vec<Background>,
    /// Empty when no theme is active.
    pub current_theme: String,
    pub loading: bool,
    pub soft_failures: Vec<SoftFailure>,
}

impl Snapshot {
    pub fn is_active(&self, theme: &Theme) -> bool {
        !self.current_theme.is_empty() && theme.name == self.current_theme
    }

    pub fn find_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    pub fn find_background(&self, name: &str) -> Option<&Background> {
        self.backgrounds.iter().find(|b| b.name == name)
    }

    /// Themes shown under `filter`.
    pub fn visible_themes(&self, filter: Filter) -> &[Theme] {
        if filter.shows_themes() { &self.themes } else { &[] }
    }

    /// Backgrounds shown under `filter`.
    pub fn visible_backgrounds(&self, filter: Filter) -> &[Background] {
        if filter.shows_wallpapers() {
            &self.backgrounds
        } else {
            &[]
        }
    }
}

/// The main theme controller.
pub struct ThemeController {
    config: Config,
    runner: Arc<dyn CommandRunner>,
    /// Replaced whole on every refresh.
    state: RwLock<Snapshot>,
    filter: RwLock<Filter>,
    event_tx: broadcast::Sender<ThemeEvent>,
}

impl ThemeController {
    /// Create a controller with an empty snapshot. Call `refresh` to populate it.
    pub fn new(config: Config, runner: Arc<dyn CommandRunner>) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);

        Self {
            config,
            runner,
            state: RwLock::new(Snapshot::default()),
            filter: RwLock::new(Filter::default()),
            event_tx: tx,
        }
    }

    /// Controller that launches real processes.
    pub fn with_system_runner(config: Config) -> Self {
        Self::new(config, Arc::new(SystemRunner))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn filter(&self) -> Filter {
        *self.filter.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_filter(&self, filter: Filter) {
        *self.filter.write().unwrap_or_else(PoisonError::into_inner) = filter;
    }

    /// Subscribe to controller changes.
    pub fn subscribe(&self) -> broadcast::Receiver<ThemeEvent> {
        self.event_tx.subscribe()
    }

    /// Rediscover themes, backgrounds and the active theme.
    ///
    /// The three scans run jointly; each contains its own failures, so the
    /// new snapshot always carries every partial result.
    pub async fn refresh(&self) -> Snapshot {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .loading = true;

        let backgrounds_dir = self.config.backgrounds_dir();
        let (themes, backgrounds, current) = tokio::join!(
            discovery::list_themes(&self.config.theme_roots),
            discovery::list_backgrounds(&backgrounds_dir),
            discovery::detect_current_theme(&self.config.current_theme_link),
        );

        let (themes, mut soft_failures) = themes.into_parts();
        let (backgrounds, bg_failures) = backgrounds.into_parts();
        let (current_theme, link_failures) = current.into_parts();
        soft_failures.extend(bg_failures);
        soft_failures.extend(link_failures);

        for failure in &soft_failures {
            debug!("Discovery: {}", failure);
        }

        let snapshot = Snapshot {
            themes,
            backgrounds,
            current_theme,
            loading: false,
            soft_failures,
        };

        *self.state.write().unwrap_or_else(PoisonError::into_inner) = snapshot.clone();
        let _ = self.event_tx.send(ThemeEvent::Refreshed);

        info!(
            "Discovered {} themes, {} backgrounds (active: {})",
            snapshot.themes.len(),
            snapshot.backgrounds.len(),
            if snapshot.current_theme.is_empty() {
                "none"
            } else {
                snapshot.current_theme.as_str()
            }
        );

        snapshot
    }

    /// Switch to the named theme and rediscover on success.
    /// On failure the snapshot is left exactly as it was.
    pub async fn apply_theme(&self, name: &str) -> Result<Snapshot, ThemeError> {
        let theme = self
            .snapshot()
            .find_theme(name)
            .cloned()
            .ok_or_else(|| ThemeError::UnknownTheme(name.to_string()))?;

        activation::apply_theme(self.runner.as_ref(), &self.config, &theme).await?;
        let _ = self.event_tx.send(ThemeEvent::ThemeApplied(theme.name.clone()));

        Ok(self.refresh().await)
    }

    /// Show the named background as wallpaper. Does not rediscover.
    pub async fn apply_background(&self, name: &str) -> Result<(), ThemeError> {
        let bg = self.find_background(name)?;

        let scan = activation::apply_background(self.runner.as_ref(), &self.config, &bg).await?;
        for failure in &scan.soft_failures {
            debug!("Wallpaper: {}", failure);
        }

        let _ = self.event_tx.send(ThemeEvent::WallpaperApplied(bg.name));
        Ok(())
    }

    /// Make the named background the current theme's default.
    pub async fn set_default_background(&self, name: &str) -> Result<(), ThemeError> {
        let bg = self.find_background(name)?;

        let scan = activation::set_default_background(&self.config, &bg).await?;
        for failure in &scan.soft_failures {
            debug!("Default background: {}", failure);
        }

        let _ = self
            .event_tx
            .send(ThemeEvent::DefaultBackgroundSet(bg.name));
        Ok(())
    }

    fn find_background(&self, name: &str) -> Result<Background, ThemeError> {
        let snapshot = self.snapshot();
        if snapshot.current_theme.is_empty() {
            return Err(ThemeError::NoActiveTheme);
        }
        snapshot
            .find_background(name)
            .cloned()
            .ok_or_else(|| ThemeError::UnknownBackground(name.to_string()))
    }
}
