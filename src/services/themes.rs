//! Theme controller service shim.
//!
//! Wraps the capy-themes crate: loads the user config, builds a controller
//! that launches real processes, and logs its change events.

use capy_themes::{Config, ThemeController, ThemeError, ThemeEvent};
use log::{debug, info};
use std::path::Path;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Running controller plus the task logging its events.
pub struct ThemeService {
    pub controller: ThemeController,
    logger: JoinHandle<usize>,
}

impl ThemeService {
    /// Close the event channel and wait until every queued event is logged.
    /// Returns how many events the logger handled.
    pub async fn shutdown(self) -> usize {
        drop(self.controller);
        match self.logger.await {
            Ok(handled) => handled,
            Err(e) => {
                debug!("Event logger ended abnormally: {}", e);
                0
            }
        }
    }
}

/// Build the controller from `config_path` (or the default config location).
pub fn start(config_path: Option<&Path>) -> Result<ThemeService, ThemeError> {
    let config = Config::load(config_path)?;
    info!(
        "Using {} theme roots, current theme link {}",
        config.theme_roots.len(),
        config.current_theme_link.display()
    );

    let controller = ThemeController::with_system_runner(config);
    let logger = spawn_event_logger(&controller);
    Ok(ThemeService { controller, logger })
}

fn spawn_event_logger(controller: &ThemeController) -> JoinHandle<usize> {
    let mut rx = controller.subscribe();

    tokio::spawn(async move {
        let mut handled = 0;
        loop {
            match rx.recv().await {
                Ok(ThemeEvent::Refreshed) => debug!("Theme state refreshed"),
                Ok(event) => info!("{:?}", event),
                Err(RecvError::Lagged(n)) => {
                    debug!("Event logger skipped {} events", n);
                    continue;
                }
                Err(RecvError::Closed) => break,
            }
            handled += 1;
        }
        handled
    })
}
