//! Theme and background discovery.
//!
//! Directory scans are synchronous walkdir passes, each run on the blocking
//! pool so the three discovery operations can be joined concurrently.
//! Entries are classified by their own type: a symlink inside a root is
//! neither a theme nor a background, so a linked theme is credited to the
//! root holding the real directory.

use crate::config::PREVIEW_FILE;
use crate::error::{Scan, SoftFailure};
use crate::types::{Background, Theme, ThemeSource};
use log::{debug, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recognized wallpaper extensions (compared lowercase).
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// Scan all theme roots in priority order.
pub async fn list_themes(roots: &[PathBuf]) -> Scan<Vec<Theme>> {
    let roots = roots.to_vec();
    blocking(move || scan_themes(&roots)).await
}

/// Scan the backgrounds directory of the current theme.
pub async fn list_backgrounds(dir: &Path) -> Scan<Vec<Background>> {
    let dir = dir.to_path_buf();
    blocking(move || scan_backgrounds(&dir)).await
}

/// Name of the active theme, empty if the link does not resolve.
pub async fn detect_current_theme(link: &Path) -> Scan<String> {
    let link = link.to_path_buf();
    blocking(move || resolve_current_theme(&link)).await
}

async fn blocking<T, F>(scan: F) -> Scan<T>
where
    T: Default + Send + 'static,
    F: FnOnce() -> Scan<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(scan).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Discovery task aborted: {}", e);
            Scan::default()
        }
    }
}

/// Collect theme directories. The first root containing a name wins.
pub fn scan_themes(roots: &[PathBuf]) -> Scan<Vec<Theme>> {
    let mut scan = Scan::new(Vec::new());
    let mut seen = HashSet::new();

    for root in roots {
        let source = ThemeSource::classify(root);
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) if e.depth() == 0 => {
                    debug!("Skipping theme root {}: {}", root.display(), e);
                    scan.push_failure(SoftFailure::RootUnreadable {
                        root: root.clone(),
                        reason: e.to_string(),
                    });
                    break;
                }
                Err(e) => {
                    debug!("Skipping entry in {}: {}", root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if !seen.insert(name.clone()) {
                continue;
            }

            let path = entry.path().to_path_buf();
            let preview = path.join(PREVIEW_FILE);

            scan.value.push(Theme {
                name,
                preview_image: preview.exists().then_some(preview),
                path,
                source,
            });
        }
    }

    scan.value.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Found {} themes", scan.value.len());
    scan
}

/// Collect image files from `dir`. An unreadable directory yields nothing.
pub fn scan_backgrounds(dir: &Path) -> Scan<Vec<Background>> {
    let mut scan = Scan::new(Vec::new());

    let walker = WalkDir::new(dir).min_depth(1).max_depth(1);

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                debug!("No backgrounds at {}: {}", dir.display(), e);
                scan.push_failure(SoftFailure::BackgroundsUnreadable {
                    dir: dir.to_path_buf(),
                    reason: e.to_string(),
                });
                scan.value.clear();
                return scan;
            }
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(ext) = image_extension(entry.path()) else {
            continue;
        };

        scan.value.push(Background {
            name: entry.file_name().to_string_lossy().to_string(),
            path: dir.join(entry.file_name()),
            ext: ext.to_uppercase(),
        });
    }

    scan.value.sort_by(|a, b| a.name.cmp(&b.name));
    scan
}

/// Lowercase extension if it is a recognized image type.
fn image_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Basename of the link's fully resolved target.
pub fn resolve_current_theme(link: &Path) -> Scan<String> {
    let mut scan = Scan::new(String::new());

    match std::fs::canonicalize(link) {
        Ok(target) => {
            if let Some(name) = target.file_name() {
                scan.value = name.to_string_lossy().to_string();
            }
        }
        Err(e) => {
            debug!("Current theme link {} unresolved: {}", link.display(), e);
            scan.push_failure(SoftFailure::LinkUnresolved {
                link: link.to_path_buf(),
                reason: e.to_string(),
            });
        }
    }

    scan
}
