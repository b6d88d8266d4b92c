//! Switching themes and wallpapers.

use crate::config::Config;
use crate::error::{Scan, SoftFailure, ThemeError};
use crate::runner::{CommandRunner, command_line};
use crate::types::{Background, Theme};
use log::{info, warn};
use std::ffi::OsString;
use std::io::ErrorKind;

/// Run `theme <name>` and wait for it. A non-zero exit is a hard failure.
pub async fn apply_theme(
    runner: &dyn CommandRunner,
    config: &Config,
    theme: &Theme,
) -> Result<(), ThemeError> {
    // The directory name as stored on disk; `name` is only its display form.
    let dir_name = theme
        .path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(&theme.name));
    let args = vec![dir_name];
    let output = runner.run(&config.theme_command, &args).await?;

    if !output.success {
        return Err(ThemeError::CommandFailed {
            command: command_line(&config.theme_command, &args),
            status: output.status,
            stderr: output.stderr,
        });
    }

    info!("Theme switched to {}", theme.name);
    Ok(())
}

/// Replace the running wallpaper renderer with one showing `bg`.
///
/// Killing the previous renderer is best effort; a non-zero `pkill` exit
/// just means nothing was running.
pub async fn apply_background(
    runner: &dyn CommandRunner,
    config: &Config,
    bg: &Background,
) -> Result<Scan<()>, ThemeError> {
    let mut scan = Scan::new(());

    let kill_args = vec![OsString::from(&config.wallpaper_command)];
    if let Err(e) = runner.run(&config.kill_command, &kill_args).await {
        warn!("Could not stop previous wallpaper: {}", e);
        scan.push_failure(SoftFailure::CleanupFailed {
            action: command_line(&config.kill_command, &kill_args),
            reason: e.to_string(),
        });
    }

    let args = vec![
        OsString::from("-i"),
        bg.path.clone().into_os_string(),
        OsString::from("-m"),
        OsString::from("fill"),
    ];
    runner.spawn_detached(&config.wallpaper_command, &args).await?;

    info!("Wallpaper set to {}", bg.path.display());
    Ok(scan)
}

/// Point the current theme's `background` link at `bg`.
pub async fn set_default_background(
    config: &Config,
    bg: &Background,
) -> Result<Scan<()>, ThemeError> {
    let mut scan = Scan::new(());
    let link = config.default_background_link();

    match tokio::fs::remove_file(&link).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            warn!("Could not remove {}: {}", link.display(), e);
            scan.push_failure(SoftFailure::CleanupFailed {
                action: format!("unlink {}", link.display()),
                reason: e.to_string(),
            });
        }
    }

    tokio::fs::symlink(&bg.path, &link).await?;

    info!("Default background set to {}", bg.name);
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::{Call, Launch, RecordingRunner};
    use crate::types::ThemeSource;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn config_at(link: &Path) -> Config {
        Config {
            theme_roots: Vec::new(),
            current_theme_link: link.to_path_buf(),
            ..Config::default()
        }
    }

    fn theme(name: &str) -> Theme {
        Theme {
            name: name.to_string(),
            path: PathBuf::from("/themes").join(name),
            preview_image: None,
            source: ThemeSource::System,
        }
    }

    fn background(dir: &Path, name: &str) -> Background {
        Background {
            name: name.to_string(),
            path: dir.join(name),
            ext: "PNG".to_string(),
        }
    }

    #[tokio::test]
    async fn test_apply_theme_passes_name_as_single_argument() {
        let runner = RecordingRunner::default();
        let config = config_at(Path::new("/nonexistent"));

        apply_theme(&runner, &config, &theme("rose pine")).await.unwrap();

        assert_eq!(
            runner.calls(),
            vec![Call {
                program: "theme".into(),
                args: vec!["rose pine".into()],
                launch: Launch::Awaited,
            }]
        );
    }

    #[tokio::test]
    async fn test_apply_theme_failure_surfaces_stderr() {
        let runner = RecordingRunner::default().fail("theme", "no theme named nord");
        let config = config_at(Path::new("/nonexistent"));

        let err = apply_theme(&runner, &config, &theme("nord")).await.unwrap_err();
        match &err {
            ThemeError::CommandFailed { command, stderr, .. } => {
                assert_eq!(command, "theme nord");
                assert_eq!(stderr, "no theme named nord");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(err.to_string().contains("no theme named nord"));
    }

    #[tokio::test]
    async fn test_apply_background_kills_then_detaches() {
        let runner = RecordingRunner::default().fail("pkill", "");
        let config = config_at(Path::new("/nonexistent"));
        let bg = background(Path::new("/walls"), "a.png");

        let scan = apply_background(&runner, &config, &bg).await.unwrap();

        assert!(scan.soft_failures.is_empty());
        assert_eq!(
            runner.calls(),
            vec![
                Call {
                    program: "pkill".into(),
                    args: vec!["swaybg".into()],
                    launch: Launch::Awaited,
                },
                Call {
                    program: "swaybg".into(),
                    args: vec!["-i".into(), "/walls/a.png".into(), "-m".into(), "fill".into()],
                    launch: Launch::Detached,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_apply_background_survives_missing_pkill() {
        let runner = RecordingRunner::default().missing("pkill");
        let config = config_at(Path::new("/nonexistent"));
        let bg = background(Path::new("/walls"), "a.png");

        let scan = apply_background(&runner, &config, &bg).await.unwrap();
        assert!(matches!(
            &scan.soft_failures[..],
            [SoftFailure::CleanupFailed { .. }]
        ));
        assert_eq!(runner.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_apply_background_missing_renderer_is_error() {
        let runner = RecordingRunner::default().missing("swaybg");
        let config = config_at(Path::new("/nonexistent"));
        let bg = background(Path::new("/walls"), "a.png");

        let result = apply_background(&runner, &config, &bg).await;
        assert!(matches!(result, Err(ThemeError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_non_utf8_names_reach_commands_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let runner = RecordingRunner::default();
        let config = config_at(Path::new("/nonexistent"));
        let raw_dir = OsStr::from_bytes(b"caf\xe9");
        let raw_file = OsStr::from_bytes(b"caf\xe9.png");

        let theme = Theme {
            name: raw_dir.to_string_lossy().to_string(),
            path: PathBuf::from("/themes").join(raw_dir),
            preview_image: None,
            source: ThemeSource::System,
        };
        let bg = Background {
            name: raw_file.to_string_lossy().to_string(),
            path: PathBuf::from("/walls").join(raw_file),
            ext: "PNG".to_string(),
        };

        apply_theme(&runner, &config, &theme).await.unwrap();
        apply_background(&runner, &config, &bg).await.unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].args, vec![raw_dir.to_os_string()]);
        assert_eq!(calls[2].args[1], PathBuf::from("/walls").join(raw_file).into_os_string());
    }

    #[tokio::test]
    async fn test_set_default_without_prior_link() {
        let tmp = TempDir::new().unwrap();
        let theme_dir = tmp.path().join("nord");
        let walls = theme_dir.join("backgrounds");
        fs::create_dir_all(&walls).unwrap();
        fs::write(walls.join("a.png"), b"").unwrap();
        let config = config_at(&theme_dir);

        let scan = set_default_background(&config, &background(&walls, "a.png"))
            .await
            .unwrap();

        assert!(scan.soft_failures.is_empty());
        assert_eq!(
            fs::read_link(theme_dir.join("background")).unwrap(),
            walls.join("a.png")
        );
    }

    #[tokio::test]
    async fn test_set_default_replaces_existing_link() {
        let tmp = TempDir::new().unwrap();
        let theme_dir = tmp.path().join("nord");
        let walls = theme_dir.join("backgrounds");
        fs::create_dir_all(&walls).unwrap();
        std::os::unix::fs::symlink(walls.join("a.png"), theme_dir.join("background")).unwrap();
        let config = config_at(&theme_dir);

        set_default_background(&config, &background(&walls, "b.jpg"))
            .await
            .unwrap();

        assert_eq!(
            fs::read_link(theme_dir.join("background")).unwrap(),
            walls.join("b.jpg")
        );
    }

    #[tokio::test]
    async fn test_set_default_without_theme_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let config = config_at(&tmp.path().join("missing"));

        let result = set_default_background(&config, &background(tmp.path(), "a.png")).await;
        assert!(matches!(result, Err(ThemeError::Io(_))));
    }
}
