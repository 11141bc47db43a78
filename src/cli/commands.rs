//! Subcommand handlers for list-cameras and config actions.

use std::path::Path;

use super::args::ConfigAction;
use crate::camera;
use crate::config::{default_path, Config};
use crate::error::AppError;

/// List available cameras and print them to stdout.
pub fn list_cameras() -> Result<(), AppError> {
    let devices = camera::list_devices()?;
    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure your camera is connected and permissions are granted.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use --camera <index> to select a camera.");
    }
    Ok(())
}

/// Handle config subcommand actions.
///
/// `path` is the `--config` override; without it the default location is used.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), AppError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&config_path))?;
            println!("{}", config.to_toml()?);
            if config_path.exists() {
                println!("# Config file: {} (exists)", config_path.display());
            } else {
                println!("# Config file: {} (not found, showing defaults)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                return Err(AppError::ConfigExists(config_path));
            }
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let body = format!(
                "# finger-lightning configuration\n\n{}",
                Config::default().to_toml()?
            );
            std::fs::write(&config_path, body)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        handle_config_action(ConfigAction::Init, Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[window]\ntitle = \"mine\"\n").unwrap();

        let err = handle_config_action(ConfigAction::Init, Some(&path)).unwrap_err();
        assert!(matches!(err, AppError::ConfigExists(_)));
        let kept = std::fs::read_to_string(&path).unwrap();
        assert!(kept.contains("mine"));
    }

    #[test]
    fn test_show_with_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(handle_config_action(ConfigAction::Show, Some(&path)).is_ok());
    }
}
