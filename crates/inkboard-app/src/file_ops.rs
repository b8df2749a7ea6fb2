//! Reading inputs from and writing exports to the filesystem.

use crate::error::AppError;
use crate::script::{ScriptStep, parse_script};
use chrono::NaiveDate;
use inkboard_core::{CanvasConfig, ExportFormat};
use std::path::{Path, PathBuf};

/// Load a canvas configuration file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<CanvasConfig, AppError> {
    let json = std::fs::read_to_string(path)?;
    let config = CanvasConfig::from_json(&json).map_err(|source| AppError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loaded config from: {:?}", path);
    Ok(config)
}

/// Load the configuration if a path was given, otherwise the defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<CanvasConfig, AppError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(CanvasConfig::default()),
    }
}

pub fn read_scene(path: &Path) -> Result<String, AppError> {
    Ok(std::fs::read_to_string(path)?)
}

pub fn read_script(path: &Path) -> Result<Vec<ScriptStep>, AppError> {
    let json = std::fs::read_to_string(path)?;
    Ok(parse_script(&json)?)
}

/// `inkboard-drawing-YYYY-MM-DD.<ext>`
pub fn dated_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("inkboard-drawing-{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Dated file name for today (local time), in the working directory.
pub fn default_export_path(format: ExportFormat) -> PathBuf {
    PathBuf::from(dated_file_name(format, chrono::Local::now().date_naive()))
}

pub fn write_export(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    std::fs::write(path, bytes)?;
    log::info!("Exported {} bytes to: {:?}", bytes.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkboard_core::BackgroundPattern;
    use std::io::Write;

    #[test]
    fn test_dated_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            dated_file_name(ExportFormat::Png, date),
            "inkboard-drawing-2024-03-07.png"
        );
        assert_eq!(
            dated_file_name(ExportFormat::Svg, date),
            "inkboard-drawing-2024-03-07.svg"
        );
    }

    #[test]
    fn test_default_export_path_has_extension() {
        let path = default_export_path(ExportFormat::Json);
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"pattern": "dots", "snapToGrid": true}}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.pattern, BackgroundPattern::Dots);
        assert!(config.snap_to_grid);
        assert_eq!(config.stroke_width, CanvasConfig::default().stroke_width);
    }

    #[test]
    fn test_invalid_config_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"pattern": "stripes"}}"#).unwrap();

        match load_config(file.path()) {
            Err(AppError::Config { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(load_config(&missing), Err(AppError::Io(_))));
        assert!(matches!(
            load_config_or_default(None),
            Ok(config) if config == CanvasConfig::default()
        ));
    }

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        write_export(&path, b"<svg/>").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"<svg/>");
    }
}
