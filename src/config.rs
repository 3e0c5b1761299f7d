use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfiguration {
    pub general: GeneralConfig,
    pub columns: ColumnWidths,
    pub alerts: AlertThresholds,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub theme: String,
    pub refresh_interval_ms: u64,
    pub max_processes: usize,
    pub gpu_history_length: usize,
    pub show_tooltips: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            theme: "lich-king".to_string(),
            refresh_interval_ms: 1000,
            max_processes: 200,
            gpu_history_length: 100,
            show_tooltips: true,
        }
    }
}

/// Starting widths for the two resizable columns, as fractions of the
/// terminal width in (0, 1). The CPU column takes the remainder.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnWidths {
    pub gpu: f64,
    pub process: f64,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        ColumnWidths {
            gpu: 0.30,
            process: 0.40,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub cpu_usage_percent: f64,
    pub cpu_temp_celsius: f64,
    pub gpu_usage_percent: f64,
    pub gpu_temp_celsius: f64,
    pub memory_usage_percent: f64,
    pub disk_usage_percent: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        AlertThresholds {
            cpu_usage_percent: 90.0,
            cpu_temp_celsius: 85.0,
            gpu_usage_percent: 98.0,
            gpu_temp_celsius: 85.0,
            memory_usage_percent: 95.0,
            disk_usage_percent: 90.0,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("frosttop").join("config.toml"))
}

/// Loads the profile from the default location. A missing file yields the
/// defaults and a best-effort write of them back to disk (failure ignored).
pub fn load_config() -> ProfileConfiguration {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        Some(path) => {
            let config = ProfileConfiguration::default();
            if let Err(err) = save_config(&path, &config) {
                warn!(path = %path.display(), %err, "could not write default config");
            }
            config
        }
        None => ProfileConfiguration::default(),
    }
}

/// Loads the profile from `path`; unreadable or corrupt files fall back to
/// the defaults without touching the file on disk.
pub fn load_config_from_path(path: &Path) -> ProfileConfiguration {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
            warn!(path = %path.display(), %err, "corrupt config, using defaults");
            ProfileConfiguration::default()
        }),
        Err(_) => ProfileConfiguration::default(),
    }
}

pub fn save_config(path: &Path, config: &ProfileConfiguration) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    std::fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = ProfileConfiguration::default();
        assert_eq!(config.general.theme, "lich-king");
        assert_eq!(config.general.refresh_interval_ms, 1000);
        assert_eq!(config.general.max_processes, 200);
        assert_eq!(config.general.gpu_history_length, 100);
        assert!(config.general.show_tooltips);
        assert!((config.columns.gpu - 0.30).abs() < f64::EPSILON);
        assert!((config.columns.process - 0.40).abs() < f64::EPSILON);
        assert!((config.alerts.gpu_usage_percent - 98.0).abs() < f64::EPSILON);
        assert!((config.alerts.memory_usage_percent - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
refresh_interval_ms = 500
"#;
        let config: ProfileConfiguration = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_interval_ms, 500);
        // Other fields should be defaults
        assert_eq!(config.general.theme, "lich-king");
        assert!((config.columns.gpu - 0.30).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
theme = "dark"
refresh_interval_ms = 2000
max_processes = 50
show_tooltips = false

[columns]
gpu = 0.25
process = 0.45

[alerts]
memory_usage_percent = 80.0
"#;
        let config: ProfileConfiguration = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.theme, "dark");
        assert_eq!(config.general.refresh_interval_ms, 2000);
        assert_eq!(config.general.max_processes, 50);
        assert!(!config.general.show_tooltips);
        assert!((config.columns.process - 0.45).abs() < f64::EPSILON);
        assert!((config.alerts.memory_usage_percent - 80.0).abs() < f64::EPSILON);
        // Untouched thresholds keep their defaults
        assert!((config.alerts.disk_usage_percent - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.refresh_interval_ms, 1000);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("frosttop_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.refresh_interval_ms, 1000);
        let _ = std::fs::remove_file(&temp);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let temp = std::env::temp_dir().join("frosttop_test_roundtrip.toml");
        let mut config = ProfileConfiguration::default();
        config.general.refresh_interval_ms = 1500;
        config.alerts.disk_usage_percent = 75.0;
        save_config(&temp, &config).unwrap();

        let loaded = load_config_from_path(&temp);
        assert_eq!(loaded.general.refresh_interval_ms, 1500);
        assert!((loaded.alerts.disk_usage_percent - 75.0).abs() < f64::EPSILON);
        let _ = std::fs::remove_file(&temp);
    }
}
