use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::layout::{Collision, LayoutParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TimeFormat {
    #[default]
    HoursMinutes,  // "3h 15m"
    Decimal,       // "3.25h"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ClockFormat {
    #[default]
    Hour24,      // "14:30"
    Hour12,      // "2:30pm"
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Width of the timeline container; one day spans the whole width
    pub container_width_px: f64,
    /// Container padding before 00:00
    pub left_offset_px: f64,
    /// Narrowest block drawn, so short tasks stay readable
    pub min_width_px: f64,
    pub row_height_px: f64,
    pub base_offset_px: f64,
    pub collision: Collision,
    pub clock_format: ClockFormat,
    pub time_format: TimeFormat,
    /// Task cache; defaults to `tasks.json` in the data directory
    pub tasks_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container_width_px: 1440.0,
            left_offset_px: 0.0,
            min_width_px: 60.0,
            row_height_px: 48.0,
            base_offset_px: 0.0,
            collision: Collision::Time,
            clock_format: ClockFormat::Hour24,
            time_format: TimeFormat::HoursMinutes,
            tasks_file: None,
        }
    }
}

impl Config {
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .context("Failed to read config file")?;
            serde_json::from_str(&contents)
                .context("Failed to parse config file")
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(config_path, contents)?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.json"))
    }

    /// Path of a file in the data directory (task cache, priority event)
    pub fn data_path(name: &str) -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join(name))
    }

    pub fn tasks_path(&self) -> Result<PathBuf> {
        match &self.tasks_file {
            Some(path) => Ok(path.clone()),
            None => Self::data_path("tasks.json"),
        }
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "dayline", "dayline")
            .context("Could not determine config directory")
    }

    /// One day spans the container, so the scale is width / 24
    pub fn pixels_per_hour(&self) -> f64 {
        self.container_width_px / 24.0
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams::new(self.pixels_per_hour(), self.left_offset_px, self.min_width_px)
            .with_collision(self.collision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale_is_one_pixel_per_minute() {
        let config = Config::default();
        assert_eq!(config.pixels_per_hour(), 60.0);
        let params = config.layout_params();
        assert_eq!(params.min_width_px, 60.0);
        assert_eq!(params.collision, Collision::Time);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"container_width_px": 240.0, "collision": "pixels"}"#).unwrap();
        assert_eq!(config.pixels_per_hour(), 10.0);
        assert_eq!(config.collision, Collision::Pixels);
        assert_eq!(config.min_width_px, 60.0);
        assert_eq!(config.clock_format, ClockFormat::Hour24);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let config = Config {
            container_width_px: 960.0,
            clock_format: ClockFormat::Hour12,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn explicit_tasks_file_wins() {
        let config = Config {
            tasks_file: Some(PathBuf::from("/tmp/tasks.json")),
            ..Config::default()
        };
        assert_eq!(config.tasks_path().unwrap(), PathBuf::from("/tmp/tasks.json"));
    }
}
