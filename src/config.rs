//! Plot Configuration Module
//! Per-render options and figure styling, loadable from JSON.

use crate::charts::{AxisRange, SeriesColor};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Axis limits for one panel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelLimits {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl PanelLimits {
    pub fn new(x: impl Into<AxisRange>, y: impl Into<AxisRange>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// Options of a single time-series / phase-space render.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    /// Title of the time-series panel.
    pub title: String,
    pub time_panel: PanelLimits,
    pub phase_panel: PanelLimits,
}

impl PlotOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_time_limits(mut self, limits: PanelLimits) -> Self {
        self.time_panel = limits;
        self
    }

    pub fn with_phase_limits(mut self, limits: PanelLimits) -> Self {
        self.phase_panel = limits;
        self
    }
}

/// Canvas size, fonts and stroke sizes of a rendered figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureStyle {
    pub width: u32,
    pub height: u32,
    pub background: SeriesColor,
    pub font_family: String,
    pub title_font_size: u32,
    pub label_font_size: u32,
    pub line_width: u32,
    pub marker_radius: u32,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 480,
            background: SeriesColor::WHITE,
            font_family: "sans-serif".to_string(),
            title_font_size: 20,
            label_font_size: 14,
            line_width: 2,
            marker_radius: 5,
        }
    }
}

/// Everything a config file may carry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub options: PlotOptions,
    pub style: FigureStyle,
}

impl PlotConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load a [`PlotConfig`] from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<PlotConfig, ConfigError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config = PlotConfig::from_json(&contents)?;
    log::debug!("Loaded plot config from {}", path.as_ref().display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = PlotConfig::from_json("{}").unwrap();
        assert_eq!(config, PlotConfig::default());
        assert_eq!(config.style.width, 1200);
        assert!(config.options.title.is_empty());
        assert!(config.options.time_panel.x.is_auto());
    }

    #[test]
    fn ranges_parse_from_pairs_and_null() {
        let config = PlotConfig::from_json(
            r#"{
                "options": {
                    "title": "Damped oscillator",
                    "time_panel": { "x": [0.0, 10.0], "y": null },
                    "phase_panel": { "y": [-2, 2] }
                }
            }"#,
        )
        .unwrap();

        let options = config.options;
        assert_eq!(options.title, "Damped oscillator");
        assert_eq!(options.time_panel.x, AxisRange::fixed(0.0, 10.0));
        assert_eq!(options.time_panel.y, AxisRange::Auto);
        assert_eq!(options.phase_panel.x, AxisRange::Auto);
        assert_eq!(options.phase_panel.y, AxisRange::fixed(-2.0, 2.0));
    }

    #[test]
    fn style_colors_are_hex() {
        let config =
            PlotConfig::from_json(r##"{ "style": { "background": "#102030", "width": 640 } }"##)
                .unwrap();
        assert_eq!(config.style.background, SeriesColor::rgb(0x10, 0x20, 0x30));
        assert_eq!(config.style.width, 640);
        assert_eq!(config.style.height, 480);
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = PlotConfig::from_json(r#"{ "style": { "background": "blue" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn serialized_config_reads_back() {
        let config = PlotConfig {
            options: PlotOptions::default()
                .with_title("run 7")
                .with_phase_limits(PanelLimits::new(AxisRange::fixed(-1.0, 1.0), AxisRange::Auto)),
            style: FigureStyle::default(),
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"#ffffff\""));
        assert_eq!(PlotConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config("/nonexistent/phase_plot.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
