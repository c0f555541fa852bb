//! Game settings
//!
//! Loaded from an optional JSON file; anything missing falls back to the
//! built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::state::Lanes;

/// Canvas, lane and front-end configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical canvas size in world units
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Lane x positions (5, strictly increasing)
    pub lanes: Vec<f32>,
    /// Clamp the car between the outer lanes instead of the canvas margins
    pub lane_clamp: bool,
    /// Fixed RNG seed; a random one is picked when absent
    pub seed: Option<u64>,
    /// Ticks per second for the terminal front-end
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            lanes: DEFAULT_LANES.to_vec(),
            lane_clamp: false,
            seed: None,
            fps: 60,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, then repair invalid values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {e}; using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Validated lane set
    pub fn lanes(&self) -> Lanes {
        let mut xs = DEFAULT_LANES;
        if Lanes::is_valid(&self.lanes) {
            xs.copy_from_slice(&self.lanes);
        }
        Lanes::new(xs)
    }

    fn sanitize(&mut self) {
        if !Lanes::is_valid(&self.lanes) {
            log::warn!(
                "Lane positions {:?} must be {LANE_COUNT} strictly increasing values; using defaults",
                self.lanes
            );
            self.lanes = DEFAULT_LANES.to_vec();
        }
        if self.canvas_width <= 2.0 * PLAYER_MARGIN_X || self.canvas_height <= 2.0 * PLAYER_MARGIN_Y {
            log::warn!(
                "Canvas {}x{} too small; using defaults",
                self.canvas_width,
                self.canvas_height
            );
            self.canvas_width = CANVAS_WIDTH;
            self.canvas_height = CANVAS_HEIGHT;
        }
        self.fps = self.fps.clamp(1, 240);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "lane_clamp": true }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(settings.lane_clamp);
        assert_eq!(settings.canvas_width, CANVAS_WIDTH);
        assert_eq!(settings.lanes, DEFAULT_LANES.to_vec());
    }

    #[test]
    fn test_bad_lanes_replaced() {
        let settings = Settings::from_json(r#"{ "lanes": [1, 2, 3] }"#).unwrap();
        assert_eq!(settings.lanes, DEFAULT_LANES.to_vec());
        assert_eq!(settings.lanes().as_slice(), &DEFAULT_LANES);
    }

    #[test]
    fn test_custom_lanes() {
        let settings = Settings::from_json(r#"{ "lanes": [50, 100, 150, 200, 250] }"#).unwrap();
        assert_eq!(settings.lanes().x(4), 250.0);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ nope").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_round_trip_json() {
        let settings = Settings {
            seed: Some(99),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
