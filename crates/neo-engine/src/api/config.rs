use serde::{Deserialize, Serialize};

use crate::core::distance::DistanceScale;
use crate::renderer::camera::Viewport;

/// Ship handling. Speeds are in world pixels per frame, rotation in degrees per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    pub max_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    pub rotation_speed: f64,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            acceleration: 0.2,
            deceleration: 0.1,
            rotation_speed: 5.0,
        }
    }
}

/// Configuration for the simulation, provided by the host page.
/// Every field has a default, so a partial JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed timestep in seconds (default: 1/60). Orbital speeds assume this rate.
    pub fixed_dt: f32,
    /// Most simulation frames run for one host callback (default: 10).
    pub max_steps_per_tick: u32,
    /// Viewport width in pixels.
    pub viewport_width: f64,
    /// Viewport height in pixels.
    pub viewport_height: f64,
    /// Distances at or below this map to the innermost radius.
    pub min_distance_km: f64,
    /// Bodies farther than this are not placed.
    pub max_distance_km: f64,
    /// Multiplier applied to every mapped radius.
    pub zoom_factor: f64,
    /// Innermost orbit radius before zoom.
    pub min_radius_px: f64,
    /// Outermost orbit radius as a fraction of the smaller viewport side.
    pub max_radius_fraction: f64,
    /// Orbit centre jitter as a fraction of the orbit radius.
    pub orbit_offset_fraction: f64,
    /// Margin around the viewport inside which bodies stay visible.
    pub cull_buffer_px: f64,
    /// Rendered Earth diameter.
    pub earth_size_px: f64,
    /// Distance of the Earth arrow from screen centre.
    pub indicator_distance_px: f64,
    /// Ship-to-Earth distance below which the arrow is hidden.
    pub indicator_threshold_px: f64,
    /// Ship-to-Earth distance at which the arrow reaches full opacity.
    pub indicator_fade_px: f64,
    /// Seconds between asteroid feed polls.
    pub poll_interval_secs: f32,
    /// Maximum number of reference orbit rings.
    pub max_orbit_rings: usize,
    /// Maximum bodies written to the frame buffer.
    pub max_bodies: usize,
    /// Seed for orbit offsets and planet phases.
    pub seed: u64,
    pub ship: ShipTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_tick: 10,
            viewport_width: 1280.0,
            viewport_height: 800.0,
            min_distance_km: 15_000.0,
            max_distance_km: 100_000_000.0,
            zoom_factor: 5.0,
            min_radius_px: 40.0,
            max_radius_fraction: 0.4,
            orbit_offset_fraction: 0.2,
            cull_buffer_px: 100.0,
            earth_size_px: 120.0,
            indicator_distance_px: 100.0,
            indicator_threshold_px: 150.0,
            indicator_fade_px: 1000.0,
            poll_interval_secs: 300.0,
            max_orbit_rings: 15,
            max_bodies: 512,
            seed: 42,
            ship: ShipTuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    pub fn distance_scale(&self) -> DistanceScale {
        DistanceScale {
            min_km: self.min_distance_km,
            max_km: self.max_distance_km,
            min_radius_px: self.min_radius_px,
            max_radius_fraction: self.max_radius_fraction,
            zoom: self.zoom_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "zoom_factor": 3.0, "ship": { "max_speed": 8.0 } }"#).unwrap();
        assert_eq!(config.zoom_factor, 3.0);
        assert_eq!(config.ship.max_speed, 8.0);
        assert_eq!(config.ship.acceleration, 0.2);
        assert_eq!(config.min_distance_km, 15_000.0);
        assert_eq!(config.cull_buffer_px, 100.0);
    }

    #[test]
    fn empty_object_is_default() {
        let config = SimConfig::from_json("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(SimConfig::from_json(r#"{ "seed": "abc" }"#).is_err());
    }
}
