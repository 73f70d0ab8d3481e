//! Per-body orbit state: a circle of mapped radius around a jittered centre,
//! advanced by a fixed angle every frame.
//!
//! Uses f64 throughout; conversion to f32 happens only at the wire format.

use std::f64::consts::TAU;

use chrono::{DateTime, Timelike, Utc};
use glam::DVec2;

use crate::core::rng::Rng;

/// Simulation frames per second the per-frame speeds are calibrated for.
pub const FRAMES_PER_SECOND: f64 = 60.0;
/// Simulated hours for one nominal revolution.
pub const NOMINAL_ORBIT_HOURS: f64 = 24.0;
/// Relative velocity (km/h) that doubles the nominal angular speed.
pub const VELOCITY_SCALE_KMH: f64 = 50_000.0;

/// Radians advanced per frame for a body moving at `velocity_km_h`.
///
/// A full turn takes 24 simulated hours, sped up by the real velocity, and one
/// simulated hour is 3600 frames.
pub fn angular_velocity(velocity_km_h: f64) -> f64 {
    let radians_per_hour = TAU / NOMINAL_ORBIT_HOURS;
    radians_per_hour * (1.0 + velocity_km_h / VELOCITY_SCALE_KMH) / (FRAMES_PER_SECOND * 60.0)
}

/// Phase for a UTC wall-clock time: midnight is 0, 06:00 is π/2.
pub fn angle_for_time_of_day(hour: u32, minute: u32) -> f64 {
    let hours = hour as f64 + minute as f64 / 60.0;
    hours / 24.0 * TAU
}

/// Initial phase from a close-approach epoch (Unix ms). Out-of-range epochs start at 0.
pub fn initial_angle(epoch_ms: i64) -> f64 {
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(t) => angle_for_time_of_day(t.hour(), t.minute()),
        None => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Mapped orbit radius in world pixels.
    pub radius_px: f64,
    /// Shift of the orbit centre away from Earth; fixed at creation.
    pub offset: DVec2,
    /// Current phase in [0, 2π).
    pub angle: f64,
    /// Radians per frame. Zero for stationary bodies.
    pub angular_velocity: f64,
}

impl OrbitState {
    pub fn new(radius_px: f64, offset: DVec2, angle: f64, angular_velocity: f64) -> Self {
        Self {
            radius_px,
            offset,
            angle: angle.rem_euclid(TAU),
            angular_velocity,
        }
    }

    /// Orbit with its centre jittered uniformly by up to `fraction·radius` on each axis,
    /// giving each body its own off-centre path.
    pub fn jittered(
        radius_px: f64,
        angle: f64,
        angular_velocity: f64,
        fraction: f64,
        rng: &mut Rng,
    ) -> Self {
        let span = radius_px * fraction;
        let offset = DVec2::new(rng.range(-span, span), rng.range(-span, span));
        Self::new(radius_px, offset, angle, angular_velocity)
    }

    /// Advance one frame. The phase wraps and is never reset.
    pub fn advance(&mut self) {
        self.angle = (self.angle + self.angular_velocity).rem_euclid(TAU);
    }

    /// World position around `centre` at an arbitrary phase.
    pub fn position_at(&self, centre: DVec2, angle: f64) -> DVec2 {
        centre + self.offset + self.radius_px * DVec2::new(angle.cos(), angle.sin())
    }

    /// Current world position around `centre`.
    pub fn position(&self, centre: DVec2) -> DVec2 {
        self.position_at(centre, self.angle)
    }

    /// Direction a trailing tail points, in degrees: opposite the motion
    /// toward where the body will be `frames_ahead` frames from now.
    pub fn trail_angle_deg(&self, centre: DVec2, frames_ahead: f64) -> f64 {
        let now = self.position(centre);
        let ahead_angle = (self.angle + self.angular_velocity * frames_ahead).rem_euclid(TAU);
        let d = self.position_at(centre, ahead_angle) - now;
        d.y.atan2(d.x).to_degrees() + 180.0
    }
}
