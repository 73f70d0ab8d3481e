//! Presentation sizes and label text derived from body records.

use crate::api::types::CelestialBody;

pub const ASTEROID_MIN_DIAMETER_PX: f64 = 2.0;
pub const ASTEROID_MAX_DIAMETER_PX: f64 = 25.0;
pub const PLANET_MIN_DIAMETER_PX: f64 = 10.0;
pub const PLANET_MAX_DIAMETER_PX: f64 = 30.0;

/// Shortest tail, drawn for a body at rest.
pub const TAIL_BASE_PX: f64 = 30.0;
/// Extra tail length reached at `TAIL_FULL_SPEED_KMS` and above.
pub const TAIL_EXTRA_PX: f64 = 120.0;
pub const TAIL_FULL_SPEED_KMS: f64 = 50.0;
/// Frames of look-ahead used to orient the tail.
pub const TAIL_LOOKAHEAD_FRAMES: f64 = 3.0;

/// Half the smaller estimated diameter in meters, clamped to 2–25 px.
pub fn asteroid_diameter_px(body: &CelestialBody) -> f64 {
    (body.diameter_m.min / 2.0).clamp(ASTEROID_MIN_DIAMETER_PX, ASTEROID_MAX_DIAMETER_PX)
}

/// One pixel per 500 km of real diameter, clamped to 10–30 px.
pub fn planet_diameter_px(body: &CelestialBody) -> f64 {
    let diameter_km = body.diameter_m.min / 1000.0;
    (diameter_km / 500.0).clamp(PLANET_MIN_DIAMETER_PX, PLANET_MAX_DIAMETER_PX)
}

/// Faster bodies get longer tails: 30 px at rest up to 150 px.
pub fn tail_length_px(velocity_km_s: f64) -> f64 {
    let factor = (velocity_km_s / TAIL_FULL_SPEED_KMS).clamp(0.0, 1.0);
    TAIL_BASE_PX + factor * TAIL_EXTRA_PX
}

pub fn asteroid_tooltip(body: &CelestialBody) -> String {
    format!(
        "{}\nVelocity: {:.2} km/s\nDistance: {:.2}M km",
        body.name,
        body.velocity_km_s,
        body.distance_km / 1_000_000.0
    )
}

pub fn planet_tooltip(body: &CelestialBody) -> String {
    format!("{}\nDistance: {:.2}M km", body.name, body.distance_km / 1_000_000.0)
}
