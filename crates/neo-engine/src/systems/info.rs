//! Distance-from-Earth readout for the info panel.
//!
//! The figure is an approximation: it borrows the real distance of the
//! nearest visible asteroid and scales it by how far the ship is from Earth
//! relative to that asteroid's orbit radius.

use glam::DVec2;

use crate::core::distance::DistanceScale;
use crate::core::field::BodyField;
use crate::renderer::camera::CameraState;
use crate::renderer::commands::InfoPanel;

/// Fallback scale: outermost radius as a fraction of the smaller viewport side.
const FALLBACK_MAX_RADIUS_FRACTION: f64 = 0.45;
/// Fallback scale: ship distance at which the readout starts above zero.
const FALLBACK_INNER_PX: f64 = 50.0;

/// Distance estimate when no asteroid is on screen.
pub fn fallback_distance_km(pixel_distance: f64, viewport_min_dim: f64, scale: &DistanceScale) -> f64 {
    let max_radius = viewport_min_dim * FALLBACK_MAX_RADIUS_FRACTION;
    let proportion = (pixel_distance - FALLBACK_INNER_PX) / (max_radius - FALLBACK_INNER_PX);
    if proportion > 0.0 {
        scale.distance_at(proportion)
    } else {
        0.0
    }
}

/// Estimated real distance between the ship and Earth.
pub fn distance_from_earth_km(
    ship: DVec2,
    field: &BodyField,
    camera: &CameraState,
    screen_centre: DVec2,
    viewport_min_dim: f64,
) -> f64 {
    let pixel_distance = ship.distance(field.centre());

    let nearest = field
        .asteroids()
        .iter()
        .filter(|a| a.visible)
        .map(|a| {
            let screen = camera.to_screen(a.world_position(field.centre()));
            (a, screen.distance(screen_centre))
        })
        .min_by(|x, y| x.1.total_cmp(&y.1));

    match nearest {
        Some((a, _)) if a.orbit.radius_px > 0.0 => {
            a.body.distance_km * (pixel_distance / a.orbit.radius_px)
        }
        _ => fallback_distance_km(pixel_distance, viewport_min_dim, &field.placement().scale),
    }
}

pub fn info_panel(
    speed: f64,
    ship: DVec2,
    field: &BodyField,
    camera: &CameraState,
    screen_centre: DVec2,
    viewport_min_dim: f64,
) -> InfoPanel {
    InfoPanel {
        speed,
        distance_from_earth_km: distance_from_earth_km(ship, field, camera, screen_centre, viewport_min_dim),
        total_asteroids: field.total_asteroids(),
    }
}
