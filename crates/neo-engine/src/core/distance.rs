//! Logarithmic mapping from real distances (km) to on-screen orbit radii (px).
//!
//! Pure math, no engine state. Near-Earth distances span four orders of
//! magnitude, so a linear scale would crush everything onto Earth.

/// Mapping parameters, normally built by `SimConfig::distance_scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceScale {
    /// Distances at or below this map to the innermost radius.
    pub min_km: f64,
    /// Distances at or above this map to the outermost radius.
    pub max_km: f64,
    /// Innermost radius before zoom.
    pub min_radius_px: f64,
    /// Outermost radius as a fraction of the smaller viewport side.
    pub max_radius_fraction: f64,
    pub zoom: f64,
}

impl DistanceScale {
    fn log_min(&self) -> f64 {
        (self.min_km + 1.0).log10()
    }

    fn log_max(&self) -> f64 {
        self.max_km.log10()
    }

    /// Position of `distance_km` along the log scale: 0 at `min_km`, ~1 at `max_km`.
    pub fn proportion(&self, distance_km: f64) -> f64 {
        let d = distance_km.max(self.min_km).min(self.max_km);
        ((d + 1.0).log10() - self.log_min()) / (self.log_max() - self.log_min())
    }

    /// Outermost radius before zoom for a viewport whose smaller side is `viewport_min_dim`.
    pub fn max_radius_px(&self, viewport_min_dim: f64) -> f64 {
        viewport_min_dim * self.max_radius_fraction
    }

    /// Orbit radius in pixels for a real distance.
    pub fn to_screen_radius(&self, distance_km: f64, viewport_min_dim: f64) -> f64 {
        let p = self.proportion(distance_km);
        let max_radius = self.max_radius_px(viewport_min_dim);
        (self.min_radius_px + p * (max_radius - self.min_radius_px)) * self.zoom
    }

    /// Inverse of the log scale for a proportion in [0, 1]: km at that point.
    pub fn distance_at(&self, proportion: f64) -> f64 {
        10f64.powf(proportion * (self.log_max() - self.log_min()) + self.log_min()) - 1.0
    }
}

/// Stand-alone form of the mapping with the default 40 px floor and 40% ceiling.
pub fn to_screen_radius(
    distance_km: f64,
    min_distance: f64,
    max_distance: f64,
    viewport_min_dimension: f64,
    zoom_factor: f64,
) -> f64 {
    DistanceScale {
        min_km: min_distance,
        max_km: max_distance,
        min_radius_px: 40.0,
        max_radius_fraction: 0.4,
        zoom: zoom_factor,
    }
    .to_screen_radius(distance_km, viewport_min_dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f64 = 15_000.0;
    const MAX: f64 = 100_000_000.0;

    #[test]
    fn golden_radius_for_one_million_km() {
        let r = to_screen_radius(1_000_000.0, MIN, MAX, 800.0, 5.0);
        assert!((r - 867.759_567_106_753).abs() < 1e-6, "radius = {r}");
    }

    #[test]
    fn floor_radius_at_and_below_min() {
        assert!((to_screen_radius(MIN, MIN, MAX, 800.0, 5.0) - 200.0).abs() < 1e-9);
        assert!((to_screen_radius(10.0, MIN, MAX, 800.0, 5.0) - 200.0).abs() < 1e-9);
        assert!((to_screen_radius(0.0, MIN, MAX, 800.0, 5.0) - 200.0).abs() < 1e-9);
        assert!((to_screen_radius(-50.0, MIN, MAX, 800.0, 1.0) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn monotonic_between_min_and_max() {
        let mut prev = 0.0;
        let mut d = MIN;
        while d <= MAX {
            let r = to_screen_radius(d, MIN, MAX, 900.0, 5.0);
            assert!(r >= prev, "radius decreased at {d} km: {r} < {prev}");
            prev = r;
            d *= 1.37;
        }
    }

    #[test]
    fn zoom_scales_linearly() {
        let a = to_screen_radius(3_000_000.0, MIN, MAX, 800.0, 1.0);
        let b = to_screen_radius(3_000_000.0, MIN, MAX, 800.0, 4.0);
        assert!((b - 4.0 * a).abs() < 1e-9);
    }

    #[test]
    fn distance_at_inverts_proportion() {
        let scale = DistanceScale {
            min_km: MIN,
            max_km: MAX,
            min_radius_px: 40.0,
            max_radius_fraction: 0.4,
            zoom: 5.0,
        };
        let p = scale.proportion(2_500_000.0);
        let km = scale.distance_at(p);
        assert!((km - 2_500_000.0).abs() / 2_500_000.0 < 1e-9, "km = {km}");
    }
}
