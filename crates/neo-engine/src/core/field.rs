//! The set of placed bodies around Earth.
//!
//! Planets sit still at a random phase on their mapped radius. Asteroids
//! orbit a jittered centre at a speed derived from their relative velocity.
//! A re-poll replaces the asteroid list by value between frames.

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::DVec2;

use crate::api::config::SimConfig;
use crate::api::types::{BodyId, CelestialBody};
use crate::core::distance::DistanceScale;
use crate::core::orbit::{self, OrbitState};
use crate::core::rng::Rng;
use crate::renderer::style;

/// How new bodies are mapped onto the screen. Fixed when the field is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: DistanceScale,
    pub viewport_min_dim: f64,
    pub offset_fraction: f64,
    pub max_orbit_rings: usize,
}

impl Placement {
    pub fn from_config(config: &SimConfig, viewport_min_dim: f64) -> Self {
        Self {
            scale: config.distance_scale(),
            viewport_min_dim,
            offset_fraction: config.orbit_offset_fraction,
            max_orbit_rings: config.max_orbit_rings,
        }
    }

    pub fn radius_for(&self, distance_km: f64) -> f64 {
        self.scale.to_screen_radius(distance_km, self.viewport_min_dim)
    }

    /// Bodies farther than the scale's maximum are never placed.
    pub fn in_range(&self, body: &CelestialBody) -> bool {
        body.distance_km <= self.scale.max_km
    }
}

/// A body with its orbit and presentation attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBody {
    pub body: CelestialBody,
    pub orbit: OrbitState,
    pub diameter_px: f64,
    /// Asteroids only.
    pub tail_length_px: Option<f64>,
    pub tooltip: String,
    /// Result of the last cull.
    pub visible: bool,
}

impl PlacedBody {
    fn planet(body: CelestialBody, placement: &Placement, rng: &mut Rng) -> Self {
        let radius = placement.radius_for(body.distance_km);
        let angle = rng.range(0.0, TAU);
        Self {
            orbit: OrbitState::new(radius, DVec2::ZERO, angle, 0.0),
            diameter_px: style::planet_diameter_px(&body),
            tail_length_px: None,
            tooltip: style::planet_tooltip(&body),
            visible: true,
            body,
        }
    }

    fn asteroid(body: CelestialBody, placement: &Placement, rng: &mut Rng) -> Self {
        let radius = placement.radius_for(body.distance_km);
        let angle = body.close_approach_epoch_ms.map(orbit::initial_angle).unwrap_or(0.0);
        let w = orbit::angular_velocity(body.velocity_km_h);
        Self {
            orbit: OrbitState::jittered(radius, angle, w, placement.offset_fraction, rng),
            diameter_px: style::asteroid_diameter_px(&body),
            tail_length_px: Some(style::tail_length_px(body.velocity_km_s)),
            tooltip: style::asteroid_tooltip(&body),
            visible: true,
            body,
        }
    }

    pub fn id(&self) -> &BodyId {
        &self.body.id
    }

    pub fn world_position(&self, centre: DVec2) -> DVec2 {
        self.orbit.position(centre)
    }
}

#[derive(Debug, Clone)]
pub struct BodyField {
    centre: DVec2,
    placement: Placement,
    planets: Vec<PlacedBody>,
    asteroids: Vec<PlacedBody>,
    /// The last accepted asteroid list, including out-of-range records.
    asteroid_source: Vec<CelestialBody>,
    /// Reference orbit radii in world pixels, ascending.
    rings: Vec<f64>,
    /// Bumped whenever the body set changes.
    generation: u64,
}

impl BodyField {
    /// An empty field around `centre`, before any data has loaded.
    pub fn empty(centre: DVec2, placement: Placement) -> Self {
        Self {
            centre,
            placement,
            planets: Vec::new(),
            asteroids: Vec::new(),
            asteroid_source: Vec::new(),
            rings: Vec::new(),
            generation: 0,
        }
    }

    /// Place every planet and asteroid. Earth and out-of-range bodies are skipped.
    pub fn build(
        centre: DVec2,
        placement: Placement,
        planets: &[CelestialBody],
        asteroids: Vec<CelestialBody>,
        rng: &mut Rng,
    ) -> Self {
        let mut field = Self::empty(centre, placement);

        let shown: Vec<&CelestialBody> = planets
            .iter()
            .filter(|p| !p.is_earth() && placement.in_range(p))
            .collect();
        field.rings = ring_radii(&shown, &placement);
        field.planets = shown
            .into_iter()
            .map(|p| PlacedBody::planet(p.clone(), &placement, rng))
            .collect();

        field.asteroids = place_asteroids(&asteroids, &placement, HashMap::new(), rng);
        field.asteroid_source = asteroids;
        field.generation = 1;

        log::info!(
            "placed {} planets, {} of {} asteroids, {} rings",
            field.planets.len(),
            field.asteroids.len(),
            field.asteroid_source.len(),
            field.rings.len()
        );
        field
    }

    /// Swap in a freshly polled asteroid list.
    ///
    /// Returns `false` and changes nothing when the list equals the current one.
    /// Otherwise bodies whose record is unchanged keep their orbit state.
    pub fn replace_asteroids(&mut self, asteroids: Vec<CelestialBody>, rng: &mut Rng) -> bool {
        if asteroids == self.asteroid_source {
            log::debug!("asteroid poll unchanged; keeping {} bodies", self.asteroids.len());
            return false;
        }

        let previous: HashMap<BodyId, PlacedBody> = self
            .asteroids
            .drain(..)
            .map(|p| (p.body.id.clone(), p))
            .collect();
        self.asteroids = place_asteroids(&asteroids, &self.placement, previous, rng);
        self.asteroid_source = asteroids;
        self.generation += 1;

        log::info!(
            "asteroid set replaced: {} placed of {}",
            self.asteroids.len(),
            self.asteroid_source.len()
        );
        true
    }

    /// Advance every orbit by one frame.
    pub fn advance(&mut self) {
        for placed in self.iter_mut() {
            placed.orbit.advance();
        }
    }

    pub fn centre(&self) -> DVec2 {
        self.centre
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Planets first, then asteroids. Indices on the wire follow this order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedBody> {
        self.planets.iter().chain(self.asteroids.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlacedBody> {
        self.planets.iter_mut().chain(self.asteroids.iter_mut())
    }

    pub fn planets(&self) -> &[PlacedBody] {
        &self.planets
    }

    pub fn asteroids(&self) -> &[PlacedBody] {
        &self.asteroids
    }

    pub fn len(&self) -> usize {
        self.planets.len() + self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rings(&self) -> &[f64] {
        &self.rings
    }

    /// Every asteroid in the last accepted list, placed or not.
    pub fn total_asteroids(&self) -> usize {
        self.asteroid_source.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn place_asteroids(
    asteroids: &[CelestialBody],
    placement: &Placement,
    mut previous: HashMap<BodyId, PlacedBody>,
    rng: &mut Rng,
) -> Vec<PlacedBody> {
    let mut placed = Vec::with_capacity(asteroids.len());
    for body in asteroids {
        if !placement.in_range(body) {
            continue;
        }
        match previous.remove(&body.id) {
            Some(existing) if existing.body == *body => placed.push(existing),
            _ => placed.push(PlacedBody::asteroid(body.clone(), placement, rng)),
        }
    }
    placed
}

/// Distinct planet distances, thinned by a fixed stride when there are too many.
fn ring_radii(planets: &[&CelestialBody], placement: &Placement) -> Vec<f64> {
    let mut distances: Vec<f64> = planets.iter().map(|p| p.distance_km).collect();
    distances.sort_by(f64::total_cmp);
    distances.dedup();

    let max = placement.max_orbit_rings.max(1);
    let stride = distances.len().div_ceil(max).max(1);
    distances
        .into_iter()
        .step_by(stride)
        .map(|d| placement.radius_for(d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{BodyKind, DiameterRange};

    fn placement() -> Placement {
        Placement::from_config(&SimConfig::default(), 800.0)
    }

    fn asteroid(id: &str, distance_km: f64, v_kmh: f64) -> CelestialBody {
        CelestialBody {
            id: BodyId::from(id),
            name: format!("({id})"),
            kind: BodyKind::Asteroid,
            distance_km,
            diameter_m: DiameterRange { min: 40.0, max: 90.0 },
            hazardous: false,
            sentry: false,
            velocity_km_h: v_kmh,
            velocity_km_s: v_kmh / 3600.0,
            close_approach_epoch_ms: Some(1_704_088_800_000),
        }
    }

    fn planets() -> Vec<CelestialBody> {
        vec![
            CelestialBody::planet("Earth", 0.0, 12_742.0),
            CelestialBody::planet("Moon", 384_400.0, 3_474.0),
            CelestialBody::planet("Venus", 41_400_000.0, 12_104.0),
            CelestialBody::planet("Mars", 78_340_000.0, 6_779.0),
            CelestialBody::planet("Jupiter", 628_730_000.0, 139_820.0),
        ]
    }

    fn field() -> BodyField {
        let mut rng = Rng::new(42);
        let asteroids = vec![
            asteroid("a", 1_000_000.0, 40_000.0),
            asteroid("b", 5_000_000.0, 70_000.0),
            asteroid("far", 200_000_000.0, 10_000.0),
        ];
        BodyField::build(DVec2::new(640.0, 400.0), placement(), &planets(), asteroids, &mut rng)
    }

    #[test]
    fn skips_earth_and_out_of_range() {
        let f = field();
        let names: Vec<&str> = f.planets().iter().map(|p| p.body.name.as_str()).collect();
        assert_eq!(names, ["Moon", "Venus", "Mars"]);
        assert_eq!(f.asteroids().len(), 2);
        assert_eq!(f.total_asteroids(), 3);
        assert_eq!(f.len(), 5);
    }

    #[test]
    fn planets_are_stationary() {
        let mut f = field();
        let before: Vec<f64> = f.planets().iter().map(|p| p.orbit.angle).collect();
        for _ in 0..100 {
            f.advance();
        }
        let after: Vec<f64> = f.planets().iter().map(|p| p.orbit.angle).collect();
        assert_eq!(before, after);
        assert!(f.planets().iter().all(|p| p.tail_length_px.is_none()));
    }

    #[test]
    fn feed_record_without_approach_counts_but_is_not_placed() {
        let feed = crate::data::feed::FeedResponse::from_json(crate::data::feed::SAMPLE_FEED).unwrap();
        let asteroids = feed.asteroids_for("2024-01-01").unwrap();
        let mut rng = Rng::new(9);
        let f = BodyField::build(DVec2::ZERO, placement(), &[], asteroids, &mut rng);
        assert_eq!(f.total_asteroids(), 3);
        assert!(f.asteroids().iter().all(|a| a.body.id.as_str() != "99999999"));
    }

    #[test]
    fn asteroids_start_at_epoch_phase() {
        let f = field();
        for a in f.asteroids() {
            assert!((a.orbit.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
            assert!(a.tail_length_px.is_some());
        }
    }

    #[test]
    fn identical_poll_is_a_no_op() {
        let mut f = field();
        for _ in 0..37 {
            f.advance();
        }
        let orbits: Vec<OrbitState> = f.asteroids().iter().map(|a| a.orbit).collect();
        let generation = f.generation();

        let same = vec![
            asteroid("a", 1_000_000.0, 40_000.0),
            asteroid("b", 5_000_000.0, 70_000.0),
            asteroid("far", 200_000_000.0, 10_000.0),
        ];
        let mut rng = Rng::new(1);
        assert!(!f.replace_asteroids(same, &mut rng));
        let after: Vec<OrbitState> = f.asteroids().iter().map(|a| a.orbit).collect();
        assert_eq!(orbits, after);
        assert_eq!(f.generation(), generation);
    }

    #[test]
    fn changed_poll_keeps_unchanged_orbits() {
        let mut f = field();
        for _ in 0..10 {
            f.advance();
        }
        let kept = f.asteroids()[0].orbit;

        let next = vec![
            asteroid("a", 1_000_000.0, 40_000.0),
            asteroid("b", 6_000_000.0, 70_000.0),
            asteroid("c", 2_000_000.0, 20_000.0),
        ];
        let mut rng = Rng::new(5);
        assert!(f.replace_asteroids(next, &mut rng));
        assert_eq!(f.asteroids().len(), 3);
        assert_eq!(f.asteroids()[0].orbit, kept);
        assert_eq!(f.asteroids()[1].body.distance_km, 6_000_000.0);
        assert_eq!(f.generation(), 2);
    }

    #[test]
    fn rings_are_thinned_to_the_limit() {
        let many: Vec<CelestialBody> = (1..=40)
            .map(|i| CelestialBody::planet(format!("P{i}"), i as f64 * 1_000_000.0, 5_000.0))
            .collect();
        let mut rng = Rng::new(3);
        let f = BodyField::build(DVec2::ZERO, placement(), &many, Vec::new(), &mut rng);
        // ceil(40 / 15) = 3 → indices 0, 3, ..., 39
        assert_eq!(f.rings().len(), 14);
        assert!(f.rings().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(f.planets().len(), 40);
    }

    #[test]
    fn duplicate_distances_share_a_ring() {
        let twins = vec![
            CelestialBody::planet("A", 3_000_000.0, 5_000.0),
            CelestialBody::planet("B", 3_000_000.0, 5_000.0),
        ];
        let mut rng = Rng::new(3);
        let f = BodyField::build(DVec2::ZERO, placement(), &twins, Vec::new(), &mut rng);
        assert_eq!(f.rings().len(), 1);
    }
}
