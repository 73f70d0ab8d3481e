use serde::{Deserialize, Serialize};

use crate::api::types::CelestialBody;
use crate::error::FeedError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub name: String,
    /// Distance from Earth.
    pub distance_km: f64,
    pub diameter_km: f64,
}

/// Static `planets.json` shipped with the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetCatalog {
    pub celestial_bodies: Vec<PlanetRecord>,
}

impl PlanetCatalog {
    pub fn from_json(json: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_bodies(self) -> Vec<CelestialBody> {
        self.celestial_bodies
            .into_iter()
            .map(|p| CelestialBody::planet(p.name, p.distance_km, p.diameter_km))
            .collect()
    }
}
