use serde::{Deserialize, Serialize};

/// Unique identifier for a body: the NeoWs id for asteroids, the name for planets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub String);

impl BodyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BodyId {
    fn from(id: &str) -> Self {
        BodyId(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Planet,
    Asteroid,
}

impl BodyKind {
    /// Numeric tag used on the wire (0 = planet, 1 = asteroid).
    pub fn wire_tag(self) -> f32 {
        match self {
            BodyKind::Planet => 0.0,
            BodyKind::Asteroid => 1.0,
        }
    }
}

/// Estimated diameter range in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiameterRange {
    pub min: f64,
    pub max: f64,
}

/// A planet or asteroid as supplied by the data adapters.
/// Immutable for the session; a changed poll replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    /// Real distance from Earth (miss distance for asteroids).
    pub distance_km: f64,
    pub diameter_m: DiameterRange,
    pub hazardous: bool,
    pub sentry: bool,
    pub velocity_km_h: f64,
    pub velocity_km_s: f64,
    /// Close-approach epoch in Unix milliseconds. Planets have none.
    pub close_approach_epoch_ms: Option<i64>,
}

impl CelestialBody {
    /// A stationary planet at `distance_km` with a known diameter.
    pub fn planet(name: impl Into<String>, distance_km: f64, diameter_km: f64) -> Self {
        let name = name.into();
        let meters = diameter_km * 1000.0;
        Self {
            id: BodyId(name.clone()),
            name,
            kind: BodyKind::Planet,
            distance_km,
            diameter_m: DiameterRange { min: meters, max: meters },
            hazardous: false,
            sentry: false,
            velocity_km_h: 0.0,
            velocity_km_s: 0.0,
            close_approach_epoch_ms: None,
        }
    }

    pub fn is_planet(&self) -> bool {
        self.kind == BodyKind::Planet
    }

    pub fn is_asteroid(&self) -> bool {
        self.kind == BodyKind::Asteroid
    }

    /// Earth sits at the centre of the field and is never placed on an orbit.
    pub fn is_earth(&self) -> bool {
        self.is_planet() && self.name == "Earth"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planet_diameter_is_converted_to_meters() {
        let mars = CelestialBody::planet("Mars", 78_340_000.0, 6_779.0);
        assert_eq!(mars.kind, BodyKind::Planet);
        assert_eq!(mars.diameter_m.min, 6_779_000.0);
        assert_eq!(mars.id, BodyId::from("Mars"));
        assert!(mars.close_approach_epoch_ms.is_none());
    }

    #[test]
    fn earth_is_recognised() {
        assert!(CelestialBody::planet("Earth", 0.0, 12_742.0).is_earth());
        assert!(!CelestialBody::planet("Venus", 41_400_000.0, 12_104.0).is_earth());
    }
}
