//! Decoding of the NeoWs `feed` endpoint.
//!
//! The feed encodes most numbers as JSON strings ("kilometers": "1234.5");
//! processed snapshots store the same fields as numbers. Both forms are accepted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::api::types::{BodyId, BodyKind, CelestialBody, DiameterRange};
use crate::error::FeedError;

pub const FEED_ENDPOINT: &str = "https://api.nasa.gov/neo/rest/v1/feed";

/// Single-day feed URL.
pub fn feed_url(api_key: &str, date: NaiveDate) -> String {
    format!("{FEED_ENDPOINT}?start_date={date}&end_date={date}&api_key={api_key}")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

pub(crate) fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeVelocity {
    #[serde(deserialize_with = "number_or_string")]
    pub kilometers_per_second: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub kilometers_per_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissDistance {
    #[serde(deserialize_with = "number_or_string")]
    pub astronomical: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub lunar: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub kilometers: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    pub close_approach_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_approach_date_full: Option<String>,
    /// Unix milliseconds.
    pub epoch_date_close_approach: i64,
    pub relative_velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
    pub orbiting_body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub meters: MeterRange,
}

/// One near-Earth object as the feed reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub absolute_magnitude_h: Option<f64>,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    pub is_sentry_object: bool,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

impl NeoRecord {
    pub fn diameter(&self) -> DiameterRange {
        DiameterRange {
            min: self.estimated_diameter.meters.estimated_diameter_min,
            max: self.estimated_diameter.meters.estimated_diameter_max,
        }
    }

    /// Body built from the first close approach.
    pub fn to_body(&self) -> CelestialBody {
        asteroid_body(
            &self.id,
            &self.name,
            self.diameter(),
            self.is_potentially_hazardous_asteroid,
            self.is_sentry_object,
            self.close_approach_data.first(),
        )
    }
}

pub(crate) fn asteroid_body(
    id: &str,
    name: &str,
    diameter_m: DiameterRange,
    hazardous: bool,
    sentry: bool,
    approach: Option<&CloseApproach>,
) -> CelestialBody {
    // Without an approach the body still counts, but sits beyond any range.
    let (distance_km, velocity_km_h, velocity_km_s, epoch) = match approach {
        Some(a) => (
            a.miss_distance.kilometers,
            a.relative_velocity.kilometers_per_hour,
            a.relative_velocity.kilometers_per_second,
            Some(a.epoch_date_close_approach),
        ),
        None => (f64::INFINITY, 0.0, 0.0, None),
    };
    CelestialBody {
        id: BodyId::from(id),
        name: name.to_string(),
        kind: BodyKind::Asteroid,
        distance_km,
        diameter_m,
        hazardous,
        sentry,
        velocity_km_h,
        velocity_km_s,
        close_approach_epoch_ms: epoch,
    }
}

/// Top level of a feed response. Objects are grouped by `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub element_count: u32,
    pub near_earth_objects: BTreeMap<String, Vec<NeoRecord>>,
}

impl FeedResponse {
    pub fn from_json(json: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Earliest date key present in the response.
    pub fn first_date(&self) -> Option<&str> {
        self.near_earth_objects.keys().next().map(String::as_str)
    }

    pub fn records_for(&self, date: &str) -> Result<&[NeoRecord], FeedError> {
        self.near_earth_objects
            .get(date)
            .map(Vec::as_slice)
            .ok_or_else(|| FeedError::MissingDate(date.to_string()))
    }

    /// Bodies for one date, one per record. Records without close-approach
    /// data are counted but never placed.
    pub fn asteroids_for(&self, date: &str) -> Result<Vec<CelestialBody>, FeedError> {
        let records = self.records_for(date)?;
        for r in records.iter().filter(|r| r.close_approach_data.is_empty()) {
            log::warn!("{} ({}) has no close approach data", r.name, r.id);
        }
        log::debug!("feed {date}: {} records", records.len());
        Ok(records.iter().map(NeoRecord::to_body).collect())
    }
}

/// Decode a feed body and pick out one date.
pub fn parse_asteroids(json: &str, date: &str) -> Result<Vec<CelestialBody>, FeedError> {
    FeedResponse::from_json(json)?.asteroids_for(date)
}

#[cfg(test)]
pub(crate) const SAMPLE_FEED: &str = r#"{
  "links": { "self": "http://api.nasa.gov/neo/rest/v1/feed?start_date=2024-01-01&end_date=2024-01-01" },
  "element_count": 3,
  "near_earth_objects": {
    "2024-01-01": [
      {
        "id": "2415949",
        "neo_reference_id": "2415949",
        "name": "415949 (2001 XY10)",
        "absolute_magnitude_h": 19.7,
        "estimated_diameter": {
          "kilometers": { "estimated_diameter_min": 0.3, "estimated_diameter_max": 0.7 },
          "meters": { "estimated_diameter_min": 325.6, "estimated_diameter_max": 728.1 }
        },
        "is_potentially_hazardous_asteroid": true,
        "close_approach_data": [
          {
            "close_approach_date": "2024-01-01",
            "close_approach_date_full": "2024-Jan-01 06:00",
            "epoch_date_close_approach": 1704088800000,
            "relative_velocity": {
              "kilometers_per_second": "13.9063813256",
              "kilometers_per_hour": "50062.9727721284",
              "miles_per_hour": "31107.3296708544"
            },
            "miss_distance": {
              "astronomical": "0.3170506498",
              "lunar": "123.3327027722",
              "kilometers": "47429972.735506526",
              "miles": "29471500.0396066588"
            },
            "orbiting_body": "Earth"
          }
        ],
        "is_sentry_object": false
      },
      {
        "id": "54016339",
        "name": "(2020 KS5)",
        "absolute_magnitude_h": 25.1,
        "estimated_diameter": {
          "meters": { "estimated_diameter_min": 22.2, "estimated_diameter_max": 49.7 }
        },
        "is_potentially_hazardous_asteroid": false,
        "close_approach_data": [
          {
            "close_approach_date": "2024-01-01",
            "epoch_date_close_approach": 1704110400000,
            "relative_velocity": { "kilometers_per_second": "7.25", "kilometers_per_hour": "26100.0" },
            "miss_distance": { "astronomical": "0.01", "lunar": "3.89", "kilometers": "1495978.707" },
            "orbiting_body": "Earth"
          }
        ],
        "is_sentry_object": true
      },
      {
        "id": "99999999",
        "name": "(no approach)",
        "estimated_diameter": {
          "meters": { "estimated_diameter_min": 10.0, "estimated_diameter_max": 20.0 }
        },
        "is_potentially_hazardous_asteroid": false,
        "close_approach_data": [],
        "is_sentry_object": false
      }
    ]
  }
}"#;
