//! Dated snapshot files: the processed feed records for one day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::types::{CelestialBody, DiameterRange};
use crate::data::feed::{asteroid_body, CloseApproach, NeoRecord};
use crate::error::FeedError;

/// One record in a snapshot file. Numbers are stored as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub id: String,
    pub name: String,
    pub absolute_magnitude_h: Option<f64>,
    pub estimated_diameter_meters: DiameterRange,
    pub is_potentially_hazardous: bool,
    pub is_sentry_object: bool,
    pub close_approach_data: Vec<CloseApproach>,
}

impl From<&NeoRecord> for SnapshotRecord {
    fn from(record: &NeoRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            absolute_magnitude_h: record.absolute_magnitude_h,
            estimated_diameter_meters: record.diameter(),
            is_potentially_hazardous: record.is_potentially_hazardous_asteroid,
            is_sentry_object: record.is_sentry_object,
            close_approach_data: record.close_approach_data.clone(),
        }
    }
}

impl SnapshotRecord {
    pub fn to_body(&self) -> CelestialBody {
        asteroid_body(
            &self.id,
            &self.name,
            self.estimated_diameter_meters,
            self.is_potentially_hazardous,
            self.is_sentry_object,
            self.close_approach_data.first(),
        )
    }
}

/// `asteroid-data-YYYY-MM-DD.json`
pub fn snapshot_filename(date: NaiveDate) -> String {
    format!("asteroid-data-{date}.json")
}

/// Pretty-printed JSON array, two-space indented.
pub fn to_json(records: &[SnapshotRecord]) -> Result<String, FeedError> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn from_json(json: &str) -> Result<Vec<SnapshotRecord>, FeedError> {
    Ok(serde_json::from_str(json)?)
}

/// One body per record, in file order.
pub fn bodies(records: &[SnapshotRecord]) -> Vec<CelestialBody> {
    records.iter().map(SnapshotRecord::to_body).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feed::{FeedResponse, SAMPLE_FEED};

    fn records() -> Vec<SnapshotRecord> {
        let feed = FeedResponse::from_json(SAMPLE_FEED).unwrap();
        feed.records_for("2024-01-01").unwrap().iter().map(SnapshotRecord::from).collect()
    }

    #[test]
    fn filename_has_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 4).unwrap();
        assert_eq!(snapshot_filename(date), "asteroid-data-2025-11-04.json");
    }

    #[test]
    fn numbers_are_written_as_numbers() {
        let json = to_json(&records()).unwrap();
        assert!(json.contains("\"kilometers\": 47429972.7"), "{json}");
        assert!(json.contains("\"is_potentially_hazardous\": true"));
        assert!(json.starts_with("[\n  {"));
    }

    #[test]
    fn snapshot_reads_back_into_the_same_bodies() {
        let recs = records();
        let json = to_json(&recs).unwrap();
        let back = from_json(&json).unwrap();
        assert_eq!(back, recs);

        let feed = FeedResponse::from_json(SAMPLE_FEED).unwrap();
        assert_eq!(bodies(&back), feed.asteroids_for("2024-01-01").unwrap());
    }

    #[test]
    fn records_without_approach_are_kept() {
        let recs = records();
        assert_eq!(recs.len(), 3);
        let all = bodies(&recs);
        assert_eq!(all.len(), 3);
        assert!(all[2].distance_km.is_infinite());
    }
}
