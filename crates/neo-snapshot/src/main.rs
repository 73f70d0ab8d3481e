use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;

use neo_engine::data::feed::{feed_url, FeedResponse, NeoRecord};
use neo_engine::data::snapshot::{self, SnapshotRecord};
use neo_engine::FeedError;

#[derive(Parser, Debug)]
#[clap(about = "Save one day of near-Earth objects as asteroid-data-YYYY-MM-DD.json")]
struct Arguments {
    /// NeoWs API key.
    #[clap(long, env = "NEO_API_KEY", default_value = "DEMO_KEY")]
    api_key: String,
    /// Day to fetch (UTC). Defaults to today.
    #[clap(long)]
    date: Option<NaiveDate>,
    /// Directory the snapshot is written to.
    #[clap(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("neo_snapshot=info"))
        .init();

    let args = Arguments::parse();
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());

    log::info!("fetching feed for {date}");
    let body = fetch_text(&feed_url(&args.api_key, date)).context("fetching asteroid feed")?;
    let feed = FeedResponse::from_json(&body).context("decoding asteroid feed")?;

    let records: Vec<SnapshotRecord> = select_records(&feed, date)?
        .iter()
        .map(SnapshotRecord::from)
        .collect();

    let path = args.out_dir.join(snapshot::snapshot_filename(date));
    fs::write(&path, snapshot::to_json(&records)?)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("saved {} records to {}", records.len(), path.display());
    Ok(())
}

fn fetch_text(url: &str) -> Result<String, FeedError> {
    match ureq::get(url).call() {
        Ok(response) => response
            .into_string()
            .map_err(|e| FeedError::Network(format!("read error: {e}"))),
        Err(ureq::Error::Status(status, response)) => Err(FeedError::Status {
            status,
            reason: response.status_text().to_string(),
        }),
        Err(e) => Err(FeedError::Network(e.to_string())),
    }
}

/// Records for `date`, or for the first date in the response when that key is absent.
fn select_records(feed: &FeedResponse, date: NaiveDate) -> Result<&[NeoRecord], FeedError> {
    let key = date.to_string();
    match feed.records_for(&key) {
        Ok(records) => Ok(records),
        Err(missing) => {
            let first = feed.first_date().ok_or(missing)?;
            log::warn!("feed has no {key} entry, using {first}");
            feed.records_for(first)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
      "near_earth_objects": {
        "2024-05-02": [
          {
            "id": "3726710",
            "name": "(2015 RC)",
            "absolute_magnitude_h": 24.3,
            "estimated_diameter": { "meters": { "estimated_diameter_min": 36.4, "estimated_diameter_max": 81.4 } },
            "is_potentially_hazardous_asteroid": false,
            "close_approach_data": [],
            "is_sentry_object": false
          }
        ]
      }
    }"#;

    #[test]
    fn exact_date_is_used() {
        let feed = FeedResponse::from_json(FEED).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(select_records(&feed, date).unwrap()[0].id, "3726710");
    }

    #[test]
    fn falls_back_to_first_date() {
        let feed = FeedResponse::from_json(FEED).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        assert_eq!(select_records(&feed, date).unwrap().len(), 1);
    }

    #[test]
    fn empty_feed_reports_requested_date() {
        let feed = FeedResponse::from_json(r#"{ "near_earth_objects": {} }"#).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let err = select_records(&feed, date).unwrap_err();
        assert!(matches!(err, FeedError::MissingDate(ref d) if d == "2024-05-03"));
    }

    #[test]
    fn cli_defaults() {
        let args = Arguments::parse_from(["neo-snapshot", "--date", "2024-05-02"]);
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 5, 2));
        assert_eq!(args.out_dir, PathBuf::from("."));
    }
}
