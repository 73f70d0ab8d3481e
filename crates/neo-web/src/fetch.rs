//! Browser `fetch` adapter for planets and the NeoWs feed.

use std::cell::RefCell;

use chrono::NaiveDate;
use wasm_bindgen::JsCast as _;
use web_sys::{Request, RequestInit, Response};

use neo_engine::data::feed::{feed_url, parse_asteroids};
use neo_engine::{CelestialBody, FeedError, PlanetCatalog};

type PollResult = Result<Vec<CelestialBody>, FeedError>;

thread_local! {
    /// Result of the last background poll, picked up before the next tick.
    static POLL_RESULT: RefCell<Option<PollResult>> = const { RefCell::new(None) };
}

/// Today's date in UTC, as the feed keys it.
pub fn today() -> Option<NaiveDate> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_utc_full_year() as i32,
        now.get_utc_month() + 1,
        now.get_utc_date(),
    )
}

/// GET `url` and return the body text.
pub async fn fetch_text(url: &str) -> Result<String, FeedError> {
    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| FeedError::Network(format!("{e:?}")))?;

    let window = web_sys::window().ok_or_else(|| FeedError::Network("no window".into()))?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| FeedError::Network(format!("fetch failed: {e:?}")))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| FeedError::Network("response is not a Response".into()))?;

    if !resp.ok() {
        return Err(FeedError::Status {
            status: resp.status(),
            reason: resp.status_text(),
        });
    }

    let text = wasm_bindgen_futures::JsFuture::from(
        resp.text().map_err(|e| FeedError::Network(format!("{e:?}")))?,
    )
    .await
    .map_err(|e| FeedError::Network(format!("{e:?}")))?;

    text.as_string()
        .ok_or_else(|| FeedError::Network("response body is not text".into()))
}

pub async fn fetch_planets(url: &str) -> Result<Vec<CelestialBody>, FeedError> {
    let json = fetch_text(url).await?;
    Ok(PlanetCatalog::from_json(&json)?.into_bodies())
}

/// Asteroids for `date` from the NeoWs feed.
pub async fn fetch_asteroids(api_key: &str, date: NaiveDate) -> Result<Vec<CelestialBody>, FeedError> {
    let json = fetch_text(&feed_url(api_key, date)).await?;
    parse_asteroids(&json, &date.to_string())
}

/// Start a background poll for today's feed. The result lands in a slot
/// that `take_poll_result` empties.
pub fn spawn_poll(api_key: String) {
    wasm_bindgen_futures::spawn_local(async move {
        let result = match today() {
            Some(date) => fetch_asteroids(&api_key, date).await,
            None => Err(FeedError::Network("clock unavailable".into())),
        };
        POLL_RESULT.with(|slot| *slot.borrow_mut() = Some(result));
    });
}

pub fn take_poll_result() -> Option<PollResult> {
    POLL_RESULT.with(|slot| slot.borrow_mut().take())
}
