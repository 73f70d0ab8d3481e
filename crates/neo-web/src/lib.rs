pub mod fetch;
pub mod runner;

pub use runner::FieldRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use neo_engine::input::queue::{CUSTOM_RESET, CUSTOM_RESIZE};
use neo_engine::{InitError, InputEvent, SimConfig};

thread_local! {
    static RUNNER: RefCell<Option<FieldRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the session, or return `None` before `neo_init`.
fn with_runner<R>(f: impl FnOnce(&mut FieldRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn push(event: InputEvent) {
    if with_runner(|r| r.push_input(event)).is_none() {
        log::warn!("input before neo_init ignored");
    }
}

/// Create the session. `config_json` may be empty or a partial `SimConfig`.
#[wasm_bindgen]
pub fn neo_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        SimConfig::default()
    } else {
        SimConfig::from_json(config_json).map_err(|e| JsValue::from_str(&format!("bad config: {e}")))?
    };

    RUNNER.with(|cell| *cell.borrow_mut() = Some(FieldRunner::new(config)));
    log::info!("neo-web: initialized");
    Ok(())
}

/// Fetch planets and today's asteroids, then start the frame loop.
/// On failure the session stays idle and `neo_error_message` returns the text to show.
#[wasm_bindgen]
pub async fn neo_load(planets_url: String, api_key: String) -> Result<(), JsValue> {
    let loaded = async {
        let planets = fetch::fetch_planets(&planets_url).await.map_err(InitError::Planets)?;
        let date = fetch::today()
            .ok_or_else(|| InitError::Asteroids(neo_engine::FeedError::Network("clock unavailable".into())))?;
        let asteroids = fetch::fetch_asteroids(&api_key, date)
            .await
            .map_err(InitError::Asteroids)?;
        Ok::<_, InitError>((planets, asteroids))
    }
    .await;

    match loaded {
        Ok((planets, asteroids)) => {
            with_runner(|r| r.load(&planets, asteroids, api_key))
                .ok_or_else(|| JsValue::from_str("neo_init not called"))
        }
        Err(e) => {
            let message = e.user_message();
            with_runner(|r| r.fail(&e));
            Err(JsValue::from_str(message))
        }
    }
}

/// One animation-frame callback with the elapsed seconds.
#[wasm_bindgen]
pub fn neo_tick(dt: f32) {
    if let Some(result) = fetch::take_poll_result() {
        with_runner(|r| r.deliver_poll(result));
    }
    let poll = with_runner(|r| r.tick(dt).then(|| r.api_key().to_string())).flatten();
    if let Some(api_key) = poll {
        fetch::spawn_poll(api_key);
    }
}

#[wasm_bindgen]
pub fn neo_stop() {
    with_runner(|r| r.stop());
}

#[wasm_bindgen]
pub fn neo_key_down(key_code: u32) {
    push(InputEvent::KeyDown { key_code });
}

#[wasm_bindgen]
pub fn neo_key_up(key_code: u32) {
    push(InputEvent::KeyUp { key_code });
}

#[wasm_bindgen]
pub fn neo_reset_ship() {
    push(InputEvent::Custom { kind: CUSTOM_RESET, a: 0.0, b: 0.0, c: 0.0 });
}

#[wasm_bindgen]
pub fn neo_resize(width: f32, height: f32) {
    push(InputEvent::Custom { kind: CUSTOM_RESIZE, a: width, b: height, c: 0.0 });
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_bodies() -> u32 {
    with_runner(|r| r.max_bodies()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_rings() -> u32 {
    with_runner(|r| r.max_rings()).unwrap_or(0)
}

/// JSON array of `{id, name, tooltip, asteroid}` in frame-buffer body order.
#[wasm_bindgen]
pub fn get_labels_json() -> String {
    with_runner(|r| r.labels_json().to_string()).unwrap_or_else(|| "[]".to_string())
}

#[wasm_bindgen]
pub fn get_label_generation() -> f64 {
    with_runner(|r| r.labels_generation() as f64).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn neo_error_message() -> Option<String> {
    with_runner(|r| r.init_error().map(str::to_string)).flatten()
}

#[wasm_bindgen]
pub fn neo_is_running() -> bool {
    with_runner(|r| r.is_running()).unwrap_or(false)
}
