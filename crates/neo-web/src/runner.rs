use serde::Serialize;

use neo_engine::bridge::protocol::ProtocolLayout;
use neo_engine::{
    CelestialBody, FeedError, FrameCommands, InitError, InputEvent, InputQueue, Poller, Scheduler,
    SimConfig, Simulation,
};

/// Label text for one body, published to the host as JSON.
/// Entries follow the body order of the frame buffer.
#[derive(Serialize)]
struct Label<'a> {
    id: &'a str,
    name: &'a str,
    tooltip: &'a str,
    asteroid: bool,
}

/// Owns one browser session: simulation, scheduler, frame buffer and poll policy.
///
/// `lib.rs` keeps a single instance in a `thread_local!` and exposes free
/// functions through `#[wasm_bindgen]`.
pub struct FieldRunner {
    sim: Simulation,
    scheduler: Scheduler,
    input: InputQueue,
    frame: FrameCommands,
    layout: ProtocolLayout,
    /// Flat frame buffer read by the host.
    buffer: Vec<f32>,
    poller: Poller,
    labels_json: String,
    /// Field generation the labels were built from.
    labels_generation: u64,
    init_error: Option<String>,
    api_key: String,
}

impl FieldRunner {
    pub fn new(config: SimConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        Self {
            scheduler: Scheduler::new(config.fixed_dt, config.max_steps_per_tick),
            poller: Poller::new(config.poll_interval_secs),
            buffer: layout.allocate(),
            layout,
            sim: Simulation::new(config),
            input: InputQueue::new(),
            frame: FrameCommands::new(),
            labels_json: "[]".to_string(),
            labels_generation: 0,
            init_error: None,
            api_key: String::new(),
        }
    }

    /// Initial data arrived: place bodies and start the loop.
    pub fn load(&mut self, planets: &[CelestialBody], asteroids: Vec<CelestialBody>, api_key: String) {
        self.poller.prime(&asteroids);
        self.sim.load(planets, asteroids);
        self.api_key = api_key;
        self.init_error = None;
        self.refresh_labels();
        self.scheduler.start();
        log::info!(
            "field loaded: {} bodies, {} asteroids reported",
            self.sim.field().len(),
            self.sim.field().total_asteroids()
        );
    }

    /// Initial load failed. The session stays idle and shows the message.
    pub fn fail(&mut self, err: &InitError) {
        log::error!("initialization failed: {err}");
        self.scheduler.stop();
        self.init_error = Some(err.user_message().to_string());
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Handle one animation-frame callback.
    /// Returns true when a feed poll should be started.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.scheduler.is_running() {
            return false;
        }
        let steps = self.scheduler.tick(&mut self.sim, &mut self.input, dt, &mut self.frame);
        if steps > 0 {
            self.layout.write_frame(
                &self.frame,
                self.sim.frame(),
                self.labels_generation,
                self.sim.viewport(),
                &mut self.buffer,
            );
        }
        self.poller.advance(dt)
    }

    /// Hand a finished poll to the session. Call between ticks only.
    pub fn deliver_poll(&mut self, result: Result<Vec<CelestialBody>, FeedError>) {
        if let Some(list) = self.poller.complete(result) {
            if self.sim.replace_asteroids(list) {
                self.refresh_labels();
            }
        }
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    fn refresh_labels(&mut self) {
        let labels: Vec<Label<'_>> = self
            .sim
            .field()
            .iter()
            .take(self.layout.max_bodies)
            .map(|p| Label {
                id: p.body.id.as_str(),
                name: &p.body.name,
                tooltip: &p.tooltip,
                asteroid: p.body.is_asteroid(),
            })
            .collect();
        match serde_json::to_string(&labels) {
            Ok(json) => {
                self.labels_json = json;
                self.labels_generation = self.sim.field().generation();
            }
            Err(e) => log::error!("failed to encode labels: {e}"),
        }
    }

    // ---- Accessors read by TypeScript via wasm_bindgen exports ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn max_bodies(&self) -> u32 {
        self.layout.max_bodies as u32
    }

    pub fn max_rings(&self) -> u32 {
        self.layout.max_rings as u32
    }

    pub fn labels_json(&self) -> &str {
        &self.labels_json
    }

    pub fn labels_generation(&self) -> u64 {
        self.labels_generation
    }

    pub fn init_error(&self) -> Option<&str> {
        self.init_error.as_deref()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }
}
