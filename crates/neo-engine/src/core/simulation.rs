use glam::DVec2;

use crate::api::config::SimConfig;
use crate::api::types::CelestialBody;
use crate::core::field::{BodyField, Placement};
use crate::core::rng::Rng;
use crate::core::ship::ShipState;
use crate::input::queue::{InputEvent, CUSTOM_RESET, CUSTOM_RESIZE};
use crate::input::state::InputState;
use crate::renderer::camera::{CameraState, Viewport};
use crate::renderer::commands::{
    BodyCommand, EarthCommand, Renderer, RingCommand, ShipCommand, TailCommand,
};
use crate::renderer::style::TAIL_LOOKAHEAD_FRAMES;
use crate::systems::indicator::{earth_indicator, IndicatorRules};
use crate::systems::info::info_panel;

/// All mutable state of one visualization session.
///
/// Owned by whoever drives the frame loop; nothing here is global.
pub struct Simulation {
    config: SimConfig,
    viewport: Viewport,
    /// Earth's world position, fixed when the session starts.
    earth: DVec2,
    ship: ShipState,
    camera: CameraState,
    field: BodyField,
    input: InputState,
    rng: Rng,
    frame: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let viewport = config.viewport();
        let earth = viewport.centre();
        let placement = Placement::from_config(&config, viewport.min_dimension());
        let mut camera = CameraState::new();
        camera.follow(earth, &viewport);

        Self {
            viewport,
            earth,
            ship: ShipState::new(earth, config.ship),
            camera,
            field: BodyField::empty(earth, placement),
            input: InputState::default(),
            rng: Rng::new(config.seed),
            frame: 0,
            config,
        }
    }

    /// Place the initial planets and asteroids.
    pub fn load(&mut self, planets: &[CelestialBody], asteroids: Vec<CelestialBody>) {
        let placement = *self.field.placement();
        self.field = BodyField::build(self.earth, placement, planets, asteroids, &mut self.rng);
    }

    /// Apply a polled asteroid list. Must be called between frames.
    /// Returns whether the body set changed.
    pub fn replace_asteroids(&mut self, asteroids: Vec<CelestialBody>) -> bool {
        self.field.replace_asteroids(asteroids, &mut self.rng)
    }

    /// Fold one queued event into the session.
    pub fn handle_input(&mut self, event: &InputEvent) {
        if self.input.apply(event) {
            return;
        }
        match *event {
            InputEvent::Custom { kind: CUSTOM_RESET, .. } => self.reset_ship(),
            InputEvent::Custom { kind: CUSTOM_RESIZE, a, b, .. } => {
                self.resize(a as f64, b as f64);
            }
            _ => {}
        }
    }

    /// Teleport the ship back to Earth. Speed and mode are kept.
    pub fn reset_ship(&mut self) {
        self.ship.reset_to(self.earth);
        self.camera.follow(self.ship.world, &self.viewport);
        log::debug!("ship reset to Earth");
    }

    /// New viewport size. Earth keeps its world position; the camera re-centres.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("ignoring resize to {width}x{height}");
            return;
        }
        self.viewport = Viewport::new(width, height);
        self.camera.follow(self.ship.world, &self.viewport);
    }

    /// Run one simulation frame and hand the results to `renderer`.
    ///
    /// Order is fixed: ship, camera, orbits, cull and emit bodies,
    /// Earth indicator, info panel.
    pub fn step<R: Renderer>(&mut self, renderer: &mut R) {
        renderer.begin_frame();

        self.ship.update(&self.input, self.earth);
        self.camera.follow(self.ship.world, &self.viewport);
        self.field.advance();

        let screen_centre = self.viewport.centre();
        renderer.ship(&ShipCommand {
            screen: screen_centre,
            rotation_deg: self.ship.heading_deg,
            on_earth: self.ship.on_earth,
        });
        let earth_screen = self.camera.to_screen(self.earth);
        renderer.earth(&EarthCommand {
            screen: earth_screen,
            diameter_px: self.config.earth_size_px,
        });
        for &radius_px in self.field.rings() {
            renderer.ring(&RingCommand { screen: earth_screen, radius_px });
        }

        self.cull();
        self.emit_bodies(renderer);

        let rules = IndicatorRules {
            distance_px: self.config.indicator_distance_px,
            threshold_px: self.config.indicator_threshold_px,
            fade_px: self.config.indicator_fade_px,
        };
        renderer.indicator(&earth_indicator(
            self.ship.world,
            self.earth,
            self.ship.on_earth,
            screen_centre,
            &rules,
        ));
        renderer.info_panel(&info_panel(
            self.ship.speed,
            self.ship.world,
            &self.field,
            &self.camera,
            screen_centre,
            self.viewport.min_dimension(),
        ));

        self.frame += 1;
    }

    fn cull(&mut self) {
        let centre = self.field.centre();
        let camera = self.camera;
        let viewport = self.viewport;
        let buffer = self.config.cull_buffer_px;
        for placed in self.field.iter_mut() {
            placed.visible = camera.is_visible(placed.world_position(centre), &viewport, buffer);
        }
    }

    fn emit_bodies<R: Renderer>(&self, renderer: &mut R) {
        let centre = self.field.centre();
        for (index, placed) in self.field.iter().enumerate() {
            let tail = placed.tail_length_px.map(|length_px| TailCommand {
                rotation_deg: placed.orbit.trail_angle_deg(centre, TAIL_LOOKAHEAD_FRAMES),
                length_px,
            });
            renderer.body(&BodyCommand {
                index,
                id: placed.id(),
                kind: placed.body.kind,
                screen: self.camera.to_screen(placed.world_position(centre)),
                diameter_px: placed.diameter_px,
                visible: placed.visible,
                hazardous: placed.body.hazardous,
                sentry: placed.body.sentry,
                tail,
                tooltip: &placed.tooltip,
            });
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn earth(&self) -> DVec2 {
        self.earth
    }

    pub fn ship(&self) -> &ShipState {
        &self.ship
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn field(&self) -> &BodyField {
        &self.field
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Frames stepped since the session started.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
