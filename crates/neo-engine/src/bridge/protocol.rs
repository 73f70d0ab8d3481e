//! Flat frame buffer shared with the host renderer.
//! Must stay in sync with the TypeScript `protocol.ts`.
//!
//! Layout (all values f32):
//! ```text
//! [Header: 16 floats]
//! [Ship: 4 floats]       x, y, rotation_deg, on_earth
//! [Earth: 4 floats]      x, y, diameter, 0
//! [Indicator: 4 floats]  x, y, rotation_deg, opacity (0 when hidden)
//! [Info: 4 floats]       speed, distance_from_earth_km, total_asteroids, 0
//! [Bodies: max_bodies × 8 floats]
//! [Rings: max_rings × 4 floats]  x, y, radius, 0
//! ```
//!
//! Capacities are written into the header every frame; the host computes
//! section offsets from them. Label text does not fit this buffer and is
//! published separately whenever `HEADER_LABEL_GENERATION` changes.

use crate::api::config::SimConfig;
use crate::renderer::camera::Viewport;
use crate::renderer::commands::{BodyInstance, FrameCommands};

pub const HEADER_FLOATS: usize = 16;

pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_BODIES: usize = 3;
pub const HEADER_BODY_COUNT: usize = 4;
pub const HEADER_MAX_RINGS: usize = 5;
pub const HEADER_RING_COUNT: usize = 6;
pub const HEADER_VIEWPORT_WIDTH: usize = 7;
pub const HEADER_VIEWPORT_HEIGHT: usize = 8;
pub const HEADER_LABEL_GENERATION: usize = 9;
pub const HEADER_VISIBLE_COUNT: usize = 10;

pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in each of the fixed sections (ship, Earth, indicator, info).
pub const SECTION_FLOATS: usize = 4;
pub const BODY_FLOATS: usize = BodyInstance::FLOATS;
pub const RING_FLOATS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,
    pub max_rings: usize,

    pub ship_offset: usize,
    pub earth_offset: usize,
    pub indicator_offset: usize,
    pub info_offset: usize,
    pub body_data_offset: usize,
    pub ring_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_bodies: usize, max_rings: usize) -> Self {
        let ship_offset = HEADER_FLOATS;
        let earth_offset = ship_offset + SECTION_FLOATS;
        let indicator_offset = earth_offset + SECTION_FLOATS;
        let info_offset = indicator_offset + SECTION_FLOATS;
        let body_data_offset = info_offset + SECTION_FLOATS;
        let ring_data_offset = body_data_offset + max_bodies * BODY_FLOATS;
        let buffer_total_floats = ring_data_offset + max_rings * RING_FLOATS;

        Self {
            max_bodies,
            max_rings,
            ship_offset,
            earth_offset,
            indicator_offset,
            info_offset,
            body_data_offset,
            ring_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.max_bodies, config.max_orbit_rings)
    }

    /// A zeroed buffer of the right size.
    pub fn allocate(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }

    /// Serialize one frame into `out`, which must be `buffer_total_floats` long.
    ///
    /// Bodies and rings beyond capacity are dropped from the end.
    /// Returns the number of bodies written.
    pub fn write_frame(
        &self,
        frame: &FrameCommands,
        frame_counter: u64,
        label_generation: u64,
        viewport: &Viewport,
        out: &mut [f32],
    ) -> usize {
        debug_assert_eq!(out.len(), self.buffer_total_floats);

        let bodies = &frame.bodies[..frame.bodies.len().min(self.max_bodies)];
        let rings = &frame.rings[..frame.rings.len().min(self.max_rings)];

        out[HEADER_LOCK] = 0.0;
        out[HEADER_FRAME_COUNTER] = frame_counter as f32;
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_MAX_BODIES] = self.max_bodies as f32;
        out[HEADER_BODY_COUNT] = bodies.len() as f32;
        out[HEADER_MAX_RINGS] = self.max_rings as f32;
        out[HEADER_RING_COUNT] = rings.len() as f32;
        out[HEADER_VIEWPORT_WIDTH] = viewport.width as f32;
        out[HEADER_VIEWPORT_HEIGHT] = viewport.height as f32;
        out[HEADER_LABEL_GENERATION] = label_generation as f32;
        out[HEADER_VISIBLE_COUNT] = bodies.iter().filter(|b| b.is_visible()).count() as f32;

        let ship = frame
            .ship
            .map(|s| [s.screen.x as f32, s.screen.y as f32, s.rotation_deg as f32, s.on_earth as u8 as f32])
            .unwrap_or_default();
        out[self.ship_offset..self.ship_offset + SECTION_FLOATS].copy_from_slice(&ship);

        let earth = frame
            .earth
            .map(|e| [e.screen.x as f32, e.screen.y as f32, e.diameter_px as f32, 0.0])
            .unwrap_or_default();
        out[self.earth_offset..self.earth_offset + SECTION_FLOATS].copy_from_slice(&earth);

        let ind = &frame.indicator;
        let indicator = if ind.visible {
            [ind.screen.x as f32, ind.screen.y as f32, ind.rotation_deg as f32, ind.opacity as f32]
        } else {
            [0.0; SECTION_FLOATS]
        };
        out[self.indicator_offset..self.indicator_offset + SECTION_FLOATS].copy_from_slice(&indicator);

        let info = &frame.info;
        out[self.info_offset..self.info_offset + SECTION_FLOATS].copy_from_slice(&[
            info.speed as f32,
            info.distance_from_earth_km as f32,
            info.total_asteroids as f32,
            0.0,
        ]);

        let body_end = self.body_data_offset + bodies.len() * BODY_FLOATS;
        out[self.body_data_offset..body_end].copy_from_slice(bytemuck::cast_slice(bodies));

        for (i, ring) in rings.iter().enumerate() {
            let at = self.ring_data_offset + i * RING_FLOATS;
            out[at..at + RING_FLOATS].copy_from_slice(&[
                ring.screen.x as f32,
                ring.screen.y as f32,
                ring.radius_px as f32,
                0.0,
            ]);
        }

        bodies.len()
    }
}
