use bytemuck::{Pod, Zeroable};
use glam::DVec2;

use crate::api::types::{BodyId, BodyKind};

/// The ship is always drawn at screen centre; only its rotation changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipCommand {
    pub screen: DVec2,
    pub rotation_deg: f64,
    pub on_earth: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthCommand {
    pub screen: DVec2,
    pub diameter_px: f64,
}

/// Reference orbit circle centred on Earth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingCommand {
    pub screen: DVec2,
    pub radius_px: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailCommand {
    pub rotation_deg: f64,
    pub length_px: f64,
}

/// Per-frame state of one body. Hidden bodies are still reported with
/// `visible = false` so the renderer can hide the node, its tail and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCommand<'a> {
    /// Position of the body in the field's iteration order.
    pub index: usize,
    pub id: &'a BodyId,
    pub kind: BodyKind,
    pub screen: DVec2,
    pub diameter_px: f64,
    pub visible: bool,
    pub hazardous: bool,
    pub sentry: bool,
    /// Asteroids only.
    pub tail: Option<TailCommand>,
    pub tooltip: &'a str,
}

/// "Direction to Earth" arrow around the ship.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorCommand {
    pub screen: DVec2,
    pub rotation_deg: f64,
    pub opacity: f64,
    pub visible: bool,
}

/// Summary shown in the info panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InfoPanel {
    pub speed: f64,
    pub distance_from_earth_km: f64,
    pub total_asteroids: usize,
}

impl InfoPanel {
    /// Panel lines in display order.
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Speed: {:.1} px/s", self.speed),
            format!("Distance from Earth: {:.2}M km", self.distance_from_earth_km / 1_000_000.0),
            format!("Total Asteroids: {}", self.total_asteroids),
        ]
    }
}

/// Receiver of per-frame presentation state.
///
/// The simulation never reads anything back from the renderer.
/// Within a frame the calls arrive in order: ship, Earth, rings, bodies,
/// indicator, info panel.
pub trait Renderer {
    fn begin_frame(&mut self) {}
    fn ship(&mut self, cmd: &ShipCommand);
    fn earth(&mut self, cmd: &EarthCommand);
    fn ring(&mut self, cmd: &RingCommand);
    fn body(&mut self, cmd: &BodyCommand<'_>);
    fn indicator(&mut self, cmd: &IndicatorCommand);
    fn info_panel(&mut self, panel: &InfoPanel);
}

/// Body state in wire form: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub diameter: f32,
    /// 1.0 when drawn, 0.0 when hidden.
    pub visible: f32,
    /// `BodyKind::wire_tag`.
    pub kind: f32,
    /// Bit 0 hazardous, bit 1 sentry.
    pub flags: f32,
    pub tail_rotation: f32,
    /// Zero for bodies without a tail.
    pub tail_length: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const FLAG_HAZARDOUS: u32 = 1;
    pub const FLAG_SENTRY: u32 = 2;

    pub fn from_command(cmd: &BodyCommand<'_>) -> Self {
        let mut flags = 0;
        if cmd.hazardous {
            flags |= Self::FLAG_HAZARDOUS;
        }
        if cmd.sentry {
            flags |= Self::FLAG_SENTRY;
        }
        let (tail_rotation, tail_length) = cmd
            .tail
            .map(|t| (t.rotation_deg as f32, t.length_px as f32))
            .unwrap_or((0.0, 0.0));
        Self {
            x: cmd.screen.x as f32,
            y: cmd.screen.y as f32,
            diameter: cmd.diameter_px as f32,
            visible: if cmd.visible { 1.0 } else { 0.0 },
            kind: cmd.kind.wire_tag(),
            flags: flags as f32,
            tail_rotation,
            tail_length,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible > 0.5
    }
}

/// Collects one frame of commands. Cleared at the start of every frame.
#[derive(Debug, Default)]
pub struct FrameCommands {
    pub ship: Option<ShipCommand>,
    pub earth: Option<EarthCommand>,
    pub rings: Vec<RingCommand>,
    pub bodies: Vec<BodyInstance>,
    pub indicator: IndicatorCommand,
    pub info: InfoPanel,
}

impl FrameCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ship = None;
        self.earth = None;
        self.rings.clear();
        self.bodies.clear();
        self.indicator = IndicatorCommand::default();
        self.info = InfoPanel::default();
    }
}

impl Renderer for FrameCommands {
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn ship(&mut self, cmd: &ShipCommand) {
        self.ship = Some(*cmd);
    }

    fn earth(&mut self, cmd: &EarthCommand) {
        self.earth = Some(*cmd);
    }

    fn ring(&mut self, cmd: &RingCommand) {
        self.rings.push(*cmd);
    }

    fn body(&mut self, cmd: &BodyCommand<'_>) {
        self.bodies.push(BodyInstance::from_command(cmd));
    }

    fn indicator(&mut self, cmd: &IndicatorCommand) {
        self.indicator = *cmd;
    }

    fn info_panel(&mut self, panel: &InfoPanel) {
        self.info = *panel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 32);
        assert_eq!(BodyInstance::FLOATS, 8);
    }

    #[test]
    fn instance_packs_flags_and_tail() {
        let id = BodyId::from("3542519");
        let cmd = BodyCommand {
            index: 0,
            id: &id,
            kind: BodyKind::Asteroid,
            screen: DVec2::new(12.5, -4.0),
            diameter_px: 9.0,
            visible: true,
            hazardous: true,
            sentry: true,
            tail: Some(TailCommand { rotation_deg: 270.0, length_px: 66.0 }),
            tooltip: "",
        };
        let inst = BodyInstance::from_command(&cmd);
        assert_eq!(inst.flags, 3.0);
        assert_eq!(inst.kind, 1.0);
        assert_eq!(inst.tail_length, 66.0);
        assert!(inst.is_visible());
    }

    #[test]
    fn begin_frame_clears_previous_frame() {
        let mut frame = FrameCommands::new();
        frame.ring(&RingCommand { screen: DVec2::ZERO, radius_px: 10.0 });
        frame.info_panel(&InfoPanel { speed: 1.0, distance_from_earth_km: 0.0, total_asteroids: 3 });
        frame.begin_frame();
        assert!(frame.rings.is_empty());
        assert_eq!(frame.info.total_asteroids, 0);
    }

    #[test]
    fn info_panel_text() {
        let panel = InfoPanel { speed: 2.04, distance_from_earth_km: 3_456_000.0, total_asteroids: 17 };
        let [speed, distance, total] = panel.lines();
        assert_eq!(speed, "Speed: 2.0 px/s");
        assert_eq!(distance, "Distance from Earth: 3.46M km");
        assert_eq!(total, "Total Asteroids: 17");
    }
}
