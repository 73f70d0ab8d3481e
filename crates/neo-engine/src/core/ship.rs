use glam::DVec2;

use crate::api::config::ShipTuning;
use crate::input::state::InputState;

/// The player's ship in world coordinates.
///
/// Heading 0° points up the screen and grows clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipState {
    pub world: DVec2,
    pub heading_deg: f64,
    /// Pixels per frame along the heading; negative while reversing.
    pub speed: f64,
    pub tuning: ShipTuning,
    /// Pinned to Earth until the first thrust. Never re-entered.
    pub on_earth: bool,
}

impl ShipState {
    /// A ship parked on Earth, pointing up.
    pub fn new(earth: DVec2, tuning: ShipTuning) -> Self {
        Self {
            world: earth,
            heading_deg: 0.0,
            speed: 0.0,
            tuning,
            on_earth: true,
        }
    }

    /// Lowest speed reachable by reversing.
    pub fn reverse_limit(&self) -> f64 {
        -self.tuning.max_speed / 2.0
    }

    /// Run one frame of the controller: rotation, then thrust, then movement.
    pub fn update(&mut self, input: &InputState, earth: DVec2) {
        self.steer(input);
        self.throttle(input);

        if self.on_earth {
            self.world = earth;
        } else {
            let h = self.heading_deg.to_radians();
            self.world.x += h.sin() * self.speed;
            self.world.y -= h.cos() * self.speed;
        }
    }

    fn steer(&mut self, input: &InputState) {
        if input.left {
            self.heading_deg -= self.tuning.rotation_speed;
        }
        if input.right {
            self.heading_deg += self.tuning.rotation_speed;
        }
    }

    fn throttle(&mut self, input: &InputState) {
        let t = self.tuning;
        if input.up {
            self.speed = (self.speed + t.acceleration).min(t.max_speed);
            self.on_earth = false;
        } else if input.down {
            self.speed = (self.speed - t.acceleration).max(self.reverse_limit());
            self.on_earth = false;
        } else if self.speed > 0.0 {
            self.speed = (self.speed - t.deceleration).max(0.0);
        } else if self.speed < 0.0 {
            self.speed = (self.speed + t.deceleration).min(0.0);
        }
    }

    /// Put the ship back on Earth's centre. Speed, heading and mode are kept.
    pub fn reset_to(&mut self, earth: DVec2) {
        self.world = earth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EARTH: DVec2 = DVec2::new(640.0, 400.0);

    fn ship() -> ShipState {
        ShipState::new(EARTH, ShipTuning::default())
    }

    fn held(up: bool, down: bool, left: bool, right: bool) -> InputState {
        InputState { up, down, left, right }
    }

    #[test]
    fn up_accelerates_then_clamps() {
        let mut s = ship();
        let up = held(true, false, false, false);
        for _ in 0..10 {
            s.update(&up, EARTH);
        }
        assert!((s.speed - 2.0).abs() < 1e-9, "speed = {}", s.speed);
        for _ in 0..20 {
            s.update(&up, EARTH);
        }
        assert_eq!(s.speed, 5.0);
    }

    #[test]
    fn reverse_is_capped_at_half() {
        let mut s = ship();
        let down = held(false, true, false, false);
        for _ in 0..100 {
            s.update(&down, EARTH);
        }
        assert_eq!(s.speed, -2.5);
    }

    #[test]
    fn speed_stays_clamped_for_any_inputs() {
        let mut s = ship();
        let mut seed = 12345u32;
        for _ in 0..5_000 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let bits = seed >> 16;
            let input = held(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
            s.update(&input, EARTH);
            assert!(s.speed <= s.tuning.max_speed && s.speed >= s.reverse_limit());
        }
    }

    #[test]
    fn coasting_decays_without_overshoot() {
        let mut s = ship();
        s.on_earth = false;
        s.speed = 0.25;
        let idle = InputState::default();
        s.update(&idle, EARTH);
        s.update(&idle, EARTH);
        assert!((s.speed - 0.05).abs() < 1e-9);
        s.update(&idle, EARTH);
        assert_eq!(s.speed, 0.0);

        s.speed = -0.15;
        s.update(&idle, EARTH);
        s.update(&idle, EARTH);
        assert_eq!(s.speed, 0.0);
    }

    #[test]
    fn pinned_to_earth_until_thrust() {
        let mut s = ship();
        let spin = held(false, false, true, false);
        for _ in 0..50 {
            s.update(&spin, EARTH);
            assert_eq!(s.world, EARTH);
        }
        assert!(s.on_earth);
        assert_eq!(s.heading_deg, -250.0);

        s.update(&held(true, false, false, false), EARTH);
        assert!(!s.on_earth);
        assert_ne!(s.world, EARTH);

        // One-way: idling never re-pins the ship.
        for _ in 0..10 {
            s.update(&InputState::default(), EARTH);
        }
        assert!(!s.on_earth);
    }

    #[test]
    fn heading_zero_moves_up_and_ninety_moves_right() {
        let mut s = ship();
        s.on_earth = false;
        s.speed = 3.0;
        s.tuning.deceleration = 0.0;
        s.update(&InputState::default(), EARTH);
        assert!((s.world.x - EARTH.x).abs() < 1e-9);
        assert!((s.world.y - (EARTH.y - 3.0)).abs() < 1e-9);

        s.heading_deg = 90.0;
        let before = s.world;
        s.update(&InputState::default(), EARTH);
        assert!((s.world.x - (before.x + 3.0)).abs() < 1e-9);
        assert!((s.world.y - before.y).abs() < 1e-9);
    }

    #[test]
    fn up_wins_over_down() {
        let mut s = ship();
        s.update(&held(true, true, false, false), EARTH);
        assert!((s.speed - 0.2).abs() < 1e-12);
    }

    #[test]
    fn reset_keeps_mode_and_speed() {
        let mut s = ship();
        s.update(&held(true, false, false, false), EARTH);
        s.world = DVec2::new(5_000.0, -300.0);
        s.reset_to(EARTH);
        assert_eq!(s.world, EARTH);
        assert!(!s.on_earth);
        assert!(s.speed > 0.0);
    }
}
