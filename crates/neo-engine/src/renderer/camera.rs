use glam::DVec2;

/// Screen area the renderer draws into, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn centre(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Whether a screen point lies inside the viewport grown by `buffer` on every side.
    /// Points exactly on the edge count as inside.
    pub fn contains(&self, screen: DVec2, buffer: f64) -> bool {
        screen.x >= -buffer
            && screen.x <= self.width + buffer
            && screen.y >= -buffer
            && screen.y <= self.height + buffer
    }
}

/// Camera that keeps the ship at screen centre.
/// The offset is recomputed from the ship every frame and never smoothed,
/// so there is no state of its own beyond the last derived value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraState {
    /// World position of the screen's top-left corner.
    pub offset: DVec2,
}

impl CameraState {
    pub fn new() -> Self {
        Self { offset: DVec2::ZERO }
    }

    /// Centre the view on `target`.
    pub fn follow(&mut self, target: DVec2, viewport: &Viewport) {
        self.offset = target - viewport.centre();
    }

    pub fn to_screen(&self, world: DVec2) -> DVec2 {
        world - self.offset
    }

    pub fn to_world(&self, screen: DVec2) -> DVec2 {
        screen + self.offset
    }

    /// Whether a world point should be drawn, allowing `buffer` pixels of slack.
    pub fn is_visible(&self, world: DVec2, viewport: &Viewport, buffer: f64) -> bool {
        viewport.contains(self.to_screen(world), buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_puts_target_at_centre() {
        let viewport = Viewport::new(1280.0, 800.0);
        let mut cam = CameraState::new();
        let ship = DVec2::new(-3_000.0, 12_345.5);
        cam.follow(ship, &viewport);
        assert_eq!(cam.to_screen(ship), viewport.centre());
        assert_eq!(cam.to_world(viewport.centre()), ship);
    }

    #[test]
    fn buffer_edge_is_inclusive() {
        let viewport = Viewport::new(800.0, 600.0);
        let cam = CameraState::new();
        assert!(cam.is_visible(DVec2::new(-100.0, 300.0), &viewport, 100.0));
        assert!(cam.is_visible(DVec2::new(900.0, 700.0), &viewport, 100.0));
        assert!(!cam.is_visible(DVec2::new(-100.001, 300.0), &viewport, 100.0));
        assert!(!cam.is_visible(DVec2::new(400.0, 700.5), &viewport, 100.0));
    }

    #[test]
    fn visibility_uses_camera_offset() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut cam = CameraState::new();
        cam.follow(DVec2::new(10_000.0, 0.0), &viewport);
        assert!(!cam.is_visible(DVec2::new(400.0, 300.0), &viewport, 100.0));
        assert!(cam.is_visible(DVec2::new(10_200.0, 50.0), &viewport, 100.0));
    }

    #[test]
    fn min_dimension_picks_smaller_side() {
        assert_eq!(Viewport::new(1280.0, 800.0).min_dimension(), 800.0);
        assert_eq!(Viewport::new(600.0, 900.0).min_dimension(), 600.0);
    }
}
