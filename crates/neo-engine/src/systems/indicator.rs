use glam::DVec2;

use crate::renderer::commands::IndicatorCommand;

/// Placement rules for the arrow pointing back to Earth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorRules {
    /// Distance of the arrow from screen centre.
    pub distance_px: f64,
    /// Ship-to-Earth distance below which the arrow is hidden.
    pub threshold_px: f64,
    /// Ship-to-Earth distance at which the arrow is fully opaque.
    pub fade_px: f64,
}

/// Compute the Earth arrow for this frame.
///
/// Hidden while the ship is parked on Earth or closer than the threshold.
/// Otherwise it sits on a circle around the screen centre, rotated toward Earth,
/// and fades from half to full opacity with distance.
pub fn earth_indicator(
    ship: DVec2,
    earth: DVec2,
    on_earth: bool,
    screen_centre: DVec2,
    rules: &IndicatorRules,
) -> IndicatorCommand {
    if on_earth {
        return IndicatorCommand::default();
    }

    let to_earth = earth - ship;
    let distance = to_earth.length();
    if distance < rules.threshold_px {
        return IndicatorCommand::default();
    }

    let angle = to_earth.y.atan2(to_earth.x);
    IndicatorCommand {
        screen: screen_centre + rules.distance_px * DVec2::new(angle.cos(), angle.sin()),
        rotation_deg: angle.to_degrees(),
        opacity: 0.5 + 0.5 * (distance / rules.fade_px).min(1.0),
        visible: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: IndicatorRules = IndicatorRules {
        distance_px: 100.0,
        threshold_px: 150.0,
        fade_px: 1000.0,
    };
    const CENTRE: DVec2 = DVec2::new(400.0, 300.0);

    #[test]
    fn hidden_on_earth() {
        let cmd = earth_indicator(DVec2::new(5_000.0, 0.0), DVec2::ZERO, true, CENTRE, &RULES);
        assert!(!cmd.visible);
        assert_eq!(cmd.opacity, 0.0);
    }

    #[test]
    fn hidden_when_close() {
        let cmd = earth_indicator(DVec2::new(149.9, 0.0), DVec2::ZERO, false, CENTRE, &RULES);
        assert!(!cmd.visible);
        let cmd = earth_indicator(DVec2::new(150.0, 0.0), DVec2::ZERO, false, CENTRE, &RULES);
        assert!(cmd.visible);
    }

    #[test]
    fn points_toward_earth() {
        // Earth directly to the left of the ship.
        let cmd = earth_indicator(DVec2::new(500.0, 0.0), DVec2::ZERO, false, CENTRE, &RULES);
        assert!((cmd.rotation_deg - 180.0).abs() < 1e-9);
        assert!((cmd.screen.x - 300.0).abs() < 1e-9);
        assert!((cmd.screen.y - 300.0).abs() < 1e-9);
        assert!((cmd.opacity - 0.75).abs() < 1e-12);
    }

    #[test]
    fn full_opacity_when_far() {
        let cmd = earth_indicator(DVec2::new(0.0, -4_000.0), DVec2::ZERO, false, CENTRE, &RULES);
        assert_eq!(cmd.opacity, 1.0);
        assert!((cmd.rotation_deg - 90.0).abs() < 1e-9);
        assert!((cmd.screen.y - 400.0).abs() < 1e-9);
    }
}
