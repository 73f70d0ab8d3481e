/// Converts variable host refresh intervals into whole simulation frames.
///
/// Orbital speeds are expressed per frame at 60 fps, so a 120 Hz display must
/// not double the apparent speed and a dropped refresh must not halve it.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Duration of one simulation frame.
    dt: f32,
    /// Host time not yet consumed by whole frames.
    accumulator: f32,
    /// Upper bound on frames per host callback (after a stall, e.g. a hidden tab).
    max_steps: u32,
    /// Time within this much of a whole frame counts as that frame.
    snap: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: 10,
            snap: dt * 0.25,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add host frame time. Returns the number of simulation frames to run.
    ///
    /// A callback arriving slightly early still runs its frame; the shortfall
    /// is carried as a small negative balance and paid back by later callbacks.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let steps = ((self.accumulator + self.snap) / self.dt) as u32;
        if steps >= self.max_steps {
            // Too far behind: run the cap and drop the backlog.
            self.accumulator = 0.0;
            return self.max_steps;
        }
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Drop any partial frame, e.g. when the loop restarts.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
