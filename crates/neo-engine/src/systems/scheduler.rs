use crate::core::simulation::Simulation;
use crate::core::time::FixedTimestep;
use crate::input::queue::InputQueue;
use crate::renderer::commands::Renderer;

/// Anything that hands out host frame intervals: a browser animation
/// callback, a test script, a headless timer.
pub trait FrameSource {
    /// Seconds since the previous frame, or `None` when the source is exhausted.
    fn next_frame(&mut self) -> Option<f32>;
}

/// Drives the simulation from host frame callbacks.
///
/// Input edges queued since the last callback are applied first, then as many
/// fixed frames as the elapsed time covers.
pub struct Scheduler {
    timestep: FixedTimestep,
    running: bool,
    frames: u64,
}

impl Scheduler {
    pub fn new(fixed_dt: f32, max_steps: u32) -> Self {
        Self {
            timestep: FixedTimestep::new(fixed_dt).with_max_steps(max_steps),
            running: false,
            frames: 0,
        }
    }

    /// Begin stepping. Called once the initial data has loaded.
    pub fn start(&mut self) {
        self.timestep.reset();
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("scheduler stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Total simulation frames run.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Handle one host callback. Returns the number of simulation frames run.
    pub fn tick<R: Renderer>(
        &mut self,
        sim: &mut Simulation,
        input: &mut InputQueue,
        dt: f32,
        renderer: &mut R,
    ) -> u32 {
        if !self.running {
            return 0;
        }

        for event in input.drain() {
            sim.handle_input(&event);
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            sim.step(renderer);
        }
        self.frames += steps as u64;
        steps
    }

    /// Pull frames from `source` until it runs dry or the scheduler is stopped.
    pub fn run<S: FrameSource, R: Renderer>(
        &mut self,
        source: &mut S,
        sim: &mut Simulation,
        input: &mut InputQueue,
        renderer: &mut R,
    ) -> u64 {
        let start = self.frames;
        while self.running {
            match source.next_frame() {
                Some(dt) => {
                    self.tick(sim, input, dt, renderer);
                }
                None => break,
            }
        }
        self.frames - start
    }
}
