/// Input event types the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed (DOM `keyCode`).
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A control from the UI layer (reset button, viewport resize).
    /// `kind` identifies the control; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Custom event: move the ship back to Earth.
pub const CUSTOM_RESET: u32 = 1;
/// Custom event: viewport resized to `a` × `b` pixels.
pub const CUSTOM_RESIZE: u32 = 99;

/// Events received between frames.
/// The host pushes key edges as they happen; the scheduler folds them into
/// `InputState` at the start of the next tick, so a frame never sees a half-applied edge.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
