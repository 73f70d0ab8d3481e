use super::queue::InputEvent;

pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;

/// The four logical ship controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// Arrow keys map to buttons; every other key is ignored.
    pub fn from_key_code(key_code: u32) -> Option<Self> {
        match key_code {
            KEY_UP => Some(Button::Up),
            KEY_DOWN => Some(Button::Down),
            KEY_LEFT => Some(Button::Left),
            KEY_RIGHT => Some(Button::Right),
            _ => None,
        }
    }
}

/// Which buttons are currently held. Read by the ship controller, never owned by it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn set(&mut self, button: Button, pressed: bool) {
        match button {
            Button::Up => self.up = pressed,
            Button::Down => self.down = pressed,
            Button::Left => self.left = pressed,
            Button::Right => self.right = pressed,
        }
    }

    pub fn press(&mut self, button: Button) {
        self.set(button, true);
    }

    pub fn release(&mut self, button: Button) {
        self.set(button, false);
    }

    /// Apply a key edge. Returns false for events that are not button edges.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        let (key_code, pressed) = match *event {
            InputEvent::KeyDown { key_code } => (key_code, true),
            InputEvent::KeyUp { key_code } => (key_code, false),
            InputEvent::Custom { .. } => return false,
        };
        match Button::from_key_code(key_code) {
            Some(button) => {
                self.set(button, pressed);
                true
            }
            None => false,
        }
    }
}
