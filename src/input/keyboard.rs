//! Keyboard mapping for the driving controls.

use egui::{InputState, Key};

use super::Controls;

/// Key bindings for the driving intents. Every intent accepts any of its
/// bound keys, so WASD and the arrow keys both work out of the box.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub gas: Vec<Key>,
    pub brake: Vec<Key>,
    pub steer_left: Vec<Key>,
    pub steer_right: Vec<Key>,
    pub reverse: Vec<Key>,
    /// Toggles decoration billboards and the player car.
    pub toggle_sprites: Key,
    /// Restarts the race once it has ended.
    pub restart: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            gas: vec![Key::W, Key::ArrowUp],
            brake: vec![Key::S, Key::ArrowDown],
            steer_left: vec![Key::A, Key::ArrowLeft],
            steer_right: vec![Key::D, Key::ArrowRight],
            reverse: vec![Key::X],
            toggle_sprites: Key::Num0,
            restart: Key::R,
        }
    }
}

impl KeyBindings {
    /// Sample the currently held keys into driving intents.
    pub fn sample(&self, input: &InputState) -> Controls {
        let down = |keys: &[Key]| keys.iter().any(|key| input.key_down(*key));
        Controls {
            gas: down(&self.gas),
            brake: down(&self.brake),
            steer_left: down(&self.steer_left),
            steer_right: down(&self.steer_right),
            reverse: down(&self.reverse),
        }
    }

    /// True on the frame the sprite toggle was pressed.
    pub fn sprite_toggle_pressed(&self, input: &InputState) -> bool {
        input.key_pressed(self.toggle_sprites)
    }

    /// True on the frame the restart key was pressed.
    pub fn restart_pressed(&self, input: &InputState) -> bool {
        input.key_pressed(self.restart)
    }
}
