//! Keyboard input collection for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};

const EDGE_KEYS: [KeyCode; 20] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Space,
    KeyCode::Enter,
    KeyCode::Q,
    KeyCode::Backspace,
    KeyCode::A,
    KeyCode::D,
    KeyCode::Escape,
    KeyCode::F1,
    KeyCode::Equal,
    KeyCode::Minus,
    KeyCode::RightBracket,
    KeyCode::LeftBracket,
    KeyCode::PageUp,
    KeyCode::PageDown,
    KeyCode::KpAdd,
    KeyCode::KpSubtract,
];

const HELD_KEYS: [KeyCode; 4] = [KeyCode::Down, KeyCode::Left, KeyCode::Right, KeyCode::Up];

#[derive(Default)]
pub struct RawKeys {
    pub pressed: Vec<KeyCode>,
    pub held: Vec<KeyCode>,
}

pub fn capture_frame_input() -> RawKeys {
    let pressed = EDGE_KEYS
        .into_iter()
        .filter(|&key| is_key_pressed(key))
        .map(|key| match key {
            KeyCode::KpAdd => KeyCode::Equal,
            KeyCode::KpSubtract => KeyCode::Minus,
            other => other,
        })
        .collect();
    let held = HELD_KEYS.into_iter().filter(|&key| is_key_down(key)).collect();
    RawKeys { pressed, held }
}
