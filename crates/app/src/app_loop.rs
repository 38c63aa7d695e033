use lanoir_core::{Cue, Direction, FrameInput, Game, Key};
use macroquad::prelude::KeyCode;

use crate::settings::{Levels, SettingsAction};

/// Checked in this order when several arrows are held at once.
const HELD_PRIORITY: [(KeyCode, Direction); 4] = [
    (KeyCode::Down, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
    (KeyCode::Up, Direction::Up),
];

pub fn game_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Space | KeyCode::Enter => Some(Key::Confirm),
        KeyCode::Q | KeyCode::Backspace => Some(Key::Cancel),
        KeyCode::A => Some(Key::PrevPage),
        KeyCode::D => Some(Key::NextPage),
        KeyCode::Escape => Some(Key::Quit),
        _ => None,
    }
}

fn settings_action(code: KeyCode) -> Option<SettingsAction> {
    match code {
        KeyCode::Equal => Some(SettingsAction::LouderMusic),
        KeyCode::Minus => Some(SettingsAction::QuieterMusic),
        KeyCode::RightBracket => Some(SettingsAction::LouderEffects),
        KeyCode::LeftBracket => Some(SettingsAction::QuieterEffects),
        KeyCode::PageUp => Some(SettingsAction::LargerWindow),
        KeyCode::PageDown => Some(SettingsAction::SmallerWindow),
        _ => None,
    }
}

/// Builds the simulation input for one frame from raw key state.
pub fn translate(pressed: &[KeyCode], held: &[KeyCode]) -> FrameInput {
    let mut keys: Vec<Key> = Vec::new();
    for key in pressed.iter().copied().filter_map(game_key) {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    let held = HELD_PRIORITY
        .iter()
        .find(|(code, _)| held.contains(code))
        .map(|&(_, direction)| direction);
    FrameInput { pressed: keys, held }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppFlow {
    Continue,
    Exit,
}

pub struct AppState {
    pub game: Game,
    pub levels: Levels,
    pub show_debug: bool,
    /// Set when `levels` changed and should be written back to disk.
    pub settings_dirty: bool,
}

impl AppState {
    pub fn new(game: Game, levels: Levels) -> Self {
        Self { game, levels, show_debug: false, settings_dirty: false }
    }

    /// Process input and logic for a single frame, returning whether we should continue.
    pub fn tick(&mut self, pressed: &[KeyCode], held: &[KeyCode]) -> AppFlow {
        if pressed.contains(&KeyCode::F1) {
            self.show_debug = !self.show_debug;
        }
        for action in pressed.iter().copied().filter_map(settings_action) {
            let next = self.levels.apply(action);
            if next != self.levels {
                log::debug!("settings {action:?}: {next:?}");
                self.levels = next;
                self.settings_dirty = true;
            }
        }

        self.game.tick(&translate(pressed, held));

        if self.game.quit_requested() { AppFlow::Exit } else { AppFlow::Continue }
    }

    pub fn drain_cues(&mut self) -> Vec<Cue> {
        self.game.drain_cues()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_and_q_map_to_confirm_and_cancel() {
        let input = translate(&[KeyCode::Space, KeyCode::Q], &[]);
        assert_eq!(input.pressed, vec![Key::Confirm, Key::Cancel]);
        assert_eq!(input.held, None);
    }

    #[test]
    fn duplicate_bindings_press_once() {
        let input = translate(&[KeyCode::Space, KeyCode::Enter], &[]);
        assert_eq!(input.pressed, vec![Key::Confirm]);
    }

    #[test]
    fn held_arrows_resolve_by_priority() {
        let input = translate(&[], &[KeyCode::Up, KeyCode::Left]);
        assert_eq!(input.held, Some(Direction::Left));
        let input = translate(&[], &[KeyCode::Up, KeyCode::Down, KeyCode::Right]);
        assert_eq!(input.held, Some(Direction::Down));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert!(translate(&[KeyCode::Z, KeyCode::F1], &[KeyCode::W]).is_idle());
    }

    #[test]
    fn page_keys_follow_a_and_d() {
        assert_eq!(game_key(KeyCode::A), Some(Key::PrevPage));
        assert_eq!(game_key(KeyCode::D), Some(Key::NextPage));
        assert_eq!(game_key(KeyCode::Escape), Some(Key::Quit));
    }

    #[test]
    fn brackets_adjust_effects_not_the_game() {
        assert_eq!(settings_action(KeyCode::RightBracket), Some(SettingsAction::LouderEffects));
        assert_eq!(settings_action(KeyCode::LeftBracket), Some(SettingsAction::QuieterEffects));
        assert!(translate(&[KeyCode::RightBracket, KeyCode::LeftBracket], &[]).is_idle());
    }
}
