use std::path::{Path, PathBuf};

use lanoir_app::app_loop::{AppFlow, AppState};
use lanoir_app::settings::Levels;
use lanoir_core::{Cue, Game, GameConfig, GameMode, MusicCue, SoundCue, World};
use macroquad::prelude::KeyCode;

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn new_app(seed: u64) -> AppState {
    let mut config = GameConfig::load(&data_dir()).expect("game.toml");
    config.encounter_rate = 0.0;
    let world = World::load(&data_dir(), &config.start_map).expect("world loads");
    let game = Game::new(world, config, seed).expect("game starts");
    AppState::new(game, Levels::default())
}

#[test]
fn space_on_the_title_starts_the_game_with_map_music() {
    let mut app = new_app(1);
    assert_eq!(app.game.mode(), GameMode::Title);
    assert_eq!(app.drain_cues(), vec![Cue::Music(MusicCue::Title)]);

    assert_eq!(app.tick(&[KeyCode::Space], &[]), AppFlow::Continue);
    assert_eq!(app.game.mode(), GameMode::Field);
    let cues = app.drain_cues();
    assert!(cues.contains(&Cue::Sound(SoundCue::Cursor)));
    assert!(cues.contains(&Cue::Music(MusicCue::Map("field".to_string()))));
}

#[test]
fn escape_exits_from_the_field() {
    let mut app = new_app(2);
    app.tick(&[KeyCode::Space], &[]);
    assert_eq!(app.tick(&[KeyCode::Escape], &[]), AppFlow::Exit);
    assert!(app.game.quit_requested());
}

#[test]
fn q_closes_the_command_window() {
    let mut app = new_app(3);
    app.tick(&[KeyCode::Space], &[]);
    app.tick(&[KeyCode::Space], &[]);
    assert_eq!(app.game.mode(), GameMode::CommandMenu);
    app.tick(&[KeyCode::Q], &[]);
    assert_eq!(app.game.mode(), GameMode::Field);
}

#[test]
fn held_arrow_walks_the_leader_one_cell() {
    let mut app = new_app(4);
    app.tick(&[KeyCode::Space], &[]);
    let start = app.game.party().leader().body.pos();
    app.tick(&[], &[KeyCode::Right]);
    while !app.game.party().leader_is_idle() {
        app.tick(&[], &[]);
    }
    let end = app.game.party().leader().body.pos();
    assert_eq!((end.x - start.x, end.y), (1, start.y));
}

#[test]
fn f1_toggles_the_debug_overlay_without_touching_the_game() {
    let mut app = new_app(5);
    app.tick(&[KeyCode::Space], &[]);
    let mode = app.game.mode();
    app.tick(&[KeyCode::F1], &[]);
    assert!(app.show_debug);
    assert_eq!(app.game.mode(), mode);
    app.tick(&[KeyCode::F1], &[]);
    assert!(!app.show_debug);
}

#[test]
fn volume_keys_mark_settings_dirty_until_clamped() {
    let mut app = new_app(6);
    app.tick(&[KeyCode::Equal], &[]);
    assert!(app.settings_dirty);
    assert!(app.levels.music_volume > Levels::default().music_volume);

    app.settings_dirty = false;
    for _ in 0..40 {
        app.tick(&[KeyCode::Equal], &[]);
    }
    app.settings_dirty = false;
    app.tick(&[KeyCode::Equal], &[]);
    assert!(!app.settings_dirty, "already at full volume");
}

#[test]
fn bracket_keys_change_only_the_effect_volume() {
    let mut app = new_app(7);
    app.tick(&[KeyCode::RightBracket], &[]);
    assert!(app.settings_dirty);
    assert!(app.levels.effect_volume > Levels::default().effect_volume);
    assert_eq!(app.levels.music_volume, Levels::default().music_volume);

    app.tick(&[KeyCode::LeftBracket, KeyCode::LeftBracket], &[]);
    assert_eq!(app.levels.effect_volume, 0.0);
}
