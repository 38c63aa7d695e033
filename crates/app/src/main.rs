mod assets;
mod audio;
mod frame_input;
mod game_layout;
mod render;
mod ui_text;
mod window_config;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, anyhow};
use clap::Parser;
use env_logger::{Builder, Env};
use lanoir_app::app_loop::{AppFlow, AppState};
use lanoir_app::seed::{generate_runtime_seed, resolve_seed};
use lanoir_app::settings::Levels;
use lanoir_app::settings_file::SettingsFile;
use lanoir_app::{APP_NAME, format_snapshot_hash};
use lanoir_core::{Game, GameConfig, World};
use macroquad::prelude::*;

use crate::assets::Assets;
use crate::audio::Audio;
use crate::frame_input::capture_frame_input;
use crate::game_layout::ScreenLayouts;
use crate::window_config::{SCREEN_HEIGHT, SCREEN_WIDTH, build_window_conf, runtime_window_scale};

#[derive(Parser, Debug)]
#[command(name = "lanoir", about = APP_NAME)]
struct Args {
    /// Directory holding maps, event scripts, catalogs and game.toml.
    #[arg(long, default_value = "data")]
    data: PathBuf,
    /// Directory holding images, fonts, sound effects and music.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
    /// Fixed seed; otherwise game.toml's seed, otherwise a fresh one.
    #[arg(long)]
    seed: Option<u64>,
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn persisted_levels() -> (Option<PathBuf>, Option<Levels>) {
    let path = SettingsFile::get_default_path();
    let levels = path.as_deref().and_then(|path| match SettingsFile::load(path) {
        Ok(file) => Some(file.levels()),
        Err(err) => {
            log::debug!("no saved settings at {}: {err}", path.display());
            None
        }
    });
    (path, levels)
}

fn window_conf() -> Conf {
    let (_, levels) = persisted_levels();
    build_window_conf(runtime_window_scale(levels.map(|levels| levels.window_scale)))
}

fn new_game(data: &Path, cli_seed: Option<u64>) -> anyhow::Result<Game> {
    let config = GameConfig::load(data)
        .with_context(|| format!("failed to read configuration from {}", data.display()))?;
    let seed = resolve_seed(cli_seed, config.seed, generate_runtime_seed());
    log::info!("seed {} ({})", seed.value(), seed.source());
    let world = World::load(data, &config.start_map)
        .with_context(|| format!("failed to load the world from {}", data.display()))?;
    Game::new(world, config, seed.value()).context("failed to start a new game")
}

fn save_levels(path: Option<&Path>, levels: Levels) {
    let Some(path) = path else { return };
    if let Err(err) = SettingsFile::from_levels(levels).write_atomic(path) {
        log::warn!("could not save settings to {}: {err}", path.display());
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let (settings_path, persisted) = persisted_levels();
    let mut levels = persisted.unwrap_or_default();
    let scale = runtime_window_scale(persisted.map(|levels| levels.window_scale));
    levels.window_scale = scale;

    let game = new_game(&args.data, args.seed)?;
    let layouts = ScreenLayouts::compute(SCREEN_WIDTH, SCREEN_HEIGHT)
        .map_err(|err| anyhow!("screen layout failed: {err}"))?;
    let assets = Assets::load(&args.assets, &game).await;
    let mut audio = Audio::load(&args.assets, &game, levels).await;
    let mut app = AppState::new(game, levels);

    loop {
        let keys = capture_frame_input();
        let flow = app.tick(&keys.pressed, &keys.held);
        for cue in app.drain_cues() {
            audio.play(&cue);
        }
        if app.settings_dirty {
            audio.set_levels(app.levels);
            save_levels(settings_path.as_deref(), app.levels);
            app.settings_dirty = false;
        }
        if flow == AppFlow::Exit {
            break;
        }

        render::draw_frame(&app, &assets, &layouts, scale);
        next_frame().await;
    }

    log::info!(
        "quit at tick {} with snapshot {}",
        app.game.current_tick(),
        format_snapshot_hash(app.game.snapshot_hash())
    );
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();
    Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    if let Err(err) = run(args).await {
        log::error!("{err:#}");
        process::exit(1);
    }
}
