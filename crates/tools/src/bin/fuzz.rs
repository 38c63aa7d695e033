use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use lanoir_core::entity::Body;
use lanoir_core::menu::TitleOption;
use lanoir_core::shop::Held;
use lanoir_core::{Direction, FrameInput, Game, GameConfig, GameMode, Key, LogEvent, World};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about = "Drives the game with random keys and checks invariants")]
struct Args {
    #[arg(long, default_value = "data")]
    data: PathBuf,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 10_000)]
    frames: u64,
}

/// Quit is left out so a run always lasts the requested number of frames.
const KEYS: [Key; 8] = [
    Key::Up,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Confirm,
    Key::Cancel,
    Key::PrevPage,
    Key::NextPage,
];

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_input(rng: &mut ChaCha8Rng, game: &Game) -> FrameInput {
    let mut input = FrameInput::default();
    match rng.next_u64() % 8 {
        0..=2 => {
            let key = choose(rng, &KEYS);
            let exits = game.mode() == GameMode::Title
                && game.title().selected() == TitleOption::Exit
                && key == Key::Confirm;
            input.pressed.push(if exits { Key::Up } else { key });
        }
        3..=5 => input.held = Some(choose(rng, &Direction::ALL)),
        _ => {}
    }
    input
}

/// Items the party owns, counting one held in hand on the shop or item screen.
fn owned_items(game: &Game) -> usize {
    let members: usize = game
        .party()
        .members()
        .iter()
        .map(|member| member.bag.occupied() + member.equipment.occupied())
        .sum();
    let in_shop_hand = game
        .shop()
        .and_then(|screen| screen.held())
        .is_some_and(|held| matches!(held, Held::Owned { .. }));
    let in_item_hand = game.items().grabbed().is_some();
    game.inventory().occupied() + members + usize::from(in_shop_hand) + usize::from(in_item_hand)
}

fn tile_aligned(body: &Body) -> bool {
    !body.is_idle() || body.pixel() == body.pos().to_pixels()
}

fn check(game: &Game, frame: u64, expected_items: usize) -> Result<()> {
    for (index, member) in game.party().members().iter().enumerate() {
        ensure!(tile_aligned(&member.body), "frame {frame}: member {index} idle between cells");
        ensure!(
            member.current_health <= member.stats.health,
            "frame {frame}: member {index} health {} over max {}",
            member.current_health,
            member.stats.health
        );
        ensure!(
            member.current_mana <= member.stats.mana,
            "frame {frame}: member {index} mana {} over max {}",
            member.current_mana,
            member.stats.mana
        );
    }
    for (id, npc) in game.map().npcs() {
        ensure!(tile_aligned(&npc.body), "frame {frame}: npc {id:?} idle between cells");
    }
    let owned = owned_items(game);
    ensure!(owned == expected_items, "frame {frame}: owns {owned} items, not {expected_items}");
    let purse = game.purse();
    ensure!(
        purse.gold() >= purse.pending(),
        "frame {frame}: gold {} below pending debit {}",
        purse.gold(),
        purse.pending()
    );
    Ok(())
}

/// Feeds `frames` random frames to `game`, checking the invariants after each.
fn run(game: &mut Game, seed: u64, frames: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut expected_items = owned_items(game);
    let mut seen = game.log().len();
    for frame in 0..frames {
        let input = random_input(&mut rng, game);
        game.tick(&input);
        game.drain_cues();

        for event in &game.log()[seen..] {
            match event {
                LogEvent::ItemBought { .. } => expected_items += 1,
                LogEvent::ItemSold { .. } | LogEvent::ItemDiscarded { .. } => {
                    expected_items = expected_items.saturating_sub(1);
                }
                _ => {}
            }
        }
        seen = game.log().len();
        check(game, frame, expected_items)?;
    }
    Ok(())
}

fn load_game(data: &Path, seed: u64) -> Result<Game> {
    let config = GameConfig::load(data).context("loading game.toml")?;
    let world = World::load(data, &config.start_map).context("loading world data")?;
    Game::new(world, config, seed).context("starting the game")
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} frames...", args.seed, args.frames);
    let mut game = load_game(&args.data, args.seed)?;
    run(&mut game, args.seed, args.frames)?;

    println!(
        "Fuzzing completed: {} frames, {} log events, snapshot {:016x}",
        game.current_tick(),
        game.log().len(),
        game.snapshot_hash()
    );
    Ok(())
}
