use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Env};
use lanoir_core::world::MapDefinition;
use lanoir_core::{GameConfig, World};

/// Loads a data directory the way the game does and prints what it found.
#[derive(Parser, Debug)]
#[command(name = "lanoir-tools")]
struct Args {
    /// Directory holding game.toml, maps, event scripts and catalogs.
    #[arg(long, default_value = "data")]
    data: PathBuf,
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn describe_map(map: &MapDefinition) -> String {
    let bgm = map.bgm.as_deref().unwrap_or("-");
    let destinations: Vec<&str> = map.destinations().collect();
    format!(
        "{:<12} {:>3}x{:<3} events {:>3}  npcs {:>2}  enemies {:>2}  bgm {bgm}  exits [{}]",
        map.name,
        map.grid.columns(),
        map.grid.rows(),
        map.events.len(),
        map.npcs.len(),
        map.enemies.len(),
        destinations.join(", ")
    )
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    log::info!("inspecting {}", args.data.display());
    let config = GameConfig::load(&args.data)
        .with_context(|| format!("loading configuration from {}", args.data.display()))?;
    let world = World::load(&args.data, &config.start_map)
        .with_context(|| format!("loading world data from {}", args.data.display()))?;

    println!("Data: {}", args.data.display());
    println!(
        "Start map: {}  encounter rate {}  auto-move rate {}  gold {}",
        config.start_map, config.encounter_rate, config.auto_move_rate, config.starting_gold
    );

    println!("\nMaps:");
    for map in world.maps() {
        let marker = if config.encounter_maps.contains(&map.name) { "*" } else { " " };
        println!("{marker} {}", describe_map(map));
    }

    println!("\nShops:");
    for shop in world.shops() {
        let names: Vec<&str> = shop.items.iter().map(|item| item.name.as_str()).collect();
        println!("  {:<12} {}", shop.name, names.join(", "));
    }

    println!("\nEnemies:");
    for id in 0..world.enemies.len() as u32 {
        if let Some(template) = world.enemies.get(id) {
            let stats = template.stats;
            println!(
                "  {id:>3} {:<16} hp {:>4}  atk {:>3}  exp {:>4}",
                template.name, stats.health, stats.attack, template.experience
            );
        }
    }

    println!(
        "\nCatalogs: {} tiles, {} sprite sheets, {} items",
        world.tiles.iter().count(),
        world.sprites.names().count(),
        world.items.len()
    );
    Ok(())
}
