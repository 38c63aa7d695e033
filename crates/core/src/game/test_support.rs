//! Shared fixtures for unit tests across the crate.
//!
//! `town` (12x12): the party starts at (3, 5) facing down, on a chest of
//! `agl`. A door sits below, a counter and its clerk to the right and a
//! passage to `cave` on the left. `cave` (6x6) has a villager just below
//! the arrival cell. Both maps spawn slimes.

use super::*;
use crate::content::{
    DOOR_TILE, EnemyCatalog, EnemyTemplate, SpriteCatalog, TREASURE_TILE, TileCatalog, TileInfo,
    WIDE_OBJECT_TILE,
};
use crate::data::DataFile;
use crate::event::EventScript;
use crate::item::{Item, ItemCatalog, ItemClass};
use crate::map::TileGrid;
use crate::shop::Shop;
use crate::stats::CombatStats;
use crate::world::MapDefinition;

pub(crate) const GRASS: u8 = 0;
pub(crate) const WALL: u8 = 1;
pub(crate) const PASSAGE: u8 = 2;

pub(crate) const TOWN_EVENTS: &str = "\
BGM,town
TREASURE,3,5,agl
DOOR,3,6
OBJECT,4,5,41
CLERK,merchant,4,4,5,5,1,0,Welcome,weapons
MOVE,2,5,2,cave,2,2
Enemy,0,2
";

pub(crate) const CAVE_EVENTS: &str = "\
BGM,cave
CHARACTER,villager,4,4,2,3,3,0,Deep in here/nobody visits.%Take care.
MOVE,0,0,2,town,8,8
Enemy,0,1
";

pub(crate) fn sample_item(name: &str, price: u32) -> Item {
    Item {
        name: name.to_string(),
        description: format!("a plain {name}"),
        class: ItemClass::Sword,
        power: 3,
        price,
    }
}

pub(crate) fn sample_party() -> Party {
    sample_world().starting_party().expect("default roster builds")
}

pub(crate) fn sample_tiles() -> TileCatalog {
    let mut tiles = TileCatalog::default();
    let mut tile = |id: u8, name: &str, walkable: bool| {
        tiles.insert(id, TileInfo { name: name.to_string(), walkable });
    };
    tile(GRASS, "grass", true);
    tile(WALL, "wall", false);
    tile(PASSAGE, "stairs", true);
    tile(WIDE_OBJECT_TILE, "counter", false);
    tile(DOOR_TILE, "door", false);
    tile(TREASURE_TILE, "chest", true);
    tiles
}

fn script(name: &str, text: &str) -> EventScript {
    EventScript::parse(&DataFile::from_text(format!("{name}.evt"), text)).expect("fixture parses")
}

pub(crate) fn sample_world() -> World {
    let slime = EnemyTemplate {
        name: "slime".to_string(),
        stats: CombatStats { health: 5, attack: 2, ..CombatStats::default() },
        experience: 3,
    };
    let mut world = World::new(
        sample_tiles(),
        SpriteCatalog::default(),
        EnemyCatalog::new(vec![slime]),
        ItemCatalog::new(vec![sample_item("sword", 100), sample_item("axe", 150)]),
    );
    world.insert_shop(Shop {
        name: "weapons".to_string(),
        items: vec![sample_item("sword", 100), sample_item("axe", 150)],
    });
    world.insert_map(MapDefinition::new(
        "town",
        TileGrid::filled(12, 12, GRASS),
        script("town", TOWN_EVENTS),
    ));
    world.insert_map(MapDefinition::new(
        "cave",
        TileGrid::filled(6, 6, GRASS),
        script("cave", CAVE_EVENTS),
    ));
    world
}

/// Encounters disabled; tests that want them raise the rate.
pub(crate) fn sample_config() -> GameConfig {
    GameConfig {
        start_map: "town".to_string(),
        encounter_maps: vec!["town".to_string()],
        encounter_rate: 0.0,
        auto_move_rate: 0.0,
        starting_gold: 500,
        seed: None,
    }
}

/// A game already past the title screen.
pub(crate) fn field_game() -> Game {
    field_game_with(sample_config())
}

pub(crate) fn field_game_with(config: GameConfig) -> Game {
    let mut game = Game::new(sample_world(), config, 7).expect("fixture world is complete");
    game.tick(&FrameInput::press(Key::Confirm));
    assert_eq!(game.mode(), GameMode::Field);
    game.drain_cues();
    game
}

pub(crate) fn press(game: &mut Game, keys: &[Key]) {
    for &key in keys {
        game.tick(&FrameInput::press(key));
    }
}

/// Ticks with no input until the message window has typed out its page.
pub(crate) fn settle(game: &mut Game) {
    for _ in 0..200 {
        if game.message().page_complete() {
            return;
        }
        game.tick(&FrameInput::default());
    }
    panic!("message never finished typing");
}
