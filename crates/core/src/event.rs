//! Coordinate-bound map events and the `.evt` script that declares them.

use std::collections::HashSet;

use crate::content::{DOOR_TILE, SheetLayout, TREASURE_TILE};
use crate::data::{DataFile, Record};
use crate::error::{LoadError, LoadResult};
use crate::types::{Direction, MovePolicy, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Move(MoveEvent),
    Treasure(Treasure),
    Door(Door),
    Decoration(Decoration),
}

/// Teleports the party to `arrival` on `destination` when the leader lands here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveEvent {
    pub pos: Pos,
    pub tile: u8,
    pub destination: String,
    pub arrival: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Treasure {
    pub pos: Pos,
    pub item: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Door {
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoration {
    pub pos: Pos,
    pub tile: u8,
}

impl Event {
    pub fn pos(&self) -> Pos {
        match self {
            Event::Move(event) => event.pos,
            Event::Treasure(treasure) => treasure.pos,
            Event::Door(door) => door.pos,
            Event::Decoration(decoration) => decoration.pos,
        }
    }

    /// Tile drawn for the event; its walkability decides whether the event blocks.
    pub fn tile(&self) -> u8 {
        match self {
            Event::Move(event) => event.tile,
            Event::Treasure(_) => TREASURE_TILE,
            Event::Door(_) => DOOR_TILE,
            Event::Decoration(decoration) => decoration.tile,
        }
    }
}

/// A character declared by `CHARACTER` or `CLERK`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NpcSpec {
    pub sprite: String,
    pub sheet: SheetLayout,
    pub pos: Pos,
    pub facing: Direction,
    pub policy: MovePolicy,
    pub message: String,
    /// Name of the `.shop` file this character sells from.
    pub shop: Option<String>,
}

/// Highest level an `Enemy` directive may ask for.
pub const MAX_ENEMY_LEVEL: i32 = 99;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySpawn {
    pub template: u32,
    pub level: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventScript {
    pub events: Vec<Event>,
    pub npcs: Vec<NpcSpec>,
    pub bgm: Option<String>,
    pub enemies: Vec<EnemySpawn>,
}

impl EventScript {
    pub fn parse(file: &DataFile) -> LoadResult<Self> {
        let mut script = Self::default();
        let mut occupied = HashSet::new();
        for record in file.records() {
            let event = match record.tag() {
                "MOVE" => Event::Move(MoveEvent {
                    pos: read_pos(&record, 1)?,
                    tile: record.parse(3, "map chip")?,
                    destination: record.text(4, "destination map")?.to_string(),
                    arrival: read_pos(&record, 5)?,
                }),
                "TREASURE" => Event::Treasure(Treasure {
                    pos: read_pos(&record, 1)?,
                    item: record.text(3, "treasure item")?.to_string(),
                }),
                "DOOR" => Event::Door(Door { pos: read_pos(&record, 1)? }),
                "OBJECT" => Event::Decoration(Decoration {
                    pos: read_pos(&record, 1)?,
                    tile: record.parse(3, "map chip")?,
                }),
                "CHARACTER" => {
                    let message = record.rest(8).unwrap_or_default().to_string();
                    script.npcs.push(read_npc(&record, message, None)?);
                    continue;
                }
                "CLERK" => {
                    let message = record.text(8, "message")?.to_string();
                    let shop = record.text(9, "shop name")?.to_string();
                    script.npcs.push(read_npc(&record, message, Some(shop))?);
                    continue;
                }
                "BGM" => {
                    script.bgm = Some(record.text(1, "music name")?.to_string());
                    continue;
                }
                "Enemy" => {
                    let level: i32 = record.parse(2, "enemy level")?;
                    if !(1..=MAX_ENEMY_LEVEL).contains(&level) {
                        let message = format!("enemy level {level} is not 1..={MAX_ENEMY_LEVEL}");
                        return Err(record.error(message));
                    }
                    let template = record.parse(1, "enemy id")?;
                    script.enemies.push(EnemySpawn { template, level });
                    continue;
                }
                other => {
                    return Err(LoadError::UnknownDirective {
                        path: record.path().to_path_buf(),
                        line: record.line,
                        directive: other.to_string(),
                    });
                }
            };
            if occupied.insert(event.pos()) {
                script.events.push(event);
            } else {
                log::warn!(
                    "{}:{}: cell ({}, {}) already holds an event; ignoring this one",
                    file.path().display(),
                    record.line,
                    event.pos().x,
                    event.pos().y
                );
            }
        }
        Ok(script)
    }
}

fn read_pos(record: &Record<'_>, index: usize) -> LoadResult<Pos> {
    Ok(Pos { x: record.parse(index, "x")?, y: record.parse(index + 1, "y")? })
}

/// `name,row,column,x,y,direction,move_type` occupy fields 1..=7 of both NPC directives.
fn read_npc(record: &Record<'_>, message: String, shop: Option<String>) -> LoadResult<NpcSpec> {
    let direction_code: i32 = record.parse(6, "direction")?;
    let facing = Direction::from_code(direction_code)
        .ok_or_else(|| record.error(format!("direction {direction_code} is not 0..=3")))?;
    let policy_code: i32 = record.parse(7, "move type")?;
    let policy = MovePolicy::from_code(policy_code)
        .ok_or_else(|| record.error(format!("move type {policy_code} is not 0..=2")))?;
    Ok(NpcSpec {
        sprite: record.text(1, "sprite name")?.to_string(),
        sheet: SheetLayout { rows: record.parse(2, "rows")?, columns: record.parse(3, "columns")? },
        pos: read_pos(record, 4)?,
        facing,
        policy,
        message,
        shop,
    })
}
