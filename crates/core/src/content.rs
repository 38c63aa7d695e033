use std::collections::HashMap;

use crate::data::DataFile;
use crate::error::LoadResult;
use crate::skill::Skill;
use crate::stats::CombatStats;
use crate::types::{Direction, Pos};

/// Tile index whose events extend the talk reach by one cell (counters, wide tables).
pub const WIDE_OBJECT_TILE: u8 = 41;
pub const DOOR_TILE: u8 = 45;
pub const TREASURE_TILE: u8 = 46;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileInfo {
    pub name: String,
    pub walkable: bool,
}

/// `mapchip.dat`: tile names and walkability, addressed by tile index.
#[derive(Clone, Debug, Default)]
pub struct TileCatalog {
    tiles: Vec<Option<TileInfo>>,
}

impl TileCatalog {
    pub fn parse(file: &DataFile) -> LoadResult<Self> {
        let mut catalog = Self::default();
        for record in file.records() {
            let id: u8 = record.parse(0, "tile id")?;
            let walkable = match record.text(2, "movable flag")? {
                "0" => false,
                "1" => true,
                other => {
                    return Err(record.error(format!("movable flag `{other}` must be 0 or 1")));
                }
            };
            let name = record.text(1, "tile name")?.to_string();
            catalog.insert(id, TileInfo { name, walkable });
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, id: u8, info: TileInfo) {
        let index = usize::from(id);
        if self.tiles.len() <= index {
            self.tiles.resize(index + 1, None);
        }
        self.tiles[index] = Some(info);
    }

    pub fn get(&self, id: u8) -> Option<&TileInfo> {
        self.tiles.get(usize::from(id)).and_then(Option::as_ref)
    }

    /// Unknown tile indices block movement.
    pub fn is_walkable(&self, id: u8) -> bool {
        self.get(id).is_some_and(|tile| tile.walkable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &TileInfo)> {
        self.tiles.iter().enumerate().filter_map(|(i, t)| Some((i as u8, t.as_ref()?)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetLayout {
    pub rows: u32,
    pub columns: u32,
}

/// `charachip.dat`: character sprite sheets by name.
#[derive(Clone, Debug, Default)]
pub struct SpriteCatalog {
    sheets: HashMap<String, SheetLayout>,
}

impl SpriteCatalog {
    pub fn parse(file: &DataFile) -> LoadResult<Self> {
        let mut sheets = HashMap::new();
        for record in file.records() {
            let name = record.text(1, "sprite name")?.to_string();
            let rows = record.parse(2, "rows")?;
            let layout = SheetLayout { rows, columns: record.parse(3, "columns")? };
            sheets.insert(name, layout);
        }
        Ok(Self { sheets })
    }

    pub fn insert(&mut self, name: impl Into<String>, layout: SheetLayout) {
        self.sheets.insert(name.into(), layout);
    }

    pub fn get(&self, name: &str) -> Option<SheetLayout> {
        self.sheets.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub name: String,
    pub stats: CombatStats,
    pub experience: i32,
}

/// An enemy as it appears on a map: its template scaled by the spawn level.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Enemy {
    pub name: String,
    pub level: i32,
    pub stats: CombatStats,
    pub current_health: i32,
    pub experience: i32,
}

impl EnemyTemplate {
    /// Scales a fresh copy; the template itself never changes. `None` when a
    /// scaled value does not fit in an `i32`.
    pub fn at_level(&self, level: i32) -> Option<Enemy> {
        let stats = self.stats.scaled(level)?;
        Some(Enemy {
            name: self.name.clone(),
            level,
            current_health: stats.health,
            stats,
            experience: self.experience.checked_mul(level)?,
        })
    }
}

/// `enemybatch.dat`, addressed by record position.
#[derive(Clone, Debug, Default)]
pub struct EnemyCatalog {
    templates: Vec<EnemyTemplate>,
}

impl EnemyCatalog {
    pub fn new(templates: Vec<EnemyTemplate>) -> Self {
        Self { templates }
    }

    /// Reads `id,name,` then seven combat stats and the experience reward.
    pub fn parse(file: &DataFile) -> LoadResult<Self> {
        let mut templates = Vec::new();
        for record in file.records() {
            let stats = CombatStats {
                health: record.parse(2, "health")?,
                mana: 0,
                attack: record.parse(3, "attack")?,
                intelligence: record.parse(4, "intelligence")?,
                defence: record.parse(5, "defence")?,
                magic_resistance: record.parse(6, "magic resistance")?,
                agility: record.parse(7, "agility")?,
                critical_hit: record.parse(8, "critical hit")?,
            };
            templates.push(EnemyTemplate {
                name: record.text(1, "enemy name")?.to_string(),
                stats,
                experience: record.parse(9, "experience")?,
            });
        }
        Ok(Self { templates })
    }

    pub fn get(&self, id: u32) -> Option<&EnemyTemplate> {
        self.templates.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// A combat class: base statistics plus starting skills.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Archetype {
    pub name: &'static str,
    pub base: CombatStats,
    pub skills: Vec<Skill>,
}

/// One starting party slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recruit {
    pub archetype: &'static str,
    pub sprite: &'static str,
    pub pos: Pos,
    pub facing: Direction,
}

pub const STARTING_STATUS_POINTS: u32 = 5;

#[derive(Clone, Debug)]
pub struct ArchetypeTable {
    archetypes: Vec<Archetype>,
}

impl ArchetypeTable {
    pub fn build_default() -> Self {
        Self {
            archetypes: vec![
                Archetype {
                    name: "Knight",
                    base: stats([16, 1, 4, 0, 5, 3, 10, 8]),
                    skills: sword_skills("Attack12"),
                },
                Archetype {
                    name: "Mage",
                    base: stats([16, 24, 0, 4, 4, 6, 4, 1]),
                    skills: sword_skills("Attack1"),
                },
                Archetype {
                    name: "Tank",
                    base: stats([16, 1, 5, 0, 11, 1, 3, 1]),
                    skills: sword_skills("Attack1"),
                },
                Archetype {
                    name: "Assassin",
                    base: stats([16, 8, 4, 0, 4, 2, 12, 10]),
                    skills: sword_skills("Attack1"),
                },
                Archetype {
                    name: "Priest",
                    base: stats([16, 10, 0, 4, 3, 4, 4, 1]),
                    skills: sword_skills("Attack1"),
                },
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&Archetype> {
        self.archetypes.iter().find(|archetype| archetype.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
        self.archetypes.iter()
    }
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        Self::build_default()
    }
}

/// Leader first; followers trail behind it in a column.
pub fn default_roster() -> Vec<Recruit> {
    let recruit = |archetype: &'static str, sprite: &'static str, y: i32| Recruit {
        archetype,
        sprite,
        pos: Pos { y, x: 3 },
        facing: Direction::Down,
    };
    vec![
        recruit("Knight", "swordman_female", 5),
        recruit("Mage", "elf_female2", 4),
        recruit("Assassin", "priestess", 3),
        recruit("Priest", "magician_female", 2),
    ]
}

fn stats(values: [i32; 8]) -> CombatStats {
    let [health, mana, attack, intelligence, defence, magic_resistance, agility, critical_hit] =
        values;
    CombatStats {
        health,
        mana,
        attack,
        intelligence,
        defence,
        magic_resistance,
        agility,
        critical_hit,
    }
}

fn sword_skills(first_effect: &str) -> Vec<Skill> {
    let skill = |name: &str, effect: &str, description: &str, bonus_rate| Skill {
        name: name.to_string(),
        effect: effect.to_string(),
        description: description.to_string(),
        bonus_power: 0,
        bonus_rate,
        level: 0,
    };
    vec![
        skill(
            "Deadly Sins",
            first_effect,
            "A seven hit skill that consists of various slashes, several full circle spins \
             and a backwards somersault.",
            7,
        ),
        skill("Horizontal", "Attack1", "A simple sword skill slashing horizontally.", 2),
        skill(
            "Horizontal Arc",
            "Attack1",
            "A flat two-part skill that involves a horizontal swing from left to right, \
             followed by another horizontal swing in from right to left.",
            3,
        ),
        skill(
            "Horizontal Square",
            "Attack1",
            "A mid-level sword skill tracing the shape of a rhombus.",
            4,
        ),
    ]
}
