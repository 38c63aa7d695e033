//! Static game content: catalogs, map definitions and shops, loaded once at startup.
//!
//! Maps reachable from the start map through `MOVE` events are read eagerly so
//! that a missing or malformed file fails the launch instead of a later map change.

use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::path::Path;

use slotmap::SlotMap;

use crate::active_map::ActiveMap;
use crate::content::{ArchetypeTable, EnemyCatalog, SpriteCatalog, TileCatalog, default_roster};
use crate::data::DataFile;
use crate::entity::{Body, Npc, NpcRole};
use crate::error::{LoadError, LoadResult};
use crate::event::{EnemySpawn, Event, EventScript, NpcSpec};
use crate::item::ItemCatalog;
use crate::map::TileGrid;
use crate::party::{Party, Player};
use crate::shop::Shop;
use crate::types::MovePolicy;

pub const SPRITE_CATALOG: &str = "charachip.dat";
pub const TILE_CATALOG: &str = "mapchip.dat";
pub const ENEMY_CATALOG: &str = "enemybatch.dat";
pub const ITEM_CATALOG: &str = "itemicon.dat";

/// A map as declared on disk. Every visit instantiates a fresh [`ActiveMap`] from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapDefinition {
    pub name: String,
    pub grid: TileGrid,
    pub events: Vec<Event>,
    pub npcs: Vec<NpcSpec>,
    pub bgm: Option<String>,
    pub enemies: Vec<EnemySpawn>,
}

impl MapDefinition {
    pub fn new(name: impl Into<String>, grid: TileGrid, script: EventScript) -> Self {
        let EventScript { events, npcs, bgm, enemies } = script;
        Self { name: name.into(), grid, events, npcs, bgm, enemies }
    }

    /// Reads `<name>.map` and `<name>.evt` from `dir`.
    pub fn load(dir: &Path, name: &str) -> LoadResult<Self> {
        let map_path = dir.join(format!("{name}.map"));
        let bytes = fs::read(&map_path).map_err(|e| LoadError::io(&map_path, e))?;
        let grid = TileGrid::from_bytes(&map_path, &bytes)?;
        let script = EventScript::parse(&DataFile::read(&dir.join(format!("{name}.evt")))?)?;
        Ok(Self::new(name, grid, script))
    }

    /// Names of the maps this one's `MOVE` events lead to.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            Event::Move(teleport) => Some(teleport.destination.as_str()),
            _ => None,
        })
    }

    pub fn shop_names(&self) -> impl Iterator<Item = &str> {
        self.npcs.iter().filter_map(|npc| npc.shop.as_deref())
    }
}

#[derive(Clone, Debug, Default)]
pub struct World {
    pub tiles: TileCatalog,
    pub sprites: SpriteCatalog,
    pub enemies: EnemyCatalog,
    pub items: ItemCatalog,
    pub archetypes: ArchetypeTable,
    maps: BTreeMap<String, MapDefinition>,
    shops: BTreeMap<String, Shop>,
}

impl World {
    pub fn new(
        tiles: TileCatalog,
        sprites: SpriteCatalog,
        enemies: EnemyCatalog,
        items: ItemCatalog,
    ) -> Self {
        Self {
            tiles,
            sprites,
            enemies,
            items,
            archetypes: ArchetypeTable::default(),
            maps: BTreeMap::new(),
            shops: BTreeMap::new(),
        }
    }

    /// Loads the catalogs, then every map reachable from `start_map` and the
    /// shops their clerks sell from.
    pub fn load(dir: &Path, start_map: &str) -> LoadResult<Self> {
        let catalog = |file: &str| DataFile::read(&dir.join(file));
        let mut world = Self::new(
            TileCatalog::parse(&catalog(TILE_CATALOG)?)?,
            SpriteCatalog::parse(&catalog(SPRITE_CATALOG)?)?,
            EnemyCatalog::parse(&catalog(ENEMY_CATALOG)?)?,
            ItemCatalog::parse(&catalog(ITEM_CATALOG)?)?,
        );

        let mut queue = VecDeque::from([start_map.to_string()]);
        while let Some(name) = queue.pop_front() {
            if world.maps.contains_key(&name) {
                continue;
            }
            let definition = MapDefinition::load(dir, &name)?;
            let evt_path = dir.join(format!("{name}.evt"));
            for spawn in &definition.enemies {
                let Some(template) = world.enemies.get(spawn.template) else {
                    return Err(LoadError::UnknownEnemy { path: evt_path, id: spawn.template });
                };
                if template.at_level(spawn.level).is_none() {
                    let (id, level) = (spawn.template, spawn.level);
                    return Err(LoadError::EnemyOverflow { path: evt_path, id, level });
                }
            }
            for npc in &definition.npcs {
                if world.sprites.get(&npc.sprite).is_none() {
                    let path = evt_path.display();
                    log::warn!("{path}: sprite `{}` is not in {SPRITE_CATALOG}", npc.sprite);
                }
            }
            for shop in definition.shop_names() {
                if !world.shops.contains_key(shop) {
                    let file = DataFile::read(&dir.join(format!("{shop}.shop")))?;
                    let parsed = Shop::parse(shop, &file, &world.items)?;
                    world.shops.insert(shop.to_string(), parsed);
                }
            }
            queue.extend(definition.destinations().map(str::to_string));
            log::debug!(
                "loaded map {name}: {}x{}, {} events, {} characters",
                definition.grid.columns(),
                definition.grid.rows(),
                definition.events.len(),
                definition.npcs.len()
            );
            world.maps.insert(name, definition);
        }
        let (maps, shops) = (world.maps.len(), world.shops.len());
        log::info!("loaded {maps} maps and {shops} shops from {}", dir.display());
        Ok(world)
    }

    pub fn insert_map(&mut self, definition: MapDefinition) {
        self.maps.insert(definition.name.clone(), definition);
    }

    pub fn insert_shop(&mut self, shop: Shop) {
        self.shops.insert(shop.name.clone(), shop);
    }

    pub fn map(&self, name: &str) -> Option<&MapDefinition> {
        self.maps.get(name)
    }

    pub fn maps(&self) -> impl Iterator<Item = &MapDefinition> {
        self.maps.values()
    }

    pub fn shop(&self, name: &str) -> Option<&Shop> {
        self.shops.get(name)
    }

    pub fn shops(&self) -> impl Iterator<Item = &Shop> {
        self.shops.values()
    }

    /// Builds the live state for a visit to `name`: events and characters as
    /// declared, enemies freshly scaled from their templates.
    pub fn instantiate(&self, name: &str) -> LoadResult<ActiveMap> {
        let definition =
            self.maps.get(name).ok_or_else(|| LoadError::MissingMap { name: name.to_string() })?;
        let mut npcs = SlotMap::with_key();
        for spec in &definition.npcs {
            let role = match spec.shop.as_deref() {
                None => NpcRole::Villager,
                Some(shop) => match self.shops.get(shop) {
                    Some(shop) => NpcRole::Clerk(shop.clone()),
                    None => {
                        log::warn!("clerk {} sells from unknown shop {shop}", spec.sprite);
                        NpcRole::Villager
                    }
                },
            };
            npcs.insert(Npc {
                sprite: spec.sprite.clone(),
                sheet: spec.sheet,
                body: Body::new(spec.pos, spec.facing, spec.policy),
                message: spec.message.clone(),
                role,
            });
        }
        let enemies = definition
            .enemies
            .iter()
            .filter_map(|spawn| self.enemies.get(spawn.template)?.at_level(spawn.level))
            .collect();
        Ok(ActiveMap::new(
            definition.name.clone(),
            definition.grid.clone(),
            definition.events.clone(),
            npcs,
            definition.bgm.clone(),
            enemies,
        ))
    }

    /// The starting party, leader first, built from the archetype table.
    pub fn starting_party(&self) -> LoadResult<Party> {
        let mut members = Vec::new();
        for (index, recruit) in default_roster().into_iter().enumerate() {
            let archetype = self.archetypes.get(recruit.archetype).ok_or_else(|| {
                LoadError::UnknownArchetype { name: recruit.archetype.to_string() }
            })?;
            let policy = if index == 0 { MovePolicy::Manual } else { MovePolicy::Follow };
            members.push(Player::from_archetype(
                archetype,
                recruit.sprite,
                recruit.pos,
                recruit.facing,
                policy,
            ));
        }
        Party::new(members).ok_or(LoadError::EmptyParty)
    }
}
