//! The map the party is currently on, with its consumable events and live characters.

use rand_chacha::rand_core::Rng;
use slotmap::SlotMap;

use crate::content::{Enemy, TileCatalog, WIDE_OBJECT_TILE};
use crate::entity::{Body, Npc};
use crate::event::{Door, Event, MoveEvent, Treasure};
use crate::map::TileGrid;
use crate::rng;
use crate::types::{Direction, MovePolicy, NpcId, Pos};

#[derive(Clone, Debug)]
pub struct ActiveMap {
    name: String,
    grid: TileGrid,
    events: Vec<Event>,
    npcs: SlotMap<NpcId, Npc>,
    bgm: Option<String>,
    enemies: Vec<Enemy>,
}

impl ActiveMap {
    pub fn new(
        name: String,
        grid: TileGrid,
        events: Vec<Event>,
        npcs: SlotMap<NpcId, Npc>,
        bgm: Option<String>,
        enemies: Vec<Enemy>,
    ) -> Self {
        Self { name, grid, events, npcs, bgm, enemies }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn tile_at(&self, pos: Pos) -> u8 {
        self.grid.tile_at(pos)
    }

    pub fn bgm(&self) -> Option<&str> {
        self.bgm.as_deref()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event_at(&self, pos: Pos) -> Option<&Event> {
        self.events.iter().find(|event| event.pos() == pos)
    }

    pub fn move_event_at(&self, pos: Pos) -> Option<&MoveEvent> {
        match self.event_at(pos)? {
            Event::Move(teleport) => Some(teleport),
            _ => None,
        }
    }

    /// Removes and returns the treasure on `pos`, if any.
    pub fn take_treasure(&mut self, pos: Pos) -> Option<Treasure> {
        let index = self
            .events
            .iter()
            .position(|event| matches!(event, Event::Treasure(t) if t.pos == pos))?;
        match self.events.remove(index) {
            Event::Treasure(treasure) => Some(treasure),
            _ => None,
        }
    }

    /// Removes and returns the door on `pos`, if any.
    pub fn take_door(&mut self, pos: Pos) -> Option<Door> {
        let index = self
            .events
            .iter()
            .position(|event| matches!(event, Event::Door(d) if d.pos == pos))?;
        match self.events.remove(index) {
            Event::Door(door) => Some(door),
            _ => None,
        }
    }

    pub fn npcs(&self) -> impl Iterator<Item = (NpcId, &Npc)> {
        self.npcs.iter()
    }

    pub fn npc(&self, id: NpcId) -> Option<&Npc> {
        self.npcs.get(id)
    }

    pub fn npc_mut(&mut self, id: NpcId) -> Option<&mut Npc> {
        self.npcs.get_mut(id)
    }

    /// The character whose logical cell is `pos`.
    pub fn npc_at(&self, pos: Pos) -> Option<NpcId> {
        self.npcs.iter().find(|(_, npc)| npc.body.pos() == pos).map(|(id, _)| id)
    }

    /// Cell a `talk` from `from` facing `facing` addresses. Wide counters
    /// push the reach one cell further.
    pub fn talk_target(&self, from: Pos, facing: Direction) -> Pos {
        let ahead = from.step(facing);
        match self.event_at(ahead) {
            Some(Event::Decoration(decoration)) if decoration.tile == WIDE_OBJECT_TILE => {
                ahead.step(facing)
            }
            _ => ahead,
        }
    }

    /// False outside the grid, on blocking tiles and events, and on any cell
    /// a character or the leader holds.
    pub fn is_passable(&self, pos: Pos, leader: &Body, tiles: &TileCatalog) -> bool {
        if !self.grid.in_bounds(pos) || !tiles.is_walkable(self.grid.tile_at(pos)) {
            return false;
        }
        if self.npcs.values().any(|npc| npc.body.occupies(pos)) {
            return false;
        }
        if self.events.iter().any(|event| event.pos() == pos && !tiles.is_walkable(event.tile())) {
            return false;
        }
        !leader.occupies(pos)
    }

    /// Moves every character one frame and lets idle wanderers start a step.
    pub fn update_npcs<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        auto_move_rate: f64,
        leader: &Body,
        tiles: &TileCatalog,
    ) {
        let ids: Vec<NpcId> = self.npcs.keys().collect();
        for id in ids {
            let Some(npc) = self.npcs.get_mut(id) else {
                continue;
            };
            npc.body.advance();
            npc.body.animate();
            if npc.body.policy() != MovePolicy::Autonomous || !npc.body.is_idle() {
                continue;
            }
            if !rng::chance(rng, auto_move_rate) {
                continue;
            }
            let direction = rng::pick_direction(rng);
            npc.body.face(direction);
            let target = npc.body.pos().step(direction);
            if self.is_passable(target, leader, tiles)
                && let Some(npc) = self.npcs.get_mut(id)
            {
                npc.body.begin_step(direction);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{SheetLayout, TileInfo};
    use crate::entity::NpcRole;
    use crate::event::Decoration;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    const GRASS: u8 = 0;
    const WALL: u8 = 1;

    fn tiles() -> TileCatalog {
        let mut tiles = TileCatalog::default();
        tiles.insert(GRASS, TileInfo { name: "grass".to_string(), walkable: true });
        tiles.insert(WALL, TileInfo { name: "wall".to_string(), walkable: false });
        tiles.insert(WIDE_OBJECT_TILE, TileInfo { name: "counter".to_string(), walkable: false });
        tiles
    }

    fn villager(pos: Pos, policy: MovePolicy) -> Npc {
        Npc {
            sprite: "villager".to_string(),
            sheet: SheetLayout { rows: 4, columns: 4 },
            body: Body::new(pos, Direction::Down, policy),
            message: "hello".to_string(),
            role: NpcRole::Villager,
        }
    }

    fn room(events: Vec<Event>, npcs: Vec<Npc>) -> ActiveMap {
        let mut grid = TileGrid::filled(5, 5, GRASS);
        grid.set_tile(Pos { y: 0, x: 4 }, WALL);
        let mut slots = SlotMap::with_key();
        for npc in npcs {
            slots.insert(npc);
        }
        ActiveMap::new("room".to_string(), grid, events, slots, None, Vec::new())
    }

    fn leader_at(pos: Pos) -> Body {
        Body::new(pos, Direction::Down, MovePolicy::Manual)
    }

    #[test]
    fn passability_covers_bounds_tiles_characters_and_events() {
        let counter =
            Event::Decoration(Decoration { pos: Pos { y: 2, x: 2 }, tile: WIDE_OBJECT_TILE });
        let map = room(vec![counter], vec![villager(Pos { y: 3, x: 3 }, MovePolicy::Stationary)]);
        let leader = leader_at(Pos { y: 1, x: 1 });
        let tiles = tiles();
        assert!(map.is_passable(Pos { y: 1, x: 2 }, &leader, &tiles));
        assert!(!map.is_passable(Pos { y: -1, x: 0 }, &leader, &tiles));
        assert!(!map.is_passable(Pos { y: 0, x: 5 }, &leader, &tiles));
        assert!(!map.is_passable(Pos { y: 0, x: 4 }, &leader, &tiles));
        assert!(!map.is_passable(Pos { y: 2, x: 2 }, &leader, &tiles));
        assert!(!map.is_passable(Pos { y: 3, x: 3 }, &leader, &tiles));
        assert!(!map.is_passable(Pos { y: 1, x: 1 }, &leader, &tiles));
    }

    #[test]
    fn talk_reaches_across_wide_counters() {
        let counter =
            Event::Decoration(Decoration { pos: Pos { y: 2, x: 2 }, tile: WIDE_OBJECT_TILE });
        let map = room(vec![counter], Vec::new());
        assert_eq!(map.talk_target(Pos { y: 1, x: 2 }, Direction::Down), Pos { y: 3, x: 2 });
        assert_eq!(map.talk_target(Pos { y: 1, x: 2 }, Direction::Right), Pos { y: 1, x: 3 });
    }

    #[test]
    fn treasure_is_consumed_once() {
        let chest = Event::Treasure(Treasure { pos: Pos { y: 3, x: 3 }, item: "agl".to_string() });
        let mut map = room(vec![chest], Vec::new());
        assert!(map.take_door(Pos { y: 3, x: 3 }).is_none());
        let treasure = map.take_treasure(Pos { y: 3, x: 3 }).expect("chest");
        assert_eq!(treasure.item, "agl");
        assert!(map.take_treasure(Pos { y: 3, x: 3 }).is_none());
        assert!(map.events().is_empty());
    }

    #[test]
    fn wanderers_stay_on_passable_cells() {
        let mut map = room(Vec::new(), vec![villager(Pos { y: 2, x: 2 }, MovePolicy::Autonomous)]);
        let leader = leader_at(Pos { y: 4, x: 4 });
        let tiles = tiles();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut moved = false;
        for _ in 0..2_000 {
            map.update_npcs(&mut rng, 0.5, &leader, &tiles);
            let (_, npc) = map.npcs().next().expect("villager");
            if npc.body.is_idle() {
                let pos = npc.body.pos();
                assert!(map.grid().in_bounds(pos));
                assert_ne!(pos, leader.pos());
                assert!(npc.body.pixel().is_tile_aligned());
                moved |= pos != Pos { y: 2, x: 2 };
            }
        }
        assert!(moved);
    }

    #[test]
    fn stationary_characters_never_move() {
        let mut map = room(Vec::new(), vec![villager(Pos { y: 2, x: 2 }, MovePolicy::Stationary)]);
        let leader = leader_at(Pos { y: 4, x: 4 });
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..500 {
            map.update_npcs(&mut rng, 1.0, &leader, &tiles());
        }
        let id = map.npc_at(Pos { y: 2, x: 2 }).expect("still there");
        assert!(map.npc(id).is_some_and(|npc| npc.body.is_idle()));
    }
}
