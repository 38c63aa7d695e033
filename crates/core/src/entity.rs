//! Tile-to-tile movement shared by party members and NPCs.

use crate::content::SheetLayout;
use crate::shop::Shop;
use crate::types::{ANIMATION_CYCLE, Direction, MovePolicy, PixelPos, Pos, WALK_SPEED};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Transit {
    #[default]
    Idle,
    Moving(Direction),
}

/// Position and motion state of anything that walks on the grid.
///
/// `pos` is the logical cell and only changes when a step completes, at which
/// point it is recomputed from the pixel position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Body {
    pos: Pos,
    pixel: PixelPos,
    transit: Transit,
    facing: Direction,
    policy: MovePolicy,
    frame: u32,
}

impl Body {
    pub fn new(pos: Pos, facing: Direction, policy: MovePolicy) -> Self {
        Self { pos, pixel: pos.to_pixels(), transit: Transit::Idle, facing, policy, frame: 0 }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn pixel(&self) -> PixelPos {
        self.pixel
    }

    pub fn transit(&self) -> Transit {
        self.transit
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn policy(&self) -> MovePolicy {
        self.policy
    }

    pub fn is_idle(&self) -> bool {
        self.transit == Transit::Idle
    }

    /// Cell the body will land on, or its current cell when idle.
    pub fn destination(&self) -> Pos {
        match self.transit {
            Transit::Idle => self.pos,
            Transit::Moving(direction) => self.pos.step(direction),
        }
    }

    /// A walking body claims both ends of its step.
    pub fn occupies(&self, cell: Pos) -> bool {
        self.pos == cell || self.destination() == cell
    }

    pub fn face(&mut self, direction: Direction) {
        self.facing = direction;
    }

    pub fn begin_step(&mut self, direction: Direction) {
        if !self.is_idle() {
            return;
        }
        self.facing = direction;
        self.transit = Transit::Moving(direction);
    }

    /// Steps onto an adjacent `target`. Returns false when already there.
    pub fn begin_step_toward(&mut self, target: Pos) -> bool {
        let (dx, dy) = (target.x - self.pos.x, target.y - self.pos.y);
        let direction = match (dx, dy) {
            (0, 0) => return false,
            (0, 1) => Direction::Down,
            (-1, 0) => Direction::Left,
            (1, 0) => Direction::Right,
            (0, -1) => Direction::Up,
            _ => {
                log::warn!("follower at {:?} lost its leader at {target:?}; regrouping", self.pos);
                self.place(target, self.facing);
                return false;
            }
        };
        self.begin_step(direction);
        true
    }

    /// Moves one frame along the current step. Returns true on the frame the step completes.
    pub fn advance(&mut self) -> bool {
        let Transit::Moving(direction) = self.transit else {
            return false;
        };
        let (dx, dy) = direction.delta();
        self.pixel.x += dx * WALK_SPEED;
        self.pixel.y += dy * WALK_SPEED;
        if !self.pixel.is_tile_aligned() {
            return false;
        }
        self.transit = Transit::Idle;
        self.pos = self.pixel.to_tile();
        true
    }

    pub fn place(&mut self, pos: Pos, facing: Direction) {
        self.pos = pos;
        self.pixel = pos.to_pixels();
        self.transit = Transit::Idle;
        self.facing = facing;
    }

    pub fn animate(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Column of the walk-cycle sprite to draw for a sheet `columns` wide.
    pub fn sprite_column(&self, columns: u32) -> u32 {
        (self.frame / ANIMATION_CYCLE) % columns.max(1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NpcRole {
    Villager,
    Clerk(Shop),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Npc {
    pub sprite: String,
    pub sheet: SheetLayout,
    pub body: Body,
    pub message: String,
    pub role: NpcRole,
}

impl Npc {
    pub fn shop(&self) -> Option<&Shop> {
        match &self.role {
            NpcRole::Clerk(shop) => Some(shop),
            NpcRole::Villager => None,
        }
    }
}
