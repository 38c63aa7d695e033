use crate::content::{Archetype, STARTING_STATUS_POINTS};
use crate::entity::Body;
use crate::inventory::{BAG_SLOTS, EQUIPMENT_SLOTS, Slots};
use crate::skill::Skill;
use crate::stats::CombatStats;
use crate::types::{Direction, MovePolicy, Pos};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Player {
    pub archetype: &'static str,
    pub sprite: String,
    pub body: Body,
    pub stats: CombatStats,
    pub current_health: i32,
    pub current_mana: i32,
    pub level: u32,
    pub experience: u32,
    pub status_points: u32,
    pub skill_points: u32,
    pub skills: Vec<Skill>,
    pub bag: Slots,
    pub equipment: Slots,
}

impl Player {
    pub fn from_archetype(
        archetype: &Archetype,
        sprite: &str,
        pos: Pos,
        facing: Direction,
        policy: MovePolicy,
    ) -> Self {
        Self {
            archetype: archetype.name,
            sprite: sprite.to_string(),
            body: Body::new(pos, facing, policy),
            stats: archetype.base,
            current_health: archetype.base.health,
            current_mana: archetype.base.mana,
            level: 1,
            experience: 0,
            status_points: STARTING_STATUS_POINTS,
            skill_points: 0,
            skills: archetype.skills.clone(),
            bag: Slots::with_len(BAG_SLOTS),
            equipment: Slots::with_len(EQUIPMENT_SLOTS),
        }
    }

    /// Replaces the combat statistics, pulling current vitals down to the new maxima.
    pub fn set_stats(&mut self, stats: CombatStats) {
        self.stats = stats;
        self.current_health = self.current_health.min(stats.health);
        self.current_mana = self.current_mana.min(stats.mana);
    }
}

/// Ordered party; index 0 is the leader and the only member steered directly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Party {
    members: Vec<Player>,
}

impl Party {
    /// `None` for an empty roster.
    pub fn new(members: Vec<Player>) -> Option<Self> {
        (!members.is_empty()).then_some(Self { members })
    }

    pub fn leader(&self) -> &Player {
        &self.members[0]
    }

    pub fn members(&self) -> &[Player] {
        &self.members
    }

    pub fn member(&self, index: usize) -> Option<&Player> {
        self.members.get(index)
    }

    pub fn member_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.members.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn leader_is_idle(&self) -> bool {
        self.leader().body.is_idle()
    }

    /// Advances every member one frame. Returns true when the leader lands.
    pub fn advance(&mut self) -> bool {
        let mut leader_landed = false;
        for (index, member) in self.members.iter_mut().enumerate() {
            let landed = member.body.advance();
            if index == 0 {
                leader_landed = landed;
            }
        }
        leader_landed
    }

    /// Turns the leader toward `direction` and, if `passable` accepts the
    /// target, starts the whole column walking: each follower heads for the
    /// cell its predecessor occupies right now.
    pub fn walk(&mut self, direction: Direction, passable: impl Fn(Pos) -> bool) -> bool {
        if !self.leader_is_idle() {
            return false;
        }
        self.members[0].body.face(direction);
        let target = self.leader().body.pos().step(direction);
        if !passable(target) {
            return false;
        }
        for index in (1..self.members.len()).rev() {
            let ahead = self.members[index - 1].body.pos();
            self.members[index].body.begin_step_toward(ahead);
        }
        self.members[0].body.begin_step(direction);
        true
    }

    /// Puts every member on `pos`, idle and facing down.
    pub fn teleport(&mut self, pos: Pos) {
        for member in &mut self.members {
            member.body.place(pos, Direction::Down);
        }
    }

    pub fn animate(&mut self) {
        for member in &mut self.members {
            member.body.animate();
        }
    }
}
