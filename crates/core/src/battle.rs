//! Encounter roll and the battle command state.
//!
//! Damage, defeat and rewards are not modelled: every command posts its
//! message and returns to command selection, except Escape.

use rand_chacha::rand_core::Rng;

use crate::content::Enemy;
use crate::rng;
use crate::skill::EffectPlayback;
use crate::types::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattleCommand {
    Attack,
    Spell,
    Item,
    Escape,
}

impl BattleCommand {
    pub const ALL: [BattleCommand; 4] =
        [BattleCommand::Attack, BattleCommand::Spell, BattleCommand::Item, BattleCommand::Escape];

    pub fn label(self) -> &'static str {
        match self {
            BattleCommand::Attack => "ATTACK",
            BattleCommand::Spell => "SPELL",
            BattleCommand::Item => "ITEM",
            BattleCommand::Escape => "ESCAPE",
        }
    }

    /// Posted when the command is chosen.
    pub fn message(self) -> &'static str {
        match self {
            BattleCommand::Attack => "player is attacking the monster",
            BattleCommand::Spell => "I don't know any spell",
            BattleCommand::Item => "I don't have any item",
            BattleCommand::Escape => "Run!",
        }
    }
}

/// One roll per completed leader step on an encounter map.
pub fn roll_encounter<R: Rng + ?Sized>(rng: &mut R, rate: f64) -> bool {
    rng::chance(rng, rate)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Battle {
    enemy: Enemy,
    cursor: usize,
    effect: Option<EffectPlayback>,
}

impl Battle {
    /// Picks the opponent uniformly from the map's roster; `None` when it is empty.
    pub fn start<R: Rng + ?Sized>(rng: &mut R, roster: &[Enemy]) -> Option<Self> {
        let index = rng::pick_index(rng, roster.len())?;
        let enemy = roster[index].clone();
        log::info!("encounter: {} (level {})", enemy.name, enemy.level);
        Some(Self { enemy, cursor: 0, effect: None })
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> BattleCommand {
        BattleCommand::ALL[self.cursor]
    }

    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Up if self.cursor > 0 => self.cursor -= 1,
            Direction::Down if self.cursor + 1 < BattleCommand::ALL.len() => self.cursor += 1,
            _ => return false,
        }
        true
    }

    pub fn effect(&self) -> Option<&EffectPlayback> {
        self.effect.as_ref().filter(|effect| effect.is_active())
    }

    /// Restarts the visual lifetime with the given effect sheet.
    pub fn play_effect(&mut self, effect: &str) {
        self.effect = Some(EffectPlayback::start(effect));
    }

    pub fn tick(&mut self) {
        if let Some(effect) = self.effect.as_mut() {
            effect.tick();
        }
    }
}
