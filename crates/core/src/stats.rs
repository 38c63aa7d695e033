/// Combat statistics shared by party members and enemies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CombatStats {
    pub health: i32,
    pub mana: i32,
    pub attack: i32,
    pub intelligence: i32,
    pub defence: i32,
    pub magic_resistance: i32,
    pub agility: i32,
    pub critical_hit: i32,
}

/// The statistics a player may raise with status points, in screen order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stat {
    Health,
    Attack,
    Intelligence,
    Defence,
    MagicResistance,
    Agility,
    CriticalHit,
}

impl Stat {
    pub const ALLOCATABLE: [Stat; 7] = [
        Stat::Health,
        Stat::Attack,
        Stat::Intelligence,
        Stat::Defence,
        Stat::MagicResistance,
        Stat::Agility,
        Stat::CriticalHit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stat::Health => "HP",
            Stat::Attack => "ATK",
            Stat::Intelligence => "INT",
            Stat::Defence => "DEF",
            Stat::MagicResistance => "MGR",
            Stat::Agility => "AGL",
            Stat::CriticalHit => "CRI",
        }
    }
}

impl CombatStats {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Health => self.health,
            Stat::Attack => self.attack,
            Stat::Intelligence => self.intelligence,
            Stat::Defence => self.defence,
            Stat::MagicResistance => self.magic_resistance,
            Stat::Agility => self.agility,
            Stat::CriticalHit => self.critical_hit,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        let slot = match stat {
            Stat::Health => &mut self.health,
            Stat::Attack => &mut self.attack,
            Stat::Intelligence => &mut self.intelligence,
            Stat::Defence => &mut self.defence,
            Stat::MagicResistance => &mut self.magic_resistance,
            Stat::Agility => &mut self.agility,
            Stat::CriticalHit => &mut self.critical_hit,
        };
        *slot = value;
    }

    /// Every statistic multiplied by `level`; `None` if any of them overflows.
    pub fn scaled(&self, level: i32) -> Option<Self> {
        Some(Self {
            health: self.health.checked_mul(level)?,
            mana: self.mana.checked_mul(level)?,
            attack: self.attack.checked_mul(level)?,
            intelligence: self.intelligence.checked_mul(level)?,
            defence: self.defence.checked_mul(level)?,
            magic_resistance: self.magic_resistance.checked_mul(level)?,
            agility: self.agility.checked_mul(level)?,
            critical_hit: self.critical_hit.checked_mul(level)?,
        })
    }
}
