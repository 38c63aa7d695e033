//! Stable snapshot hashing for determinism checks.
//! Covers everything a frame can change that a player could observe.

use std::hash::{Hash, Hasher};

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        self.mode.hash(&mut hasher);
        hasher.write(self.map.name().as_bytes());
        for (_, npc) in self.map.npcs() {
            npc.body.hash(&mut hasher);
        }
        hasher.write_usize(self.map.events().len());
        self.party.hash(&mut hasher);
        self.inventory.hash(&mut hasher);
        hasher.write_u32(self.purse.gold());
        hasher.write_u32(self.purse.pending());
        self.message.hash(&mut hasher);
        self.commands.hash(&mut hasher);
        if let Some(battle) = &self.battle {
            battle.enemy().hash(&mut hasher);
            hasher.write_usize(battle.cursor());
        }
        self.items.hash(&mut hasher);
        hasher.write_u8(u8::from(self.quit_requested));
        hasher.finish()
    }
}
