//! Walking on the map: character movement, map transfers and encounter rolls.

use super::*;
use crate::battle::roll_encounter;
use crate::message::Advance;

impl Game {
    /// Characters move first, then the party; a leader that is idle after
    /// that picks up the held direction in the same frame.
    pub(super) fn update_field(&mut self, held: Option<Direction>) {
        let leader = self.party.leader().body.clone();
        self.map.update_npcs(&mut self.rng, self.config.auto_move_rate, &leader, &self.world.tiles);

        if self.party.advance() {
            self.leader_landed();
        }
        if self.mode != GameMode::Field || !self.party.leader_is_idle() {
            return;
        }
        let Some(direction) = held else {
            return;
        };
        let leader = self.party.leader().body.clone();
        let (map, tiles) = (&self.map, &self.world.tiles);
        self.party.walk(direction, |pos| map.is_passable(pos, &leader, tiles));
    }

    fn leader_landed(&mut self) {
        let pos = self.party.leader().body.pos();
        if let Some(teleport) = self.map.move_event_at(pos).cloned() {
            self.sound(SoundCue::Step);
            self.enter_map(&teleport.destination, teleport.arrival);
            return;
        }
        if self.config.is_encounter_map(self.map.name())
            && !self.map.enemies().is_empty()
            && roll_encounter(&mut self.rng, self.config.encounter_rate)
        {
            self.start_encounter();
        }
    }

    /// Replaces the active map with a fresh visit to `name` and stacks the
    /// party on `arrival`. An unknown map leaves everything as it was.
    pub(super) fn enter_map(&mut self, name: &str, arrival: Pos) {
        match self.world.instantiate(name) {
            Ok(map) => self.map = map,
            Err(err) => {
                log::error!("cannot enter {name}: {err}");
                return;
            }
        }
        self.party.teleport(arrival);
        self.resume_map_music();
        log::info!("entered {name} at ({}, {})", arrival.x, arrival.y);
        self.log.push(LogEvent::MapEntered { map: name.to_string(), pos: arrival });
    }

    pub(super) fn field_key(&mut self, key: Key) {
        if key == Key::Confirm && self.party.leader_is_idle() {
            self.sound(SoundCue::Cursor);
            self.set_mode(GameMode::CommandMenu);
        }
    }

    pub(super) fn talk_key(&mut self, key: Key) {
        if key != Key::Confirm {
            return;
        }
        if self.message.advance() == Advance::Finished {
            self.set_mode(GameMode::Field);
        }
    }
}
