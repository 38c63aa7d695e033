//! Encounter start-up and the three battle input phases.

use super::*;
use crate::battle::BattleCommand;

impl Game {
    /// Picks an opponent from the map's roster. Does nothing on a map without one.
    pub(super) fn start_encounter(&mut self) {
        let Some(battle) = Battle::start(&mut self.rng, self.map.enemies()) else {
            return;
        };
        self.log.push(LogEvent::EncounterStarted { enemy: battle.enemy().name.clone() });
        self.battle = Some(battle);
        self.message.show("encounter an enemy");
        self.music(MusicCue::Battle);
        self.set_mode(GameMode::BattleInit);
    }

    pub(super) fn battle_init_key(&mut self, key: Key) {
        if key == Key::Confirm {
            self.message.hide();
            self.sound(SoundCue::Cursor);
            self.set_mode(GameMode::BattleCommand);
        }
    }

    pub(super) fn battle_command_key(&mut self, key: Key) {
        let Some(battle) = self.battle.as_mut() else {
            return;
        };
        match key {
            Key::Up | Key::Down => {
                if let Some(direction) = key.direction() {
                    battle.move_cursor(direction);
                }
            }
            Key::Confirm => {
                let command = battle.selected();
                self.sound(SoundCue::Cursor);
                self.message.show(command.message());
                self.set_mode(GameMode::BattleProcess);
            }
            _ => {}
        }
    }

    pub(super) fn battle_process_key(&mut self, key: Key) {
        if key != Key::Confirm {
            return;
        }
        self.message.hide();
        let Some(battle) = self.battle.as_mut() else {
            self.set_mode(GameMode::Field);
            return;
        };
        match battle.selected() {
            BattleCommand::Escape => {
                self.battle = None;
                self.log.push(LogEvent::BattleEscaped);
                self.resume_map_music();
                self.set_mode(GameMode::Field);
            }
            BattleCommand::Attack => {
                if let Some(skill) = self.party.leader().skills.first() {
                    battle.play_effect(&skill.effect);
                    let skill = skill.name.clone();
                    self.sound(SoundCue::SwordSlice);
                    self.log.push(LogEvent::SkillInvoked { member: 0, skill });
                }
                self.set_mode(GameMode::BattleCommand);
            }
            BattleCommand::Spell | BattleCommand::Item => self.set_mode(GameMode::BattleCommand),
        }
    }
}
