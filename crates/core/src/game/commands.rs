//! The field command window and what each of its eight entries does.

use super::*;
use crate::menu::Command;

const NOBODY: &str = "There's no one there";
const NO_DOOR: &str = "There's no door there";
const NOTHING_FOUND: &str = "didn't find anything";

impl Game {
    pub(super) fn command_key(&mut self, key: Key) {
        if let Some(direction) = key.direction() {
            self.commands.move_cursor(direction);
            return;
        }
        match key {
            Key::Cancel => {
                self.sound(SoundCue::Cancel);
                self.set_mode(GameMode::Field);
            }
            Key::Confirm => self.run_command(self.commands.selected()),
            _ => {}
        }
    }

    fn run_command(&mut self, command: Command) {
        if command == Command::Tactics {
            return;
        }
        self.sound(SoundCue::Cursor);
        match command {
            Command::Talk => self.talk(),
            Command::Status => {
                self.status = StatusScreen::default();
                self.set_mode(GameMode::Status);
                self.music(MusicCue::Shop);
            }
            Command::Equipment => self.say("should show the equipment of the player"),
            Command::Door => self.open_door(),
            Command::Spell => self.say("Should open a window for spells"),
            Command::Item => {
                self.items = ItemScreen::default();
                self.set_mode(GameMode::ItemManagement);
            }
            Command::Search => self.search(),
            Command::Tactics => {}
        }
    }

    /// Addresses the character in front of the leader. A character that is
    /// mid-step is not there yet.
    fn talk(&mut self) {
        let leader = &self.party.leader().body;
        let facing = leader.facing();
        let target = self.map.talk_target(leader.pos(), facing);
        let Some(npc) = self.map.npc_at(target).and_then(|id| self.map.npc_mut(id)) else {
            self.say(NOBODY);
            return;
        };
        if !npc.body.is_idle() {
            self.say(NOBODY);
            return;
        }
        npc.body.face(facing.opposite());
        if let Some(shop) = npc.shop().cloned() {
            log::debug!("opening shop {}", shop.name);
            self.shop = Some(ShopScreen::open(shop));
            self.set_mode(GameMode::Shop);
            self.music(MusicCue::Shop);
            return;
        }
        let message = npc.message.clone();
        self.say(&message);
    }

    fn open_door(&mut self) {
        let leader = &self.party.leader().body;
        let ahead = leader.pos().step(leader.facing());
        match self.map.take_door(ahead) {
            Some(door) => {
                self.sound(SoundCue::Door);
                self.log.push(LogEvent::DoorOpened { pos: door.pos });
                self.set_mode(GameMode::Field);
            }
            None => self.say(NO_DOOR),
        }
    }

    /// Looks under the leader's feet.
    fn search(&mut self) {
        let pos = self.party.leader().body.pos();
        match self.map.take_treasure(pos) {
            Some(treasure) => {
                self.sound(SoundCue::Treasure);
                self.say(&format!("get {}", treasure.item));
                self.log.push(LogEvent::TreasureOpened { pos, item: treasure.item });
            }
            None => self.say(NOTHING_FOUND),
        }
    }
}
