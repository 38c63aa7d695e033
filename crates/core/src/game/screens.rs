//! Full-screen windows: title, status, shop and item management.

use super::*;
use crate::inventory::Transfer;
use crate::menu::TitleOption;
use crate::shop::ShopOutcome;

impl Game {
    pub(super) fn title_key(&mut self, key: Key) {
        if let Some(direction) = key.direction() {
            self.title.move_cursor(direction);
            return;
        }
        if key != Key::Confirm {
            return;
        }
        match self.title.selected() {
            TitleOption::Start => self.start(),
            TitleOption::Continue => log::debug!("continue has no saved game to load"),
            TitleOption::Exit => self.quit_requested = true,
        }
    }

    /// Leaves the title screen for a fresh visit to the start map.
    fn start(&mut self) {
        self.sound(SoundCue::Cursor);
        match self.world.instantiate(&self.config.start_map) {
            Ok(map) => self.map = map,
            Err(err) => log::error!("cannot enter {}: {err}", self.config.start_map),
        }
        self.set_mode(GameMode::Field);
        self.resume_map_music();
    }

    pub(super) fn status_key(&mut self, key: Key) {
        match key {
            Key::PrevPage | Key::NextPage => {
                self.status.turn_page(key == Key::NextPage, self.party.len());
            }
            Key::Left | Key::Right => {
                if let Some(direction) = key.direction()
                    && self.status.move_horizontal(direction, &self.party)
                {
                    self.sound(SoundCue::Cursor);
                }
            }
            Key::Up | Key::Down => {
                if let Some(direction) = key.direction()
                    && self.status.move_vertical(direction, &self.party)
                {
                    self.sound(SoundCue::Cursor);
                }
            }
            Key::Confirm => {
                self.sound(SoundCue::Cursor);
                if let Some(points) = self.status.confirm(&mut self.party) {
                    let member = self.status.page();
                    log::info!("member {member} committed {points} status points");
                    self.log.push(LogEvent::StatsCommitted { member, points });
                }
            }
            Key::Cancel => {
                self.sound(SoundCue::Cancel);
                if self.status.cancel() {
                    self.set_mode(GameMode::Field);
                    self.resume_map_music();
                }
            }
            Key::Quit => {}
        }
    }

    pub(super) fn shop_key(&mut self, key: Key) {
        let Some(screen) = self.shop.as_mut() else {
            self.set_mode(GameMode::Field);
            return;
        };
        if let Some(direction) = key.direction() {
            if screen.move_cursor(direction) {
                self.sound(SoundCue::Cursor);
            }
            return;
        }
        match key {
            Key::Confirm => match screen.confirm(&mut self.inventory, &mut self.purse) {
                ShopOutcome::PickedUp => self.sound(SoundCue::PickUp),
                ShopOutcome::Bought { item, price } => {
                    self.sound(SoundCue::ChaChing);
                    self.log.push(LogEvent::ItemBought { item, price });
                }
                ShopOutcome::Sold { item, price } => {
                    self.sound(SoundCue::ChaChing);
                    self.log.push(LogEvent::ItemSold { item, price });
                }
                ShopOutcome::PutBack | ShopOutcome::Refused => self.sound(SoundCue::Cancel),
                ShopOutcome::Nothing => {}
            },
            Key::Cancel => {
                if let Some(screen) = self.shop.take() {
                    screen.close(&mut self.inventory, &mut self.purse);
                }
                self.sound(SoundCue::Cancel);
                self.set_mode(GameMode::Field);
                self.resume_map_music();
            }
            _ => {}
        }
    }

    pub(super) fn item_key(&mut self, key: Key) {
        if let Some(direction) = key.direction() {
            self.items.move_cursor(direction);
            return;
        }
        match key {
            Key::PrevPage | Key::NextPage => {
                self.items.turn_page(key == Key::NextPage, self.party.len());
            }
            Key::Confirm => match self.items.confirm(&mut self.inventory, &mut self.party) {
                Transfer::PickedUp => self.sound(SoundCue::PickUp),
                Transfer::Discarded(item) => {
                    log::info!("discarded {}", item.name);
                    self.log.push(LogEvent::ItemDiscarded { item: item.name });
                }
                Transfer::Blocked => self.sound(SoundCue::Cancel),
                Transfer::Placed | Transfer::Nothing => {}
            },
            Key::Cancel => {
                self.items.cancel(&mut self.inventory, &mut self.party);
                self.sound(SoundCue::Cancel);
                self.set_mode(GameMode::Field);
            }
            _ => {}
        }
    }
}
