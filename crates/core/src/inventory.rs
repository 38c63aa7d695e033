//! Slot storage, the item-screen cursor map and the grab register.
//!
//! Four zones share one cursor: the party inventory (25 slots, 5 wide), the
//! selected member's bag (5), that member's equipment (6, laid out two wide
//! and three tall) and a drop sink. One item at a time may be held in hand.

use crate::item::Item;
use crate::party::Party;
use crate::types::Direction;

pub const INVENTORY_SLOTS: usize = 25;
pub const INVENTORY_COLUMNS: usize = 5;
pub const BAG_SLOTS: usize = 5;
pub const EQUIPMENT_SLOTS: usize = 6;

/// Fixed-length row of optional items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Slots {
    slots: Vec<Option<Item>>,
}

impl Slots {
    pub fn with_len(len: usize) -> Self {
        Self { slots: vec![None; len] }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn is_free(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(None))
    }

    pub fn take(&mut self, index: usize) -> Option<Item> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Stores `item` in an empty slot; hands it back otherwise.
    pub fn put(&mut self, index: usize, item: Item) -> Result<(), Item> {
        match self.slots.get_mut(index) {
            Some(slot @ None) => {
                *slot = Some(item);
                Ok(())
            }
            _ => Err(item),
        }
    }

    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Item>> {
        self.slots.iter().map(Option::as_ref)
    }
}

/// Equipment slots in cursor order: left column top to bottom is weapon,
/// accessory, boots; right column is head, body, arms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EquipSlot {
    Weapon,
    Head,
    Accessory,
    Body,
    Boots,
    Arms,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; EQUIPMENT_SLOTS] = [
        EquipSlot::Weapon,
        EquipSlot::Head,
        EquipSlot::Accessory,
        EquipSlot::Body,
        EquipSlot::Boots,
        EquipSlot::Arms,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EquipSlot::Weapon => "Weapon",
            EquipSlot::Head => "Head",
            EquipSlot::Accessory => "Accessory",
            EquipSlot::Body => "Body",
            EquipSlot::Boots => "Boots",
            EquipSlot::Arms => "Arms",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    Inventory,
    Bag,
    Equipment,
    Drop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub zone: Zone,
    pub index: usize,
}

impl Cursor {
    pub const HOME: Cursor = Cursor { zone: Zone::Inventory, index: 0 };

    const fn at(zone: Zone, index: usize) -> Option<Cursor> {
        Some(Cursor { zone, index })
    }

    /// Next cursor position, or `None` when the move leads nowhere.
    pub fn moved(self, direction: Direction) -> Option<Cursor> {
        use Zone::{Bag, Drop, Equipment, Inventory};
        let i = self.index;
        match (self.zone, direction) {
            (Inventory, Direction::Left) => match i {
                0 => Self::at(Bag, BAG_SLOTS - 1),
                5 => Self::at(Equipment, 1),
                10 | 15 => Self::at(Equipment, 3),
                20 => Self::at(Equipment, 5),
                _ => Self::at(Inventory, i - 1),
            },
            (Inventory, Direction::Right) => {
                if i % INVENTORY_COLUMNS == INVENTORY_COLUMNS - 1 {
                    Self::at(Drop, 0)
                } else {
                    Self::at(Inventory, i + 1)
                }
            }
            (Inventory, Direction::Up) => {
                let above = i.checked_sub(INVENTORY_COLUMNS)?;
                Self::at(Inventory, above)
            }
            (Inventory, Direction::Down) => {
                let below = i + INVENTORY_COLUMNS;
                if below < INVENTORY_SLOTS { Self::at(Inventory, below) } else { None }
            }
            (Drop, Direction::Left) => Self::at(Inventory, INVENTORY_SLOTS - 1),
            (Drop, _) => None,
            (Bag, Direction::Left) => if i > 0 { Self::at(Bag, i - 1) } else { None },
            (Bag, Direction::Right) => {
                if i == BAG_SLOTS - 1 {
                    Self::at(Inventory, 0)
                } else {
                    Self::at(Bag, i + 1)
                }
            }
            (Bag, Direction::Up) => None,
            (Bag, Direction::Down) => match i {
                0 | 1 => Self::at(Equipment, 0),
                3 | 4 => Self::at(Equipment, 1),
                _ => None,
            },
            (Equipment, Direction::Left) => {
                if i % 2 == 1 { Self::at(Equipment, i - 1) } else { None }
            }
            (Equipment, Direction::Right) => match i {
                1 => Self::at(Inventory, 5),
                3 => Self::at(Inventory, 10),
                5 => Self::at(Inventory, 20),
                _ => Self::at(Equipment, i + 1),
            },
            (Equipment, Direction::Up) => match i {
                0 => Self::at(Bag, 0),
                1 => Self::at(Bag, BAG_SLOTS - 1),
                _ => Self::at(Equipment, i - 2),
            },
            (Equipment, Direction::Down) => {
                if i + 2 < EQUIPMENT_SLOTS { Self::at(Equipment, i + 2) } else { None }
            }
        }
    }
}

/// Where a held item came from, so cancelling can put it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Origin {
    pub cursor: Cursor,
    pub member: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grab {
    pub item: Item,
    pub origin: Origin,
}

/// Result of pressing confirm on the item screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transfer {
    PickedUp,
    Placed,
    Discarded(Item),
    Blocked,
    Nothing,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemScreen {
    pub cursor: Cursor,
    /// Party member whose bag and equipment are shown.
    pub member: usize,
    grabbed: Option<Grab>,
}

impl Default for ItemScreen {
    fn default() -> Self {
        Self { cursor: Cursor::HOME, member: 0, grabbed: None }
    }
}

impl ItemScreen {
    pub fn grabbed(&self) -> Option<&Grab> {
        self.grabbed.as_ref()
    }

    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        match self.cursor.moved(direction) {
            Some(next) => {
                self.cursor = next;
                true
            }
            None => false,
        }
    }

    /// Shows the next or previous member's bag and equipment.
    pub fn turn_page(&mut self, forward: bool, party_len: usize) -> bool {
        let next = if forward { self.member + 1 } else { self.member.wrapping_sub(1) };
        if next >= party_len {
            return false;
        }
        self.member = next;
        true
    }

    pub fn confirm(&mut self, inventory: &mut Slots, party: &mut Party) -> Transfer {
        let cursor = self.cursor;
        let member = self.member;
        match self.grabbed.take() {
            None => {
                let Some(slots) = zone_slots(cursor.zone, member, inventory, party) else {
                    return Transfer::Nothing;
                };
                match slots.take(cursor.index) {
                    Some(item) => {
                        self.grabbed = Some(Grab { item, origin: Origin { cursor, member } });
                        Transfer::PickedUp
                    }
                    None => Transfer::Nothing,
                }
            }
            Some(grab) => {
                let Some(slots) = zone_slots(cursor.zone, member, inventory, party) else {
                    return Transfer::Discarded(grab.item);
                };
                match slots.put(cursor.index, grab.item) {
                    Ok(()) => Transfer::Placed,
                    Err(item) => {
                        self.grabbed = Some(Grab { item, origin: grab.origin });
                        Transfer::Blocked
                    }
                }
            }
        }
    }

    /// Returns any held item to where it was picked up and resets the screen.
    pub fn cancel(&mut self, inventory: &mut Slots, party: &mut Party) {
        if let Some(grab) = self.grabbed.take() {
            restore(grab, inventory, party);
        }
        *self = Self::default();
    }
}

fn zone_slots<'a>(
    zone: Zone,
    member: usize,
    inventory: &'a mut Slots,
    party: &'a mut Party,
) -> Option<&'a mut Slots> {
    match zone {
        Zone::Inventory => Some(inventory),
        Zone::Bag => party.member_mut(member).map(|player| &mut player.bag),
        Zone::Equipment => party.member_mut(member).map(|player| &mut player.equipment),
        Zone::Drop => None,
    }
}

fn restore(grab: Grab, inventory: &mut Slots, party: &mut Party) {
    let Origin { cursor, member } = grab.origin;
    let item = match zone_slots(cursor.zone, member, inventory, party) {
        Some(slots) => match slots.put(cursor.index, grab.item) {
            Ok(()) => return,
            Err(item) => item,
        },
        None => grab.item,
    };
    match inventory.first_free() {
        Some(index) => {
            log::warn!("origin slot of {} was taken; moved it to slot {index}", item.name);
            let _ = inventory.put(index, item);
        }
        None => log::error!("no free slot to return {}; item lost", item.name),
    }
}
