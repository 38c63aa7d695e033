//! Clerk shops: the stock list, the purse with its animated debit, and the
//! two-panel buy/sell screen.

use crate::data::DataFile;
use crate::error::{LoadError, LoadResult};
use crate::inventory::{INVENTORY_COLUMNS, INVENTORY_SLOTS, Slots};
use crate::item::{Item, ItemCatalog};
use crate::types::Direction;

/// Product slots on the shelf. The slot after the last product is the sell counter.
pub const SHELF_SLOTS: usize = 9;
pub const SELL_SLOT: usize = SHELF_SLOTS;
const SHELF_COLUMNS: usize = 3;
/// Gold removed from the displayed purse per frame while a purchase settles.
pub const GOLD_STEP: u32 = 7;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shop {
    pub name: String,
    pub items: Vec<Item>,
}

impl Shop {
    /// A `.shop` file is a comma-separated list of item catalog indices.
    pub fn parse(name: &str, file: &DataFile, catalog: &ItemCatalog) -> LoadResult<Self> {
        let mut items = Vec::new();
        for record in file.records() {
            for raw in &record.fields {
                let index: usize = raw
                    .parse()
                    .map_err(|_| record.error(format!("item index `{raw}` is not a number")))?;
                let item = catalog.get(index).ok_or_else(|| LoadError::UnknownItem {
                    path: record.path().to_path_buf(),
                    index,
                })?;
                items.push(item.clone());
            }
        }
        if items.len() > SHELF_SLOTS {
            log::warn!(
                "{}: shop {name} lists {} items; only the first {SHELF_SLOTS} fit the shelf",
                file.path().display(),
                items.len()
            );
            items.truncate(SHELF_SLOTS);
        }
        Ok(Self { name: name.to_string(), items })
    }
}

/// Party gold plus the part of a purchase not yet taken out of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Purse {
    gold: u32,
    pending: u32,
}

impl Purse {
    pub fn new(gold: u32) -> Self {
        Self { gold, pending: 0 }
    }

    /// Gold as currently displayed; runs down toward `available` while a debit settles.
    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    pub fn available(&self) -> u32 {
        self.gold - self.pending
    }

    pub fn can_afford(&self, price: u32) -> bool {
        self.available() >= price
    }

    fn debit(&mut self, price: u32) {
        self.pending += price;
    }

    fn credit(&mut self, price: u32) {
        self.gold += price;
    }

    pub fn tick(&mut self) {
        let step = self.pending.min(GOLD_STEP);
        self.gold -= step;
        self.pending -= step;
    }

    pub fn settle(&mut self) {
        self.gold -= self.pending;
        self.pending = 0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShopCursor {
    Shelf(usize),
    Inventory(usize),
}

impl ShopCursor {
    pub fn moved(self, direction: Direction) -> Option<ShopCursor> {
        use ShopCursor::{Inventory, Shelf};
        match (self, direction) {
            (Shelf(i), Direction::Up) => (i >= SHELF_COLUMNS).then(|| Shelf(i - SHELF_COLUMNS)),
            (Shelf(i), Direction::Down) => {
                (i + SHELF_COLUMNS <= SELL_SLOT).then_some(Shelf(i + SHELF_COLUMNS))
            }
            (Shelf(i), Direction::Left) => Some(match i {
                0 => Inventory(9),
                3 => Inventory(14),
                6 => Inventory(19),
                SELL_SLOT => Inventory(24),
                _ => Shelf(i - 1),
            }),
            (Shelf(i), Direction::Right) => {
                (i % SHELF_COLUMNS != SHELF_COLUMNS - 1 && i != SELL_SLOT).then_some(Shelf(i + 1))
            }
            (Inventory(i), Direction::Up) => {
                (i >= INVENTORY_COLUMNS).then(|| Inventory(i - INVENTORY_COLUMNS))
            }
            (Inventory(i), Direction::Down) => {
                let below = i + INVENTORY_COLUMNS;
                (below < INVENTORY_SLOTS).then_some(Inventory(below))
            }
            (Inventory(i), Direction::Left) => {
                (i % INVENTORY_COLUMNS != 0).then(|| Inventory(i - 1))
            }
            (Inventory(i), Direction::Right) => Some(match i {
                4 | 9 => Shelf(0),
                14 => Shelf(3),
                19 => Shelf(6),
                24 => Shelf(SELL_SLOT),
                _ => Inventory(i + 1),
            }),
        }
    }
}

/// The item in hand: a product taken off the shelf (the shelf keeps its
/// stock) or one of the party's own items with the slot it came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Held {
    Product(Item),
    Owned { item: Item, origin: usize },
}

impl Held {
    pub fn item(&self) -> &Item {
        match self {
            Held::Product(item) | Held::Owned { item, .. } => item,
        }
    }
}

/// What a confirm press did on the shop screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShopOutcome {
    PickedUp,
    Bought { item: String, price: u32 },
    Sold { item: String, price: u32 },
    /// The held item went back where it came from.
    PutBack,
    /// The target slot is taken or the purse is short; the item stays in hand.
    Refused,
    Nothing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopScreen {
    shop: Shop,
    cursor: ShopCursor,
    held: Option<Held>,
}

impl ShopScreen {
    pub fn open(shop: Shop) -> Self {
        Self { shop, cursor: ShopCursor::Shelf(0), held: None }
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn cursor(&self) -> ShopCursor {
        self.cursor
    }

    pub fn held(&self) -> Option<&Held> {
        self.held.as_ref()
    }

    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let Some(next) = self.cursor.moved(direction) else {
            return false;
        };
        self.cursor = next;
        true
    }

    pub fn confirm(&mut self, inventory: &mut Slots, purse: &mut Purse) -> ShopOutcome {
        let Some(held) = self.held.take() else {
            return self.pick_up(inventory);
        };
        match (self.cursor, held) {
            (ShopCursor::Shelf(_), Held::Product(_)) => ShopOutcome::PutBack,
            (ShopCursor::Shelf(SELL_SLOT), Held::Owned { item, .. }) => {
                purse.credit(item.price);
                log::info!("sold {} for {}", item.name, item.price);
                ShopOutcome::Sold { item: item.name, price: item.price }
            }
            (ShopCursor::Shelf(_), Held::Owned { item, origin }) => {
                if let Err(item) = inventory.put(origin, item) {
                    log::warn!("slot {origin} refilled while {} was held", item.name);
                    self.held = Some(Held::Owned { item, origin });
                    return ShopOutcome::Refused;
                }
                ShopOutcome::PutBack
            }
            (ShopCursor::Inventory(slot), held) => self.place(slot, held, inventory, purse),
        }
    }

    fn pick_up(&mut self, inventory: &mut Slots) -> ShopOutcome {
        let held = match self.cursor {
            ShopCursor::Shelf(index) => self.shop.items.get(index).cloned().map(Held::Product),
            ShopCursor::Inventory(slot) => {
                inventory.take(slot).map(|item| Held::Owned { item, origin: slot })
            }
        };
        match held {
            Some(held) => {
                self.held = Some(held);
                ShopOutcome::PickedUp
            }
            None => ShopOutcome::Nothing,
        }
    }

    fn place(
        &mut self,
        slot: usize,
        held: Held,
        inventory: &mut Slots,
        purse: &mut Purse,
    ) -> ShopOutcome {
        if !inventory.is_free(slot) {
            self.held = Some(held);
            return ShopOutcome::Refused;
        }
        match held {
            Held::Product(item) => {
                if !purse.can_afford(item.price) {
                    self.held = Some(Held::Product(item));
                    return ShopOutcome::Refused;
                }
                purse.debit(item.price);
                log::info!("bought {} for {}", item.name, item.price);
                let outcome = ShopOutcome::Bought { item: item.name.clone(), price: item.price };
                let _ = inventory.put(slot, item);
                outcome
            }
            Held::Owned { item, .. } => {
                let _ = inventory.put(slot, item);
                ShopOutcome::PutBack
            }
        }
    }

    /// Leaves the shop: an owned item in hand returns to its slot (a product
    /// simply goes back on the shelf) and any pending debit is settled.
    pub fn close(mut self, inventory: &mut Slots, purse: &mut Purse) {
        if let Some(Held::Owned { item, origin }) = self.held.take() {
            let item = match inventory.put(origin, item) {
                Ok(()) => None,
                Err(item) => Some(item),
            };
            if let Some(item) = item {
                match inventory.first_free() {
                    Some(slot) => {
                        let _ = inventory.put(slot, item);
                    }
                    None => log::error!("no free slot to return {}; item lost", item.name),
                }
            }
        }
        purse.settle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::sample_item;

    fn screen() -> ShopScreen {
        ShopScreen::open(Shop {
            name: "weapons".to_string(),
            items: vec![sample_item("sword", 300), sample_item("shield", 120)],
        })
    }

    #[test]
    fn parse_resolves_catalog_indices() {
        let catalog = ItemCatalog::new(vec![sample_item("a", 1), sample_item("b", 2)]);
        let file = DataFile::from_text("armory.shop", "# stock\n1,0\n1\n");
        let shop = Shop::parse("armory", &file, &catalog).expect("shop parses");
        let names: Vec<_> = shop.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "b"]);

        let bad = DataFile::from_text("bad.shop", "0,7\n");
        let err = Shop::parse("bad", &bad, &catalog).expect_err("index 7 is unknown");
        assert!(matches!(err, LoadError::UnknownItem { index: 7, .. }));
    }

    #[test]
    fn shelf_and_inventory_connect_at_their_edges() {
        use ShopCursor::{Inventory, Shelf};
        assert_eq!(Shelf(0).moved(Direction::Left), Some(Inventory(9)));
        assert_eq!(Shelf(SELL_SLOT).moved(Direction::Left), Some(Inventory(24)));
        assert_eq!(Shelf(6).moved(Direction::Down), Some(Shelf(SELL_SLOT)));
        assert_eq!(Shelf(7).moved(Direction::Down), None);
        assert_eq!(Shelf(8).moved(Direction::Down), None);
        assert_eq!(Shelf(2).moved(Direction::Right), None);
        assert_eq!(Shelf(SELL_SLOT).moved(Direction::Right), None);
        assert_eq!(Inventory(4).moved(Direction::Right), Some(Shelf(0)));
        assert_eq!(Inventory(24).moved(Direction::Right), Some(Shelf(SELL_SLOT)));
        assert_eq!(Inventory(5).moved(Direction::Left), None);
        assert_eq!(Inventory(22).moved(Direction::Down), None);
    }

    #[test]
    fn every_cursor_move_stays_in_range() {
        let cursors = (0..=SELL_SLOT)
            .map(ShopCursor::Shelf)
            .chain((0..INVENTORY_SLOTS).map(ShopCursor::Inventory));
        for cursor in cursors {
            for direction in Direction::ALL {
                match cursor.moved(direction) {
                    Some(ShopCursor::Shelf(i)) => assert!(i <= SELL_SLOT),
                    Some(ShopCursor::Inventory(i)) => assert!(i < INVENTORY_SLOTS),
                    None => {}
                }
            }
        }
    }

    #[test]
    fn buying_debits_gradually_and_keeps_the_shelf_stocked() {
        let mut shop = screen();
        let mut inventory = Slots::with_len(INVENTORY_SLOTS);
        let mut purse = Purse::new(500);
        assert_eq!(shop.confirm(&mut inventory, &mut purse), ShopOutcome::PickedUp);
        shop.move_cursor(Direction::Left);
        let outcome = shop.confirm(&mut inventory, &mut purse);
        assert_eq!(outcome, ShopOutcome::Bought { item: "sword".to_string(), price: 300 });
        assert_eq!(inventory.get(9).map(|item| item.name.as_str()), Some("sword"));
        assert_eq!(shop.shop().items.len(), 2);
        assert_eq!((purse.gold(), purse.available()), (500, 200));
        purse.tick();
        assert_eq!(purse.gold(), 500 - GOLD_STEP);
        for _ in 0..100 {
            purse.tick();
        }
        assert_eq!((purse.gold(), purse.pending()), (200, 0));
    }

    #[test]
    fn unaffordable_purchase_changes_nothing() {
        let mut shop = screen();
        let mut inventory = Slots::with_len(INVENTORY_SLOTS);
        let mut purse = Purse::new(100);
        shop.confirm(&mut inventory, &mut purse);
        shop.move_cursor(Direction::Left);
        assert_eq!(shop.confirm(&mut inventory, &mut purse), ShopOutcome::Refused);
        assert_eq!(purse, Purse::new(100));
        assert_eq!(inventory.occupied(), 0);
        assert!(matches!(shop.held(), Some(Held::Product(_))));
        shop.close(&mut inventory, &mut purse);
        assert_eq!(inventory.occupied(), 0);
        assert_eq!(purse.gold(), 100);
    }

    #[test]
    fn pending_purchases_accumulate_against_the_purse() {
        let mut shop = screen();
        let mut inventory = Slots::with_len(INVENTORY_SLOTS);
        let mut purse = Purse::new(400);
        for target in [9, 8] {
            shop.cursor = ShopCursor::Shelf(0);
            shop.confirm(&mut inventory, &mut purse);
            shop.cursor = ShopCursor::Inventory(target);
            let outcome = shop.confirm(&mut inventory, &mut purse);
            if target == 9 {
                assert!(matches!(outcome, ShopOutcome::Bought { .. }));
            } else {
                assert_eq!(outcome, ShopOutcome::Refused, "only 100 gold left after one sword");
            }
        }
        shop.close(&mut inventory, &mut purse);
        assert_eq!((purse.gold(), purse.pending()), (100, 0));
    }

    #[test]
    fn selling_credits_immediately_and_exit_mid_grab_restores_the_item() {
        let mut shop = screen();
        let mut inventory = Slots::with_len(INVENTORY_SLOTS);
        inventory.put(24, sample_item("gem", 50)).expect("free");
        inventory.put(3, sample_item("rope", 5)).expect("free");
        let mut purse = Purse::new(0);

        shop.cursor = ShopCursor::Inventory(24);
        assert_eq!(shop.confirm(&mut inventory, &mut purse), ShopOutcome::PickedUp);
        shop.move_cursor(Direction::Right);
        assert_eq!(shop.cursor(), ShopCursor::Shelf(SELL_SLOT));
        let outcome = shop.confirm(&mut inventory, &mut purse);
        assert_eq!(outcome, ShopOutcome::Sold { item: "gem".to_string(), price: 50 });
        assert_eq!(purse.gold(), 50);

        shop.cursor = ShopCursor::Inventory(3);
        shop.confirm(&mut inventory, &mut purse);
        assert!(inventory.is_free(3));
        shop.close(&mut inventory, &mut purse);
        assert_eq!(inventory.get(3).map(|item| item.name.as_str()), Some("rope"));
        assert_eq!(inventory.occupied(), 1);
    }
}
