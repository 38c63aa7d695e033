use crate::data::DataFile;
use crate::error::LoadResult;
use crate::stats::Stat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemClass {
    Sword,
    Axe,
    Lance,
    Cane,
    Armor,
    Helmet,
    Shoes,
    Gloves,
    Accessory,
}

impl ItemClass {
    pub fn parse(raw: &str) -> Option<Self> {
        Some(match raw {
            "Sword" => ItemClass::Sword,
            "Axe" => ItemClass::Axe,
            "Lance" => ItemClass::Lance,
            "Cane" => ItemClass::Cane,
            "Armor" => ItemClass::Armor,
            "Helmet" => ItemClass::Helmet,
            "Shoes" => ItemClass::Shoes,
            "Gloves" => ItemClass::Gloves,
            "Accessory" => ItemClass::Accessory,
            _ => return None,
        })
    }

    /// The statistic the item's power applies to.
    pub fn bonus_stat(self) -> Stat {
        match self {
            ItemClass::Sword | ItemClass::Axe | ItemClass::Lance => Stat::Attack,
            ItemClass::Cane => Stat::Intelligence,
            ItemClass::Armor
            | ItemClass::Helmet
            | ItemClass::Shoes
            | ItemClass::Gloves
            | ItemClass::Accessory => Stat::Defence,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub class: ItemClass,
    pub power: i32,
    pub price: u32,
}

/// Every item known to the game, addressed by its position in `itemicon.dat`.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Reads `id,name,class,power,price,description` records.
    pub fn parse(file: &DataFile) -> LoadResult<Self> {
        let mut items = Vec::new();
        for record in file.records() {
            let class_name = record.text(2, "item class")?;
            let class = ItemClass::parse(class_name)
                .ok_or_else(|| record.error(format!("unknown item class `{class_name}`")))?;
            let description = record.rest(5).unwrap_or_default().to_string();
            items.push(Item {
                name: record.text(1, "item name")?.to_string(),
                description,
                class,
                power: record.parse(3, "item power")?,
                price: record.parse(4, "item price")?,
            });
        }
        Ok(Self { items })
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}
