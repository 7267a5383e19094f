#![allow(dead_code)]

//! Item builders and slot-layout helpers shared by the integration tests.

use stackbag::{
    Armor, Inventory, InventoryConfig, Item, ItemData, LossPolicy, OverflowPolicy, Weapon,
    WeaponType,
};

pub const STACK: u32 = 5;

pub fn stackable(uid: u32, name: &str) -> Item {
    Item::new(ItemData::new(uid, name, STACK))
}

pub fn potion() -> Item {
    stackable(1, "Potion")
}

pub fn elixir() -> Item {
    stackable(2, "Elixir")
}

pub fn scroll() -> Item {
    stackable(3, "Scroll")
}

pub fn sword() -> Item {
    Item::weapon(ItemData::new(10, "Sword", 1), Weapon::new(8, 1.0, WeaponType::Sword))
}

pub fn dagger() -> Item {
    Item::weapon(ItemData::new(11, "Dagger", 1), Weapon::new(4, 1.0, WeaponType::Dagger))
}

pub fn plate() -> Item {
    Item::armor(ItemData::new(20, "Plate", 1), Armor::new(9.0))
}

pub fn inventory(
    start: usize,
    max: usize,
    overflow: OverflowPolicy,
    loss: LossPolicy,
) -> Inventory<Item> {
    Inventory::new(InventoryConfig {
        start_capacity: start,
        max_capacity: max,
        overflow,
        loss,
    })
    .expect("valid test config")
}

/// (name, quantity) per slot, `None` for empty slots.
pub fn layout(inventory: &Inventory<Item>) -> Vec<Option<(String, u32)>> {
    inventory
        .slots()
        .iter()
        .map(|slot| slot.item().map(|i| (i.name().to_string(), slot.quantity())))
        .collect()
}

pub fn stack(name: &str, quantity: u32) -> Option<(String, u32)> {
    Some((name.to_string(), quantity))
}
