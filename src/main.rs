//src/main.rs
//! Scripted walkthrough of the inventory.
//!
//! Usage: `stackbag [CONFIG.json] [--save DIR]`. Set `RUST_LOG=debug` to see
//! overflow and equipment logs.

use anyhow::{Context, Result};
use std::{env, fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stackbag::{
    Armor, EquipmentCategory, EquipmentSlotMap, Inventory, InventoryConfig, InventoryEvent, Item,
    ItemData, SaveData, SaveSystem, UseOutcome, Weapon, WeaponType, event_types, handle_error,
};

struct Args {
    config: Option<PathBuf>,
    save_dir: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        save_dir: None,
    };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--save" {
            let dir = iter.next().context("--save needs a directory")?;
            args.save_dir = Some(dir.into());
        } else {
            args.config = Some(arg.into());
        }
    }
    Ok(args)
}

fn load_config(path: Option<&PathBuf>) -> Result<InventoryConfig> {
    let Some(path) = path else {
        return Ok(InventoryConfig {
            start_capacity: 6,
            max_capacity: 10,
            ..InventoryConfig::default()
        });
    };
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    Ok(InventoryConfig::from_json(&text)?)
}

fn print_inventory(inventory: &Inventory<Item>) {
    for (index, slot) in inventory.slots().iter().enumerate() {
        match slot.item() {
            Some(item) => println!("  [{index}] {item} x{}", slot.quantity()),
            None => println!("  [{index}] -"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = parse_args()?;
    let config = load_config(args.config.as_ref())?;
    let mut inventory = Inventory::new(config)?;
    let mut equipment = EquipmentSlotMap::new();

    inventory.subscribe(event_types::ITEMS_ADDED, |event: &InventoryEvent<Item>| {
        if let InventoryEvent::ItemsAdded { index, slot, added } = event {
            info!(index, added, total = slot.quantity(), "stack grew");
        }
    });

    let potion = Item::new(ItemData::new(1, "Healing Potion", 5).with_description("Restores health"));
    let arrow = Item::new(ItemData::new(2, "Arrow", 20));
    let bow = Item::weapon(ItemData::new(3, "Short Bow", 1), Weapon::new(5, 6.0, WeaponType::Bow));
    let mail = Item::armor(ItemData::new(4, "Leather Armor", 1), Armor::new(2.5));

    inventory.try_add_item(&potion, 7)?;
    inventory.try_add_item(&arrow, 30)?;
    inventory.try_insert_item_at_front(&bow, 1)?;
    println!("After looting:");
    print_inventory(&inventory);

    equipment.try_equip(&bow)?;
    equipment.try_equip(&mail)?;
    inventory.remove_item(&bow, true, false);
    inventory.compact();
    println!("After equipping:");
    print_inventory(&inventory);

    if let Some(UseOutcome::Attack(outcome)) = equipment
        .get_item(EquipmentCategory::Weapon)
        .and_then(Item::use_item)
    {
        println!(
            "Attack: {} damage, reach {:.1} ({})",
            outcome.damage, outcome.reach, outcome.strategy
        );
    }

    if inventory.capacity() < inventory.max_capacity() {
        let capacity = inventory.try_increase_capacity(2)?;
        println!("Capacity is now {capacity}");
    }

    if let Some(dir) = args.save_dir {
        let store = SaveSystem::new(&dir, 3)?;
        let data = SaveData::capture("demo", &inventory, &equipment);
        if let Err(err) = store.save_game(0, &data) {
            eprintln!("{}", handle_error(&err));
            return Err(err.into());
        }
        let (restored, _) = store.load_game(0)?.restore()?;
        println!("Saved to {:?} and reloaded {} slots", dir, restored.capacity());
    }

    Ok(())
}
