//src/lib.rs
//! Slot-based inventory and equipment for games.
//!
//! The work lives in the member crates; this facade re-exports them under one
//! name so callers only depend on `stackbag`.

pub use bag::{
    ConfigError, EquipError, EquipmentEvent, EquipmentSlotMap, EquipmentSnapshot, Event,
    EventHandler, EventHub, HandlerId, Inventory, InventoryConfig, InventoryError,
    InventoryEvent, InventorySnapshot, LossPolicy, OverflowPolicy, Slot, SlotError, SlotRecord,
    SnapshotError, event_types,
};
pub use error::{StoreError, handle_error};
pub use items::{
    Armor, AttackOutcome, AttackStrategy, EquipmentCategory, EquipmentFacet, Equippable, Item,
    ItemData, ItemTrait, UsableFacet, UseOutcome, Weapon, WeaponType,
};
pub use save::{SAVE_VERSION, SaveData, SaveMetadata, SaveSystem};
