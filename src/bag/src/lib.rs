//src/bag/src/lib.rs
//! Slot inventory and equipment
//!
//! [`Inventory`] keeps stackable items in an ordered, growable list of
//! [`Slot`]s: it decides where an add lands, what happens to overflow, and how
//! the slots are reorganised. [`EquipmentSlotMap`] is the simpler sibling that
//! holds at most one item per [`EquipmentCategory`](items::EquipmentCategory).
//! Both report changes through synchronous [`events`].

pub mod config;
pub mod equipment;
pub mod events;
pub mod inventory;
pub mod slot;
pub mod snapshot;


pub use config::{ConfigError, InventoryConfig, LossPolicy, OverflowPolicy};
pub use equipment::{EquipError, EquipmentSlotMap};
pub use events::{EquipmentEvent, Event, EventHandler, EventHub, HandlerId, InventoryEvent, event_types};
pub use inventory::{Inventory, InventoryError};
pub use slot::{Slot, SlotError};
pub use snapshot::{EquipmentSnapshot, InventorySnapshot, SlotRecord, SnapshotError};
