//src/bag/src/snapshot.rs
//! Plain-data mirrors of the live containers.
//!
//! Live containers carry handler lists and keyed maps that do not belong in a
//! save file. These snapshots are ordered lists that any serde format can
//! store; converting back validates every invariant of the live structure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use items::{EquipmentCategory, Equippable, ItemTrait};

use crate::config::{InventoryConfig, LossPolicy, OverflowPolicy};
use crate::equipment::{EquipError, EquipmentSlotMap};
use crate::inventory::Inventory;
use crate::slot::{Slot, SlotError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("{capacity} slots exceed max capacity {max}")]
    CapacityExceedsMax { capacity: usize, max: usize },
    #[error("slot {index}: {source}")]
    InvalidSlot { index: usize, source: SlotError },
    #[error(transparent)]
    Equipment(#[from] EquipError),
}

/// One persisted slot: item-or-empty plus quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRecord<I> {
    pub item: Option<I>,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot<I> {
    pub max_capacity: usize,
    pub overflow: OverflowPolicy,
    pub loss: LossPolicy,
    /// One record per slot; its length is the capacity.
    pub slots: Vec<SlotRecord<I>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSnapshot<I> {
    pub categories: Vec<EquipmentCategory>,
    pub items: Vec<I>,
}

impl<I: ItemTrait> Inventory<I> {
    pub fn to_persistable(&self) -> InventorySnapshot<I> {
        let config = self.config();
        InventorySnapshot {
            max_capacity: config.max_capacity,
            overflow: config.overflow,
            loss: config.loss,
            slots: self
                .slots()
                .iter()
                .map(|slot| SlotRecord {
                    item: slot.item().map(ItemTrait::deep_copy),
                    quantity: slot.quantity(),
                })
                .collect(),
        }
    }

    /// Rebuilds a live inventory. Event subscriptions are not part of a
    /// snapshot and start out empty.
    pub fn from_persistable(snapshot: InventorySnapshot<I>) -> Result<Self, SnapshotError> {
        let capacity = snapshot.slots.len();
        if capacity > snapshot.max_capacity {
            return Err(SnapshotError::CapacityExceedsMax {
                capacity,
                max: snapshot.max_capacity,
            });
        }

        let slots = snapshot
            .slots
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Slot::from_parts(record.item, record.quantity)
                    .map_err(|source| SnapshotError::InvalidSlot { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let config = InventoryConfig {
            start_capacity: capacity,
            max_capacity: snapshot.max_capacity,
            overflow: snapshot.overflow,
            loss: snapshot.loss,
        };
        Ok(Inventory::from_slots(slots, &config))
    }
}

impl<I: Equippable> EquipmentSlotMap<I> {
    pub fn to_persistable(&self) -> EquipmentSnapshot<I> {
        EquipmentSnapshot {
            categories: self.categories().collect(),
            items: self
                .equipped_items()
                .into_iter()
                .map(ItemTrait::deep_copy)
                .collect(),
        }
    }

    /// Rebuilds the map: every listed category gets a slot, then the items are
    /// put back without raising events.
    pub fn from_persistable(snapshot: EquipmentSnapshot<I>) -> Result<Self, SnapshotError> {
        let mut map = EquipmentSlotMap::with_categories(snapshot.categories);
        for item in snapshot.items {
            map.restore(item)?;
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use items::{Armor, Item, ItemData, Weapon, WeaponType};

    fn potion() -> Item {
        Item::new(ItemData::new(1, "Potion", 5))
    }

    #[test]
    fn inventory_snapshot_keeps_layout_and_policies() {
        let mut inventory = Inventory::new(InventoryConfig {
            start_capacity: 3,
            max_capacity: 6,
            overflow: OverflowPolicy::Stop,
            loss: LossPolicy::Discard,
        })
        .unwrap();
        inventory.try_add_item_at(&potion(), 2, 4).unwrap();

        let restored = Inventory::from_persistable(inventory.to_persistable()).unwrap();

        assert_eq!(restored.capacity(), 3);
        assert_eq!(restored.max_capacity(), 6);
        assert_eq!(restored.overflow_policy(), OverflowPolicy::Stop);
        assert!(restored.try_get_slot_at(0).is_some_and(Slot::is_empty));
        assert_eq!(restored.try_get_slot_at(2).map(Slot::quantity), Some(4));
    }

    #[test]
    fn snapshot_with_broken_slot_is_rejected() {
        let snapshot = InventorySnapshot {
            max_capacity: 2,
            overflow: OverflowPolicy::Spill,
            loss: LossPolicy::Discard,
            slots: vec![
                SlotRecord {
                    item: None,
                    quantity: 0,
                },
                SlotRecord {
                    item: Some(potion()),
                    quantity: 9,
                },
            ],
        };
        assert_eq!(
            Inventory::from_persistable(snapshot).unwrap_err(),
            SnapshotError::InvalidSlot {
                index: 1,
                source: SlotError::InvalidQuantity {
                    quantity: 9,
                    max_stack: 5
                }
            }
        );
    }

    #[test]
    fn snapshot_larger_than_max_is_rejected() {
        let snapshot: InventorySnapshot<Item> = InventorySnapshot {
            max_capacity: 1,
            overflow: OverflowPolicy::Spill,
            loss: LossPolicy::Discard,
            slots: vec![
                SlotRecord {
                    item: None,
                    quantity: 0
                };
                2
            ],
        };
        assert!(matches!(
            Inventory::from_persistable(snapshot),
            Err(SnapshotError::CapacityExceedsMax { capacity: 2, max: 1 })
        ));
    }

    #[test]
    fn equipment_snapshot_round_trip() {
        let mut map = EquipmentSlotMap::new();
        let sword = Item::weapon(ItemData::new(5, "Sword", 1), Weapon::new(8, 1.0, WeaponType::Sword));
        map.try_equip(&sword).unwrap();

        let snapshot = map.to_persistable();
        assert_eq!(snapshot.items.len(), 1);

        let restored = EquipmentSlotMap::from_persistable(snapshot).unwrap();
        assert!(restored
            .get_item(EquipmentCategory::Weapon)
            .is_some_and(|w| w.is_equivalent_to(&sword)));
        assert!(restored.accepts(EquipmentCategory::Armor));
        assert!(restored.get_item(EquipmentCategory::Armor).is_none());
    }

    #[test]
    fn two_items_for_one_category_fail_to_restore() {
        let mail = |uid| Item::armor(ItemData::new(uid, "Mail", 1), Armor::new(3.0));
        let snapshot = EquipmentSnapshot {
            categories: vec![EquipmentCategory::Armor, EquipmentCategory::Weapon],
            items: vec![mail(1), mail(2)],
        };
        assert!(matches!(
            EquipmentSlotMap::from_persistable(snapshot),
            Err(SnapshotError::Equipment(EquipError::SlotOccupied(
                EquipmentCategory::Armor
            )))
        ));
    }
}
