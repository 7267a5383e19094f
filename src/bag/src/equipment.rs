//src/bag/src/equipment.rs
use std::collections::BTreeMap;

use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::debug;

use items::{EquipmentCategory, Equippable};

use crate::events::{EquipmentEvent, EventHandler, EventHub, HandlerId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EquipError {
    #[error("item cannot be equipped")]
    NotEquippable,
    #[error("no {0} slot on this equipment")]
    UnknownCategory(EquipmentCategory),
    #[error("{0} slot is already occupied")]
    SlotOccupied(EquipmentCategory),
}

/// One slot per equipment category, each holding at most one item.
///
/// The set of categories is fixed at construction. Equipping into an occupied
/// category fails; the caller has to [`unequip`](Self::unequip) first.
#[derive(Debug)]
pub struct EquipmentSlotMap<I> {
    slots: BTreeMap<EquipmentCategory, Option<I>>,
    events: EventHub<EquipmentEvent<I>>,
}

impl<I: Equippable> Default for EquipmentSlotMap<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Equippable> EquipmentSlotMap<I> {
    /// Map with a slot for every [`EquipmentCategory`].
    pub fn new() -> Self {
        Self::with_categories(EquipmentCategory::iter())
    }

    /// Map that only accepts the given categories.
    pub fn with_categories(categories: impl IntoIterator<Item = EquipmentCategory>) -> Self {
        Self {
            slots: categories.into_iter().map(|c| (c, None)).collect(),
            events: EventHub::new(),
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = EquipmentCategory> + '_ {
        self.slots.keys().copied()
    }

    pub fn accepts(&self, category: EquipmentCategory) -> bool {
        self.slots.contains_key(&category)
    }

    /// Equips a copy of `item` into its category slot.
    pub fn try_equip(&mut self, item: &I) -> Result<(), EquipError> {
        let category = item
            .equipment_category()
            .ok_or(EquipError::NotEquippable)?;
        let slot = self
            .slots
            .get_mut(&category)
            .ok_or(EquipError::UnknownCategory(category))?;
        if slot.is_some() {
            return Err(EquipError::SlotOccupied(category));
        }

        let equipped = slot.insert(item.deep_copy());
        debug!(item = %equipped.display_name(), %category, "item equipped");
        self.events.emit_with(|| EquipmentEvent::ItemEquipped {
            category,
            item: item.deep_copy(),
        });
        Ok(())
    }

    /// Takes the item out of `category`. No event fires when nothing was equipped.
    pub fn unequip(&mut self, category: EquipmentCategory) -> Option<I> {
        let item = self.slots.get_mut(&category)?.take()?;
        debug!(item = %item.display_name(), %category, "item unequipped");
        self.events.emit_with(|| EquipmentEvent::ItemUnequipped {
            category,
            item: item.deep_copy(),
        });
        Some(item)
    }

    pub fn get_item(&self, category: EquipmentCategory) -> Option<&I> {
        self.slots.get(&category).and_then(Option::as_ref)
    }

    pub fn is_equipped(&self, category: EquipmentCategory) -> bool {
        self.get_item(category).is_some()
    }

    /// Every equipped item, in category order.
    pub fn equipped_items(&self) -> Vec<&I> {
        self.slots.values().flatten().collect()
    }

    pub fn subscribe<H>(&mut self, event_type: &'static str, handler: H) -> HandlerId
    where
        H: EventHandler<EquipmentEvent<I>> + 'static,
    {
        self.events.subscribe(event_type, handler)
    }

    pub fn subscribe_all<H>(&mut self, handler: H) -> HandlerId
    where
        H: EventHandler<EquipmentEvent<I>> + 'static,
    {
        self.events.subscribe_all(handler)
    }

    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Restores equipped items without raising events; used by snapshots.
    pub(crate) fn restore(&mut self, item: I) -> Result<(), EquipError> {
        let category = item
            .equipment_category()
            .ok_or(EquipError::NotEquippable)?;
        let slot = self
            .slots
            .get_mut(&category)
            .ok_or(EquipError::UnknownCategory(category))?;
        if slot.is_some() {
            return Err(EquipError::SlotOccupied(category));
        }
        *slot = Some(item);
        Ok(())
    }
}
