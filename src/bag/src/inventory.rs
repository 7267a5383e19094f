//src/bag/src/inventory.rs
use thiserror::Error;
use tracing::{debug, warn};

use items::ItemTrait;

use crate::config::{ConfigError, InventoryConfig, LossPolicy, OverflowPolicy};
use crate::events::{EventHandler, EventHub, HandlerId, InventoryEvent};
use crate::slot::{Slot, SlotError};

/// Inventory failures. A failed call leaves the inventory unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("slot index {index} out of range (capacity {capacity})")]
    InvalidIndex { index: usize, capacity: usize },
    #[error("no slot can take this item")]
    Full,
    #[error("slot {index} holds a different item")]
    IncompatibleItem { index: usize },
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error("{lost} item(s) would be discarded")]
    WouldDiscard { lost: u32 },
    #[error("capacity increase must be positive")]
    ZeroCapacityDelta,
    #[error("already at max capacity {max}")]
    AtMaxCapacity { max: usize },
    #[error(transparent)]
    Slot(#[from] SlotError),
}

/// Ordered, growable sequence of stacking slots.
///
/// Adds prefer topping up an existing equivalent stack over opening a new
/// one. What happens to the part of an add that does not fit is governed by
/// [`OverflowPolicy`] (spill into further slots or stop) and [`LossPolicy`]
/// (silently drop the remainder or refuse the add).
#[derive(Debug)]
pub struct Inventory<I> {
    slots: Vec<Slot<I>>,
    max_capacity: usize,
    overflow: OverflowPolicy,
    loss: LossPolicy,
    events: EventHub<InventoryEvent<I>>,
}

impl<I: ItemTrait> Inventory<I> {
    pub fn new(config: InventoryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_slots(
            (0..config.start_capacity).map(|_| Slot::new()).collect(),
            &config,
        ))
    }

    /// Fixed-size inventory that can never grow.
    pub fn with_capacity(capacity: usize, overflow: OverflowPolicy) -> Self {
        let config = InventoryConfig::fixed(capacity, overflow);
        Self::from_slots((0..capacity).map(|_| Slot::new()).collect(), &config)
    }

    /// Caller guarantees `slots.len() <= config.max_capacity`.
    pub(crate) fn from_slots(slots: Vec<Slot<I>>, config: &InventoryConfig) -> Self {
        Self {
            slots,
            max_capacity: config.max_capacity,
            overflow: config.overflow,
            loss: config.loss,
            events: EventHub::new(),
        }
    }

    /// Settings this inventory was built with, `start_capacity` being the current one.
    pub fn config(&self) -> InventoryConfig {
        InventoryConfig {
            start_capacity: self.capacity(),
            max_capacity: self.max_capacity,
            overflow: self.overflow,
            loss: self.loss,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }

    pub fn loss_policy(&self) -> LossPolicy {
        self.loss
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Slot::is_empty)
    }

    pub fn slots(&self) -> &[Slot<I>] {
        &self.slots
    }

    /// Item of every slot, `None` for empty ones.
    pub fn items(&self) -> Vec<Option<&I>> {
        self.slots.iter().map(Slot::item).collect()
    }

    /// Sum of all stack sizes.
    pub fn total_quantity(&self) -> u32 {
        self.slots
            .iter()
            .fold(0u32, |acc, slot| acc.saturating_add(slot.quantity()))
    }

    /// How many of `item` are held across all stacks.
    pub fn quantity_of(&self, item: &I) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.holds_equivalent(item))
            .fold(0u32, |acc, slot| acc.saturating_add(slot.quantity()))
    }

    /// Where an add of `item` would go: the first non-full stack of an
    /// equivalent item, otherwise the first empty slot.
    pub fn find_available_slot(&self, item: &I) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.holds_equivalent(item) && !slot.is_full())
            .or_else(|| self.slots.iter().position(Slot::is_empty))
    }

    /// Adds `quantity` of `item` wherever [`find_available_slot`](Self::find_available_slot) points.
    pub fn try_add_item(&mut self, item: &I, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::ZeroQuantity);
        }
        let index = self.find_available_slot(item).ok_or(InventoryError::Full)?;
        self.try_add_item_at(item, index, quantity)
    }

    /// Adds `quantity` of `item` to the slot at `index`.
    ///
    /// Whatever does not fit is handled by the overflow policy. Under
    /// [`LossPolicy::Discard`] the call succeeds whenever the target slot
    /// accepts the item, even if some of the quantity had to be dropped.
    pub fn try_add_item_at(
        &mut self,
        item: &I,
        index: usize,
        quantity: u32,
    ) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::ZeroQuantity);
        }
        let capacity = self.capacity();
        let Some(slot) = self.slots.get(index) else {
            warn!(index, capacity, "invalid slot index");
            return Err(InventoryError::InvalidIndex { index, capacity });
        };
        if !slot.is_empty() && !slot.holds_equivalent(item) {
            warn!(index, "tried to add an item to a non-matching occupied slot");
            return Err(InventoryError::IncompatibleItem { index });
        }

        if self.loss == LossPolicy::Reject {
            let lost = self.rehearsal().fill_from(item, index, quantity)?;
            if lost > 0 {
                return Err(InventoryError::WouldDiscard { lost });
            }
        }

        let lost = self.fill_from(item, index, quantity)?;
        if lost > 0 {
            debug!(item = %item.display_name(), lost, "overflow discarded");
        }
        Ok(())
    }

    /// Puts `item` in front of everything else.
    ///
    /// All current stacks are lifted out, the new item is added first and the
    /// old stacks are added back in their original order. With
    /// [`LossPolicy::Discard`], stacks that no longer fit afterwards are dropped.
    pub fn try_insert_item_at_front(
        &mut self,
        item: &I,
        quantity: u32,
    ) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::ZeroQuantity);
        }
        if self.find_available_slot(item).is_none() {
            return Err(InventoryError::Full);
        }

        if self.loss == LossPolicy::Reject {
            let expected = self.total_quantity().saturating_add(quantity);
            let mut scratch = self.rehearsal();
            scratch.reinsert_behind(item, quantity)?;
            let lost = expected.saturating_sub(scratch.total_quantity());
            if lost > 0 {
                return Err(InventoryError::WouldDiscard { lost });
            }
        }

        self.reinsert_behind(item, quantity)
    }

    fn reinsert_behind(&mut self, item: &I, quantity: u32) -> Result<(), InventoryError> {
        let previous: Vec<Slot<I>> = self.slots.iter().map(Slot::deep_copy).collect();
        self.clear();

        let lost = self.add_anywhere(item, quantity)?;
        if lost > 0 {
            debug!(item = %item.display_name(), lost, "overflow discarded");
        }
        for slot in previous {
            let (Some(old), count) = slot.into_parts() else {
                continue;
            };
            let dropped = self.add_anywhere(&old, count)?;
            if dropped > 0 {
                warn!(item = %old.display_name(), dropped, "stack dropped while inserting at front");
            }
        }
        Ok(())
    }

    /// Clears every stack equivalent to `item`, optionally scanning from the
    /// back and stopping after the first. Returns how many stacks were cleared.
    pub fn remove_item(&mut self, item: &I, first_only: bool, reversed: bool) -> usize {
        let len = self.slots.len();
        let order: Box<dyn Iterator<Item = usize>> = if reversed {
            Box::new((0..len).rev())
        } else {
            Box::new(0..len)
        };

        let mut removed = 0;
        for index in order {
            if !self.slots[index].holds_equivalent(item) {
                continue;
            }
            self.clear_slot_with_event(index);
            removed += 1;
            if first_only {
                break;
            }
        }
        removed
    }

    /// Empties the slot at `index` and hands back what it held.
    pub fn try_clear_slot_at(&mut self, index: usize) -> Option<Slot<I>> {
        if index >= self.slots.len() {
            return None;
        }
        Some(self.clear_slot_with_event(index))
    }

    pub fn try_get_item_at(&self, index: usize) -> Option<&I> {
        self.slots.get(index).and_then(Slot::item)
    }

    pub fn try_get_slot_at(&self, index: usize) -> Option<&Slot<I>> {
        self.slots.get(index)
    }

    /// Empties every slot, raising a removed event per slot.
    pub fn clear(&mut self) {
        for index in 0..self.slots.len() {
            self.clear_slot_with_event(index);
        }
    }

    /// Grows by `delta` slots, clamped to the max capacity. Existing stacks
    /// keep their index. Returns the new capacity.
    pub fn try_increase_capacity(&mut self, delta: usize) -> Result<usize, InventoryError> {
        if delta == 0 {
            return Err(InventoryError::ZeroCapacityDelta);
        }
        let capacity = self.capacity();
        if capacity >= self.max_capacity {
            return Err(InventoryError::AtMaxCapacity {
                max: self.max_capacity,
            });
        }

        let grown = capacity.saturating_add(delta).min(self.max_capacity);
        self.slots.resize_with(grown, Slot::default);
        debug!(from = capacity, to = grown, "inventory capacity increased");
        self.events
            .emit(&InventoryEvent::CapacityChanged { capacity: grown });
        Ok(grown)
    }

    /// Exchanges the contents of two slots, empty or not.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), InventoryError> {
        let capacity = self.capacity();
        for index in [a, b] {
            if index >= capacity {
                return Err(InventoryError::InvalidIndex { index, capacity });
            }
        }
        if a == b {
            return Ok(());
        }

        self.slots.swap(a, b);
        self.emit_moved(a, b);
        self.emit_moved(b, a);
        Ok(())
    }

    /// Shifts every stack toward index 0, closing the gaps between them.
    /// Stacks keep their relative order.
    pub fn compact(&mut self) {
        let mut moves = Vec::new();
        let mut write = 0;
        for read in 0..self.slots.len() {
            if self.slots[read].is_empty() {
                continue;
            }
            // everything before `write` is occupied, so `write` is a gap
            if read != write {
                self.slots.swap(read, write);
                moves.push((read, write));
            }
            write += 1;
        }

        for (from, to) in moves {
            self.emit_moved(from, to);
        }
    }

    pub fn subscribe<H>(&mut self, event_type: &'static str, handler: H) -> HandlerId
    where
        H: EventHandler<InventoryEvent<I>> + 'static,
    {
        self.events.subscribe(event_type, handler)
    }

    pub fn subscribe_all<H>(&mut self, handler: H) -> HandlerId
    where
        H: EventHandler<InventoryEvent<I>> + 'static,
    {
        self.events.subscribe_all(handler)
    }

    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Event-less copy used to find out what an add would do.
    fn rehearsal(&self) -> Self {
        Self {
            slots: self.slots.iter().map(Slot::deep_copy).collect(),
            max_capacity: self.max_capacity,
            overflow: self.overflow,
            loss: LossPolicy::Discard,
            events: EventHub::new(),
        }
    }

    /// Places `quantity` starting at the first available slot. Returns the
    /// amount that found no room.
    fn add_anywhere(&mut self, item: &I, quantity: u32) -> Result<u32, InventoryError> {
        match self.find_available_slot(item) {
            Some(index) => self.fill_from(item, index, quantity),
            None => Ok(quantity),
        }
    }

    /// Places `quantity` into `index`, spilling the overflow onward when the
    /// policy allows. Returns the amount that found no room.
    fn fill_from(&mut self, item: &I, index: usize, quantity: u32) -> Result<u32, InventoryError> {
        let mut remaining = self.place(item, index, quantity)?;
        if self.overflow == OverflowPolicy::Spill {
            while remaining > 0 {
                let Some(next) = self.find_available_slot(item) else {
                    break;
                };
                remaining = self.place(item, next, remaining)?;
            }
        }
        Ok(remaining)
    }

    fn place(&mut self, item: &I, index: usize, quantity: u32) -> Result<u32, InventoryError> {
        let before = self.slots[index].quantity();
        let overflow = self.slots[index].set_item_and_quantity(item, quantity)?;
        let added = self.slots[index].quantity() - before;
        self.events.emit_with(|| InventoryEvent::ItemsAdded {
            index,
            slot: self.slots[index].clone(),
            added,
        });
        Ok(overflow)
    }

    fn clear_slot_with_event(&mut self, index: usize) -> Slot<I> {
        let removed = self.slots[index].take();
        self.events.emit_with(|| InventoryEvent::ItemsRemoved {
            index,
            slot: removed.clone(),
        });
        removed
    }

    fn emit_moved(&mut self, from: usize, to: usize) {
        if self.slots[to].is_empty() {
            return;
        }
        self.events.emit_with(|| InventoryEvent::ItemsMoved {
            from,
            to,
            slot: self.slots[to].clone(),
        });
    }
}
