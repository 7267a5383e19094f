//src/bag/src/slot.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

use items::ItemTrait;

/// Slot-level failures. None of them mutate the slot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error("slot already holds a different item")]
    IncompatibleItem,
    #[error("quantity {quantity} does not fit a stack of {max_stack}")]
    InvalidQuantity { quantity: u32, max_stack: u32 },
    #[error("an occupied slot needs a quantity, an empty slot must have none")]
    QuantityWithoutItem,
}

/// Stack limit of `item`, never below 1.
pub(crate) fn stack_limit<I: ItemTrait>(item: &I) -> u32 {
    item.max_stack().max(1)
}

/// One stack inside an inventory: an optional item and how many of it.
///
/// `quantity == 0` exactly when `item` is `None`, and the quantity never
/// exceeds the item's stack limit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slot<I> {
    item: Option<I>,
    quantity: u32,
}

impl<I> Default for Slot<I> {
    fn default() -> Self {
        Self {
            item: None,
            quantity: 0,
        }
    }
}

impl<I: ItemTrait> Slot<I> {
    /// Empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a slot from persisted parts, checking the slot invariants.
    pub fn from_parts(item: Option<I>, quantity: u32) -> Result<Self, SlotError> {
        match &item {
            None if quantity != 0 => return Err(SlotError::QuantityWithoutItem),
            Some(_) if quantity == 0 => return Err(SlotError::QuantityWithoutItem),
            Some(it) if quantity > stack_limit(it) => {
                return Err(SlotError::InvalidQuantity {
                    quantity,
                    max_stack: stack_limit(it),
                });
            }
            _ => {}
        }
        Ok(Self { item, quantity })
    }

    pub fn item(&self) -> Option<&I> {
        self.item.as_ref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none() && self.quantity == 0
    }

    pub fn is_full(&self) -> bool {
        self.item
            .as_ref()
            .is_some_and(|item| self.quantity == stack_limit(item))
    }

    /// How many more of the stored item fit; 0 for an empty slot.
    pub fn free_room(&self) -> u32 {
        self.item
            .as_ref()
            .map_or(0, |item| stack_limit(item) - self.quantity)
    }

    /// Whether `item` could be stacked onto this slot's contents.
    pub fn holds_equivalent(&self, item: &I) -> bool {
        self.item
            .as_ref()
            .is_some_and(|existing| existing.is_equivalent_to(item))
    }

    /// Adds `quantity` of `item`, binding a copy of it if the slot is empty.
    ///
    /// The stack is clamped to the item's limit; the part that did not fit is
    /// returned as overflow (0 when everything fit).
    pub fn set_item_and_quantity(&mut self, item: &I, quantity: u32) -> Result<u32, SlotError> {
        if quantity < 1 {
            return Err(SlotError::ZeroQuantity);
        }
        let max_stack = match &self.item {
            Some(existing) if !existing.is_equivalent_to(item) => {
                return Err(SlotError::IncompatibleItem);
            }
            Some(existing) => stack_limit(existing),
            None => {
                self.item = Some(item.deep_copy());
                stack_limit(item)
            }
        };

        let total = self.quantity.saturating_add(quantity);
        self.quantity = total.min(max_stack);
        Ok(total - self.quantity)
    }

    /// Empties the slot. Calling it on an empty slot does nothing.
    pub fn clear(&mut self) {
        self.item = None;
        self.quantity = 0;
    }

    /// Moves the contents out, leaving the slot empty.
    pub fn take(&mut self) -> Slot<I> {
        std::mem::take(self)
    }

    pub fn deep_copy(&self) -> Self {
        Self {
            item: self.item.as_ref().map(ItemTrait::deep_copy),
            quantity: self.quantity,
        }
    }

    pub fn into_parts(self) -> (Option<I>, u32) {
        (self.item, self.quantity)
    }
}
