//src/bag/src/events.rs
//! Synchronous notification hub shared by [`Inventory`](crate::Inventory) and
//! [`EquipmentSlotMap`](crate::EquipmentSlotMap).
//!
//! Each container owns its own hub; there is no global bus. Handlers run on the
//! calling thread, inside the operation that caused the event, after the
//! mutation has been committed, in the order they were registered. Late
//! subscribers never see earlier events.

use std::fmt;

use items::EquipmentCategory;

use crate::slot::Slot;

/// Event type names accepted by [`EventHub::subscribe`].
pub mod event_types {
    pub const ITEMS_ADDED: &str = "ItemsAdded";
    pub const ITEMS_REMOVED: &str = "ItemsRemoved";
    pub const ITEMS_MOVED: &str = "ItemsMoved";
    pub const CAPACITY_CHANGED: &str = "CapacityChanged";
    pub const ITEM_EQUIPPED: &str = "ItemEquipped";
    pub const ITEM_UNEQUIPPED: &str = "ItemUnequipped";
}

/// Anything dispatched through an [`EventHub`].
pub trait Event {
    fn event_type(&self) -> &'static str;
}

/// Event handler. Implemented for every `FnMut(&E)` closure.
pub trait EventHandler<E> {
    fn handle(&mut self, event: &E);
}

impl<E, F> EventHandler<E> for F
where
    F: FnMut(&E),
{
    fn handle(&mut self, event: &E) {
        self(event)
    }
}

/// Returned by `subscribe*`; pass it to [`EventHub::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

struct HandlerEntry<E> {
    id: HandlerId,
    /// `None` receives every event
    event_type: Option<&'static str>,
    handler: Box<dyn EventHandler<E>>,
}

/// Ordered list of registered handlers.
pub struct EventHub<E> {
    handlers: Vec<HandlerEntry<E>>,
    next_id: u64,
}

impl<E: Event> EventHub<E> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a handler for one event type (see [`event_types`]).
    pub fn subscribe<H>(&mut self, event_type: &'static str, handler: H) -> HandlerId
    where
        H: EventHandler<E> + 'static,
    {
        self.register(Some(event_type), Box::new(handler))
    }

    /// Registers a handler for every event type.
    pub fn subscribe_all<H>(&mut self, handler: H) -> HandlerId
    where
        H: EventHandler<E> + 'static,
    {
        self.register(None, Box::new(handler))
    }

    fn register(
        &mut self,
        event_type: Option<&'static str>,
        handler: Box<dyn EventHandler<E>>,
    ) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push(HandlerEntry {
            id,
            event_type,
            handler,
        });
        id
    }

    /// Removes a handler. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|entry| entry.id != id);
        self.handlers.len() != before
    }

    /// Dispatches `event` to every matching handler in registration order.
    pub fn emit(&mut self, event: &E) {
        let event_type = event.event_type();
        for entry in &mut self.handlers {
            if entry.event_type.is_none_or(|t| t == event_type) {
                entry.handler.handle(event);
            }
        }
    }

    /// Like [`emit`](Self::emit) but only builds the event when someone listens.
    pub fn emit_with<F>(&mut self, make: F)
    where
        F: FnOnce() -> E,
    {
        if !self.handlers.is_empty() {
            let event = make();
            self.emit(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<E: Event> Default for EventHub<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventHub<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

/// Notifications raised by an [`Inventory`](crate::Inventory).
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryEvent<I> {
    /// Items landed in `index`; `slot` is the slot after the add and `added`
    /// how many of the requested items this slot took.
    ItemsAdded {
        index: usize,
        slot: Slot<I>,
        added: u32,
    },
    /// `slot` holds what the slot contained before it was cleared (possibly
    /// nothing, e.g. when the whole inventory is cleared).
    ItemsRemoved { index: usize, slot: Slot<I> },
    /// A stack changed index through a swap or compaction.
    ItemsMoved {
        from: usize,
        to: usize,
        slot: Slot<I>,
    },
    CapacityChanged { capacity: usize },
}

impl<I> Event for InventoryEvent<I> {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemsAdded { .. } => event_types::ITEMS_ADDED,
            InventoryEvent::ItemsRemoved { .. } => event_types::ITEMS_REMOVED,
            InventoryEvent::ItemsMoved { .. } => event_types::ITEMS_MOVED,
            InventoryEvent::CapacityChanged { .. } => event_types::CAPACITY_CHANGED,
        }
    }
}

/// Notifications raised by an [`EquipmentSlotMap`](crate::EquipmentSlotMap).
#[derive(Debug, Clone, PartialEq)]
pub enum EquipmentEvent<I> {
    ItemEquipped {
        category: EquipmentCategory,
        item: I,
    },
    ItemUnequipped {
        category: EquipmentCategory,
        item: I,
    },
}

impl<I> Event for EquipmentEvent<I> {
    fn event_type(&self) -> &'static str {
        match self {
            EquipmentEvent::ItemEquipped { .. } => event_types::ITEM_EQUIPPED,
            EquipmentEvent::ItemUnequipped { .. } => event_types::ITEM_UNEQUIPPED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct Ping(&'static str);

    impl Event for Ping {
        fn event_type(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hub = EventHub::new();

        let first = Rc::clone(&log);
        hub.subscribe_all(move |e: &Ping| first.borrow_mut().push(format!("all:{}", e.0)));
        let second = Rc::clone(&log);
        hub.subscribe("a", move |e: &Ping| second.borrow_mut().push(format!("a:{}", e.0)));

        hub.emit(&Ping("a"));
        hub.emit(&Ping("b"));

        assert_eq!(*log.borrow(), vec!["all:a", "a:a", "all:b"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut hub = EventHub::new();
        let c = Rc::clone(&count);
        let id = hub.subscribe_all(move |_: &Ping| *c.borrow_mut() += 1);

        hub.emit(&Ping("x"));
        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        hub.emit(&Ping("x"));

        assert_eq!(*count.borrow(), 1);
        assert!(hub.is_empty());
    }

    #[test]
    fn emit_with_skips_construction_without_subscribers() {
        let mut hub: EventHub<Ping> = EventHub::new();
        hub.emit_with(|| panic!("event built with no subscribers"));
    }
}
