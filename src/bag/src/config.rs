//src/bag/src/config.rs
//! Inventory construction parameters.
//!
//! Every field has a default, so a JSON document only needs to name what it
//! changes:
//!
//! ```json
//! { "start_capacity": 8, "max_capacity": 32, "overflow": "stop" }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What happens to the part of an add that does not fit the target slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Carry the overflow into the next available slots.
    #[default]
    Spill,
    /// Fill the target slot only; the rest is dropped.
    Stop,
}

/// What an add does when part of the requested quantity cannot be stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossPolicy {
    /// Store what fits, drop the rest and still report success.
    #[default]
    Discard,
    /// Refuse the whole add, leaving the inventory untouched.
    Reject,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("start capacity {start} exceeds max capacity {max}")]
    CapacityExceedsMax { start: usize, max: usize },
    #[error("invalid inventory config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parameters for [`Inventory::new`](crate::Inventory::new).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub start_capacity: usize,
    pub max_capacity: usize,
    pub overflow: OverflowPolicy,
    pub loss: LossPolicy,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            start_capacity: 2,
            max_capacity: 2,
            overflow: OverflowPolicy::Spill,
            loss: LossPolicy::Discard,
        }
    }
}

impl InventoryConfig {
    /// Fixed-size inventory: `max_capacity == start_capacity`.
    pub fn fixed(capacity: usize, overflow: OverflowPolicy) -> Self {
        Self {
            start_capacity: capacity,
            max_capacity: capacity,
            overflow,
            loss: LossPolicy::Discard,
        }
    }

    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_capacity > self.max_capacity {
            return Err(ConfigError::CapacityExceedsMax {
                start: self.start_capacity,
                max: self.max_capacity,
            });
        }
        Ok(())
    }
}
