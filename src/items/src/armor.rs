//src/items/src/armor.rs
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Armor equipment facet.
#[derive(PartialEq, Debug, Clone, Encode, Decode, Serialize, Deserialize)]
pub struct Armor {
    pub armor_value: f32,
}

impl Armor {
    pub fn new(armor_value: f32) -> Self {
        Self { armor_value }
    }
}

impl fmt::Display for Armor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} armor", self.armor_value)
    }
}
