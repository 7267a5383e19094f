//src/items/src/lib.rs
//! Item contract consumed by the bag crate, plus the concrete item type the
//! game ships with.
//!
//! The bag only needs three things from an item: how many fit in one stack,
//! whether two values count as "the same item", and an independent copy.
//! Everything else (names, weapon stats, armor values) rides along opaquely.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter};

pub mod armor;
pub mod weapon;

pub use crate::armor::Armor;
pub use crate::weapon::{AttackOutcome, AttackStrategy, Weapon, WeaponType};

/// Behaviour every stackable item must provide.
pub trait ItemTrait: Clone + fmt::Debug {
    /// Largest quantity one slot may hold. Values below 1 are treated as 1.
    fn max_stack(&self) -> u32;

    /// State-based sameness check (type and data), not identity.
    fn is_equivalent_to(&self, other: &Self) -> bool;

    /// Independent copy sharing no state with `self`.
    fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Name shown to the player and used in log lines.
    fn display_name(&self) -> String;
}

/// Items that may be placed in an [`EquipmentCategory`] slot.
pub trait Equippable: ItemTrait {
    /// `None` for items that cannot be equipped at all.
    fn equipment_category(&self) -> Option<EquipmentCategory>;
}

/// Equipment slot kinds
#[derive(
    Debug,
    Display,
    Clone,
    Copy,
    EnumIter,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Encode,
    Decode,
    Serialize,
    Deserialize,
)]
pub enum EquipmentCategory {
    Armor,
    Weapon,
}

/// Static description of an item type.
#[derive(PartialEq, Debug, Clone, Encode, Decode, Serialize, Deserialize)]
pub struct ItemData {
    pub uid: u32,
    pub name: String,
    pub description: String,
    pub max_stack: u32,
}

impl ItemData {
    pub fn new(uid: u32, name: &str, max_stack: u32) -> Self {
        Self {
            uid,
            name: name.to_string(),
            description: String::new(),
            max_stack,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// What an item does while equipped.
#[derive(PartialEq, Debug, Clone, Encode, Decode, Serialize, Deserialize)]
pub enum EquipmentFacet {
    Weapon(Weapon),
    Armor(Armor),
}

impl EquipmentFacet {
    pub fn category(&self) -> EquipmentCategory {
        match self {
            EquipmentFacet::Weapon(_) => EquipmentCategory::Weapon,
            EquipmentFacet::Armor(_) => EquipmentCategory::Armor,
        }
    }
}

/// What happens when the item is used.
#[derive(PartialEq, Debug, Clone, Encode, Decode, Serialize, Deserialize)]
pub enum UsableFacet {
    /// Attack through the weapon facet's stats.
    Attack(AttackStrategy),
}

/// Result of [`Item::use_item`].
#[derive(PartialEq, Debug, Clone)]
pub enum UseOutcome {
    Attack(AttackOutcome),
}

/// Concrete item: data plus optional equipment and usable facets.
#[derive(PartialEq, Debug, Clone, Encode, Decode, Serialize, Deserialize)]
pub struct Item {
    pub data: ItemData,
    pub equipment: Option<EquipmentFacet>,
    pub usable: Option<UsableFacet>,
}

impl Item {
    /// Plain stackable item (potions, arrows, ore...).
    pub fn new(data: ItemData) -> Self {
        Self {
            data,
            equipment: None,
            usable: None,
        }
    }

    /// Weapon item; usable through its attack strategy.
    pub fn weapon(data: ItemData, weapon: Weapon) -> Self {
        let strategy = weapon.attack;
        Self {
            data,
            equipment: Some(EquipmentFacet::Weapon(weapon)),
            usable: Some(UsableFacet::Attack(strategy)),
        }
    }

    pub fn armor(data: ItemData, armor: Armor) -> Self {
        Self {
            data,
            equipment: Some(EquipmentFacet::Armor(armor)),
            usable: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn is_usable(&self) -> bool {
        self.usable.is_some()
    }

    /// Runs the usable facet. `None` when the item has nothing to do.
    pub fn use_item(&self) -> Option<UseOutcome> {
        match (&self.usable, &self.equipment) {
            (Some(UsableFacet::Attack(strategy)), Some(EquipmentFacet::Weapon(weapon))) => {
                tracing::debug!(item = %self.data.name, %strategy, "weapon used");
                Some(UseOutcome::Attack(strategy.execute(weapon)))
            }
            // an attack facet without weapon stats has nothing to swing
            _ => None,
        }
    }
}

impl ItemTrait for Item {
    fn max_stack(&self) -> u32 {
        self.data.max_stack
    }

    fn is_equivalent_to(&self, other: &Self) -> bool {
        self.data.uid == other.data.uid
            && self.data.name == other.data.name
            && self.equipment == other.equipment
    }

    fn display_name(&self) -> String {
        self.data.name.clone()
    }
}

impl Equippable for Item {
    fn equipment_category(&self) -> Option<EquipmentCategory> {
        self.equipment.as_ref().map(EquipmentFacet::category)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.equipment {
            Some(EquipmentFacet::Weapon(w)) => write!(f, "{} ({})", self.data.name, w),
            Some(EquipmentFacet::Armor(a)) => write!(f, "{} ({})", self.data.name, a),
            None => write!(f, "{}", self.data.name),
        }
    }
}
