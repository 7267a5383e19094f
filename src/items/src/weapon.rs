//src/items/src/weapon.rs
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::Display;

/// Weapon families
#[derive(PartialEq, Eq, Debug, Clone, Copy, Display, Encode, Decode, Serialize, Deserialize)]
pub enum WeaponType {
    Sword,
    Dagger,
    Spear,
    Bow,
    Crossbow,
    Javelin,
}

/// How the weapon attacks when used.
#[derive(
    PartialEq, Eq, Debug, Clone, Copy, Default, Display, Encode, Decode, Serialize, Deserialize,
)]
pub enum AttackStrategy {
    #[default]
    Melee,
    Ranged,
    /// Thrown away on use
    Throwable,
}

/// Melee strikes only reach adjacent targets regardless of the weapon's range stat.
pub const MELEE_REACH: f32 = 1.0;

/// What a single attack produced.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct AttackOutcome {
    pub strategy: AttackStrategy,
    pub damage: u32,
    pub reach: f32,
    pub consumes_item: bool,
}

impl AttackStrategy {
    pub fn execute(&self, weapon: &Weapon) -> AttackOutcome {
        let (reach, consumes_item) = match self {
            AttackStrategy::Melee => (MELEE_REACH.min(weapon.range), false),
            AttackStrategy::Ranged => (weapon.range, false),
            AttackStrategy::Throwable => (weapon.range, true),
        };
        AttackOutcome {
            strategy: *self,
            damage: weapon.damage,
            reach,
            consumes_item,
        }
    }
}

/// Weapon equipment facet.
#[derive(PartialEq, Debug, Clone, Encode, Decode, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: u32,
    pub range: f32,
    pub weapon_type: WeaponType,
    pub attack: AttackStrategy,
}

impl Weapon {
    /// New weapon with the attack strategy its type usually has.
    pub fn new(damage: u32, range: f32, weapon_type: WeaponType) -> Self {
        let attack = match weapon_type {
            WeaponType::Sword | WeaponType::Dagger | WeaponType::Spear => AttackStrategy::Melee,
            WeaponType::Bow | WeaponType::Crossbow => AttackStrategy::Ranged,
            WeaponType::Javelin => AttackStrategy::Throwable,
        };
        Self {
            damage,
            range,
            weapon_type,
            attack,
        }
    }

    pub fn with_attack(mut self, attack: AttackStrategy) -> Self {
        self.attack = attack;
        self
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} dmg, {:.1} range",
            self.weapon_type, self.damage, self.range
        )
    }
}
