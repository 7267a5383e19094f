//src/save/src/lib.rs
//! Numbered save slots holding an inventory and its equipment.

use anyhow::Context;
use bag::{EquipmentSlotMap, EquipmentSnapshot, Inventory, InventorySnapshot};
use bincode::config;
use error::StoreError;
use items::Item;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::SystemTime,
};
use tracing::{debug, warn};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub timestamp: SystemTime,
    pub label: String,
    /// Number of non-empty inventory slots at save time
    pub stacks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub metadata: SaveMetadata,
    pub inventory: InventorySnapshot<Item>,
    pub equipment: EquipmentSnapshot<Item>,
}

impl SaveData {
    pub fn capture(
        label: &str,
        inventory: &Inventory<Item>,
        equipment: &EquipmentSlotMap<Item>,
    ) -> Self {
        Self {
            version: SAVE_VERSION,
            metadata: SaveMetadata {
                timestamp: SystemTime::now(),
                label: label.to_string(),
                stacks: inventory.slots().iter().filter(|s| !s.is_empty()).count(),
            },
            inventory: inventory.to_persistable(),
            equipment: equipment.to_persistable(),
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.version != SAVE_VERSION {
            return Err(StoreError::VersionMismatch(format!(
                "found v{}, expected v{}",
                self.version, SAVE_VERSION
            )));
        }
        Ok(())
    }

    /// Rebuilds the live containers. Subscriptions start out empty.
    pub fn restore(self) -> Result<(Inventory<Item>, EquipmentSlotMap<Item>), StoreError> {
        let inventory = Inventory::from_persistable(self.inventory)?;
        let equipment = EquipmentSlotMap::from_persistable(self.equipment)?;
        Ok((inventory, equipment))
    }
}

pub struct SaveSystem {
    save_dir: PathBuf,
    max_slots: usize,
}

impl SaveSystem {
    pub fn new(save_dir: impl AsRef<Path>, max_slots: usize) -> Result<Self, StoreError> {
        let save_dir = save_dir.as_ref();
        if !save_dir.exists() {
            fs::create_dir_all(save_dir).context("Failed to create save directory")?;
        }

        Ok(Self {
            save_dir: save_dir.to_path_buf(),
            max_slots,
        })
    }

    /// Metadata of every readable save, newest first. Unreadable files are
    /// skipped.
    pub fn list_saves(&self) -> Result<Vec<(usize, SaveMetadata)>, StoreError> {
        let mut saves = Vec::new();
        let entries = fs::read_dir(&self.save_dir).context("Failed to read save directory")?;

        for entry in entries {
            let path = entry.context("Failed to read directory entry")?.path();
            let Some(slot) = slot_of(&path) else {
                continue;
            };
            match read_save(&path) {
                Ok(data) => saves.push((slot, data.metadata)),
                Err(err) => warn!(?path, %err, "skipping unreadable save"),
            }
        }

        saves.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));
        Ok(saves)
    }

    /// Writes `data` to `slot` through a temporary file, so a failed write
    /// never leaves a half-written save behind.
    pub fn save_game(&self, slot: usize, data: &SaveData) -> Result<(), StoreError> {
        let path = self.checked_path(slot)?;
        let temp_path = path.with_extension("tmp");

        let file = fs::File::create(&temp_path).context("Failed to create temporary save file")?;
        let mut writer = BufWriter::new(file);
        bincode::serde::encode_into_std_write(data, &mut writer, config::standard())?;
        writer.flush().context("Failed to flush save data")?;
        drop(writer);

        fs::rename(&temp_path, &path).context("Failed to commit save file")?;
        debug!(slot, label = %data.metadata.label, "game saved");
        Ok(())
    }

    pub fn load_game(&self, slot: usize) -> Result<SaveData, StoreError> {
        let path = self.checked_path(slot)?;
        let data = read_save(&path)?;
        data.validate()?;
        debug!(slot, label = %data.metadata.label, "game loaded");
        Ok(data)
    }

    /// Removes the save in `slot`; an empty slot is not an error.
    pub fn delete_save(&self, slot: usize) -> Result<(), StoreError> {
        let path = self.checked_path(slot)?;
        if path.exists() {
            fs::remove_file(path).context("Failed to delete save file")?;
        }
        Ok(())
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn has_save(&self, slot: usize) -> bool {
        self.save_path(slot).is_some_and(|p| p.exists())
    }

    pub fn save_path(&self, slot: usize) -> Option<PathBuf> {
        if slot >= self.max_slots {
            return None;
        }
        Some(self.save_dir.join(format!("save_{}.sav", slot)))
    }

    fn checked_path(&self, slot: usize) -> Result<PathBuf, StoreError> {
        self.save_path(slot).ok_or(StoreError::InvalidSlot {
            slot,
            max: self.max_slots,
        })
    }
}

fn read_save(path: &Path) -> Result<SaveData, StoreError> {
    let mut reader = BufReader::new(fs::File::open(path)?);
    Ok(bincode::serde::decode_from_std_read(
        &mut reader,
        config::standard(),
    )?)
}

/// `save_3.sav` -> 3
fn slot_of(path: &Path) -> Option<usize> {
    if path.extension()? != "sav" {
        return None;
    }
    path.file_stem()?
        .to_str()?
        .strip_prefix("save_")?
        .parse()
        .ok()
}
