//! SheetSession - the editing session for one character sheet.
//!
//! Wraps the character document, the dice tray and the persistence store
//! behind one API. Every change that goes through the session is written to
//! the store straight away, so the stored copy always matches what the
//! player sees.

use crate::dice::{DiceError, DiceTray, RollRecord, DEFAULT_MAX_DICE};
use crate::document::{CharacterDocument, DEFAULT_LEVEL_RANGE};
use crate::equipment::{EquipOutcome, Slot, UnequipOutcome};
use crate::items::InventoryItem;
use crate::persist::{self, PersistError, Store, DEFAULT_STORAGE_KEY};
use crate::stats::{Attribute, BonusAllocation, DerivedStat, ValidationWarning, BONUS_BUDGET};
use std::ops::RangeInclusive;
use std::path::Path;
use thiserror::Error;

/// Errors from SheetSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("Dice error: {0}")]
    Dice(#[from] DiceError),

    #[error("No combat check at index {0}")]
    NoSuchCheck(usize),
}

impl SessionError {
    /// True when an import was refused because the file didn't validate.
    pub fn is_validation(&self) -> bool {
        matches!(self, SessionError::Persist(PersistError::Validation(_)))
    }
}

/// Configuration for a sheet session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Key the document is stored under.
    pub storage_key: String,

    /// Bonus points allowed across all attributes before warning.
    pub bonus_budget: i32,

    /// Allowed character levels.
    pub level_range: RangeInclusive<i32>,

    /// Most dice a single roll may draw.
    pub max_dice: u32,

    /// How many past rolls the dice tray remembers.
    pub roll_history: usize,

    /// Indent exported JSON.
    pub pretty_export: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            bonus_budget: BONUS_BUDGET,
            level_range: DEFAULT_LEVEL_RANGE,
            max_dice: DEFAULT_MAX_DICE,
            roll_history: 20,
            pretty_export: true,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the bonus point budget.
    pub fn with_bonus_budget(mut self, budget: i32) -> Self {
        self.bonus_budget = budget;
        self
    }

    /// Set the allowed level range.
    pub fn with_level_range(mut self, range: RangeInclusive<i32>) -> Self {
        self.level_range = range;
        self
    }

    /// Set the dice cap for a single roll.
    pub fn with_max_dice(mut self, max_dice: u32) -> Self {
        self.max_dice = max_dice;
        self
    }

    /// Set how many rolls the tray keeps.
    pub fn with_roll_history(mut self, len: usize) -> Self {
        self.roll_history = len;
        self
    }

    /// Choose between indented and compact exports.
    pub fn with_pretty_export(mut self, pretty: bool) -> Self {
        self.pretty_export = pretty;
        self
    }
}

/// An editing session over one stored character.
pub struct SheetSession<S: Store> {
    config: SessionConfig,
    store: S,
    document: CharacterDocument,
    tray: DiceTray,
}

impl<S: Store> SheetSession<S> {
    /// Open the document stored under the configured key.
    ///
    /// Starts from defaults when nothing is stored or the stored text is
    /// unreadable.
    pub fn open(config: SessionConfig, store: S) -> Result<Self, SessionError> {
        let mut document = match store.load(&config.storage_key)? {
            Some(text) => CharacterDocument::from_json(&text).unwrap_or_else(|e| {
                log::warn!(
                    "Stored sheet '{}' is not valid JSON ({e}); starting fresh",
                    config.storage_key
                );
                CharacterDocument::default()
            }),
            None => {
                log::info!("No stored sheet under '{}'", config.storage_key);
                CharacterDocument::default()
            }
        };
        document.clamp_level(&config.level_range);

        let tray = DiceTray::new(config.roll_history, config.max_dice);
        Ok(Self {
            config,
            store,
            document,
            tray,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn document(&self) -> &CharacterDocument {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<(), SessionError> {
        let json = self.document.to_json().map_err(PersistError::from)?;
        if let Err(e) = self.store.save(&self.config.storage_key, &json) {
            log::warn!("Failed to save sheet '{}': {e}", self.config.storage_key);
            return Err(e.into());
        }
        Ok(())
    }

    /// Apply an edit to the document and save it.
    pub fn update<R>(
        &mut self,
        edit: impl FnOnce(&mut CharacterDocument) -> R,
    ) -> Result<R, SessionError> {
        let result = edit(&mut self.document);
        self.document.clamp_level(&self.config.level_range);
        self.persist()?;
        Ok(result)
    }

    /// Add an item to the end of the inventory.
    pub fn add_item(&mut self, item: InventoryItem) -> Result<(), SessionError> {
        self.update(|doc| doc.inventory.push(item))
    }

    /// Remove the inventory item at `index`, if there is one.
    pub fn remove_item(&mut self, index: usize) -> Result<Option<InventoryItem>, SessionError> {
        if index >= self.document.inventory.len() {
            return Ok(None);
        }
        self.update(|doc| Some(doc.inventory.remove(index)))
    }

    /// Equip the inventory item at `index` into `slot`.
    ///
    /// Rejected requests leave the document and the store untouched.
    pub fn equip(&mut self, index: usize, slot: Slot) -> Result<EquipOutcome, SessionError> {
        let outcome = self.document.equip(index, slot);
        if outcome.changed() {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Move the item in `slot` back to the inventory.
    pub fn unequip(&mut self, slot: Slot) -> Result<UnequipOutcome, SessionError> {
        let outcome = self.document.unequip(slot);
        if outcome.changed() {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Replace the document with an imported one.
    ///
    /// The file is validated strictly; on failure the current document is
    /// kept as it was.
    pub fn import_json(&mut self, json: &str) -> Result<(), SessionError> {
        let imported = persist::import_json(json)?;
        log::info!("Imported character '{}'", imported.name);
        self.replace(imported)
    }

    /// Import a character file from disk.
    pub async fn import_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let imported = persist::import_from_file(path).await?;
        log::info!("Imported character '{}'", imported.name);
        self.replace(imported)
    }

    fn replace(&mut self, document: CharacterDocument) -> Result<(), SessionError> {
        self.document = document;
        self.document.clamp_level(&self.config.level_range);
        self.tray.clear();
        self.persist()
    }

    /// Serialize the document for export.
    pub fn export_json(&self) -> Result<String, SessionError> {
        Ok(persist::export_json(&self.document, self.config.pretty_export)?)
    }

    /// Export the document to a file.
    pub async fn export_to_file(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        persist::export_to_file(&self.document, path, self.config.pretty_export).await?;
        Ok(())
    }

    /// Start over with a blank character.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        log::info!("Resetting sheet '{}'", self.config.storage_key);
        self.replace(CharacterDocument::default())
    }

    pub fn derived(&self, attribute: Attribute) -> DerivedStat {
        self.document.stats.derive(attribute)
    }

    pub fn bonus_allocation(&self) -> BonusAllocation {
        self.document.stats.bonus_allocation(self.config.bonus_budget)
    }

    pub fn warnings(&self) -> Vec<ValidationWarning> {
        self.document.warnings(self.config.bonus_budget)
    }

    pub fn total_weight(&self) -> f64 {
        self.document.total_weight()
    }

    /// Roll dice under a display title.
    pub fn roll(&mut self, title: &str, notation: &str) -> Result<&RollRecord, SessionError> {
        Ok(self.tray.roll(title, notation)?)
    }

    /// Roll the combat check at `index`.
    pub fn roll_check(&mut self, index: usize) -> Result<&RollRecord, SessionError> {
        let check = self
            .document
            .checks
            .get(index)
            .ok_or(SessionError::NoSuchCheck(index))?;
        let notation = check.notation();
        let title = check.name.clone();
        Ok(self.tray.roll(&title, &notation)?)
    }

    pub fn dice_tray(&self) -> &DiceTray {
        &self.tray
    }
}
