//! The character document: everything the sheet persists for one character.
//!
//! Loading is forgiving. Each field is decoded on its own and falls back to
//! its default when missing or malformed, so one bad value never costs the
//! player the rest of their sheet. Older documents are migrated on load:
//! a single HTML `notes` string becomes a one-entry note collection.

use crate::equipment::{self, EquipOutcome, Equipment, Slot, UnequipOutcome};
use crate::items::InventoryItem;
use crate::lenient;
use crate::stats::{Attribute, BonusAllocation, CombatCheck, Stats, ValidationWarning, BONUS_BUDGET};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Document version written by this crate. Version 1 stored notes as a
/// single HTML string.
pub const CURRENT_VERSION: u32 = 2;

/// Title given to a note migrated from the single-string format.
pub const LEGACY_NOTE_TITLE: &str = "Notes";

/// Key older sheets stored the level under.
const LEGACY_LEVEL_KEY: &str = "level";

/// Key older sheets stored the passion attribute under.
const LEGACY_PASSION_KEY: &str = "senses";

/// Level range applied when no other range is configured.
pub const DEFAULT_LEVEL_RANGE: RangeInclusive<i32> = 1..=20;

fn legacy_version() -> u32 {
    1
}

fn default_level() -> i32 {
    *DEFAULT_LEVEL_RANGE.start()
}

/// A current/max pair such as HP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gauge {
    #[serde(deserialize_with = "lenient::int")]
    pub current: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub max: i32,
}

impl Default for Gauge {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Gauge {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Current value clamped into `0..=max` for display.
    pub fn display_current(&self) -> i32 {
        self.current.clamp(0, self.max.max(0))
    }

    /// Fill ratio for bars, in `0.0..=1.0`.
    pub fn ratio(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.display_current() as f32 / self.max as f32
    }
}

/// One entry in the notes collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default = "new_note_id", deserialize_with = "note_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    /// HTML content from the rich-text editor.
    #[serde(default, deserialize_with = "lenient::text")]
    pub content: String,
}

fn new_note_id() -> String {
    Uuid::new_v4().to_string()
}

fn note_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let id = lenient::text(deserializer)?;
    Ok(if id.is_empty() { new_note_id() } else { id })
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: new_note_id(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// A learned skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub level: i32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
}

/// The root record for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDocument {
    #[serde(default = "legacy_version", deserialize_with = "version")]
    pub version: u32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Character level.
    #[serde(default = "default_level", deserialize_with = "lenient::int")]
    pub gl: i32,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub stats: Stats,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub hp: Gauge,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub mp: Gauge,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub wp: Gauge,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub equipment: Equipment,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub inventory: Vec<InventoryItem>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub skills: Vec<SkillEntry>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub checks: Vec<CombatCheck>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub notes: Vec<Note>,
    /// Portrait image as a data URL.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub portrait: Option<String>,
}

fn version<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = lenient::int(deserializer)?;
    Ok(u32::try_from(v).unwrap_or(1).max(1))
}

impl Default for CharacterDocument {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            name: String::new(),
            gl: default_level(),
            stats: Stats::default(),
            hp: Gauge::default(),
            mp: Gauge::default(),
            wp: Gauge::default(),
            equipment: Equipment::default(),
            inventory: Vec::new(),
            skills: Vec::new(),
            checks: Vec::new(),
            notes: Vec::new(),
            portrait: None,
        }
    }
}

impl CharacterDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse JSON text, defaulting any malformed fields.
    ///
    /// Only text that isn't JSON at all is an error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(value))
    }

    /// Build a document from already-parsed JSON, defaulting and migrating.
    ///
    /// The level is kept as stored; range limits belong to whoever edits the
    /// document.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            log::warn!("Character data is not a JSON object; starting from defaults");
            return Self::default();
        };

        rename_legacy_keys(&mut map);
        let raw_notes = map.remove("notes");
        let mut doc: Self = match serde_json::from_value(Value::Object(map)) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("Unreadable character data ({e}); starting from defaults");
                return Self::default();
            }
        };

        doc.notes = migrate_notes(raw_notes, doc.version);
        if doc.version < CURRENT_VERSION {
            log::info!(
                "Migrated character document from version {} to {}",
                doc.version,
                CURRENT_VERSION
            );
        }
        doc.version = CURRENT_VERSION;
        doc
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Keep the level inside `range`.
    pub fn clamp_level(&mut self, range: &RangeInclusive<i32>) {
        self.gl = self.gl.clamp(*range.start(), *range.end());
    }

    /// Combined weight of inventory and equipment. Never stored.
    pub fn total_weight(&self) -> f64 {
        equipment::total_weight(&self.inventory, &self.equipment)
    }

    /// Equip the inventory item at `index` into `slot`.
    pub fn equip(&mut self, index: usize, slot: Slot) -> EquipOutcome {
        equipment::equip(&mut self.inventory, &mut self.equipment, index, slot)
    }

    /// Return the item in `slot` to the end of the inventory.
    pub fn unequip(&mut self, slot: Slot) -> UnequipOutcome {
        equipment::unequip(&mut self.inventory, &mut self.equipment, slot)
    }

    pub fn bonus_allocation(&self) -> BonusAllocation {
        self.stats.bonus_allocation(BONUS_BUDGET)
    }

    /// Non-fatal issues to flag in the UI.
    pub fn warnings(&self, bonus_budget: i32) -> Vec<ValidationWarning> {
        self.stats
            .bonus_allocation(bonus_budget)
            .warning()
            .into_iter()
            .collect()
    }

    pub fn find_item(&self, id: &str) -> Option<(usize, &InventoryItem)> {
        self.inventory.iter().enumerate().find(|(_, i)| i.id == id)
    }
}

/// Move keys written by older sheets to their current names.
///
/// When both spellings are present the current one wins and the old one is
/// dropped, so the pair can't collide during decoding.
fn rename_legacy_keys(map: &mut Map<String, Value>) {
    rename_key(map, LEGACY_LEVEL_KEY, "gl");
    if let Some(Value::Object(stats)) = map.get_mut("stats") {
        rename_key(stats, LEGACY_PASSION_KEY, Attribute::Passion.key());
    }
}

fn rename_key(map: &mut Map<String, Value>, old: &str, new: &str) {
    if let Some(value) = map.remove(old) {
        if !map.contains_key(new) {
            map.insert(new.to_string(), value);
        }
    }
}

/// Bring the `notes` field to the collection shape.
///
/// A string is legacy HTML and becomes one note with its content intact.
/// A missing field gets one empty placeholder on legacy documents and no
/// notes on current ones.
fn migrate_notes(raw: Option<Value>, version: u32) -> Vec<Note> {
    match raw {
        Some(Value::String(html)) => vec![Note::new(LEGACY_NOTE_TITLE, html)],
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Note>(entry) {
                Ok(note) => Some(note),
                Err(e) => {
                    log::warn!("Dropping unreadable note: {e}");
                    None
                }
            })
            .collect(),
        None | Some(Value::Null) if version < CURRENT_VERSION => {
            vec![Note::new(LEGACY_NOTE_TITLE, "")]
        }
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            log::warn!("Ignoring notes of unexpected shape: {other}");
            Vec::new()
        }
    }
}
