//! Test fixtures for character sheets.
//!
//! Provides ready-made documents and a session over an in-memory store so
//! integration tests don't have to build characters field by field.

use crate::document::{CharacterDocument, Gauge, Note, SkillEntry};
use crate::equipment::Slot;
use crate::items::{InventoryItem, ItemType};
use crate::persist::{MemoryStore, DEFAULT_STORAGE_KEY};
use crate::session::{SessionConfig, SessionError, SheetSession};
use crate::stats::{Attribute, CombatCheck, StatBlock};

/// A weapon with fixed id and stats.
pub fn sword() -> InventoryItem {
    InventoryItem::new("Sword", ItemType::Weapon)
        .with_id("item-sword")
        .with_weight(5.0)
        .with_damage("2d6")
        .with_accuracy(1)
}

/// A second weapon, heavier than the sword.
pub fn axe() -> InventoryItem {
    InventoryItem::new("Axe", ItemType::Weapon)
        .with_id("item-axe")
        .with_weight(7.0)
        .with_damage("2d8")
}

/// A mid-level character with stats, checks and a small inventory.
///
/// Nothing is equipped; the inventory holds the sword then the axe.
pub fn sample_document() -> CharacterDocument {
    let mut doc = CharacterDocument::new("Kestrel");
    doc.gl = 4;
    *doc.stats.get_mut(Attribute::Body) = StatBlock::new(7, 2, 1, 1, 0);
    *doc.stats.get_mut(Attribute::Intellect) = StatBlock::new(5, 1, 0, 0, 1);
    doc.hp = Gauge { current: 14, max: 18 };
    doc.mp = Gauge::new(6);
    doc.inventory = vec![sword(), axe()];
    doc.skills.push(SkillEntry {
        name: "Tracking".to_string(),
        level: 2,
        description: "Follows trails through rough country.".to_string(),
    });
    doc.checks.push(CombatCheck::new("Attack", "2d6", "5+4"));
    doc.checks.push(CombatCheck::new("Dodge", "1d6", ""));
    doc.notes.push(Note::new("Backstory", "<p>Raised by falconers.</p>"));
    doc
}

/// The sample document with the sword already in the right hand.
pub fn armed_document() -> CharacterDocument {
    let mut doc = sample_document();
    doc.equip(0, Slot::RightHand);
    doc
}

/// A session over an in-memory store holding `doc`.
pub fn session_with(
    doc: &CharacterDocument,
) -> Result<SheetSession<MemoryStore>, SessionError> {
    let json = doc.to_json().map_err(crate::persist::PersistError::from)?;
    let store = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, json);
    SheetSession::open(SessionConfig::default(), store)
}
