//! QA tests for save/load, import/export and document migration.
//!
//! These tests verify that a character survives storage and that damaged
//! or old files are handled without losing the player's current sheet.
//! Run with: `cargo test -p sheet-core --test qa_persistence`

use serde_json::json;
use sheet_core::persist::{self, export_file_path, DEFAULT_STORAGE_KEY};
use sheet_core::testing::{armed_document, sample_document, session_with};
use sheet_core::{
    CharacterDocument, FileStore, MemoryStore, SessionConfig, SheetSession, Slot, Store,
    CURRENT_VERSION,
};
use tempfile::TempDir;

// =============================================================================
// Legacy documents
// =============================================================================

#[test]
fn test_legacy_string_notes_become_one_note() {
    let doc = persist::import_json(r#"{ "name": "Old", "notes": "<p>Hello</p>" }"#).unwrap();

    assert_eq!(doc.notes.len(), 1);
    assert_eq!(doc.notes[0].content, "<p>Hello</p>");
    assert!(!doc.notes[0].id.is_empty());
    assert_eq!(doc.version, CURRENT_VERSION);
}

#[test]
fn test_legacy_senses_attribute_is_read_as_passion() {
    let doc = CharacterDocument::from_value(json!({
        "stats": { "senses": { "race": 6, "bonus": 0, "style": 1 } }
    }));

    assert_eq!(doc.stats.passion.race, 6);
    assert_eq!(doc.stats.passion.derive().final_value, 3);
}

#[test]
fn test_damaged_fields_fall_back_to_defaults() {
    let doc = CharacterDocument::from_value(json!({
        "name": "Mara",
        "gl": "seven",
        "hp": "lots",
        "inventory": [{ "name": "Coin", "type": "Trinket", "weight": "0.1" }],
        "checks": 3
    }));

    assert_eq!(doc.name, "Mara");
    assert_eq!(doc.gl, 0);
    assert_eq!(doc.hp.max, 10);
    assert_eq!(doc.inventory.len(), 1);
    assert_eq!(doc.inventory[0].weight, 0.1);
    assert!(!doc.inventory[0].id.is_empty());
    assert!(doc.checks.is_empty());
}

#[test]
fn test_unreadable_level_is_clamped_when_opened() {
    let store = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, r#"{ "gl": "seven" }"#);
    let session = SheetSession::open(SessionConfig::new(), store).unwrap();
    assert_eq!(session.document().gl, 1);
}

#[test]
fn test_older_app_export_imports_intact() {
    let export = json!({
        "name": "Ярослава",
        "level": 7,
        "stats": { "senses": { "race": 6, "bonus": 1, "style": 0, "element": 0, "other": 0 } },
        "hp": { "current": 12, "max": 15 },
        "inventory": [
            { "slot": "Рука", "name": "Меч", "weight": 3, "effect": "" },
            { "id": "bow", "name": "Bow", "type": "Weapon", "weight": 2, "accuracyCheck": "3" }
        ],
        "notes": "<p>Hello</p>"
    });
    let mut session = SheetSession::open(SessionConfig::new(), MemoryStore::new()).unwrap();

    session.import_json(&export.to_string()).unwrap();

    let doc = session.document();
    assert_eq!(doc.gl, 7);
    assert_eq!(doc.stats.passion.race, 6);
    assert_eq!(doc.notes[0].content, "<p>Hello</p>");
    assert_eq!(doc.inventory[0].slot.as_deref(), Some("Рука"));

    let exported: serde_json::Value =
        serde_json::from_str(&session.export_json().unwrap()).unwrap();
    assert_eq!(exported["inventory"][0]["slot"], "Рука");
    assert_eq!(exported["inventory"][0]["effect"], "");
    assert_eq!(exported["inventory"][1]["accuracyCheck"], "3");

    session.equip(1, Slot::RightHand).unwrap();
    assert_eq!(session.document().equipment.right_hand.hit, 3);
}

#[test]
fn test_unknown_item_fields_survive_a_round_trip() {
    let doc = CharacterDocument::from_value(json!({
        "inventory": [{ "id": "x", "name": "Map", "type": "Tool", "rarity": "rare" }]
    }));

    let exported: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
    assert_eq!(exported["inventory"][0]["rarity"], "rare");
}

// =============================================================================
// Strict import through a session
// =============================================================================

#[test]
fn test_failed_import_leaves_sheet_untouched() {
    let mut session = session_with(&sample_document()).unwrap();
    let before = session.document().clone();

    let err = session
        .import_json(r#"{ "name": "Bad", "inventory": [{ "type": "Spaceship" }] }"#)
        .unwrap_err();

    assert!(err.is_validation());
    assert!(err.to_string().contains("inventory[0].type"));
    assert_eq!(session.document(), &before);
    assert_eq!(session.store().writes(), 0);

    assert!(session.import_json("not json at all").is_err());
    assert_eq!(session.document(), &before);
}

#[test]
fn test_successful_import_replaces_and_saves() {
    let mut session = session_with(&sample_document()).unwrap();
    let incoming = armed_document();

    session
        .import_json(&persist::export_json(&incoming, true).unwrap())
        .unwrap();

    assert_eq!(session.document(), &incoming);
    assert_eq!(session.store().writes(), 1);

    let stored = session.store().get(DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(CharacterDocument::from_json(stored).unwrap(), incoming);
}

#[test]
fn test_import_clamps_level_to_config() {
    let config = SessionConfig::new().with_level_range(1..=5);
    let mut session = SheetSession::open(config, MemoryStore::new()).unwrap();

    session.import_json(r#"{ "name": "Elder", "gl": 18 }"#).unwrap();

    assert_eq!(session.document().gl, 5);
}

#[test]
fn test_reset_saves_blank_character() {
    let mut session = session_with(&armed_document()).unwrap();

    session.reset().unwrap();

    assert_eq!(session.document(), &CharacterDocument::default());
    assert_eq!(session.store().writes(), 1);
}

// =============================================================================
// Stores and files
// =============================================================================

#[test]
fn test_file_store_session_reopens_saved_state() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = FileStore::new(temp_dir.path());

    let mut session = SheetSession::open(SessionConfig::new(), store).unwrap();
    session.update(|doc| *doc = sample_document()).unwrap();
    session.equip(1, Slot::LeftHand).unwrap();
    let saved = session.document().clone();
    let store = session.into_store();

    let reopened = SheetSession::open(SessionConfig::new(), store).unwrap();
    assert_eq!(reopened.document(), &saved);
    assert_eq!(reopened.document().equipment.left_hand.name, "Axe");
}

#[test]
fn test_unreadable_stored_text_starts_fresh() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut store = FileStore::new(temp_dir.path());
    store.save(DEFAULT_STORAGE_KEY, "{ truncated").unwrap();

    let session = SheetSession::open(SessionConfig::new(), store).unwrap();

    assert_eq!(session.document(), &CharacterDocument::default());
}

#[tokio::test]
async fn test_export_then_import_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source = session_with(&armed_document()).unwrap();
    let path = export_file_path(temp_dir.path(), &source.document().name);

    source
        .export_to_file(&path)
        .await
        .expect("Export should succeed");
    assert!(path.ends_with("Kestrel.json"));

    let mut target = SheetSession::open(SessionConfig::new(), MemoryStore::new()).unwrap();
    target
        .import_from_file(&path)
        .await
        .expect("Import should succeed");

    assert_eq!(target.document(), source.document());
}

#[tokio::test]
async fn test_import_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut session = session_with(&sample_document()).unwrap();

    let result = session
        .import_from_file(temp_dir.path().join("nope.json"))
        .await;

    assert!(result.is_err());
    assert_eq!(session.document(), &sample_document());
}
