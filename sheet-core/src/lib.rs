//! Character sheet engine for tabletop RPGs.
//!
//! This crate provides:
//! - Dice notation parsing and rolling with a roll history tray
//! - Attribute derivation and typed-in combat check modifiers
//! - Equipment slots with swap-on-equip and item/slot compatibility
//! - A versioned character document that loads old and damaged files
//! - Save-on-change persistence and validated JSON import/export
//!
//! # Quick Start
//!
//! ```ignore
//! use sheet_core::{FileStore, SessionConfig, SheetSession, Slot};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileStore::new("sheets");
//!     let mut session = SheetSession::open(SessionConfig::new(), store)?;
//!
//!     session.equip(0, Slot::RightHand)?;
//!     let roll = session.roll("Attack", "2d6+3")?;
//!     println!("{}: {}", roll.title, roll.result);
//!
//!     session.export_to_file("kestrel.json").await?;
//!     Ok(())
//! }
//! ```

pub mod arith;
pub mod dice;
pub mod document;
pub mod equipment;
pub mod items;
pub mod lenient;
pub mod persist;
pub mod session;
pub mod stats;
pub mod testing;
pub mod validate;

// Primary public API
pub use dice::{DiceError, DiceExpression, DiceTray, RollRecord, RollResult};
pub use document::{CharacterDocument, Gauge, Note, SkillEntry, CURRENT_VERSION};
pub use equipment::{
    EquipOutcome, EquipRejection, EquippedItem, Equipment, KeywordHeuristic, Slot, SlotHeuristic,
    UnequipOutcome,
};
pub use items::{FormValue, InventoryItem, ItemType};
pub use persist::{FileStore, MemoryStore, PersistError, Store};
pub use session::{SessionConfig, SessionError, SheetSession};
pub use stats::{Attribute, BonusAllocation, CombatCheck, DerivedStat, StatBlock, Stats, ValidationWarning};
pub use validate::{ValidationFailure, ValidationIssue};
