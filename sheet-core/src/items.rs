//! Inventory items and the starter item catalog.

use crate::equipment::Slot;
use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Kind of item, which decides where it can be equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemType {
    Weapon,
    Armor,
    Ward,
    Enchant,
    Tool,
    /// Also the fallback for unrecognized types, which keeps them unequippable.
    #[default]
    Consumable,
}

impl ItemType {
    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Weapon => "Weapon",
            ItemType::Armor => "Armor",
            ItemType::Ward => "Ward",
            ItemType::Enchant => "Enchant",
            ItemType::Tool => "Tool",
            ItemType::Consumable => "Consumable",
        }
    }

    pub fn from_name(name: &str) -> Option<ItemType> {
        ItemType::all().into_iter().find(|t| t.name() == name)
    }

    pub fn all() -> [ItemType; 6] {
        [
            ItemType::Weapon,
            ItemType::Armor,
            ItemType::Ward,
            ItemType::Enchant,
            ItemType::Tool,
            ItemType::Consumable,
        ]
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A form field that may hold either a number or the raw text typed in.
///
/// Kept as entered so an item survives a save/load cycle unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FormValue {
    /// Integer reading of the field, 0 when it doesn't parse.
    pub fn to_int(&self) -> i32 {
        match self {
            FormValue::Int(i) => lenient::coerce_int(&Value::from(*i)),
            FormValue::Float(f) => lenient::coerce_int(&Value::from(*f)),
            FormValue::Text(s) => lenient::parse_int(s),
        }
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValue::Int(i) => write!(f, "{i}"),
            FormValue::Float(v) => write!(f, "{v}"),
            FormValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i32> for FormValue {
    fn from(value: i32) -> Self {
        FormValue::Int(i64::from(value))
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

fn item_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let id = lenient::text(deserializer)?;
    Ok(if id.is_empty() { new_item_id() } else { id })
}

/// Key older sheets used for an item's accuracy.
pub const LEGACY_ACCURACY_KEY: &str = "accuracyCheck";

/// An item carried in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default = "new_item_id", deserialize_with = "item_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::or_default")]
    pub item_type: ItemType,
    #[serde(default, deserialize_with = "lenient::number")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub damage: Option<FormValue>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub accuracy: Option<FormValue>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub range: Option<FormValue>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub evasion: Option<FormValue>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub defense: Option<FormValue>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: String,
    /// Slot text as stored. Older sheets put free-form labels here; only a
    /// recognized slot key acts as an equip override.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::or_default")]
    pub slot: Option<String>,
    /// Fields this crate doesn't model, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: new_item_id(),
            name: name.into(),
            item_type,
            weight: 0.0,
            damage: None,
            accuracy: None,
            range: None,
            evasion: None,
            defense: None,
            notes: String::new(),
            slot: None,
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_damage(mut self, damage: impl Into<String>) -> Self {
        self.damage = Some(FormValue::Text(damage.into()));
        self
    }

    pub fn with_accuracy(mut self, accuracy: impl Into<FormValue>) -> Self {
        self.accuracy = Some(accuracy.into());
        self
    }

    pub fn with_range(mut self, range: impl Into<FormValue>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn with_evasion(mut self, evasion: impl Into<FormValue>) -> Self {
        self.evasion = Some(evasion.into());
        self
    }

    pub fn with_defense(mut self, defense: impl Into<FormValue>) -> Self {
        self.defense = Some(defense.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slot = Some(slot.key().to_string());
        self
    }

    /// The explicit slot choice, if the stored slot text names one.
    pub fn slot_override(&self) -> Option<Slot> {
        self.slot.as_deref().and_then(|s| Slot::from_key(s.trim()))
    }

    /// Accuracy field, falling back to the `accuracyCheck` key older sheets
    /// wrote instead.
    pub fn accuracy_value(&self) -> Option<FormValue> {
        self.accuracy.clone().or_else(|| {
            self.extra
                .get(LEGACY_ACCURACY_KEY)
                .and_then(|v| FormValue::deserialize(v).ok())
        })
    }

    /// A copy of this item with a fresh identity, for duplicating entries.
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_item_id(),
            ..self.clone()
        }
    }
}

/// Try to find a catalog item by name, returning a fresh instance.
pub fn find_item(name: &str) -> Option<InventoryItem> {
    let name_lower = name.to_lowercase();
    STARTER_ITEMS
        .iter()
        .find(|item| item.name.to_lowercase() == name_lower)
        .map(InventoryItem::duplicate)
}

/// Catalog items of one type.
pub fn items_of_type(item_type: ItemType) -> Vec<InventoryItem> {
    STARTER_ITEMS
        .iter()
        .filter(|item| item.item_type == item_type)
        .map(InventoryItem::duplicate)
        .collect()
}

lazy_static::lazy_static! {
    /// Common starting equipment offered for quick-add.
    pub static ref STARTER_ITEMS: Vec<InventoryItem> = vec![
        // Weapons
        InventoryItem::new("Dagger", ItemType::Weapon)
            .with_weight(1.0)
            .with_damage("1d6")
            .with_accuracy(1)
            .with_range(1),
        InventoryItem::new("Short Sword", ItemType::Weapon)
            .with_weight(3.0)
            .with_damage("2d6")
            .with_accuracy(0)
            .with_range(1),
        InventoryItem::new("Long Sword", ItemType::Weapon)
            .with_weight(5.0)
            .with_damage("2d6+2")
            .with_accuracy(0)
            .with_range(1),
        InventoryItem::new("Spear", ItemType::Weapon)
            .with_weight(4.0)
            .with_damage("2d6+1")
            .with_range(2),
        InventoryItem::new("Short Bow", ItemType::Weapon)
            .with_weight(2.0)
            .with_damage("2d6")
            .with_range(20),
        InventoryItem::new("Round Shield", ItemType::Weapon)
            .with_weight(4.0)
            .with_damage("1d6")
            .with_evasion(1)
            .with_defense(1),

        // Armor
        InventoryItem::new("Leather Armor", ItemType::Armor)
            .with_weight(6.0)
            .with_defense(2),
        InventoryItem::new("Chain Mail", ItemType::Armor)
            .with_weight(15.0)
            .with_evasion(-1)
            .with_defense(4),
        InventoryItem::new("Iron Helmet", ItemType::Armor)
            .with_weight(3.0)
            .with_defense(1),

        // Wards and enchantments
        InventoryItem::new("Warding Charm", ItemType::Ward)
            .with_weight(0.5)
            .with_defense(1),
        InventoryItem::new("Ring of Sparks", ItemType::Enchant)
            .with_weight(0.1)
            .with_damage("1d6"),

        // Tools and consumables
        InventoryItem::new("Lantern", ItemType::Tool).with_weight(2.0),
        InventoryItem::new("Rope (10m)", ItemType::Tool).with_weight(3.0),
        InventoryItem::new("Healing Potion", ItemType::Consumable)
            .with_weight(0.5)
            .with_notes("Restores 2d6 HP."),
        InventoryItem::new("Rations", ItemType::Consumable).with_weight(1.0),
    ];
}
