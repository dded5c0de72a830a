//! Equipment slots and moving items between them and the inventory.
//!
//! An item lives either in the inventory or in exactly one slot. Equipping
//! into an occupied slot swaps the two items in place, so the inventory
//! never grows or shrinks as a side effect of a swap. Every request is
//! validated before anything is touched; an invalid request changes
//! nothing and is reported as [`EquipOutcome::Rejected`].

use crate::items::{FormValue, InventoryItem, ItemType};
use crate::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named equipment positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    RightHand,
    LeftHand,
    Head,
    Body,
    ExtraDefense,
    Magic,
}

impl Slot {
    pub fn key(&self) -> &'static str {
        match self {
            Slot::RightHand => "rightHand",
            Slot::LeftHand => "leftHand",
            Slot::Head => "head",
            Slot::Body => "body",
            Slot::ExtraDefense => "extraDefense",
            Slot::Magic => "magic",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Slot::RightHand => "Right Hand",
            Slot::LeftHand => "Left Hand",
            Slot::Head => "Head",
            Slot::Body => "Body",
            Slot::ExtraDefense => "Extra Defense",
            Slot::Magic => "Magic",
        }
    }

    pub fn from_key(key: &str) -> Option<Slot> {
        Slot::all().into_iter().find(|s| s.key() == key)
    }

    /// Item type assumed for an item rebuilt from this slot's fields.
    pub fn default_item_type(&self) -> ItemType {
        match self {
            Slot::RightHand | Slot::LeftHand => ItemType::Weapon,
            Slot::Head | Slot::Body => ItemType::Armor,
            Slot::ExtraDefense => ItemType::Ward,
            Slot::Magic => ItemType::Enchant,
        }
    }

    /// All slots in display order.
    pub fn all() -> [Slot; 6] {
        [
            Slot::RightHand,
            Slot::LeftHand,
            Slot::Head,
            Slot::Body,
            Slot::ExtraDefense,
            Slot::Magic,
        ]
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Slots an item type may occupy before any name-based refinement.
pub fn slots_for_type(item_type: ItemType) -> &'static [Slot] {
    match item_type {
        ItemType::Weapon | ItemType::Tool => &[Slot::RightHand, Slot::LeftHand],
        ItemType::Armor => &[Slot::Body, Slot::Head, Slot::ExtraDefense],
        ItemType::Ward => &[Slot::ExtraDefense],
        ItemType::Enchant => &[Slot::Magic],
        ItemType::Consumable => &[],
    }
}

/// Narrows the type-based slot list using other properties of an item.
pub trait SlotHeuristic {
    fn refine(&self, item: &InventoryItem, slots: Vec<Slot>) -> Vec<Slot>;
}

const HELMET_WORDS: &[&str] = &[
    "helm", "helmet", "hat", "hood", "cap", "crown", "circlet", "mask", "headband",
];

const BODY_WORDS: &[&str] = &[
    "armor", "armour", "robe", "robes", "clothes", "cloak", "mail", "coat",
];

const SHIELD_WORDS: &[&str] = &["shield", "buckler", "aegis"];

/// Guesses slots from words in the item name.
///
/// Helmet-like armor goes on the head only and body armor on the body or
/// as extra defense. Shield-like weapons and armor go in the left hand only. Free-text names are ambiguous, so an item's
/// explicit `slot` always wins over this guess.
#[derive(Debug, Clone)]
pub struct KeywordHeuristic {
    pub helmet_words: Vec<String>,
    pub body_words: Vec<String>,
    pub shield_words: Vec<String>,
}

impl Default for KeywordHeuristic {
    fn default() -> Self {
        Self {
            helmet_words: HELMET_WORDS.iter().map(|w| w.to_string()).collect(),
            body_words: BODY_WORDS.iter().map(|w| w.to_string()).collect(),
            shield_words: SHIELD_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl KeywordHeuristic {
    fn mentions(name: &str, words: &[String]) -> bool {
        name.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| words.iter().any(|w| w == token))
    }
}

impl SlotHeuristic for KeywordHeuristic {
    fn refine(&self, item: &InventoryItem, slots: Vec<Slot>) -> Vec<Slot> {
        let is_helmet = Self::mentions(&item.name, &self.helmet_words);
        let is_body = Self::mentions(&item.name, &self.body_words);
        let is_shield = Self::mentions(&item.name, &self.shield_words);

        match item.item_type {
            ItemType::Armor if is_helmet => vec![Slot::Head],
            ItemType::Armor if is_body && !is_shield => vec![Slot::Body, Slot::ExtraDefense],
            ItemType::Weapon | ItemType::Armor if is_shield => vec![Slot::LeftHand],
            _ => slots,
        }
    }
}

/// Slots `item` may be equipped into, using the default keyword guess.
pub fn valid_slots(item: &InventoryItem) -> Vec<Slot> {
    valid_slots_with(item, &KeywordHeuristic::default())
}

/// Slots `item` may be equipped into.
///
/// An explicit `slot` on the item is honored when either the type table or
/// the heuristic would allow it; otherwise the heuristic's answer stands.
pub fn valid_slots_with(item: &InventoryItem, heuristic: &dyn SlotHeuristic) -> Vec<Slot> {
    let by_type = slots_for_type(item.item_type);
    if by_type.is_empty() {
        return Vec::new();
    }

    let refined = heuristic.refine(item, by_type.to_vec());

    match item.slot_override() {
        Some(chosen) if by_type.contains(&chosen) || refined.contains(&chosen) => vec![chosen],
        Some(chosen) => {
            log::debug!(
                "Ignoring slot {} on '{}': not allowed for {}",
                chosen.key(),
                item.name,
                item.item_type
            );
            refined
        }
        None => refined,
    }
}

fn zero_damage() -> String {
    "0".to_string()
}

/// Contents of one equipment slot.
///
/// An empty slot has a blank name and no original item. The original
/// inventory record is kept so unequipping gives back exactly what was
/// equipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquippedItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub weight: f64,
    #[serde(default, deserialize_with = "lenient::int")]
    pub hit: i32,
    #[serde(default = "zero_damage", deserialize_with = "lenient::text")]
    pub damage: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub range: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub evasion: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub defense: i32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::or_default"
    )]
    pub original_item: Option<InventoryItem>,
}

impl Default for EquippedItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            weight: 0.0,
            hit: 0,
            damage: zero_damage(),
            range: 0,
            evasion: 0,
            defense: 0,
            notes: String::new(),
            original_item: None,
        }
    }
}

impl EquippedItem {
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty() && self.original_item.is_none()
    }

    /// Copy an inventory item's combat fields into slot form.
    pub fn from_item(item: InventoryItem) -> Self {
        let int = |v: &Option<FormValue>| v.as_ref().map(FormValue::to_int).unwrap_or(0);
        let damage = item
            .damage
            .as_ref()
            .map(FormValue::to_text)
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(zero_damage);

        Self {
            name: item.name.clone(),
            weight: item.weight,
            hit: int(&item.accuracy_value()),
            damage,
            range: int(&item.range),
            evasion: int(&item.evasion),
            defense: int(&item.defense),
            notes: item.notes.clone(),
            original_item: Some(item),
        }
    }

    /// Turn the slot contents back into an inventory item.
    ///
    /// Uses the retained original when present, otherwise rebuilds one from
    /// the slot's own fields.
    pub fn into_item(self, slot: Slot) -> InventoryItem {
        if let Some(original) = self.original_item {
            return original;
        }

        InventoryItem::new(self.name, slot.default_item_type())
            .with_weight(self.weight)
            .with_damage(self.damage)
            .with_accuracy(self.hit)
            .with_range(self.range)
            .with_evasion(self.evasion)
            .with_defense(self.defense)
            .with_notes(self.notes)
    }
}

/// Everything currently equipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub right_hand: EquippedItem,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub left_hand: EquippedItem,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub head: EquippedItem,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub body: EquippedItem,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub extra_defense: EquippedItem,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub magic: EquippedItem,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> &EquippedItem {
        match slot {
            Slot::RightHand => &self.right_hand,
            Slot::LeftHand => &self.left_hand,
            Slot::Head => &self.head,
            Slot::Body => &self.body,
            Slot::ExtraDefense => &self.extra_defense,
            Slot::Magic => &self.magic,
        }
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut EquippedItem {
        match slot {
            Slot::RightHand => &mut self.right_hand,
            Slot::LeftHand => &mut self.left_hand,
            Slot::Head => &mut self.head,
            Slot::Body => &mut self.body,
            Slot::ExtraDefense => &mut self.extra_defense,
            Slot::Magic => &mut self.magic,
        }
    }

    /// Occupied slots in display order.
    pub fn occupied(&self) -> impl Iterator<Item = (Slot, &EquippedItem)> {
        Slot::all()
            .into_iter()
            .map(move |slot| (slot, self.get(slot)))
            .filter(|(_, item)| !item.is_empty())
    }

    pub fn total_weight(&self) -> f64 {
        Slot::all().iter().map(|&s| self.get(s).weight).sum()
    }

    /// Sum of evasion across all slots.
    pub fn total_evasion(&self) -> i32 {
        Slot::all().iter().map(|&s| self.get(s).evasion).sum()
    }

    /// Sum of defense across all slots.
    pub fn total_defense(&self) -> i32 {
        Slot::all().iter().map(|&s| self.get(s).defense).sum()
    }
}

/// Combined weight of carried and equipped items.
pub fn total_weight(inventory: &[InventoryItem], equipment: &Equipment) -> f64 {
    inventory.iter().map(|i| i.weight).sum::<f64>() + equipment.total_weight()
}

/// Why an equip request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipRejection {
    NoSuchItem { index: usize, len: usize },
    IncompatibleSlot { item: String, slot: Slot },
}

impl fmt::Display for EquipRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipRejection::NoSuchItem { index, len } => {
                write!(f, "No inventory item at index {index} (inventory has {len})")
            }
            EquipRejection::IncompatibleSlot { item, slot } => {
                write!(f, "{item} cannot be equipped in {slot}")
            }
        }
    }
}

/// What an equip request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipOutcome {
    /// Moved into an empty slot.
    Equipped { slot: Slot },
    /// Replaced an occupied slot; the previous item took the vacated index.
    Swapped { slot: Slot, returned: String },
    /// Nothing changed.
    Rejected(EquipRejection),
}

impl EquipOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, EquipOutcome::Rejected(_))
    }
}

/// What an unequip request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnequipOutcome {
    /// The item was appended to the inventory.
    Returned { name: String },
    /// The slot was already empty.
    Empty,
}

impl UnequipOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, UnequipOutcome::Returned { .. })
    }
}

/// Equip the inventory item at `index` into `slot`.
pub fn equip(
    inventory: &mut Vec<InventoryItem>,
    equipment: &mut Equipment,
    index: usize,
    slot: Slot,
) -> EquipOutcome {
    equip_with(inventory, equipment, index, slot, &KeywordHeuristic::default())
}

/// Equip using a specific slot heuristic.
pub fn equip_with(
    inventory: &mut Vec<InventoryItem>,
    equipment: &mut Equipment,
    index: usize,
    slot: Slot,
    heuristic: &dyn SlotHeuristic,
) -> EquipOutcome {
    let Some(candidate) = inventory.get(index) else {
        let rejection = EquipRejection::NoSuchItem {
            index,
            len: inventory.len(),
        };
        log::warn!("Equip refused: {rejection}");
        return EquipOutcome::Rejected(rejection);
    };

    if !valid_slots_with(candidate, heuristic).contains(&slot) {
        let rejection = EquipRejection::IncompatibleSlot {
            item: candidate.name.clone(),
            slot,
        };
        log::warn!("Equip refused: {rejection}");
        return EquipOutcome::Rejected(rejection);
    }

    let target = equipment.get_mut(slot);
    if target.is_empty() {
        let item = inventory.remove(index);
        log::debug!("Equipped '{}' in {}", item.name, slot.key());
        *target = EquippedItem::from_item(item);
        EquipOutcome::Equipped { slot }
    } else {
        let previous = std::mem::take(target).into_item(slot);
        let returned = previous.name.clone();
        let item = std::mem::replace(&mut inventory[index], previous);
        log::debug!(
            "Swapped '{}' into {} for '{}'",
            item.name,
            slot.key(),
            returned
        );
        *target = EquippedItem::from_item(item);
        EquipOutcome::Swapped { slot, returned }
    }
}

/// Move whatever is in `slot` to the end of the inventory.
pub fn unequip(
    inventory: &mut Vec<InventoryItem>,
    equipment: &mut Equipment,
    slot: Slot,
) -> UnequipOutcome {
    let target = equipment.get_mut(slot);
    if target.is_empty() {
        return UnequipOutcome::Empty;
    }

    let item = std::mem::take(target).into_item(slot);
    let name = item.name.clone();
    log::debug!("Unequipped '{}' from {}", name, slot.key());
    inventory.push(item);
    UnequipOutcome::Returned { name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sword() -> InventoryItem {
        InventoryItem::new("Sword", ItemType::Weapon)
            .with_id("a")
            .with_weight(5.0)
            .with_damage("2d6+1")
            .with_accuracy("2")
            .with_range(1)
    }

    fn axe() -> InventoryItem {
        InventoryItem::new("Axe", ItemType::Weapon)
            .with_id("b")
            .with_weight(7.0)
    }

    #[test]
    fn test_slots_by_type() {
        let slots = |t| valid_slots(&InventoryItem::new("Thing", t));
        assert_eq!(slots(ItemType::Weapon), vec![Slot::RightHand, Slot::LeftHand]);
        assert_eq!(slots(ItemType::Tool), vec![Slot::RightHand, Slot::LeftHand]);
        assert_eq!(
            slots(ItemType::Armor),
            vec![Slot::Body, Slot::Head, Slot::ExtraDefense]
        );
        assert_eq!(slots(ItemType::Ward), vec![Slot::ExtraDefense]);
        assert_eq!(slots(ItemType::Enchant), vec![Slot::Magic]);
        assert!(slots(ItemType::Consumable).is_empty());
    }

    #[test]
    fn test_keyword_refinement() {
        let helm = InventoryItem::new("Iron Helmet", ItemType::Armor);
        assert_eq!(valid_slots(&helm), vec![Slot::Head]);

        let shield = InventoryItem::new("Tower Shield", ItemType::Weapon);
        assert_eq!(valid_slots(&shield), vec![Slot::LeftHand]);

        let armored_shield = InventoryItem::new("kite shield", ItemType::Armor);
        assert_eq!(valid_slots(&armored_shield), vec![Slot::LeftHand]);

        // Whole words only: a cape is not a cap
        let cape = InventoryItem::new("Traveler's Cape", ItemType::Armor);
        assert_eq!(valid_slots(&cape).len(), 3);

        // Helmet words don't affect weapons
        let hat_sword = InventoryItem::new("Hat Sword", ItemType::Weapon);
        assert_eq!(valid_slots(&hat_sword).len(), 2);

        let body = vec![Slot::Body, Slot::ExtraDefense];
        for name in ["Chain Mail", "Leather Armor", "Wizard's Robe", "Travel Clothes", "Grey Cloak"] {
            assert_eq!(valid_slots(&InventoryItem::new(name, ItemType::Armor)), body, "{name}");
        }
        // Mailed shields still go in the off hand
        let mailed_shield = InventoryItem::new("Mail Shield", ItemType::Armor);
        assert_eq!(valid_slots(&mailed_shield), vec![Slot::LeftHand]);
        // Body words only refine armor
        let cloak_pin = InventoryItem::new("Cloak Pin", ItemType::Tool);
        assert_eq!(valid_slots(&cloak_pin).len(), 2);
    }

    #[test]
    fn test_explicit_slot_wins() {
        let cloak = InventoryItem::new("Cloak of Hoods", ItemType::Armor).with_slot(Slot::Body);
        assert_eq!(valid_slots(&cloak), vec![Slot::Body]);

        // Not allowed for the type, so the usual answer stands
        let odd = InventoryItem::new("Ring", ItemType::Enchant).with_slot(Slot::Head);
        assert_eq!(valid_slots(&odd), vec![Slot::Magic]);
    }

    #[test]
    fn test_equip_into_empty_slot() {
        let mut inventory = vec![sword()];
        let mut equipment = Equipment::new();

        let outcome = equip(&mut inventory, &mut equipment, 0, Slot::RightHand);

        assert_eq!(outcome, EquipOutcome::Equipped { slot: Slot::RightHand });
        assert!(inventory.is_empty());
        let slot = &equipment.right_hand;
        assert_eq!(slot.name, "Sword");
        assert_eq!(slot.hit, 2);
        assert_eq!(slot.damage, "2d6+1");
        assert_eq!(slot.range, 1);
        assert_eq!(slot.evasion, 0);
        assert_eq!(total_weight(&inventory, &equipment), 5.0);
    }

    #[test]
    fn test_equip_swaps_in_place() {
        let potion = InventoryItem::new("Potion", ItemType::Consumable).with_weight(1.0);
        let mut inventory = vec![potion.clone(), sword(), axe()];
        let mut equipment = Equipment::new();
        equip(&mut inventory, &mut equipment, 1, Slot::RightHand);
        let before = total_weight(&inventory, &equipment);

        // inventory is now [potion, axe]
        let outcome = equip(&mut inventory, &mut equipment, 1, Slot::RightHand);

        assert_eq!(
            outcome,
            EquipOutcome::Swapped {
                slot: Slot::RightHand,
                returned: "Sword".to_string()
            }
        );
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory[0], potion);
        assert_eq!(inventory[1], sword());
        assert_eq!(equipment.right_hand.name, "Axe");
        assert_eq!(total_weight(&inventory, &equipment), before);
    }

    #[test]
    fn test_rejections_change_nothing() {
        let potion = InventoryItem::new("Potion", ItemType::Consumable);
        let mut inventory = vec![potion, axe()];
        let mut equipment = Equipment::new();
        let snapshot = (inventory.clone(), equipment.clone());

        assert!(matches!(
            equip(&mut inventory, &mut equipment, 0, Slot::RightHand),
            EquipOutcome::Rejected(EquipRejection::IncompatibleSlot { .. })
        ));
        assert!(matches!(
            equip(&mut inventory, &mut equipment, 1, Slot::Head),
            EquipOutcome::Rejected(EquipRejection::IncompatibleSlot { .. })
        ));
        assert_eq!(
            equip(&mut inventory, &mut equipment, 9, Slot::RightHand),
            EquipOutcome::Rejected(EquipRejection::NoSuchItem { index: 9, len: 2 })
        );

        assert_eq!((inventory, equipment), snapshot);
    }

    #[test]
    fn test_unequip_appends_and_resets() {
        let mut inventory = vec![sword(), axe()];
        let mut equipment = Equipment::new();
        equip(&mut inventory, &mut equipment, 0, Slot::LeftHand);

        let outcome = unequip(&mut inventory, &mut equipment, Slot::LeftHand);

        assert_eq!(
            outcome,
            UnequipOutcome::Returned {
                name: "Sword".to_string()
            }
        );
        assert_eq!(inventory, vec![axe(), sword()]);
        assert_eq!(equipment.left_hand, EquippedItem::default());
        assert_eq!(
            serde_json::to_value(&equipment.left_hand).unwrap(),
            json!({
                "name": "", "weight": 0.0, "hit": 0, "damage": "0",
                "range": 0, "evasion": 0, "defense": 0, "notes": ""
            })
        );

        assert_eq!(
            unequip(&mut inventory, &mut equipment, Slot::LeftHand),
            UnequipOutcome::Empty
        );
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_blank_named_slot_counts_as_empty() {
        let mut inventory = vec![sword()];
        let mut equipment = Equipment::new();
        equipment.right_hand.name = "  ".to_string();

        let outcome = equip(&mut inventory, &mut equipment, 0, Slot::RightHand);

        assert_eq!(outcome, EquipOutcome::Equipped { slot: Slot::RightHand });
        assert!(inventory.is_empty());
        assert_eq!(equipment.right_hand.name, "Sword");

        equipment.left_hand.name = " ".to_string();
        assert_eq!(
            unequip(&mut inventory, &mut equipment, Slot::LeftHand),
            UnequipOutcome::Empty
        );
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_legacy_accuracy_sets_hit() {
        let bow: InventoryItem = serde_json::from_value(json!({
            "name": "Bow", "type": "Weapon", "weight": 2, "accuracyCheck": "3"
        }))
        .unwrap();
        let mut inventory = vec![bow];
        let mut equipment = Equipment::new();

        equip(&mut inventory, &mut equipment, 0, Slot::RightHand);

        assert_eq!(equipment.right_hand.hit, 3);
    }

    #[test]
    fn test_free_text_slot_falls_back_to_type() {
        let item: InventoryItem = serde_json::from_value(json!({
            "slot": "Рука", "name": "Меч", "type": "Weapon"
        }))
        .unwrap();
        assert_eq!(valid_slots(&item), vec![Slot::RightHand, Slot::LeftHand]);
    }

    #[test]
    fn test_equip_unequip_round_trip() {
        let original = vec![sword()];
        let mut inventory = original.clone();
        let mut equipment = Equipment::new();

        equip(&mut inventory, &mut equipment, 0, Slot::RightHand);
        unequip(&mut inventory, &mut equipment, Slot::RightHand);

        assert_eq!(inventory, original);
        assert_eq!(equipment, Equipment::default());
    }

    #[test]
    fn test_unequip_without_original_synthesizes_item() {
        let mut equipment: Equipment = serde_json::from_value(json!({
            "head": { "name": "Old Helm", "weight": 2, "defense": "3", "damage": "0" }
        }))
        .unwrap();
        let mut inventory = Vec::new();

        unequip(&mut inventory, &mut equipment, Slot::Head);

        let item = &inventory[0];
        assert_eq!(item.name, "Old Helm");
        assert_eq!(item.item_type, ItemType::Armor);
        assert_eq!(item.weight, 2.0);
        assert_eq!(item.defense.as_ref().map(FormValue::to_int), Some(3));
        assert!(!item.id.is_empty());
    }
}
