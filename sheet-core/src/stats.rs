//! Attribute derivation and combat check notation.
//!
//! Each of the six attributes is entered as five independent numbers:
//! `race`, `bonus`, `style`, `element` and `other`. The displayed value is
//!
//! ```text
//! final = floor((race + bonus) / 3) + style + element + other
//! ```

use crate::arith;
use crate::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Points a player may spread across the six `bonus` fields.
pub const BONUS_BUDGET: i32 = 5;

/// The six character attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    Body,
    Intellect,
    Mysticism,
    Agility,
    #[serde(alias = "senses")]
    Passion,
    Charisma,
}

impl Attribute {
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Body => "body",
            Attribute::Intellect => "intellect",
            Attribute::Mysticism => "mysticism",
            Attribute::Agility => "agility",
            Attribute::Passion => "passion",
            Attribute::Charisma => "charisma",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Body => "Body",
            Attribute::Intellect => "Intellect",
            Attribute::Mysticism => "Mysticism",
            Attribute::Agility => "Agility",
            Attribute::Passion => "Passion",
            Attribute::Charisma => "Charisma",
        }
    }

    pub fn from_key(key: &str) -> Option<Attribute> {
        match key {
            "body" => Some(Attribute::Body),
            "intellect" => Some(Attribute::Intellect),
            "mysticism" => Some(Attribute::Mysticism),
            "agility" => Some(Attribute::Agility),
            "passion" | "senses" => Some(Attribute::Passion),
            "charisma" => Some(Attribute::Charisma),
            _ => None,
        }
    }

    pub fn all() -> [Attribute; 6] {
        [
            Attribute::Body,
            Attribute::Intellect,
            Attribute::Mysticism,
            Attribute::Agility,
            Attribute::Passion,
            Attribute::Charisma,
        ]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Raw inputs for one attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(default, deserialize_with = "lenient::int")]
    pub race: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub bonus: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub style: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub element: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub other: i32,
}

impl StatBlock {
    pub fn new(race: i32, bonus: i32, style: i32, element: i32, other: i32) -> Self {
        Self {
            race,
            bonus,
            style,
            element,
            other,
        }
    }

    pub fn derive(&self) -> DerivedStat {
        let base_sum = self.race.saturating_add(self.bonus);
        let divided_by_3 = base_sum.div_euclid(3);
        let final_value = divided_by_3
            .saturating_add(self.style)
            .saturating_add(self.element)
            .saturating_add(self.other);
        DerivedStat {
            base_sum,
            divided_by_3,
            final_value,
        }
    }
}

/// Values shown next to an attribute's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStat {
    pub base_sum: i32,
    pub divided_by_3: i32,
    pub final_value: i32,
}

/// Stat inputs for all six attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub body: StatBlock,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub intellect: StatBlock,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub mysticism: StatBlock,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub agility: StatBlock,
    #[serde(default, alias = "senses", deserialize_with = "lenient::or_default")]
    pub passion: StatBlock,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub charisma: StatBlock,
}

impl Stats {
    pub fn get(&self, attribute: Attribute) -> &StatBlock {
        match attribute {
            Attribute::Body => &self.body,
            Attribute::Intellect => &self.intellect,
            Attribute::Mysticism => &self.mysticism,
            Attribute::Agility => &self.agility,
            Attribute::Passion => &self.passion,
            Attribute::Charisma => &self.charisma,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut StatBlock {
        match attribute {
            Attribute::Body => &mut self.body,
            Attribute::Intellect => &mut self.intellect,
            Attribute::Mysticism => &mut self.mysticism,
            Attribute::Agility => &mut self.agility,
            Attribute::Passion => &mut self.passion,
            Attribute::Charisma => &mut self.charisma,
        }
    }

    pub fn derive(&self, attribute: Attribute) -> DerivedStat {
        self.get(attribute).derive()
    }

    /// Final values for every attribute, in display order.
    pub fn derive_all(&self) -> Vec<(Attribute, DerivedStat)> {
        Attribute::all()
            .into_iter()
            .map(|a| (a, self.derive(a)))
            .collect()
    }

    /// Sum of the `bonus` inputs across all attributes.
    pub fn bonus_spent(&self) -> i32 {
        Attribute::all()
            .into_iter()
            .fold(0i32, |acc, a| acc.saturating_add(self.get(a).bonus))
    }

    /// Compare allocated bonus points against `budget`.
    pub fn bonus_allocation(&self, budget: i32) -> BonusAllocation {
        BonusAllocation {
            spent: self.bonus_spent(),
            budget,
        }
    }
}

/// Bonus points allocated versus the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusAllocation {
    pub spent: i32,
    pub budget: i32,
}

impl BonusAllocation {
    pub fn remaining(&self) -> i32 {
        self.budget.saturating_sub(self.spent)
    }

    /// Over-budget allocations are accepted but flagged to the player.
    pub fn warning(&self) -> Option<ValidationWarning> {
        (self.spent > self.budget).then_some(ValidationWarning::BonusOverBudget {
            spent: self.spent,
            budget: self.budget,
        })
    }
}

/// Non-fatal problems shown as an indicator next to the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationWarning {
    BonusOverBudget { spent: i32, budget: i32 },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::BonusOverBudget { spent, budget } => {
                write!(f, "Bonus points {spent} exceed the budget of {budget}")
            }
        }
    }
}

/// A rollable check: base dice plus a typed-in modifier expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatCheck {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub base: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub modifier: String,
}

impl CombatCheck {
    pub fn new(
        name: impl Into<String>,
        base: impl Into<String>,
        modifier: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
            modifier: modifier.into(),
        }
    }

    pub fn modifier_value(&self) -> i32 {
        arith::evaluate_modifier(&self.modifier)
    }

    /// The notation handed to the dice roller, e.g. `"2d6+9"`.
    pub fn notation(&self) -> String {
        arith::append_modifier(&self.base, self.modifier_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_derive_formula() {
        let block = StatBlock::new(7, 2, 1, 1, 0);
        let derived = block.derive();
        assert_eq!(derived.base_sum, 9);
        assert_eq!(derived.divided_by_3, 3);
        assert_eq!(derived.final_value, 5);
    }

    #[test]
    fn test_derive_floors_negative_and_zero() {
        assert_eq!(StatBlock::default().derive().final_value, 0);
        // floor(-1 / 3) is -1, not 0
        assert_eq!(StatBlock::new(-1, 0, 0, 0, 0).derive().divided_by_3, -1);
        assert_eq!(StatBlock::new(-3, 0, 0, 0, 0).derive().divided_by_3, -1);
        assert_eq!(StatBlock::new(-4, 0, 2, 0, -1).derive().final_value, -1);
        assert_eq!(StatBlock::new(2, 0, 0, 0, 0).derive().divided_by_3, 0);
    }

    #[test]
    fn test_formula_holds_over_range() {
        for race in -7..=7 {
            for bonus in -3..=3 {
                let block = StatBlock::new(race, bonus, 2, -1, 3);
                let expected = ((race + bonus) as f64 / 3.0).floor() as i32 + 2 - 1 + 3;
                assert_eq!(block.derive().final_value, expected);
            }
        }
    }

    #[test]
    fn test_lenient_inputs() {
        let stats: Stats = serde_json::from_value(json!({
            "body": { "race": "8", "bonus": 1, "style": "", "element": null },
            "senses": { "race": 6 },
            "charisma": "not an object"
        }))
        .unwrap();

        assert_eq!(stats.body, StatBlock::new(8, 1, 0, 0, 0));
        assert_eq!(stats.passion.race, 6);
        assert_eq!(stats.charisma, StatBlock::default());
        assert_eq!(stats.derive(Attribute::Body).final_value, 3);
    }

    #[test]
    fn test_bonus_budget_warning() {
        let mut stats = Stats::default();
        stats.body.bonus = 3;
        stats.agility.bonus = 2;
        let allocation = stats.bonus_allocation(BONUS_BUDGET);
        assert_eq!(allocation.remaining(), 0);
        assert!(allocation.warning().is_none());

        stats.charisma.bonus = 1;
        let allocation = stats.bonus_allocation(BONUS_BUDGET);
        assert_eq!(
            allocation.warning(),
            Some(ValidationWarning::BonusOverBudget {
                spent: 6,
                budget: 5
            })
        );
    }

    #[test]
    fn test_combat_check_notation() {
        let check = CombatCheck::new("Melee", "2d6", "10-1");
        assert_eq!(check.modifier_value(), 9);
        assert_eq!(check.notation(), "2d6+9");

        let check = CombatCheck::new("Dodge", "2d6", "1-4");
        assert_eq!(check.notation(), "2d6-3");

        let check = CombatCheck::new("Spot", "2d6", "");
        assert_eq!(check.notation(), "2d6");
    }

    #[test]
    fn test_attribute_keys() {
        for attribute in Attribute::all() {
            assert_eq!(Attribute::from_key(attribute.key()), Some(attribute));
        }
        assert_eq!(Attribute::from_key("senses"), Some(Attribute::Passion));
        assert_eq!(Attribute::from_key("luck"), None);
    }
}
