//! Dice notation rolling.
//!
//! Supports the compact notation used throughout the sheet: `XdY+Z`.
//! The count defaults to 1 and the sides default to 6, so `"d"` rolls
//! `1d6` and `"3d+2"` rolls `3d6+2`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for dice parsing and rolling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
    #[error("Invalid die size: {0}")]
    InvalidDieSize(u32),
    #[error("No dice to roll")]
    NoDice,
    #[error("Too many dice: {count} (limit is {limit})")]
    TooManyDice { count: i32, limit: u32 },
}

/// Sides assumed when the notation omits them.
pub const DEFAULT_SIDES: u32 = 6;

/// Largest number of dice a single roll may draw.
pub const DEFAULT_MAX_DICE: u32 = 100;

/// Rewrite notation into its canonical `XdY[+Z]` form.
///
/// Whitespace is dropped, a leading `d` gains an explicit count of 1 and
/// any `d` not immediately followed by a digit becomes `d6`.
pub fn normalize(notation: &str) -> String {
    let compact: Vec<char> = notation
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut out = String::with_capacity(compact.len() + 2);
    for (i, &ch) in compact.iter().enumerate() {
        if ch == 'd' {
            let prev = if i == 0 { None } else { compact.get(i - 1) };
            if !prev.is_some_and(|p| p.is_ascii_digit()) {
                out.push('1');
            }
            out.push('d');
            if !compact.get(i + 1).is_some_and(|n| n.is_ascii_digit()) {
                out.push_str(&DEFAULT_SIDES.to_string());
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// A parsed dice expression (e.g., 2d6+3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpression {
    pub count: i32,
    pub sides: u32,
    pub modifier: i32,
    /// Normalized notation this expression was parsed from.
    pub notation: String,
}

impl DiceExpression {
    /// Parse a dice notation string.
    pub fn parse(notation: &str) -> Result<Self, DiceError> {
        let normalized = normalize(notation);
        let invalid = || DiceError::InvalidNotation(notation.trim().to_string());

        let mut cursor = Cursor::new(&normalized);

        let count_sign = cursor.sign().unwrap_or(1);
        let count = cursor.number().ok_or_else(invalid)?;
        if !cursor.eat('d') {
            return Err(invalid());
        }
        let sides = cursor.number().ok_or_else(invalid)?;

        let mut modifier: i32 = 0;
        while !cursor.is_done() {
            let sign = cursor.sign().ok_or_else(invalid)?;
            let value = cursor.number().ok_or_else(invalid)?;
            let value = i32::try_from(value).map_err(|_| invalid())?;
            modifier = modifier
                .checked_add(sign * value)
                .ok_or_else(invalid)?;
        }

        let count = i32::try_from(count).map_err(|_| invalid())? * count_sign;
        let sides = u32::try_from(sides).map_err(|_| invalid())?;
        if sides == 0 {
            return Err(DiceError::InvalidDieSize(sides));
        }

        Ok(DiceExpression {
            count,
            sides,
            modifier,
            notation: normalized,
        })
    }

    /// Roll the dice expression and return the result.
    pub fn roll(&self) -> Result<RollResult, DiceError> {
        self.roll_with_rng(&mut rand::thread_rng())
    }

    /// Roll with a specific RNG (useful for testing).
    pub fn roll_with_rng<R: Rng>(&self, rng: &mut R) -> Result<RollResult, DiceError> {
        self.roll_capped(rng, DEFAULT_MAX_DICE)
    }

    /// Roll with a specific RNG, refusing to draw more than `max_dice` dice.
    ///
    /// A count of zero or less is a "no roll": nothing is drawn and
    /// [`DiceError::NoDice`] is returned.
    pub fn roll_capped<R: Rng>(&self, rng: &mut R, max_dice: u32) -> Result<RollResult, DiceError> {
        if self.count <= 0 {
            return Err(DiceError::NoDice);
        }
        if self.count as u32 > max_dice {
            return Err(DiceError::TooManyDice {
                count: self.count,
                limit: max_dice,
            });
        }

        let rolls: Vec<u32> = (0..self.count)
            .map(|_| rng.gen_range(1..=self.sides))
            .collect();

        let dice_total: i64 = rolls.iter().map(|&r| i64::from(r)).sum();
        let total = (dice_total + i64::from(self.modifier))
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;

        Ok(RollResult {
            notation: self.notation.clone(),
            rolls,
            modifier: self.modifier,
            total,
        })
    }
}

impl FromStr for DiceExpression {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiceExpression::parse(s)
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation)
    }
}

struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            chars: s.chars().peekable(),
        }
    }

    fn is_done(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn sign(&mut self) -> Option<i32> {
        if self.eat('+') {
            Some(1)
        } else if self.eat('-') {
            Some(-1)
        } else {
            None
        }
    }

    fn number(&mut self) -> Option<u64> {
        let mut value: Option<u64> = None;
        while let Some(digit) = self.chars.peek().and_then(|c| c.to_digit(10)) {
            self.chars.next();
            value = Some(value.unwrap_or(0).checked_mul(10)?.checked_add(u64::from(digit))?);
        }
        value
    }
}

/// Complete result of a dice roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    pub notation: String,
    /// Individual die faces in the order they were drawn.
    pub rolls: Vec<u32>,
    pub modifier: i32,
    pub total: i32,
}

impl RollResult {
    /// Format the individual dice results for display.
    pub fn dice_display(&self) -> String {
        let dice_str = format!(
            "[{}]",
            self.rolls
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        if self.modifier > 0 {
            format!("{} + {}", dice_str, self.modifier)
        } else if self.modifier < 0 {
            format!("{} - {}", dice_str, self.modifier.unsigned_abs())
        } else {
            dice_str
        }
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.dice_display(), self.total)
    }
}

/// Convenience function to roll dice from a notation string.
pub fn roll(notation: &str) -> Result<RollResult, DiceError> {
    DiceExpression::parse(notation)?.roll()
}

/// A titled roll as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    pub title: String,
    pub result: RollResult,
}

/// Holds the currently displayed roll and a short history.
///
/// A failed roll clears the displayed result instead of leaving the
/// previous one on screen.
#[derive(Debug, Clone)]
pub struct DiceTray {
    current: Option<RollRecord>,
    history: VecDeque<RollRecord>,
    history_limit: usize,
    max_dice: u32,
}

impl Default for DiceTray {
    fn default() -> Self {
        Self::new(20, DEFAULT_MAX_DICE)
    }
}

impl DiceTray {
    pub fn new(history_limit: usize, max_dice: u32) -> Self {
        Self {
            current: None,
            history: VecDeque::with_capacity(history_limit),
            history_limit,
            max_dice,
        }
    }

    /// Roll `notation` under `title` and make it the displayed result.
    pub fn roll(&mut self, title: &str, notation: &str) -> Result<&RollRecord, DiceError> {
        self.roll_with_rng(title, notation, &mut rand::thread_rng())
    }

    pub fn roll_with_rng<R: Rng>(
        &mut self,
        title: &str,
        notation: &str,
        rng: &mut R,
    ) -> Result<&RollRecord, DiceError> {
        let outcome = DiceExpression::parse(notation)
            .and_then(|expr| expr.roll_capped(rng, self.max_dice));

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                log::debug!("Roll '{title}' ({notation}) produced no result: {e}");
                self.current = None;
                return Err(e);
            }
        };

        let record = RollRecord {
            title: title.to_string(),
            result,
        };

        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.pop_front();
            }
            self.history.push_back(record.clone());
        }

        Ok(self.current.insert(record))
    }

    /// The roll currently on display, if any.
    pub fn current(&self) -> Option<&RollRecord> {
        self.current.as_ref()
    }

    /// Past rolls, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &RollRecord> {
        self.history.iter()
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.history.clear();
    }
}
