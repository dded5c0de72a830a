//! Strict checks for character files chosen for import.
//!
//! Regular loads default whatever they can't read. An import replaces the
//! player's current sheet, so a file is checked first and refused with a
//! list of problems if it doesn't look like a character document. Missing
//! fields are fine; fields of the wrong shape are not.

use crate::equipment::Slot;
use crate::items::ItemType;
use crate::stats::Attribute;
use serde_json::{Map, Value};
use std::fmt;

/// One problem found in an imported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// JSON path of the offending value, e.g. `inventory[2].type`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// An import was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Not a valid character file")?;
        for (i, issue) in self.issues.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

const STAT_FIELDS: &[&str] = &["race", "bonus", "style", "element", "other"];
const SLOT_INT_FIELDS: &[&str] = &["hit", "range", "evasion", "defense"];
const ITEM_COMBAT_FIELDS: &[&str] = &[
    "damage",
    "accuracy",
    "accuracyCheck",
    "range",
    "evasion",
    "defense",
];

/// Check an imported document's shape.
pub fn validate_document(value: &Value) -> Result<(), ValidationFailure> {
    let mut v = Validator::default();
    v.document(value);
    if v.issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure { issues: v.issues })
    }
}

#[derive(Default)]
struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    fn report(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.to_string(),
            message: message.into(),
        });
    }

    fn object<'v>(&mut self, path: &str, value: &'v Value) -> Option<&'v Map<String, Value>> {
        let obj = value.as_object();
        if obj.is_none() {
            self.report(path, format!("expected an object, found {}", kind(value)));
        }
        obj
    }

    fn array<'v>(&mut self, path: &str, value: &'v Value) -> Option<&'v Vec<Value>> {
        let arr = value.as_array();
        if arr.is_none() {
            self.report(path, format!("expected a list, found {}", kind(value)));
        }
        arr
    }

    fn text(&mut self, path: &str, value: &Value) {
        if !value.is_string() {
            self.report(path, format!("expected text, found {}", kind(value)));
        }
    }

    /// Numbers or text typed into a number input.
    fn number_like(&mut self, path: &str, value: &Value) {
        let ok = match value {
            Value::Number(_) => true,
            Value::String(s) => s.trim().is_empty() || s.trim().parse::<f64>().is_ok(),
            _ => false,
        };
        if !ok {
            self.report(path, format!("expected a number, found {}", kind(value)));
        }
    }

    fn int_like(&mut self, path: &str, value: &Value) {
        let ok = match value {
            Value::Number(n) => n.is_i64() || n.is_u64(),
            Value::String(s) => s.trim().is_empty() || s.trim().parse::<i64>().is_ok(),
            _ => false,
        };
        if !ok {
            self.report(path, format!("expected a whole number, found {}", kind(value)));
        }
    }

    fn scalar(&mut self, path: &str, value: &Value) {
        if !(value.is_string() || value.is_number() || value.is_null()) {
            self.report(path, format!("expected text or a number, found {}", kind(value)));
        }
    }

    fn document(&mut self, value: &Value) {
        let Some(root) = self.object("$", value) else {
            return;
        };

        for (key, field) in root {
            match key.as_str() {
                "version" => {
                    if !field.is_u64() {
                        self.report("version", "expected a non-negative whole number");
                    }
                }
                "name" => self.text("name", field),
                "gl" | "level" => self.int_like(key, field),
                "stats" => self.stats(field),
                "hp" | "mp" | "wp" => self.gauge(key, field),
                "equipment" => self.equipment(field),
                "inventory" => {
                    if let Some(items) = self.array("inventory", field) {
                        for (i, item) in items.iter().enumerate() {
                            self.item(&format!("inventory[{i}]"), item);
                        }
                    }
                }
                "notes" => self.notes(field),
                "skills" => self.records("skills", field, &["name", "description"], &["level"]),
                "checks" => self.records("checks", field, &["name", "base", "modifier"], &[]),
                "portrait" => {
                    if !(field.is_string() || field.is_null()) {
                        self.report("portrait", format!("expected text, found {}", kind(field)));
                    }
                }
                _ => {}
            }
        }
    }

    fn stats(&mut self, value: &Value) {
        let Some(stats) = self.object("stats", value) else {
            return;
        };
        for (key, block) in stats {
            let path = format!("stats.{key}");
            if Attribute::from_key(key).is_none() {
                self.report(&path, "unknown attribute");
                continue;
            }
            let Some(block) = self.object(&path, block) else {
                continue;
            };
            for field in STAT_FIELDS {
                if let Some(v) = block.get(*field) {
                    self.int_like(&format!("{path}.{field}"), v);
                }
            }
        }
    }

    fn gauge(&mut self, key: &str, value: &Value) {
        let Some(gauge) = self.object(key, value) else {
            return;
        };
        for field in ["current", "max"] {
            if let Some(v) = gauge.get(field) {
                self.int_like(&format!("{key}.{field}"), v);
            }
        }
    }

    fn equipment(&mut self, value: &Value) {
        let Some(slots) = self.object("equipment", value) else {
            return;
        };
        for (key, slot) in slots {
            let path = format!("equipment.{key}");
            if Slot::from_key(key).is_none() {
                self.report(&path, "unknown equipment slot");
                continue;
            }
            let Some(slot) = self.object(&path, slot) else {
                continue;
            };
            for (field, v) in slot {
                let field_path = format!("{path}.{field}");
                match field.as_str() {
                    "name" | "notes" => self.text(&field_path, v),
                    "weight" => self.number_like(&field_path, v),
                    "damage" => self.scalar(&field_path, v),
                    "originalItem" if !v.is_null() => self.item(&field_path, v),
                    f if SLOT_INT_FIELDS.contains(&f) => self.int_like(&field_path, v),
                    _ => {}
                }
            }
        }
    }

    fn item(&mut self, path: &str, value: &Value) {
        let Some(item) = self.object(path, value) else {
            return;
        };
        for (field, v) in item {
            let field_path = format!("{path}.{field}");
            match field.as_str() {
                "id" => self.scalar(&field_path, v),
                "name" | "notes" => self.text(&field_path, v),
                "weight" => self.number_like(&field_path, v),
                "type" => match v.as_str() {
                    Some(t) if ItemType::from_name(t).is_some() => {}
                    _ => self.report(&field_path, format!("unknown item type {v}")),
                },
                // Free text in older sheets; only slot keys act as overrides.
                "slot" if !v.is_null() => self.text(&field_path, v),
                f if ITEM_COMBAT_FIELDS.contains(&f) => self.scalar(&field_path, v),
                _ => {}
            }
        }
    }

    fn notes(&mut self, value: &Value) {
        // A plain string is the legacy single-note format.
        if value.is_string() || value.is_null() {
            return;
        }
        self.records("notes", value, &["id", "title", "content"], &[]);
    }

    fn records(&mut self, path: &str, value: &Value, text_fields: &[&str], int_fields: &[&str]) {
        let Some(entries) = self.array(path, value) else {
            return;
        };
        for (i, entry) in entries.iter().enumerate() {
            let entry_path = format!("{path}[{i}]");
            let Some(entry) = self.object(&entry_path, entry) else {
                continue;
            };
            for field in text_fields {
                if let Some(v) = entry.get(*field) {
                    self.text(&format!("{entry_path}.{field}"), v);
                }
            }
            for field in int_fields {
                if let Some(v) = entry.get(*field) {
                    self.int_like(&format!("{entry_path}.{field}"), v);
                }
            }
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "true/false",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
