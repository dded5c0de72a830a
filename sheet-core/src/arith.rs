//! Integer arithmetic for check modifiers.
//!
//! Modifier fields hold small sums typed by the player, e.g. `"10-1"` or
//! `"(4+2)/2"`. Only digits and `+ - * / ( )` are understood; every other
//! character is dropped before parsing. Division truncates toward zero.

/// Nesting limit for parentheses.
const MAX_DEPTH: usize = 64;

/// Strip everything except digits, operators and parentheses.
pub fn sanitize(expr: &str) -> String {
    expr.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')'))
        .collect()
}

/// Evaluate a sanitized copy of `expr`.
///
/// Returns `None` when nothing parseable remains, on division by zero and
/// on overflow.
pub fn evaluate(expr: &str) -> Option<i64> {
    let cleaned = sanitize(expr);
    if cleaned.is_empty() {
        return None;
    }
    let mut parser = Parser {
        input: cleaned.as_bytes(),
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if parser.pos != parser.input.len() {
        return None;
    }
    Some(value)
}

/// Evaluate a modifier field down to a signed integer.
///
/// Empty, unparseable or out-of-range input evaluates to 0.
pub fn evaluate_modifier(expr: &str) -> i32 {
    evaluate(expr)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(0)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn expr(&mut self) -> Option<i64> {
        let mut acc = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = if op == b'+' {
                acc.checked_add(rhs)?
            } else {
                acc.checked_sub(rhs)?
            };
        }
        Some(acc)
    }

    fn term(&mut self) -> Option<i64> {
        let mut acc = self.factor()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            acc = if op == b'*' {
                acc.checked_mul(rhs)?
            } else {
                acc.checked_div(rhs)?
            };
        }
        Some(acc)
    }

    fn factor(&mut self) -> Option<i64> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return None;
        }
        let value = match self.bump()? {
            b'+' => self.factor(),
            b'-' => self.factor().and_then(i64::checked_neg),
            b'(' => {
                let inner = self.expr()?;
                (self.bump()? == b')').then_some(inner)
            }
            b @ b'0'..=b'9' => {
                let mut value = i64::from(b - b'0');
                while let Some(d @ b'0'..=b'9') = self.peek() {
                    self.pos += 1;
                    value = value.checked_mul(10)?.checked_add(i64::from(d - b'0'))?;
                }
                Some(value)
            }
            _ => None,
        };
        self.depth -= 1;
        value
    }
}

/// Append a signed modifier to a base notation: `("2d6", 9)` → `"2d6+9"`.
///
/// A zero modifier leaves the base untouched.
pub fn append_modifier(base: &str, modifier: i32) -> String {
    let base = base.trim();
    match modifier {
        0 => base.to_string(),
        m if m > 0 => format!("{base}+{m}"),
        m => format!("{base}-{}", m.unsigned_abs()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate_modifier("10-1"), 9);
        assert_eq!(evaluate_modifier("2+3*4"), 14);
        assert_eq!(evaluate_modifier("(2+3)*4"), 20);
        assert_eq!(evaluate_modifier("7/2"), 3);
        assert_eq!(evaluate_modifier("-7/2"), -3);
        assert_eq!(evaluate_modifier("-(3+1)"), -4);
        assert_eq!(evaluate_modifier("--2"), 2);
    }

    #[test]
    fn test_strips_other_characters() {
        assert_eq!(sanitize("10 - 1 (str)"), "10-1()");
        assert_eq!(evaluate_modifier("STR 3 + DEX 2"), 5);
        assert_eq!(evaluate_modifier("alert(1)+2"), 3);
    }

    #[test]
    fn test_unparseable_is_zero() {
        assert_eq!(evaluate_modifier(""), 0);
        assert_eq!(evaluate_modifier("abc"), 0);
        assert_eq!(evaluate_modifier("3+"), 0);
        assert_eq!(evaluate_modifier("(3"), 0);
        assert_eq!(evaluate_modifier("3)"), 0);
        assert_eq!(evaluate_modifier("4/0"), 0);
        assert_eq!(evaluate_modifier("99999999999*99999999999"), 0);
        assert_eq!(evaluate_modifier(&"(".repeat(500)), 0);
    }

    #[test]
    fn test_append_modifier() {
        assert_eq!(append_modifier("2d6", evaluate_modifier("10-1")), "2d6+9");
        assert_eq!(append_modifier("2d6", -3), "2d6-3");
        assert_eq!(append_modifier("2d6", 0), "2d6");
    }
}
