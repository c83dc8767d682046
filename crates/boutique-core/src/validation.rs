//! # Validation Module
//!
//! Form-input parsing and validation for Boutique POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Web form (external)                                       │
//! │  ├── Basic format checks                                            │
//! │  └── Submits every field as a raw string                            │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: Operations (Rust)                                         │
//! │  └── THIS MODULE: parse raw fields, enforce business rules          │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL / CHECK constraints                                   │
//! │  ├── UNIQUE constraint on category name                             │
//! │  └── Foreign key on product.category_id                             │
//! │                                                                     │
//! │  Defense in depth: multiple layers catch different errors           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use boutique_core::validation::{parse_money_field, parse_sale_quantity};
//!
//! // Prices arrive as form strings
//! let price = parse_money_field("selling price", "4500").unwrap();
//! assert_eq!(price.cents(), 450_000);
//!
//! // Sale quantity: malformed input is treated as zero, which the caller
//! // then rejects as an invalid quantity
//! assert_eq!(parse_sale_quantity("2"), 2);
//! assert_eq!(parse_sale_quantity("abc"), 0);
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length accepted for names (categories and products).
const MAX_NAME_LEN: usize = 200;

/// Maximum length accepted for free-text audit notes.
const MAX_NOTES_LEN: usize = 500;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a category or product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates optional free-text audit notes.
///
/// Empty or whitespace-only notes collapse to `None`.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<Option<String>> {
    match notes.map(str::trim) {
        None | Some("") => Ok(None),
        Some(n) if n.len() > MAX_NOTES_LEN => Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        }),
        Some(n) => Ok(Some(n.to_string())),
    }
}

// =============================================================================
// Numeric Field Parsers
// =============================================================================

/// Parses a raw price field into [`Money`], requiring a strictly positive
/// amount.
///
/// Accepts plain integers ("4500") and up to two decimal places ("4500.50").
///
/// ## Example
/// ```rust
/// use boutique_core::validation::parse_money_field;
///
/// assert_eq!(parse_money_field("cost price", "2500").unwrap().cents(), 250_000);
/// assert_eq!(parse_money_field("cost price", "12.5").unwrap().cents(), 1250);
/// assert!(parse_money_field("cost price", "0").is_err());
/// assert!(parse_money_field("cost price", "-3").is_err());
/// assert!(parse_money_field("cost price", "abc").is_err());
/// ```
pub fn parse_money_field(field: &str, raw: &str) -> ValidationResult<Money> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let cents = parse_cents(raw).ok_or_else(|| ValidationError::NotANumber {
        field: field.to_string(),
        value: raw.to_string(),
    })?;

    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(Money::from_cents(cents))
}

/// Parses a raw integer field, requiring a non-negative value.
///
/// Used for stock quantities and minimum stock levels.
pub fn parse_non_negative_int(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value: i64 = raw.parse().map_err(|_| ValidationError::NotANumber {
        field: field.to_string(),
        value: raw.to_string(),
    })?;

    if value < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(value)
}

/// Parses a raw sale quantity, treating parse failure as zero.
///
/// ## Why zero instead of an error?
/// The sale flow's first gate is `quantity <= 0 ⇒ invalid quantity`.
/// Collapsing malformed input onto zero funnels every bad value through
/// that single gate, so the caller produces one consistent failure
/// message.
///
/// ```text
/// "3"    → 3     (valid, proceeds to the stock check)
/// "abc"  → 0     (rejected: invalid quantity)
/// ""     → 0     (rejected: invalid quantity)
/// "-2"   → -2    (rejected: invalid quantity)
/// ```
pub fn parse_sale_quantity(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Parses a raw physical count for a stock audit, requiring a non-negative
/// integer.
pub fn parse_physical_count(raw: &str) -> ValidationResult<i64> {
    parse_non_negative_int("physical count", raw)
}

/// Parses a decimal money string into cents. Returns None on any malformed
/// input; sign handling is kept so the caller can report "must be positive"
/// rather than "not a number" for negative amounts.
fn parse_cents(raw: &str) -> Option<i64> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (major, minor) = match digits.split_once('.') {
        Some((m, n)) => (m, n),
        None => (digits, ""),
    };

    if major.is_empty() && minor.is_empty() {
        return None;
    }
    if minor.len() > 2 {
        return None;
    }
    if !major.chars().all(|c| c.is_ascii_digit()) || !minor.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let major_val: i64 = if major.is_empty() { 0 } else { major.parse().ok()? };
    let minor_val: i64 = match minor.len() {
        0 => 0,
        1 => minor.parse::<i64>().ok()? * 10,
        _ => minor.parse().ok()?,
    };

    let cents = major_val.checked_mul(100)?.checked_add(minor_val)?;
    Some(if negative { -cents } else { cents })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("name", "  Fragrance ").unwrap(), "Fragrance");
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_notes() {
        assert_eq!(validate_notes(None).unwrap(), None);
        assert_eq!(validate_notes(Some("  ")).unwrap(), None);
        assert_eq!(
            validate_notes(Some(" shelf recount ")).unwrap(),
            Some("shelf recount".to_string())
        );
        assert!(validate_notes(Some(&"x".repeat(600))).is_err());
    }

    #[test]
    fn test_parse_money_field() {
        assert_eq!(parse_money_field("price", "4500").unwrap().cents(), 450_000);
        assert_eq!(parse_money_field("price", "12.50").unwrap().cents(), 1250);
        assert_eq!(parse_money_field("price", "12.5").unwrap().cents(), 1250);
        assert_eq!(parse_money_field("price", " 7 ").unwrap().cents(), 700);

        // Zero and negatives rejected as non-positive
        assert!(matches!(
            parse_money_field("price", "0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_money_field("price", "-3.50"),
            Err(ValidationError::MustBePositive { .. })
        ));

        // Garbage rejected as not a number
        assert!(matches!(
            parse_money_field("price", "abc"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_money_field("price", "1.234"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_money_field("price", ""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_parse_non_negative_int() {
        assert_eq!(parse_non_negative_int("stock", "0").unwrap(), 0);
        assert_eq!(parse_non_negative_int("stock", "42").unwrap(), 42);
        assert!(matches!(
            parse_non_negative_int("stock", "-1"),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
        assert!(matches!(
            parse_non_negative_int("stock", "3.5"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_non_negative_int("stock", ""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_parse_sale_quantity() {
        assert_eq!(parse_sale_quantity("3"), 3);
        assert_eq!(parse_sale_quantity(" 10 "), 10);
        assert_eq!(parse_sale_quantity("-2"), -2);
        // Malformed input collapses to zero
        assert_eq!(parse_sale_quantity("abc"), 0);
        assert_eq!(parse_sale_quantity(""), 0);
        assert_eq!(parse_sale_quantity("2.5"), 0);
    }
}
