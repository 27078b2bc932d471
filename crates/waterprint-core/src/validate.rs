//! Parameter validation
//!
//! Four checks, run in order, first failure wins:
//!
//! 1. the parameters exist at all
//! 2. `username` is present, is text, and is not blank
//! 3. `angle` reads as a positive integer with no leading zero
//! 4. `font` is text
//!
//! Zero and negative angles fail check 3 even though the render stage could
//! draw them. Validation is the gate, so they never reach the surface.

use serde_json::Value;

use crate::error::ValidationFailure;
use crate::params::{Angle, WatermarkParams};

/// Tilt used when the caller leaves `angle` out
pub const DEFAULT_ANGLE: i64 = 15;

/// Font used when the caller leaves `font` out
pub const DEFAULT_FONT: &str = "24px -apple-system, sans-serif, Arial";

/// Values merged into the parameters before validation
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub angle: Angle,
    pub font: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            angle: Angle::Int(DEFAULT_ANGLE),
            font: DEFAULT_FONT.to_string(),
        }
    }
}

/// Parameters that passed every check, ready for the render stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidParams {
    pub text: String,
    pub angle_deg: i64,
    pub font: String,
}

/// Validate typed parameters, filling absent fields from `defaults`
pub fn validate(
    params: &WatermarkParams,
    defaults: &Defaults,
) -> Result<ValidParams, ValidationFailure> {
    if params.username.is_empty() {
        return Err(ValidationFailure::MissingUsername);
    }
    check_blank(&params.username)?;

    let angle = params.angle.as_ref().unwrap_or(&defaults.angle);
    let angle_deg = parse_angle(&angle.to_text())?;

    let font = params.font.as_ref().unwrap_or(&defaults.font).clone();

    Ok(ValidParams {
        text: params.username.clone(),
        angle_deg,
        font,
    })
}

/// Validate a loosely typed property bag
///
/// Only `username`, `angle` and `font` are read. A falsy bag (`null`,
/// `false`, `0`, `""`) is missing altogether. A `null` angle or font counts
/// as absent and takes the default; any other non-object simply has no
/// fields. Angles that are neither numbers nor text are read through their
/// string form, so `[15]` reads as `"15"`.
pub fn validate_value(value: &Value, defaults: &Defaults) -> Result<ValidParams, ValidationFailure> {
    if is_falsy(value) {
        return Err(ValidationFailure::MissingParams);
    }

    let text = match value.get("username") {
        None => return Err(ValidationFailure::MissingUsername),
        Some(v) if is_falsy(v) => return Err(ValidationFailure::MissingUsername),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(ValidationFailure::UsernameNotText),
    };
    check_blank(&text)?;

    let angle_deg = match present(value, "angle") {
        None => parse_angle(&defaults.angle.to_text())?,
        Some(v) => parse_angle(&value_to_angle(v).to_text())?,
    };

    let font = match present(value, "font") {
        None => defaults.font.clone(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(ValidationFailure::FontNotText),
    };

    Ok(ValidParams {
        text,
        angle_deg,
        font,
    })
}

/// Whether `text` matches `^[1-9]\d*$`
pub fn is_positive_integer_literal(text: &str) -> bool {
    let mut bytes = text.bytes();
    matches!(bytes.next(), Some(b'1'..=b'9')) && bytes.all(|b| b.is_ascii_digit())
}

fn parse_angle(text: &str) -> Result<i64, ValidationFailure> {
    if !is_positive_integer_literal(text) {
        return Err(ValidationFailure::AngleNotInteger);
    }
    // Matches the pattern but overflows i64
    text.parse::<i64>()
        .map_err(|_| ValidationFailure::AngleNotInteger)
}

fn check_blank(text: &str) -> Result<(), ValidationFailure> {
    if text.chars().all(is_blank_char) {
        Err(ValidationFailure::BlankUsername)
    } else {
        Ok(())
    }
}

/// The `\s` class of a JavaScript regex: space separators, the ASCII
/// controls TAB through CR, the line and paragraph separators, and BOM
///
/// Differs from [`char::is_whitespace`] on U+FEFF (blank here) and U+0085
/// (not blank here).
fn is_blank_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

fn present<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn value_to_angle(value: &Value) -> Angle {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Angle::Int)
            .or_else(|| n.as_f64().map(Angle::Float))
            .unwrap_or_else(|| Angle::Text(n.to_string())),
        Value::String(s) => Angle::Text(s.clone()),
        other => Angle::Text(string_form(other)),
    }
}

/// What `String(value)` gives in a browser
fn string_form(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(_) | Value::String(_) => value_to_angle(value).to_text(),
        Value::Array(items) => items.iter().map(string_form).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> Defaults {
        Defaults::default()
    }

    #[test]
    fn accepts_well_formed_params() {
        let params = WatermarkParams::new("alice")
            .with_angle(15)
            .with_font("16px Arial");
        let valid = validate(&params, &defaults()).unwrap();
        assert_eq!(valid.text, "alice");
        assert_eq!(valid.angle_deg, 15);
        assert_eq!(valid.font, "16px Arial");
    }

    #[test]
    fn absent_fields_take_defaults() {
        let valid = validate(&WatermarkParams::new("bob"), &defaults()).unwrap();
        assert_eq!(valid.angle_deg, DEFAULT_ANGLE);
        assert_eq!(valid.font, DEFAULT_FONT);
    }

    #[test]
    fn empty_username_is_missing() {
        let result = validate(&WatermarkParams::new(""), &defaults());
        assert_eq!(result, Err(ValidationFailure::MissingUsername));
    }

    #[test]
    fn whitespace_username_is_blank() {
        let result = validate(&WatermarkParams::new(" \t\n "), &defaults());
        assert_eq!(result, Err(ValidationFailure::BlankUsername));
    }

    #[test]
    fn blank_follows_regex_whitespace() {
        for username in ["\u{feff}", "\u{a0}\u{3000}", "\u{2028}\u{b}\u{c}", "\u{2000}\u{200a}"] {
            assert_eq!(
                validate(&WatermarkParams::new(username), &defaults()),
                Err(ValidationFailure::BlankUsername),
                "{username:?}"
            );
        }
    }

    #[test]
    fn next_line_is_not_blank() {
        for username in ["\u{85}", "\u{200b}", "\u{180e}"] {
            let valid = validate(&WatermarkParams::new(username), &defaults()).unwrap();
            assert_eq!(valid.text, username);
        }
    }

    #[test]
    fn zero_and_negative_angles_fail() {
        for angle in [Angle::Int(0), Angle::Int(-5), Angle::from("-5"), Angle::from("0")] {
            let params = WatermarkParams {
                angle: Some(angle),
                ..WatermarkParams::new("bob")
            };
            assert_eq!(
                validate(&params, &defaults()),
                Err(ValidationFailure::AngleNotInteger)
            );
        }
    }

    #[test]
    fn leading_zero_and_fraction_fail() {
        for angle in [Angle::from("015"), Angle::Float(15.5), Angle::from("15.0"), Angle::from(" 15")]
        {
            let params = WatermarkParams {
                angle: Some(angle),
                ..WatermarkParams::new("bob")
            };
            assert_eq!(
                validate(&params, &defaults()),
                Err(ValidationFailure::AngleNotInteger)
            );
        }
    }

    #[test]
    fn integral_float_angle_passes() {
        let params = WatermarkParams::new("bob").with_angle(30.0);
        assert_eq!(validate(&params, &defaults()).unwrap().angle_deg, 30);
    }

    #[test]
    fn overflowing_angle_fails() {
        let params = WatermarkParams::new("bob").with_angle("99999999999999999999");
        assert_eq!(
            validate(&params, &defaults()),
            Err(ValidationFailure::AngleNotInteger)
        );
    }

    #[test]
    fn empty_font_string_passes() {
        let params = WatermarkParams::new("bob").with_font("");
        assert_eq!(validate(&params, &defaults()).unwrap().font, "");
    }

    #[test]
    fn falsy_bags_are_missing_params() {
        for bag in [Value::Null, json!(false), json!(0), json!(0.0), json!("")] {
            assert_eq!(
                validate_value(&bag, &defaults()),
                Err(ValidationFailure::MissingParams),
                "{bag}"
            );
        }
    }

    #[test]
    fn empty_bag_is_missing_username() {
        assert_eq!(
            validate_value(&json!({}), &defaults()),
            Err(ValidationFailure::MissingUsername)
        );
        assert_eq!(
            validate_value(&json!("alice"), &defaults()),
            Err(ValidationFailure::MissingUsername)
        );
    }

    #[test]
    fn falsy_usernames_are_missing() {
        for username in [json!(null), json!(false), json!(0), json!("")] {
            assert_eq!(
                validate_value(&json!({ "username": username }), &defaults()),
                Err(ValidationFailure::MissingUsername)
            );
        }
    }

    #[test]
    fn non_text_username_is_rejected() {
        for username in [json!(42), json!(true), json!(["a"]), json!({"a": 1})] {
            assert_eq!(
                validate_value(&json!({ "username": username }), &defaults()),
                Err(ValidationFailure::UsernameNotText)
            );
        }
    }

    #[test]
    fn bag_whitespace_username_is_blank() {
        assert_eq!(
            validate_value(&json!({ "username": "   " }), &defaults()),
            Err(ValidationFailure::BlankUsername)
        );
    }

    #[test]
    fn bag_angle_accepts_numbers_and_numeric_text() {
        let valid = validate_value(
            &json!({ "username": "bob", "angle": "45", "font": "16px Arial" }),
            &defaults(),
        )
        .unwrap();
        assert_eq!(valid.angle_deg, 45);

        let valid = validate_value(&json!({ "username": "bob", "angle": 45.0 }), &defaults())
            .unwrap();
        assert_eq!(valid.angle_deg, 45);
    }

    #[test]
    fn bag_angle_rejects_other_types() {
        for angle in [
            json!(true),
            json!({"deg": 15}),
            json!(0),
            json!(-5),
            json!([]),
            json!([1, 5]),
            json!([null]),
        ] {
            assert_eq!(
                validate_value(&json!({ "username": "bob", "angle": angle }), &defaults()),
                Err(ValidationFailure::AngleNotInteger)
            );
        }
    }

    #[test]
    fn bag_angle_reads_arrays_through_their_string_form() {
        for angle in [json!([15]), json!(["15"]), json!([[15]]), json!([15.0])] {
            let valid = validate_value(&json!({ "username": "bob", "angle": angle }), &defaults())
                .unwrap();
            assert_eq!(valid.angle_deg, 15, "{angle}");
        }
    }

    #[test]
    fn bag_null_fields_take_defaults() {
        let valid = validate_value(
            &json!({ "username": "bob", "angle": null, "font": null }),
            &defaults(),
        )
        .unwrap();
        assert_eq!(valid.angle_deg, DEFAULT_ANGLE);
        assert_eq!(valid.font, DEFAULT_FONT);
    }

    #[test]
    fn bag_font_must_be_text() {
        assert_eq!(
            validate_value(&json!({ "username": "bob", "font": 16 }), &defaults()),
            Err(ValidationFailure::FontNotText)
        );
    }

    #[test]
    fn username_checked_before_angle() {
        assert_eq!(
            validate_value(&json!({ "username": " ", "angle": 0, "font": 1 }), &defaults()),
            Err(ValidationFailure::BlankUsername)
        );
        assert_eq!(
            validate_value(&json!({ "username": "bob", "angle": 0, "font": 1 }), &defaults()),
            Err(ValidationFailure::AngleNotInteger)
        );
    }

    #[test]
    fn positive_integer_literal_pattern() {
        assert!(is_positive_integer_literal("1"));
        assert!(is_positive_integer_literal("15"));
        assert!(is_positive_integer_literal("90210"));
        assert!(!is_positive_integer_literal(""));
        assert!(!is_positive_integer_literal("0"));
        assert!(!is_positive_integer_literal("01"));
        assert!(!is_positive_integer_literal("+1"));
        assert!(!is_positive_integer_literal("1e3"));
        assert!(!is_positive_integer_literal("١٢"));
    }
}
