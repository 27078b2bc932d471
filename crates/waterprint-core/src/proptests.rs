use super::*;
use proptest::prelude::*;
use crate::validate::is_positive_integer_literal;

// Property: every positive integer prints in a form the angle check accepts
proptest! {
    #[test]
    fn prop_positive_integers_are_accepted(n in 1i64..=i64::MAX) {
        prop_assert!(is_positive_integer_literal(&n.to_string()));
        prop_assert!(is_positive_integer_literal(&Angle::Int(n).to_text()));
    }
}

// Property: the check accepts nothing but canonical positive integers
proptest! {
    #[test]
    fn prop_accepted_text_is_canonical(s in "[-+0-9. a-z]{0,12}") {
        if is_positive_integer_literal(&s) {
            let canonical = s.parse::<u128>().map(|n| n.to_string());
            prop_assert_eq!(canonical.as_deref(), Ok(s.as_str()));
            prop_assert!(!s.starts_with('0'));
        }
    }
}

// Property: zero and negatives never validate, whatever their type
proptest! {
    #[test]
    fn prop_non_positive_angles_fail(n in i64::MIN..=0) {
        let defaults = Defaults::default();
        for angle in [Angle::Int(n), Angle::Float(n as f64), Angle::Text(n.to_string())] {
            let params = WatermarkParams::new("alice").with_angle(angle);
            prop_assert_eq!(
                validate(&params, &defaults),
                Err(ValidationFailure::AngleNotInteger)
            );
        }
    }
}

// Property: tile width and background size follow the UTF-16 length
proptest! {
    #[test]
    fn prop_size_tracks_utf16_length(text in "\\PC{1,40}", angle in 1i64..10_000) {
        let geometry = TileGeometry::compute(&text, angle);
        let units = text.encode_utf16().count() as u32;

        prop_assert_eq!(geometry.width, units * 20);
        prop_assert_eq!(geometry.background_size(), format!("{}px", units * 10));
        prop_assert_eq!(geometry.height, (angle as f64).sin() * geometry.width as f64);
        prop_assert_eq!(geometry.anchor_y, (geometry.height / 2.0) as f32);
    }
}
