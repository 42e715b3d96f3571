//! Pure per-field validators applied by the generic dispatch interpreter

use serde_json::Value;

use crate::{Error, Result};

/// Resolution code table; part of the wire contract and reproduced exactly
pub const RESOLUTIONS: [(i64, &str); 6] = [
    (0, "4K"),
    (1, "4KUHD"),
    (2, "2.7K"),
    (3, "1080P"),
    (4, "720P"),
    (5, "WVGA"),
];

/// Validation rule for one field of a control payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Value must merely be present
    Present,
    /// Integer greater than or equal to zero
    NonNegativeInt,
    /// Integer within an inclusive range
    IntRange(i64, i64),
    /// Integer drawn from a fixed set
    IntOneOf(&'static [i64]),
    /// Resolution code (0-5) or one of the six resolution names;
    /// codes normalize to their name
    Resolution,
}

impl FieldRule {
    /// Check `value` against the rule and return its normalized form
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] naming the offending field.
    pub fn apply(self, field: &str, value: &Value) -> Result<Value> {
        match self {
            Self::Present => Ok(value.clone()),
            Self::NonNegativeInt => {
                let n = int_value(field, value)?;
                if n < 0 {
                    return Err(invalid(field, "must be a non-negative integer"));
                }
                Ok(Value::from(n))
            }
            Self::IntRange(lo, hi) => {
                let n = int_value(field, value)?;
                if n < lo || n > hi {
                    return Err(invalid(field, format!("must be between {lo} and {hi}")));
                }
                Ok(Value::from(n))
            }
            Self::IntOneOf(allowed) => {
                let n = int_value(field, value)?;
                if !allowed.contains(&n) {
                    return Err(invalid(field, format!("must be one of {allowed:?}")));
                }
                Ok(Value::from(n))
            }
            Self::Resolution => normalize_resolution(field, value),
        }
    }
}

fn int_value(field: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| invalid(field, "must be an integer"))
}

fn invalid(field: &str, reason: impl Into<String>) -> Error {
    Error::InvalidField {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Map an integer resolution code to its name, or pass a known name through
fn normalize_resolution(field: &str, value: &Value) -> Result<Value> {
    match value {
        Value::Number(_) => {
            let code = int_value(field, value)?;
            RESOLUTIONS
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, name)| Value::from(*name))
                .ok_or_else(|| invalid(field, format!("unsupported resolution code: {code}")))
        }
        Value::String(name) => {
            if RESOLUTIONS.iter().any(|(_, n)| n == name) {
                Ok(value.clone())
            } else {
                Err(invalid(field, format!("unsupported resolution: {name}")))
            }
        }
        _ => Err(invalid(field, "must be a resolution code or name")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn non_negative_int_rejects_negatives_and_non_integers() {
        let rule = FieldRule::NonNegativeInt;
        assert_eq!(rule.apply("dzoom", &json!(0)).unwrap(), json!(0));
        assert_eq!(rule.apply("dzoom", &json!(5)).unwrap(), json!(5));
        assert!(rule.apply("dzoom", &json!(-1)).is_err());
        assert!(rule.apply("dzoom", &json!(1.5)).is_err());
        assert!(rule.apply("dzoom", &json!("5")).is_err());
    }

    #[test]
    fn bitrate_range_boundaries() {
        let rule = FieldRule::IntRange(1, 4_000_000);
        assert!(rule.apply("stream_bitrate", &json!(1)).is_ok());
        assert!(rule.apply("stream_bitrate", &json!(4_000_000)).is_ok());
        assert!(rule.apply("stream_bitrate", &json!(0)).is_err());
        assert!(rule.apply("stream_bitrate", &json!(4_000_001)).is_err());
    }

    #[test]
    fn framerate_range_boundaries() {
        let rule = FieldRule::IntRange(1, 120);
        assert!(rule.apply("stream_framerate", &json!(1)).is_ok());
        assert!(rule.apply("stream_framerate", &json!(120)).is_ok());
        assert!(rule.apply("stream_framerate", &json!(0)).is_err());
        assert!(rule.apply("stream_framerate", &json!(121)).is_err());
    }

    #[test]
    fn int_one_of_rejects_values_outside_the_set() {
        let rule = FieldRule::IntOneOf(&[0, 1]);
        assert!(rule.apply("led", &json!(0)).is_ok());
        assert!(rule.apply("led", &json!(1)).is_ok());
        assert!(rule.apply("led", &json!(2)).is_err());
    }

    #[test]
    fn fov_accepts_only_listed_angles() {
        let rule = FieldRule::IntOneOf(&[90, 110, 140]);
        assert!(rule.apply("fov", &json!(110)).is_ok());
        assert!(rule.apply("fov", &json!(100)).is_err());
    }

    #[test]
    fn resolution_codes_map_bijectively() {
        let names: Vec<&str> = RESOLUTIONS.iter().map(|(_, n)| *n).collect();
        assert_eq!(names, vec!["4K", "4KUHD", "2.7K", "1080P", "720P", "WVGA"]);

        for (code, name) in RESOLUTIONS {
            let normalized = FieldRule::Resolution
                .apply("stream_res", &json!(code))
                .unwrap();
            assert_eq!(normalized, json!(name));
            // string input normalizes to the same value
            let passthrough = FieldRule::Resolution
                .apply("stream_res", &json!(name))
                .unwrap();
            assert_eq!(passthrough, normalized);
        }
    }

    #[test]
    fn resolution_rejects_unknown_code_and_name() {
        assert!(FieldRule::Resolution.apply("stream_res", &json!(6)).is_err());
        assert!(
            FieldRule::Resolution
                .apply("stream_res", &json!("8K"))
                .is_err()
        );
        assert!(
            FieldRule::Resolution
                .apply("stream_res", &json!(true))
                .is_err()
        );
    }

    #[test]
    fn error_names_the_offending_field() {
        let err = FieldRule::IntOneOf(&[0, 1])
            .apply("led", &json!(2))
            .unwrap_err();
        assert!(err.to_string().contains("led"));
    }
}
