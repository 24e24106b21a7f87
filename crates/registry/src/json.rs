//! Strict JSON decoding helpers.
//!
//! Decoding uses `serde_json` with the target type's serde rules unchanged:
//! input is structurally validated, never coerced. Semantic constraints beyond
//! the shape are expressed with [`Validate`].

use std::any::type_name;
use std::panic::{self, AssertUnwindSafe};

use serde::de::DeserializeOwned;

use crate::diagnostics::{panic_message, report_decode_panic, report_discarded};
use crate::MockupError;

/// Semantic constraints checked after a value has been decoded.
///
/// This plays the role of a validating constructor: return `Err` with a
/// human-readable reason when the decoded value is not a legal instance.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Decode `json` into `T`.
///
/// # Errors
/// [`MockupError::Decode`] when the text is not JSON or does not match `T`.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, MockupError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode `json` into `T` and check `T`'s semantic constraints.
///
/// # Errors
/// - [`MockupError::Decode`] when the text is not JSON or does not match `T`.
/// - [`MockupError::InvalidValue`] when [`Validate::validate`] rejects the value.
pub fn from_json_validated<T: DeserializeOwned + Validate>(json: &str) -> Result<T, MockupError> {
    let value: T = from_json(json)?;
    value.validate().map_err(|reason| MockupError::InvalidValue {
        type_name: type_name::<T>(),
        reason,
    })?;
    Ok(value)
}

/// Best-effort [`from_json`]; failures are reported through `tracing`.
pub fn from_json_or_none<T: DeserializeOwned>(json: &str) -> Option<T> {
    decode_or_none("from_json", || from_json(json))
}

/// Best-effort [`from_json_validated`]; failures are reported through `tracing`.
pub fn from_json_validated_or_none<T: DeserializeOwned + Validate>(json: &str) -> Option<T> {
    decode_or_none("from_json_validated", || from_json_validated(json))
}

/// Run a decode, turning every failure into `None` after reporting it.
///
/// Panics raised by user `Deserialize` or `Validate` impls are caught as well.
pub(crate) fn decode_or_none<T>(operation: &'static str, decode: impl FnOnce() -> Result<T, MockupError>) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(decode)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(failure)) => {
            report_discarded(operation, &failure);
            None
        }
        Err(payload) => {
            report_decode_panic(operation, type_name::<T>(), panic_message(payload.as_ref()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Port(u16);

    impl Validate for Port {
        fn validate(&self) -> Result<(), String> {
            if self.0 == 0 { Err("port must be non-zero".into()) } else { Ok(()) }
        }
    }

    #[test]
    fn decodes_well_formed_input() {
        assert_eq!(from_json::<Port>("8080").unwrap(), Port(8080));
    }

    #[test]
    fn syntax_errors_are_decode_errors() {
        let error = from_json::<Port>("not json").unwrap_err();
        assert!(matches!(error, MockupError::Decode(ref inner) if inner.is_syntax()), "got {error:?}");
    }

    #[test]
    fn shape_mismatch_is_a_decode_error() {
        let error = from_json::<Port>(r#""8080""#).unwrap_err();
        assert!(matches!(error, MockupError::Decode(ref inner) if inner.is_data()), "got {error:?}");
    }

    #[test]
    fn out_of_range_numbers_are_not_coerced() {
        assert!(from_json::<Port>("70000").is_err());
    }

    #[test]
    fn validation_failures_are_invalid_values() {
        let error = from_json_validated::<Port>("0").unwrap_err();
        match error {
            MockupError::InvalidValue { type_name, reason } => {
                assert!(type_name.ends_with("Port"), "type name: {type_name}");
                assert_eq!(reason, "port must be non-zero");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
        assert_eq!(from_json_validated::<Port>("443").unwrap(), Port(443));
    }

    #[test]
    fn decode_or_none_swallows_panics() {
        let decoded: Option<Port> = decode_or_none("test", || panic!("boom"));
        assert!(decoded.is_none());
    }

    #[test]
    fn best_effort_forms_skip_bad_input() {
        assert_eq!(from_json_or_none::<Port>("22"), Some(Port(22)));
        assert!(from_json_or_none::<Port>("-1").is_none());
        assert!(from_json_validated_or_none::<Port>("0").is_none());
        assert_eq!(from_json_validated_or_none::<Port>("22"), Some(Port(22)));
    }
}
