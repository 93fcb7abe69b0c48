//! Shared validation machinery for insert shapes and boundary request types.
//!
//! Every validator in this crate is a pure function from a `serde_json::Value`
//! to either a typed value or a [`ValidationError`]. Validation is exhaustive:
//! each helper records its violation and yields `None` instead of bailing, so a
//! caller gets every failing field in a single round trip. Unknown fields are
//! ignored throughout, to tolerate forward-compatible clients.

use core::fmt;
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

/// A single field violation: dotted path into the payload plus the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub reason: String,
}

/// The only error kind produced by this crate.
///
/// Carries the full list of field violations collected while walking a
/// payload. Callers are expected to translate this into a 4xx-style response
/// enumerating all failures; `Serialize` is derived so the list can be embedded
/// in a response body as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new() -> Self {
        ValidationError { errors: Vec::new() }
    }

    pub fn push(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.into(),
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// True when some violation was recorded for the given payload path.
    pub fn mentions(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }

    /// Finish a failed validation: log the collected violations and wrap them
    /// in `Err`. Only called once at least one violation has been recorded.
    pub(crate) fn reject<T>(self, what: &str) -> Result<T, ValidationError> {
        debug!("{} rejected: {}", what, self);
        Err(self)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: ")?;
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            if e.path.is_empty() {
                write!(f, "{}", e.reason)?;
            } else {
                write!(f, "{}: {}", e.path, e.reason)?;
            }
        }
        Ok(())
    }
}

impl Error for ValidationError {}

/// Dotted path for a field nested under `prefix` (empty prefix = top level).
pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// The payload itself must be a JSON object.
pub(crate) fn as_object<'a>(
    value: &'a Value,
    path: &str,
    errors: &mut ValidationError,
) -> Option<&'a Map<String, Value>> {
    match value.as_object() {
        Some(map) => Some(map),
        None => {
            errors.push(path, "must be a JSON object");
            None
        }
    }
}

pub(crate) fn require_string(
    obj: &Map<String, Value>,
    prefix: &str,
    name: &str,
    errors: &mut ValidationError,
) -> Option<String> {
    match obj.get(name) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(join_path(prefix, name), "must be a string");
            None
        }
        None => {
            errors.push(join_path(prefix, name), "is required");
            None
        }
    }
}

pub(crate) fn optional_string(
    obj: &Map<String, Value>,
    prefix: &str,
    name: &str,
    errors: &mut ValidationError,
) -> Option<String> {
    match obj.get(name) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(_) => {
            errors.push(join_path(prefix, name), "must be a string");
            None
        }
    }
}

pub(crate) fn optional_bool(
    obj: &Map<String, Value>,
    prefix: &str,
    name: &str,
    errors: &mut ValidationError,
) -> Option<bool> {
    match obj.get(name) {
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::Null) | None => None,
        Some(_) => {
            errors.push(join_path(prefix, name), "must be a boolean");
            None
        }
    }
}

/// Optional booleans at the boundary carry defaults, so a missing key is fine.
pub(crate) fn bool_or(
    obj: &Map<String, Value>,
    prefix: &str,
    name: &str,
    default: bool,
    errors: &mut ValidationError,
) -> Option<bool> {
    match obj.get(name) {
        None => Some(default),
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            errors.push(join_path(prefix, name), "must be a boolean");
            None
        }
    }
}

fn int_from(value: &Value) -> Option<i64> {
    // as_i64 is None for floats with a fractional part and for non-numbers,
    // but accepts e.g. 5.0; require a JSON integer literal instead.
    if value.is_i64() || value.is_u64() {
        value.as_i64()
    } else {
        None
    }
}

pub(crate) fn optional_i32(
    obj: &Map<String, Value>,
    prefix: &str,
    name: &str,
    errors: &mut ValidationError,
) -> Option<i32> {
    match obj.get(name) {
        Some(Value::Null) | None => None,
        Some(v) => match int_from(v).and_then(|n| i32::try_from(n).ok()) {
            Some(n) => Some(n),
            None => {
                errors.push(join_path(prefix, name), "must be an integer");
                None
            }
        },
    }
}

pub(crate) fn require_positive_i32(
    obj: &Map<String, Value>,
    prefix: &str,
    name: &str,
    errors: &mut ValidationError,
) -> Option<i32> {
    match obj.get(name) {
        None => {
            errors.push(join_path(prefix, name), "is required");
            None
        }
        Some(v) => match int_from(v).and_then(|n| i32::try_from(n).ok()) {
            Some(n) if n > 0 => Some(n),
            _ => {
                errors.push(join_path(prefix, name), "must be a positive integer");
                None
            }
        },
    }
}

pub(crate) fn positive_i32_or(
    obj: &Map<String, Value>,
    prefix: &str,
    name: &str,
    default: i32,
    errors: &mut ValidationError,
) -> Option<i32> {
    match obj.get(name) {
        None => Some(default),
        Some(v) => match int_from(v).and_then(|n| i32::try_from(n).ok()) {
            Some(n) if n > 0 => Some(n),
            _ => {
                errors.push(join_path(prefix, name), "must be a positive integer");
                None
            }
        },
    }
}

pub(crate) fn positive_f64_or(
    obj: &Map<String, Value>,
    prefix: &str,
    name: &str,
    default: f64,
    errors: &mut ValidationError,
) -> Option<f64> {
    match obj.get(name) {
        None => Some(default),
        Some(v) => match v.as_f64() {
            Some(n) if n > 0.0 => Some(n),
            _ => {
                errors.push(join_path(prefix, name), "must be a positive number");
                None
            }
        },
    }
}

/// Required field that must parse as an absolute URL.
pub(crate) fn require_url(
    obj: &Map<String, Value>,
    prefix: &str,
    name: &str,
    errors: &mut ValidationError,
) -> Option<Url> {
    let raw = require_string(obj, prefix, name, errors)?;
    match Url::parse(&raw) {
        Ok(url) => Some(url),
        Err(_) => {
            errors.push(join_path(prefix, name), "must be a well-formed absolute URL");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_lists_every_violation() {
        let mut errors = ValidationError::new();
        errors.push("name", "is required");
        errors.push("options.copies", "must be a positive integer");
        let rendered = errors.to_string();
        assert_eq!(
            rendered,
            "validation failed: name: is required; options.copies: must be a positive integer"
        );
    }

    #[test]
    fn collects_instead_of_short_circuiting() {
        let payload = json!({ "a": 1, "b": "x" });
        let obj = payload.as_object().unwrap();
        let mut errors = ValidationError::new();
        assert!(require_string(obj, "", "a", &mut errors).is_none());
        assert!(optional_bool(obj, "", "b", &mut errors).is_none());
        assert!(require_string(obj, "", "c", &mut errors).is_none());
        assert_eq!(errors.errors().len(), 3);
        assert!(errors.mentions("a"));
        assert!(errors.mentions("b"));
        assert!(errors.mentions("c"));
    }

    #[test]
    fn integers_reject_fractions_and_overflow() {
        let payload = json!({ "frac": 2.5, "whole": 3, "big": 9_000_000_000_i64 });
        let obj = payload.as_object().unwrap();
        let mut errors = ValidationError::new();
        assert!(optional_i32(obj, "", "frac", &mut errors).is_none());
        assert_eq!(optional_i32(obj, "", "whole", &mut errors), Some(3));
        assert!(optional_i32(obj, "", "big", &mut errors).is_none());
        assert_eq!(errors.errors().len(), 2);
    }

    #[test]
    fn url_must_be_absolute() {
        let payload = json!({ "ok": "https://x.com/a.pdf", "bad": "not-a-url" });
        let obj = payload.as_object().unwrap();
        let mut errors = ValidationError::new();
        assert!(require_url(obj, "", "ok", &mut errors).is_some());
        assert!(require_url(obj, "", "bad", &mut errors).is_none());
        assert!(errors.mentions("bad"));
    }

    #[test]
    fn nested_paths_are_dotted() {
        assert_eq!(join_path("", "name"), "name");
        assert_eq!(join_path("options", "copies"), "options.copies");
    }
}
