//! Boundary validators for inbound API payloads.
//!
//! These shapes are independent of the persisted layout: callers identify a
//! printer either by the external string identifier or by the internal numeric
//! key, and supply print options either nested under `options` or flat.
//! Selecting which validator applies is the transport layer's job; each one
//! here just maps an untyped payload to a typed request or a full
//! [`ValidationError`] listing. Unknown fields are ignored.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use url::Url;

use crate::models::Orientation;
use crate::validate::{
    ValidationError, as_object, bool_or, join_path, optional_string, positive_f64_or,
    positive_i32_or, require_positive_i32, require_string, require_url,
};

pub const DEFAULT_COPIES: i32 = 1;
/// Default page margin in millimeters (half an inch).
pub const DEFAULT_MARGIN_MM: f64 = 12.7;

// Scheme is case-insensitive; the token is any non-empty remainder.
static BEARER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Bearer\s.+$").expect("bearer pattern compiles"));

const BEARER_REASON: &str = "must match \"Bearer <token>\"";

/// Validated machine-to-machine authorization header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyHeader {
    pub authorization: String,
}

impl ApiKeyHeader {
    /// Validate a raw header value such as `"Bearer abc123"`.
    pub fn parse(authorization: &str) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        if BEARER.is_match(authorization) {
            Ok(ApiKeyHeader {
                authorization: authorization.to_string(),
            })
        } else {
            errors.push("authorization", BEARER_REASON);
            errors.reject("api key header")
        }
    }

    /// Validate a header map shaped as `{ "authorization": "<value>" }`.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let Some(obj) = as_object(value, "", &mut errors) else {
            return errors.reject("api key header");
        };
        match require_string(obj, "", "authorization", &mut errors) {
            Some(raw) if BEARER.is_match(&raw) => Ok(ApiKeyHeader { authorization: raw }),
            Some(_) => {
                errors.push("authorization", BEARER_REASON);
                errors.reject("api key header")
            }
            None => errors.reject("api key header"),
        }
    }

    /// The credential after the scheme and separating whitespace.
    pub fn token(&self) -> &str {
        match self.authorization.split_once(char::is_whitespace) {
            Some((_, token)) => token,
            None => "",
        }
    }
}

/// Nested print options; every field carries a default, so an omitted
/// `options` object yields `PrintJobOptions::default()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJobOptions {
    pub copies: i32,
    pub duplex: bool,
    pub orientation: Orientation,
}

impl Default for PrintJobOptions {
    fn default() -> Self {
        PrintJobOptions {
            copies: DEFAULT_COPIES,
            duplex: false,
            orientation: Orientation::Portrait,
        }
    }
}

/// Print request identifying the printer by its external string identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJobRequest {
    pub printer_id: String,
    pub document_url: Url,
    pub options: PrintJobOptions,
}

impl PrintJobRequest {
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let Some(obj) = as_object(value, "", &mut errors) else {
            return errors.reject("print job request");
        };
        let printer_id = require_string(obj, "", "printerId", &mut errors);
        let document_url = require_url(obj, "", "documentUrl", &mut errors);
        let options = options_from(obj, &mut errors);
        match (printer_id, document_url, options) {
            (Some(printer_id), Some(document_url), Some(options)) if errors.is_empty() => {
                Ok(PrintJobRequest {
                    printer_id,
                    document_url,
                    options,
                })
            }
            _ => errors.reject("print job request"),
        }
    }
}

fn options_from(obj: &Map<String, Value>, errors: &mut ValidationError) -> Option<PrintJobOptions> {
    let Some(value) = obj.get("options") else {
        return Some(PrintJobOptions::default());
    };
    let Some(map) = value.as_object() else {
        errors.push("options", "must be a JSON object");
        return None;
    };
    let copies = positive_i32_or(map, "options", "copies", DEFAULT_COPIES, errors);
    let duplex = bool_or(map, "options", "duplex", false, errors);
    let orientation = orientation_or_default(map, "options", errors);
    match (copies, duplex, orientation) {
        (Some(copies), Some(duplex), Some(orientation)) => Some(PrintJobOptions {
            copies,
            duplex,
            orientation,
        }),
        _ => None,
    }
}

fn orientation_or_default(
    obj: &Map<String, Value>,
    prefix: &str,
    errors: &mut ValidationError,
) -> Option<Orientation> {
    match obj.get("orientation") {
        None => Some(Orientation::default()),
        Some(Value::String(s)) => match Orientation::parse(s) {
            Some(orientation) => Some(orientation),
            None => {
                errors.push(
                    join_path(prefix, "orientation"),
                    "must be one of \"portrait\" or \"landscape\"",
                );
                None
            }
        },
        Some(_) => {
            errors.push(join_path(prefix, "orientation"), "must be a string");
            None
        }
    }
}

/// Minimal print request: printer by string identifier, document URL, nothing
/// else. Used by callers that accept all server-side defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplePrintJobRequest {
    pub printer_id: String,
    pub document_url: Url,
}

impl SimplePrintJobRequest {
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let Some(obj) = as_object(value, "", &mut errors) else {
            return errors.reject("simple print job request");
        };
        let printer_id = require_string(obj, "", "printerId", &mut errors);
        let document_url = require_url(obj, "", "documentUrl", &mut errors);
        match (printer_id, document_url) {
            (Some(printer_id), Some(document_url)) if errors.is_empty() => {
                Ok(SimplePrintJobRequest {
                    printer_id,
                    document_url,
                })
            }
            _ => errors.reject("simple print job request"),
        }
    }
}

/// Per-side page margins in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for PageMargins {
    fn default() -> Self {
        PageMargins {
            top: DEFAULT_MARGIN_MM,
            right: DEFAULT_MARGIN_MM,
            bottom: DEFAULT_MARGIN_MM,
            left: DEFAULT_MARGIN_MM,
        }
    }
}

/// Print request identifying the printer by its internal numeric key, with
/// flat option fields and optional margins.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericPrintJobRequest {
    pub printer_id: i32,
    pub document_url: Url,
    pub document_name: Option<String>,
    pub copies: i32,
    pub duplex: bool,
    pub orientation: Orientation,
    pub margins: Option<PageMargins>,
}

impl NumericPrintJobRequest {
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let Some(obj) = as_object(value, "", &mut errors) else {
            return errors.reject("numeric print job request");
        };
        let printer_id = require_positive_i32(obj, "", "printerId", &mut errors);
        let document_url = require_url(obj, "", "documentUrl", &mut errors);
        let document_name = optional_string(obj, "", "documentName", &mut errors);
        let copies = positive_i32_or(obj, "", "copies", DEFAULT_COPIES, &mut errors);
        let duplex = bool_or(obj, "", "duplex", false, &mut errors);
        let orientation = orientation_or_default(obj, "", &mut errors);
        let margins = margins_from(obj, &mut errors);
        match (printer_id, document_url, copies, duplex, orientation, margins) {
            (
                Some(printer_id),
                Some(document_url),
                Some(copies),
                Some(duplex),
                Some(orientation),
                Some(margins),
            ) if errors.is_empty() => Ok(NumericPrintJobRequest {
                printer_id,
                document_url,
                document_name,
                copies,
                duplex,
                orientation,
                margins,
            }),
            _ => errors.reject("numeric print job request"),
        }
    }
}

// Outer Option: validation outcome. Inner Option: margins were supplied at all.
fn margins_from(
    obj: &Map<String, Value>,
    errors: &mut ValidationError,
) -> Option<Option<PageMargins>> {
    let Some(value) = obj.get("margins") else {
        return Some(None);
    };
    let Some(map) = value.as_object() else {
        errors.push("margins", "must be a JSON object");
        return None;
    };
    let top = positive_f64_or(map, "margins", "top", DEFAULT_MARGIN_MM, errors);
    let right = positive_f64_or(map, "margins", "right", DEFAULT_MARGIN_MM, errors);
    let bottom = positive_f64_or(map, "margins", "bottom", DEFAULT_MARGIN_MM, errors);
    let left = positive_f64_or(map, "margins", "left", DEFAULT_MARGIN_MM, errors);
    match (top, right, bottom, left) {
        (Some(top), Some(right), Some(bottom), Some(left)) => Some(Some(PageMargins {
            top,
            right,
            bottom,
            left,
        })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert!(ApiKeyHeader::parse("Bearer abc123").is_ok());
        assert!(ApiKeyHeader::parse("bearer xyz").is_ok());
        assert!(ApiKeyHeader::parse("BEARER xyz").is_ok());
    }

    #[test]
    fn bearer_rejects_wrong_scheme_and_spacing() {
        assert!(ApiKeyHeader::parse("Basic abc123").is_err());
        assert!(ApiKeyHeader::parse("Beareroops").is_err());
        assert!(ApiKeyHeader::parse("Bearer").is_err());
        assert!(ApiKeyHeader::parse("").is_err());
    }

    #[test]
    fn bearer_token_is_extracted() {
        let header = ApiKeyHeader::parse("Bearer abc123").unwrap();
        assert_eq!(header.token(), "abc123");
    }

    #[test]
    fn header_map_is_validated() {
        let ok = ApiKeyHeader::from_value(&json!({ "authorization": "Bearer abc123" }));
        assert!(ok.is_ok());

        let err = ApiKeyHeader::from_value(&json!({})).unwrap_err();
        assert!(err.mentions("authorization"));

        let err = ApiKeyHeader::from_value(&json!({ "authorization": "Basic abc" })).unwrap_err();
        assert_eq!(err.errors()[0].reason, "must match \"Bearer <token>\"");
    }

    #[test]
    fn omitted_options_take_full_defaults() {
        let request = PrintJobRequest::from_value(&json!({
            "printerId": "5",
            "documentUrl": "https://x.com/a.pdf"
        }))
        .expect("valid request");
        assert_eq!(request.printer_id, "5");
        assert_eq!(request.options, PrintJobOptions::default());
        assert_eq!(request.options.copies, 1);
        assert!(!request.options.duplex);
        assert_eq!(request.options.orientation, Orientation::Portrait);
    }

    #[test]
    fn partial_options_fill_in_remaining_defaults() {
        let request = PrintJobRequest::from_value(&json!({
            "printerId": "5",
            "documentUrl": "https://x.com/a.pdf",
            "options": { "copies": 3 }
        }))
        .expect("valid request");
        assert_eq!(request.options.copies, 3);
        assert!(!request.options.duplex);
        assert_eq!(request.options.orientation, Orientation::Portrait);
    }

    #[test]
    fn null_options_are_rejected() {
        let err = PrintJobRequest::from_value(&json!({
            "printerId": "5",
            "documentUrl": "https://x.com/a.pdf",
            "options": null
        }))
        .unwrap_err();
        assert!(err.mentions("options"));
    }

    #[test]
    fn nested_option_violations_use_dotted_paths() {
        let err = PrintJobRequest::from_value(&json!({
            "printerId": "5",
            "documentUrl": "https://x.com/a.pdf",
            "options": { "copies": 0, "orientation": "diagonal" }
        }))
        .unwrap_err();
        assert!(err.mentions("options.copies"));
        assert!(err.mentions("options.orientation"));
        assert_eq!(err.errors().len(), 2);
    }

    #[test]
    fn every_top_level_violation_is_reported_at_once() {
        let err = PrintJobRequest::from_value(&json!({
            "printerId": 5,
            "documentUrl": "not-a-url"
        }))
        .unwrap_err();
        assert!(err.mentions("printerId"));
        assert!(err.mentions("documentUrl"));
        assert_eq!(err.errors().len(), 2);
    }

    #[test]
    fn simple_request_requires_both_fields() {
        let err = SimplePrintJobRequest::from_value(&json!({})).unwrap_err();
        assert!(err.mentions("printerId"));
        assert!(err.mentions("documentUrl"));

        let ok = SimplePrintJobRequest::from_value(&json!({
            "printerId": "front-desk",
            "documentUrl": "https://x.com/a.pdf"
        }))
        .expect("valid request");
        assert_eq!(ok.printer_id, "front-desk");
        assert_eq!(ok.document_url.as_str(), "https://x.com/a.pdf");
    }

    #[test]
    fn numeric_request_requires_positive_printer_id() {
        for bad in [json!(-1), json!(0), json!("5"), json!(2.5)] {
            let err = NumericPrintJobRequest::from_value(&json!({
                "printerId": bad.clone(),
                "documentUrl": "https://x.com/a.pdf"
            }))
            .unwrap_err();
            assert!(err.mentions("printerId"), "printerId {bad} should be rejected");
        }
    }

    #[test]
    fn numeric_request_rejects_malformed_url() {
        let err = NumericPrintJobRequest::from_value(&json!({
            "printerId": 5,
            "documentUrl": "not-a-url"
        }))
        .unwrap_err();
        assert!(err.mentions("documentUrl"));
    }

    #[test]
    fn numeric_request_defaults_flat_fields() {
        let request = NumericPrintJobRequest::from_value(&json!({
            "printerId": 5,
            "documentUrl": "https://x.com/a.pdf"
        }))
        .expect("valid request");
        assert_eq!(request.printer_id, 5);
        assert_eq!(request.document_name, None);
        assert_eq!(request.copies, 1);
        assert!(!request.duplex);
        assert_eq!(request.orientation, Orientation::Portrait);
        assert_eq!(request.margins, None);
    }

    #[test]
    fn empty_margins_object_takes_all_defaults() {
        let request = NumericPrintJobRequest::from_value(&json!({
            "printerId": 5,
            "documentUrl": "https://x.com/a.pdf",
            "margins": {}
        }))
        .expect("valid request");
        assert_eq!(request.margins, Some(PageMargins::default()));
    }

    #[test]
    fn margin_sides_must_be_positive() {
        let err = NumericPrintJobRequest::from_value(&json!({
            "printerId": 5,
            "documentUrl": "https://x.com/a.pdf",
            "margins": { "top": -1.0, "left": 0 }
        }))
        .unwrap_err();
        assert!(err.mentions("margins.top"));
        assert!(err.mentions("margins.left"));
        assert_eq!(err.errors().len(), 2);
    }

    #[test]
    fn numeric_request_fixture_parses() {
        let raw = std::fs::read_to_string("tests/data/print-job-request.json")
            .expect("fixture present");
        let payload: Value = serde_json::from_str(&raw).expect("fixture is valid JSON");
        let request = NumericPrintJobRequest::from_value(&payload).expect("fixture validates");
        assert_eq!(request.printer_id, 14);
        assert_eq!(request.document_name.as_deref(), Some("invoice-2024-0113.pdf"));
        assert_eq!(request.copies, 2);
        assert!(request.duplex);
        assert_eq!(request.orientation, Orientation::Landscape);
        let margins = request.margins.expect("margins supplied");
        assert_eq!(margins.top, 10.0);
        assert_eq!(margins.left, 15.0);
        assert_eq!(margins.right, DEFAULT_MARGIN_MM);
        assert_eq!(margins.bottom, DEFAULT_MARGIN_MM);
    }
}
