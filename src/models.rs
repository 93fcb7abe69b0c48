//! Diesel model structs representing the persisted print-management entities.
//!
//! Each table gets a read shape (full row) and a `New*` insert shape carrying
//! only the fields a client may supply; server-generated columns (ids,
//! timestamps, `api_key`) never appear in an insert shape. The insert shapes
//! double as the whitelist validators for inbound creation payloads via
//! `from_value`, which collects every violation instead of stopping at the
//! first. JSON wire names are camelCase; storage columns are snake_case.
//!
//! User and Printer carry both the legacy free-text `location`/`floor` columns
//! and the normalized `company_id`/`location_id` references. Nothing reconciles
//! the two: consumers should prefer the normalized reference when present and
//! fall back to the legacy string otherwise.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema;
use crate::validate::{
    ValidationError, as_object, optional_bool, optional_i32, optional_string, require_string,
};

/// Standard values for the free-text `printers.status` column.
pub mod printer_status {
    pub const OFFLINE: &str = "offline";
    pub const ONLINE: &str = "online";
    pub const ERROR: &str = "error";
}

/// Closed set of print-job states.
///
/// `ReadyForClient` marks a job staged for client-side pickup (the QZ Tray
/// pull path). The state machine that moves jobs between these states lives in
/// the consuming service; this crate only fixes the vocabulary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintJobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    ReadyForClient,
}

impl PrintJobStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            PrintJobStatus::Pending => "pending",
            PrintJobStatus::Processing => "processing",
            PrintJobStatus::Completed => "completed",
            PrintJobStatus::Failed => "failed",
            PrintJobStatus::ReadyForClient => "ready_for_client",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PrintJobStatus::Pending),
            "processing" => Some(PrintJobStatus::Processing),
            "completed" => Some(PrintJobStatus::Completed),
            "failed" => Some(PrintJobStatus::Failed),
            "ready_for_client" => Some(PrintJobStatus::ReadyForClient),
            _ => None,
        }
    }
}

impl Default for PrintJobStatus {
    fn default() -> Self {
        PrintJobStatus::Pending
    }
}

/// Page orientation for a print job.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "portrait" => Some(Orientation::Portrait),
            "landscape" => Some(Orientation::Landscape),
            _ => None,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Portrait
    }
}

#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::companies)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub is_active: Option<bool>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = schema::companies)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub name: String,
    pub is_active: Option<bool>,
}

impl NewCompany {
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let Some(obj) = as_object(value, "", &mut errors) else {
            return errors.reject("company insert");
        };
        let name = require_string(obj, "", "name", &mut errors);
        let is_active = optional_bool(obj, "", "isActive", &mut errors);
        match name {
            Some(name) if errors.is_empty() => Ok(NewCompany { name, is_active }),
            _ => errors.reject("company insert"),
        }
    }
}

#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::locations)]
#[diesel(belongs_to(Company))]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub company_id: Option<i32>,
    pub is_active: Option<bool>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = schema::locations)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    pub name: String,
    pub company_id: Option<i32>,
    pub is_active: Option<bool>,
}

impl NewLocation {
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let Some(obj) = as_object(value, "", &mut errors) else {
            return errors.reject("location insert");
        };
        let name = require_string(obj, "", "name", &mut errors);
        let company_id = optional_i32(obj, "", "companyId", &mut errors);
        let is_active = optional_bool(obj, "", "isActive", &mut errors);
        match name {
            Some(name) if errors.is_empty() => Ok(NewLocation {
                name,
                company_id,
                is_active,
            }),
            _ => errors.reject("location insert"),
        }
    }
}

#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::users)]
#[diesel(belongs_to(Company))]
#[diesel(belongs_to(Location))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Stored credential, opaque to this layer.
    pub password: String,
    pub name: String,
    pub email: String,
    /// Machine-to-machine credential; generated server-side, never inserted
    /// from a client payload.
    pub api_key: String,
    pub is_admin: Option<bool>,
    /// Legacy free-text company name.
    pub location: Option<String>,
    /// Legacy free-text site name.
    pub floor: Option<String>,
    pub company_id: Option<i32>,
    pub location_id: Option<i32>,
}

#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = schema::users)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub is_admin: Option<bool>,
    pub location: Option<String>,
    pub floor: Option<String>,
    pub company_id: Option<i32>,
    pub location_id: Option<i32>,
}

impl NewUser {
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let Some(obj) = as_object(value, "", &mut errors) else {
            return errors.reject("user insert");
        };
        let username = require_string(obj, "", "username", &mut errors);
        let password = require_string(obj, "", "password", &mut errors);
        let name = require_string(obj, "", "name", &mut errors);
        let email = require_string(obj, "", "email", &mut errors);
        let is_admin = optional_bool(obj, "", "isAdmin", &mut errors);
        let location = optional_string(obj, "", "location", &mut errors);
        let floor = optional_string(obj, "", "floor", &mut errors);
        let company_id = optional_i32(obj, "", "companyId", &mut errors);
        let location_id = optional_i32(obj, "", "locationId", &mut errors);
        match (username, password, name, email) {
            (Some(username), Some(password), Some(name), Some(email)) if errors.is_empty() => {
                Ok(NewUser {
                    username,
                    password,
                    name,
                    email,
                    is_admin,
                    location,
                    floor,
                    company_id,
                    location_id,
                })
            }
            _ => errors.reject("user insert"),
        }
    }
}

#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::printers)]
#[diesel(belongs_to(Company))]
#[diesel(belongs_to(Location))]
#[serde(rename_all = "camelCase")]
pub struct Printer {
    pub id: i32,
    pub name: String,
    pub model: Option<String>,
    /// Free-text state; see [`printer_status`] for the standard values.
    pub status: Option<String>,
    pub last_print_time: Option<NaiveDateTime>,
    /// Stable hardware/device identifier reported by the print client.
    pub unique_id: String,
    pub is_active: Option<bool>,
    /// Legacy free-text company name.
    pub location: Option<String>,
    /// Legacy free-text site name.
    pub floor: Option<String>,
    pub company_id: Option<i32>,
    pub location_id: Option<i32>,
}

#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = schema::printers)]
#[serde(rename_all = "camelCase")]
pub struct NewPrinter {
    pub name: String,
    pub location: Option<String>,
    pub model: Option<String>,
    pub status: Option<String>,
    pub floor: Option<String>,
    pub unique_id: String,
    pub is_active: Option<bool>,
    pub company_id: Option<i32>,
    pub location_id: Option<i32>,
}

impl NewPrinter {
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let Some(obj) = as_object(value, "", &mut errors) else {
            return errors.reject("printer insert");
        };
        let name = require_string(obj, "", "name", &mut errors);
        let location = optional_string(obj, "", "location", &mut errors);
        let model = optional_string(obj, "", "model", &mut errors);
        let status = optional_string(obj, "", "status", &mut errors);
        let floor = optional_string(obj, "", "floor", &mut errors);
        let unique_id = require_string(obj, "", "uniqueId", &mut errors);
        let is_active = optional_bool(obj, "", "isActive", &mut errors);
        let company_id = optional_i32(obj, "", "companyId", &mut errors);
        let location_id = optional_i32(obj, "", "locationId", &mut errors);
        match (name, unique_id) {
            (Some(name), Some(unique_id)) if errors.is_empty() => Ok(NewPrinter {
                name,
                location,
                model,
                status,
                floor,
                unique_id,
                is_active,
                company_id,
                location_id,
            }),
            _ => errors.reject("printer insert"),
        }
    }
}

#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::print_jobs)]
#[diesel(belongs_to(Printer))]
#[diesel(belongs_to(User))]
#[serde(rename_all = "camelCase")]
pub struct PrintJob {
    pub id: i32,
    pub document_url: String,
    pub document_name: String,
    pub printer_id: Option<i32>,
    pub user_id: Option<i32>,
    /// One of the [`PrintJobStatus`] wire names; stored as text.
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub copies: Option<i32>,
    pub duplex: Option<bool>,
    pub orientation: Option<String>,
    /// Opaque payload prepared for the QZ Tray print client.
    pub qz_tray_data: Option<String>,
}

impl PrintJob {
    /// Typed view of the stored status; `None` for rows written by older
    /// software with a value outside the closed set.
    pub fn status(&self) -> Option<PrintJobStatus> {
        PrintJobStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = schema::print_jobs)]
#[serde(rename_all = "camelCase")]
pub struct NewPrintJob {
    pub document_url: String,
    pub document_name: String,
    pub printer_id: Option<i32>,
    pub user_id: Option<i32>,
    pub copies: Option<i32>,
    pub duplex: Option<bool>,
    pub orientation: Option<String>,
}

impl NewPrintJob {
    pub fn new(document_url: impl Into<String>, document_name: impl Into<String>) -> Self {
        NewPrintJob {
            document_url: document_url.into(),
            document_name: document_name.into(),
            printer_id: None,
            user_id: None,
            copies: None,
            duplex: None,
            orientation: None,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let Some(obj) = as_object(value, "", &mut errors) else {
            return errors.reject("print job insert");
        };
        let document_url = require_string(obj, "", "documentUrl", &mut errors);
        let document_name = require_string(obj, "", "documentName", &mut errors);
        let printer_id = optional_i32(obj, "", "printerId", &mut errors);
        let user_id = optional_i32(obj, "", "userId", &mut errors);
        let copies = optional_i32(obj, "", "copies", &mut errors);
        let duplex = optional_bool(obj, "", "duplex", &mut errors);
        // Mirrors the nullable text column; the boundary validators in
        // `requests` are where the orientation enum is enforced.
        let orientation = optional_string(obj, "", "orientation", &mut errors);
        match (document_url, document_name) {
            (Some(document_url), Some(document_name)) if errors.is_empty() => Ok(NewPrintJob {
                document_url,
                document_name,
                printer_id,
                user_id,
                copies,
                duplex,
                orientation,
            }),
            _ => errors.reject("print job insert"),
        }
    }
}

/// Company together with all of its locations, for list/detail responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyWithLocations {
    #[serde(flatten)]
    pub company: Company,
    pub locations: Vec<Location>,
}

/// User enriched with its resolved normalized references. When `location` is
/// set it shadows the legacy `location` string in the serialized output, which
/// matches how the previous API spread the relation over the row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithCompanyLocation {
    #[serde(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Printer enriched with its resolved normalized references; same shadowing
/// caveat as [`UserWithCompanyLocation`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterWithCompanyLocation {
    #[serde(flatten)]
    pub printer: Printer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}
