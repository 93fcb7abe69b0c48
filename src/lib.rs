//! Schema and validation contracts for the printhub print-management service.
//!
//! This crate is the data-contract layer shared by the HTTP surface, the
//! persistence code, and the QZ Tray dispatch path (all of which live
//! elsewhere): Diesel declarations for the five persisted tables, paired
//! read/insert model shapes, and exhaustive validators for the payloads that
//! cross the API boundary. It performs no I/O and holds no state; everything
//! here is a pure function or a static declaration.

pub mod models;
pub mod requests;
pub mod schema;
pub mod validate;
