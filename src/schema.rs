//! Handwritten Diesel schema declarations used by model structs.
//!
//! The deployed database owns the actual tables; this module only provides
//! `diesel::table!` declarations so Insertable/Queryable derives stay type-safe
//! without running `diesel print-schema`. Column names, types, and nullability
//! here are the wire contract with existing stored data and must not drift.
//!
//! Constraints the `table!` macro cannot express, for the record:
//! - defaults: companies.is_active / locations.is_active / printers.is_active
//!   true, printers.status 'offline', print_jobs.status 'pending',
//!   print_jobs.copies 1, print_jobs.duplex false,
//!   print_jobs.orientation 'portrait', created_at/updated_at now()
//! - unique: companies.name, users.username, users.api_key, printers.unique_id
//! - on delete: locations.company_id cascades; every other FK is plain

diesel::table! {
    companies (id) {
        id -> Integer,
        name -> Text,
        is_active -> Nullable<Bool>,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    locations (id) {
        id -> Integer,
        name -> Text,
        company_id -> Nullable<Integer>,
        is_active -> Nullable<Bool>,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    users (id) {
        id -> Integer,
        username -> Text,
        password -> Text,
        name -> Text,
        email -> Text,
        api_key -> Text,
        is_admin -> Nullable<Bool>,
        // legacy free-text company/site columns, kept for compatibility
        location -> Nullable<Text>,
        floor -> Nullable<Text>,
        company_id -> Nullable<Integer>,
        location_id -> Nullable<Integer>,
    }
}

diesel::table! {
    printers (id) {
        id -> Integer,
        name -> Text,
        model -> Nullable<Text>,
        status -> Nullable<Text>,
        last_print_time -> Nullable<Timestamp>,
        unique_id -> Text,
        is_active -> Nullable<Bool>,
        // legacy free-text company/site columns, kept for compatibility
        location -> Nullable<Text>,
        floor -> Nullable<Text>,
        company_id -> Nullable<Integer>,
        location_id -> Nullable<Integer>,
    }
}

diesel::table! {
    print_jobs (id) {
        id -> Integer,
        document_url -> Text,
        document_name -> Text,
        printer_id -> Nullable<Integer>,
        user_id -> Nullable<Integer>,
        status -> Text, // pending | processing | completed | failed | ready_for_client
        created_at -> Nullable<Timestamp>,
        completed_at -> Nullable<Timestamp>,
        copies -> Nullable<Integer>,
        duplex -> Nullable<Bool>,
        orientation -> Nullable<Text>, // portrait | landscape
        qz_tray_data -> Nullable<Text>,
    }
}

diesel::joinable!(locations -> companies (company_id));
diesel::joinable!(users -> companies (company_id));
diesel::joinable!(users -> locations (location_id));
diesel::joinable!(printers -> companies (company_id));
diesel::joinable!(printers -> locations (location_id));
diesel::joinable!(print_jobs -> printers (printer_id));
diesel::joinable!(print_jobs -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    companies,
    locations,
    users,
    printers,
    print_jobs,
);
