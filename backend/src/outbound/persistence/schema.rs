//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Registered pilgrims.
    ///
    /// All descriptive columns are nullable: a person record may start as a
    /// bare identifier and be filled in through the partial-update routes.
    persons (id) {
        /// Primary key, assigned by the database sequence.
        id -> Int8,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
        birth_date -> Nullable<Date>,
    }
}

diesel::table! {
    /// Pilgrimage events with their scheduled date range.
    pilgrimages (id) {
        /// Primary key, assigned by the database sequence.
        id -> Int8,
        name -> Varchar,
        start_date -> Date,
        end_date -> Date,
    }
}

diesel::table! {
    /// Enrollment of a person in a pilgrimage.
    ///
    /// `(person_id, pilgrimage_id)` carries a unique constraint so a person
    /// cannot enroll in the same pilgrimage twice.
    enrollments (id) {
        /// Primary key, assigned by the database sequence.
        id -> Int8,
        person_id -> Int8,
        pilgrimage_id -> Int8,
        enrolled_at -> Timestamptz,
        /// Lifecycle status stored as its UPPERCASE wire form.
        status -> Varchar,
        notes -> Nullable<Text>,
    }
}

diesel::joinable!(enrollments -> persons (person_id));
diesel::joinable!(enrollments -> pilgrimages (pilgrimage_id));

diesel::allow_tables_to_appear_in_same_query!(enrollments, persons, pilgrimages);
