//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{enrollments, persons, pilgrimages};

/// Row struct for reading from the persons table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = persons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PersonRow {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Insertable struct for creating new person records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = persons)]
pub(crate) struct NewPersonRow<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub birth_date: Option<NaiveDate>,
}

/// Changeset struct for updating existing person records.
///
/// `treat_none_as_null` matters here: the patch routes can clear a field,
/// so a `None` must write SQL NULL rather than skip the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = persons)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PersonChangeset<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub birth_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Pilgrimage models
// ---------------------------------------------------------------------------

/// Row struct for reading from the pilgrimages table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pilgrimages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PilgrimageRow {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Insertable struct for creating new pilgrimage records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pilgrimages)]
pub(crate) struct NewPilgrimageRow<'a> {
    pub name: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Changeset struct for updating existing pilgrimage records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = pilgrimages)]
pub(crate) struct PilgrimageChangeset<'a> {
    pub name: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Enrollment models
// ---------------------------------------------------------------------------

/// Row struct for reading from the enrollments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub id: i64,
    pub person_id: i64,
    pub pilgrimage_id: i64,
    pub enrolled_at: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
}

/// Insertable struct for creating new enrollment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = enrollments)]
pub(crate) struct NewEnrollmentRow<'a> {
    pub person_id: i64,
    pub pilgrimage_id: i64,
    pub enrolled_at: DateTime<Utc>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
}

/// Changeset struct for updating existing enrollment records.
///
/// Only the mutable columns appear; identity and the enrollment timestamp
/// never change after creation. `notes` clears on `None`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = enrollments)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct EnrollmentChangeset<'a> {
    pub status: &'a str,
    pub notes: Option<&'a str>,
}
