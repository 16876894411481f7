//! Driving ports for enrollment operations.
//!
//! Reads return [`EnrollmentView`] so clients see the enrolled person's and
//! pilgrimage's names alongside the raw identifiers.

use async_trait::async_trait;

use crate::domain::enrollment::{
    EnrollmentDraft, EnrollmentStatus, EnrollmentUpdate, EnrollmentView,
};
use crate::domain::error::Error;
use crate::domain::page::{Page, PageRequest};

/// Driving port for reading enrollments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentsQuery: Send + Sync {
    /// Read one page of enrollments.
    async fn list(&self, request: PageRequest) -> Result<Page<EnrollmentView>, Error>;

    /// Fetch an enrollment by id.
    async fn get(&self, id: i64) -> Result<EnrollmentView, Error>;

    /// Read one page of a person's enrollments.
    async fn list_by_person(
        &self,
        person_id: i64,
        request: PageRequest,
    ) -> Result<Page<EnrollmentView>, Error>;

    /// Read one page of a pilgrimage's enrollments.
    async fn list_by_pilgrimage(
        &self,
        pilgrimage_id: i64,
        request: PageRequest,
    ) -> Result<Page<EnrollmentView>, Error>;

    /// Read one page of enrollments in a status.
    async fn list_by_status(
        &self,
        status: EnrollmentStatus,
        request: PageRequest,
    ) -> Result<Page<EnrollmentView>, Error>;
}

/// Driving port for mutating enrollments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentsCommand: Send + Sync {
    /// Enrol a person on a pilgrimage.
    async fn create(&self, draft: EnrollmentDraft) -> Result<EnrollmentView, Error>;

    /// Update an enrollment's status and notes.
    async fn update(&self, id: i64, update: EnrollmentUpdate) -> Result<EnrollmentView, Error>;

    /// Delete an enrollment by id.
    async fn delete(&self, id: i64) -> Result<(), Error>;
}
