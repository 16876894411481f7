//! Port for enrollment persistence adapters.

use async_trait::async_trait;

use crate::domain::enrollment::{Enrollment, EnrollmentDraft, EnrollmentStatus};
use crate::domain::page::{Page, PageRequest};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "enrollment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "enrollment repository query failed: {message}",
    }
}

/// Port for reading and writing enrollments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Find an enrollment by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Read one page of enrollments.
    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError>;

    /// Read one page of enrollments for a person.
    async fn find_page_by_person(
        &self,
        person_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError>;

    /// Read one page of enrollments for a pilgrimage.
    async fn find_page_by_pilgrimage(
        &self,
        pilgrimage_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError>;

    /// Read one page of enrollments in a status.
    async fn find_page_by_status(
        &self,
        status: EnrollmentStatus,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError>;

    /// Check whether an enrollment already pairs the person and pilgrimage.
    async fn exists_for_person_and_pilgrimage(
        &self,
        person_id: i64,
        pilgrimage_id: i64,
    ) -> Result<bool, EnrollmentRepositoryError>;

    /// Insert an enrollment, assigning its id.
    async fn create(&self, draft: &EnrollmentDraft)
    -> Result<Enrollment, EnrollmentRepositoryError>;

    /// Persist an updated enrollment.
    async fn save(&self, enrollment: &Enrollment) -> Result<Enrollment, EnrollmentRepositoryError>;

    /// Check whether an enrollment with the id exists.
    async fn exists_by_id(&self, id: i64) -> Result<bool, EnrollmentRepositoryError>;

    /// Delete an enrollment by id.
    async fn delete_by_id(&self, id: i64) -> Result<(), EnrollmentRepositoryError>;
}

/// Fixture implementation for tests that do not exercise enrollment
/// persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentRepository;

#[async_trait]
impl EnrollmentRepository for FixtureEnrollmentRepository {
    async fn find_by_id(&self, _id: i64) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(None)
    }

    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        Ok(Page::new(Vec::new(), request.page(), request.size(), 0))
    }

    async fn find_page_by_person(
        &self,
        _person_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        Ok(Page::new(Vec::new(), request.page(), request.size(), 0))
    }

    async fn find_page_by_pilgrimage(
        &self,
        _pilgrimage_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        Ok(Page::new(Vec::new(), request.page(), request.size(), 0))
    }

    async fn find_page_by_status(
        &self,
        _status: EnrollmentStatus,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        Ok(Page::new(Vec::new(), request.page(), request.size(), 0))
    }

    async fn exists_for_person_and_pilgrimage(
        &self,
        _person_id: i64,
        _pilgrimage_id: i64,
    ) -> Result<bool, EnrollmentRepositoryError> {
        Ok(false)
    }

    async fn create(
        &self,
        draft: &EnrollmentDraft,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        Ok(Enrollment::from_draft(1, draft.clone()))
    }

    async fn save(
        &self,
        enrollment: &Enrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        Ok(enrollment.clone())
    }

    async fn exists_by_id(&self, _id: i64) -> Result<bool, EnrollmentRepositoryError> {
        Ok(false)
    }

    async fn delete_by_id(&self, _id: i64) -> Result<(), EnrollmentRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_uniqueness_check_reports_absent() {
        let repo = FixtureEnrollmentRepository;
        let exists = repo
            .exists_for_person_and_pilgrimage(1, 2)
            .await
            .expect("fixture check succeeds");
        assert!(!exists);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_status_page_is_empty() {
        let repo = FixtureEnrollmentRepository;
        let request = PageRequest::new(0, 5).expect("valid request");
        let page = repo
            .find_page_by_status(EnrollmentStatus::Pending, &request)
            .await
            .expect("fixture page");
        assert!(page.items().is_empty());
    }
}
