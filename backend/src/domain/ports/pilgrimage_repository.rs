//! Port for pilgrimage persistence adapters.

use async_trait::async_trait;

use crate::domain::page::{Page, PageRequest};
use crate::domain::pilgrimage::{Pilgrimage, PilgrimageDraft};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by pilgrimage repository adapters.
    pub enum PilgrimageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "pilgrimage repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "pilgrimage repository query failed: {message}",
    }
}

/// Port for reading and writing pilgrimages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PilgrimageRepository: Send + Sync {
    /// Find a pilgrimage by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Pilgrimage>, PilgrimageRepositoryError>;

    /// Read one page of pilgrimages.
    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<Pilgrimage>, PilgrimageRepositoryError>;

    /// Insert a pilgrimage, assigning its id.
    async fn create(&self, draft: &PilgrimageDraft)
    -> Result<Pilgrimage, PilgrimageRepositoryError>;

    /// Persist an updated pilgrimage.
    async fn save(&self, pilgrimage: &Pilgrimage) -> Result<Pilgrimage, PilgrimageRepositoryError>;

    /// Check whether a pilgrimage with the id exists.
    async fn exists_by_id(&self, id: i64) -> Result<bool, PilgrimageRepositoryError>;

    /// Delete a pilgrimage by id.
    async fn delete_by_id(&self, id: i64) -> Result<(), PilgrimageRepositoryError>;
}

/// Fixture implementation for tests that do not exercise pilgrimage
/// persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePilgrimageRepository;

#[async_trait]
impl PilgrimageRepository for FixturePilgrimageRepository {
    async fn find_by_id(&self, _id: i64) -> Result<Option<Pilgrimage>, PilgrimageRepositoryError> {
        Ok(None)
    }

    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<Pilgrimage>, PilgrimageRepositoryError> {
        Ok(Page::new(Vec::new(), request.page(), request.size(), 0))
    }

    async fn create(
        &self,
        draft: &PilgrimageDraft,
    ) -> Result<Pilgrimage, PilgrimageRepositoryError> {
        Ok(Pilgrimage::from_draft(1, draft.clone()))
    }

    async fn save(&self, pilgrimage: &Pilgrimage) -> Result<Pilgrimage, PilgrimageRepositoryError> {
        Ok(pilgrimage.clone())
    }

    async fn exists_by_id(&self, _id: i64) -> Result<bool, PilgrimageRepositoryError> {
        Ok(false)
    }

    async fn delete_by_id(&self, _id: i64) -> Result<(), PilgrimageRepositoryError> {
        Ok(())
    }
}
