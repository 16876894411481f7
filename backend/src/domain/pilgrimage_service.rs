//! Pilgrimage domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::page::{Page, PageRequest};
use crate::domain::pilgrimage::{Pilgrimage, PilgrimageDraft};
use crate::domain::ports::{
    PilgrimageRepository, PilgrimageRepositoryError, PilgrimagesCommand, PilgrimagesQuery,
};

fn map_repository_error(error: PilgrimageRepositoryError) -> Error {
    match error {
        PilgrimageRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("pilgrimage repository unavailable: {message}"))
        }
        PilgrimageRepositoryError::Query { message } => {
            Error::internal(format!("pilgrimage repository error: {message}"))
        }
    }
}

/// Pilgrimage service implementing the query and command driving ports.
#[derive(Clone)]
pub struct PilgrimageService<R> {
    pilgrimage_repo: Arc<R>,
}

impl<R> PilgrimageService<R> {
    /// Create a new service with the pilgrimage repository.
    pub fn new(pilgrimage_repo: Arc<R>) -> Self {
        Self { pilgrimage_repo }
    }
}

impl<R> PilgrimageService<R>
where
    R: PilgrimageRepository,
{
    async fn load(&self, id: i64) -> Result<Pilgrimage, Error> {
        self.pilgrimage_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("pilgrimage not found with id {id}")))
    }
}

#[async_trait]
impl<R> PilgrimagesQuery for PilgrimageService<R>
where
    R: PilgrimageRepository,
{
    async fn list(&self, request: PageRequest) -> Result<Page<Pilgrimage>, Error> {
        self.pilgrimage_repo
            .find_page(&request)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, id: i64) -> Result<Pilgrimage, Error> {
        self.load(id).await
    }
}

#[async_trait]
impl<R> PilgrimagesCommand for PilgrimageService<R>
where
    R: PilgrimageRepository,
{
    async fn create(&self, draft: PilgrimageDraft) -> Result<Pilgrimage, Error> {
        self.pilgrimage_repo
            .create(&draft)
            .await
            .map_err(map_repository_error)
    }

    async fn update(&self, id: i64, draft: PilgrimageDraft) -> Result<Pilgrimage, Error> {
        let _ = self.load(id).await?;
        self.pilgrimage_repo
            .save(&Pilgrimage::from_draft(id, draft))
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        let exists = self
            .pilgrimage_repo
            .exists_by_id(id)
            .await
            .map_err(map_repository_error)?;
        if !exists {
            return Err(Error::not_found(format!(
                "pilgrimage not found with id {id}"
            )));
        }
        self.pilgrimage_repo
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "pilgrimage_service_tests.rs"]
mod tests;
