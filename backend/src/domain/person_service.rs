//! Person domain service.
//!
//! Implements the person driving ports over a repository. All three partial
//! update strategies share the same load, mutate in memory, persist flow, and
//! none of them can alter the entity's identifier.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::Error;
use crate::domain::page::{Page, PageRequest};
use crate::domain::person::{Person, PersonDraft};
use crate::domain::person_patch::{
    PatchOperation, PersonFieldOverlay, apply_merge_patch, apply_operation, apply_overlay,
};
use crate::domain::ports::{PersonRepository, PersonRepositoryError, PersonsCommand, PersonsQuery};

fn map_repository_error(error: PersonRepositoryError) -> Error {
    match error {
        PersonRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("person repository unavailable: {message}"))
        }
        PersonRepositoryError::Query { message } => {
            Error::internal(format!("person repository error: {message}"))
        }
    }
}

/// Person service implementing the query and command driving ports.
#[derive(Clone)]
pub struct PersonService<R> {
    person_repo: Arc<R>,
}

impl<R> PersonService<R> {
    /// Create a new service with the person repository.
    pub fn new(person_repo: Arc<R>) -> Self {
        Self { person_repo }
    }
}

impl<R> PersonService<R>
where
    R: PersonRepository,
{
    async fn load(&self, id: i64) -> Result<Person, Error> {
        self.person_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("person not found with id {id}")))
    }

    async fn persist(&self, person: &Person) -> Result<Person, Error> {
        self.person_repo
            .save(person)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> PersonsQuery for PersonService<R>
where
    R: PersonRepository,
{
    async fn list(&self, request: PageRequest) -> Result<Page<Person>, Error> {
        self.person_repo
            .find_page(&request)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, id: i64) -> Result<Person, Error> {
        self.load(id).await
    }
}

#[async_trait]
impl<R> PersonsCommand for PersonService<R>
where
    R: PersonRepository,
{
    async fn create(&self, draft: PersonDraft) -> Result<Person, Error> {
        self.person_repo
            .create(&draft)
            .await
            .map_err(map_repository_error)
    }

    async fn update(&self, id: i64, draft: PersonDraft) -> Result<Person, Error> {
        let _ = self.load(id).await?;
        self.persist(&Person::from_draft(id, draft)).await
    }

    async fn merge_patch(&self, id: i64, patch: Value) -> Result<Person, Error> {
        let current = self.load(id).await?;
        let document = serde_json::to_value(&current)
            .map_err(|err| Error::internal(format!("person serialisation failed: {err}")))?;

        let merged = apply_merge_patch(document, &patch);
        let mut patched: Person = serde_json::from_value(merged).map_err(|err| {
            Error::invalid_request(format!("merge patch produced an invalid person: {err}"))
                .with_details(json!({ "code": "malformed_patch" }))
        })?;
        // Identity is not patchable; whatever the document said, keep the
        // path parameter's id.
        patched.id = id;

        self.persist(&patched).await
    }

    async fn apply_operations(
        &self,
        id: i64,
        operations: Vec<PatchOperation>,
    ) -> Result<Person, Error> {
        let mut person = self.load(id).await?;
        for operation in &operations {
            apply_operation(&mut person, operation)?;
        }
        person.id = id;
        self.persist(&person).await
    }

    async fn overlay(&self, id: i64, overlay: PersonFieldOverlay) -> Result<Person, Error> {
        let mut person = self.load(id).await?;
        apply_overlay(&mut person, &overlay);
        person.id = id;
        self.persist(&person).await
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        let exists = self
            .person_repo
            .exists_by_id(id)
            .await
            .map_err(map_repository_error)?;
        if !exists {
            return Err(Error::not_found(format!("person not found with id {id}")));
        }
        self.person_repo
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "person_service_tests.rs"]
mod tests;
