//! Driving ports for person operations.
//!
//! HTTP handlers consume these ports; [`crate::domain::PersonService`]
//! implements both. Query and command are split so read-only adapters can
//! depend on the narrower contract.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::error::Error;
use crate::domain::page::{Page, PageRequest};
use crate::domain::person::{Person, PersonDraft};
use crate::domain::person_patch::{PatchOperation, PersonFieldOverlay};

/// Driving port for reading persons.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonsQuery: Send + Sync {
    /// Read one page of persons.
    async fn list(&self, request: PageRequest) -> Result<Page<Person>, Error>;

    /// Fetch a person by id.
    async fn get(&self, id: i64) -> Result<Person, Error>;
}

/// Driving port for mutating persons.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonsCommand: Send + Sync {
    /// Create a person from a draft.
    async fn create(&self, draft: PersonDraft) -> Result<Person, Error>;

    /// Replace a person's mutable fields wholesale.
    async fn update(&self, id: i64, draft: PersonDraft) -> Result<Person, Error>;

    /// Apply an RFC 7386 merge patch document to a person.
    async fn merge_patch(&self, id: i64, patch: Value) -> Result<Person, Error>;

    /// Apply an ordered list of path-addressed operations to a person.
    async fn apply_operations(
        &self,
        id: i64,
        operations: Vec<PatchOperation>,
    ) -> Result<Person, Error>;

    /// Overlay non-null fields onto a person.
    async fn overlay(&self, id: i64, overlay: PersonFieldOverlay) -> Result<Person, Error>;

    /// Delete a person by id.
    async fn delete(&self, id: i64) -> Result<(), Error>;
}
