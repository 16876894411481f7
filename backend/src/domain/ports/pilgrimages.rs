//! Driving ports for pilgrimage operations.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::page::{Page, PageRequest};
use crate::domain::pilgrimage::{Pilgrimage, PilgrimageDraft};

/// Driving port for reading pilgrimages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PilgrimagesQuery: Send + Sync {
    /// Read one page of pilgrimages.
    async fn list(&self, request: PageRequest) -> Result<Page<Pilgrimage>, Error>;

    /// Fetch a pilgrimage by id.
    async fn get(&self, id: i64) -> Result<Pilgrimage, Error>;
}

/// Driving port for mutating pilgrimages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PilgrimagesCommand: Send + Sync {
    /// Create a pilgrimage from a draft.
    async fn create(&self, draft: PilgrimageDraft) -> Result<Pilgrimage, Error>;

    /// Replace a pilgrimage's mutable fields wholesale.
    async fn update(&self, id: i64, draft: PilgrimageDraft) -> Result<Pilgrimage, Error>;

    /// Delete a pilgrimage by id.
    async fn delete(&self, id: i64) -> Result<(), Error>;
}
