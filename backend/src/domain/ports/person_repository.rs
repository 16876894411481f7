//! Port for person persistence adapters.

use async_trait::async_trait;

use crate::domain::page::{Page, PageRequest};
use crate::domain::person::{Person, PersonDraft};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by person repository adapters.
    pub enum PersonRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "person repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "person repository query failed: {message}",
    }
}

/// Port for reading and writing persons.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Find a person by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Person>, PersonRepositoryError>;

    /// Read one page of persons.
    async fn find_page(&self, request: &PageRequest)
    -> Result<Page<Person>, PersonRepositoryError>;

    /// Insert a person, assigning its id.
    async fn create(&self, draft: &PersonDraft) -> Result<Person, PersonRepositoryError>;

    /// Persist an updated person.
    async fn save(&self, person: &Person) -> Result<Person, PersonRepositoryError>;

    /// Check whether a person with the id exists.
    async fn exists_by_id(&self, id: i64) -> Result<bool, PersonRepositoryError>;

    /// Delete a person by id.
    async fn delete_by_id(&self, id: i64) -> Result<(), PersonRepositoryError>;
}

/// Fixture implementation for tests that do not exercise person persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePersonRepository;

#[async_trait]
impl PersonRepository for FixturePersonRepository {
    async fn find_by_id(&self, _id: i64) -> Result<Option<Person>, PersonRepositoryError> {
        Ok(None)
    }

    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<Person>, PersonRepositoryError> {
        Ok(Page::new(Vec::new(), request.page(), request.size(), 0))
    }

    async fn create(&self, draft: &PersonDraft) -> Result<Person, PersonRepositoryError> {
        Ok(Person::from_draft(1, draft.clone()))
    }

    async fn save(&self, person: &Person) -> Result<Person, PersonRepositoryError> {
        Ok(person.clone())
    }

    async fn exists_by_id(&self, _id: i64) -> Result<bool, PersonRepositoryError> {
        Ok(false)
    }

    async fn delete_by_id(&self, _id: i64) -> Result<(), PersonRepositoryError> {
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
    async fn fixture_find_returns_none() {
        let repo = FixturePersonRepository;
        let found = repo.find_by_id(7).await.expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_page_is_empty() {
        let repo = FixturePersonRepository;
        let request = PageRequest::new(0, 10).expect("valid request");
        let page = repo.find_page(&request).await.expect("fixture page");
        assert!(page.items().is_empty());
        assert_eq!(page.total_elements(), 0);
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = PersonRepositoryError::query("broken sql");
        assert!(err.to_string().contains("broken sql"));
    }
}
