//! Enrollment domain service.
//!
//! Creation enforces referential integrity against persons and pilgrimages
//! and uniqueness of the (person, pilgrimage) pair. Reads are projected into
//! [`EnrollmentView`] so responses carry display names, not just ids.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::enrollment::{
    Enrollment, EnrollmentDraft, EnrollmentStatus, EnrollmentUpdate, EnrollmentView,
};
use crate::domain::page::{Page, PageRequest};
use crate::domain::person::Person;
use crate::domain::ports::{
    EnrollmentRepository, EnrollmentRepositoryError, EnrollmentsCommand, EnrollmentsQuery,
    PersonRepository, PersonRepositoryError, PilgrimageRepository, PilgrimageRepositoryError,
};

fn map_enrollment_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("enrollment repository unavailable: {message}"))
        }
        EnrollmentRepositoryError::Query { message } => {
            Error::internal(format!("enrollment repository error: {message}"))
        }
    }
}

fn map_person_error(error: PersonRepositoryError) -> Error {
    match error {
        PersonRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("person repository unavailable: {message}"))
        }
        PersonRepositoryError::Query { message } => {
            Error::internal(format!("person repository error: {message}"))
        }
    }
}

fn map_pilgrimage_error(error: PilgrimageRepositoryError) -> Error {
    match error {
        PilgrimageRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("pilgrimage repository unavailable: {message}"))
        }
        PilgrimageRepositoryError::Query { message } => {
            Error::internal(format!("pilgrimage repository error: {message}"))
        }
    }
}

fn full_name(person: &Person) -> String {
    let parts: Vec<&str> = person
        .first_name
        .as_deref()
        .into_iter()
        .chain(person.last_name.as_deref())
        .collect();
    parts.join(" ")
}

/// Enrollment service implementing the query and command driving ports.
#[derive(Clone)]
pub struct EnrollmentService<E, P, G> {
    enrollment_repo: Arc<E>,
    person_repo: Arc<P>,
    pilgrimage_repo: Arc<G>,
}

impl<E, P, G> EnrollmentService<E, P, G> {
    /// Create a new service with its three repositories.
    pub fn new(enrollment_repo: Arc<E>, person_repo: Arc<P>, pilgrimage_repo: Arc<G>) -> Self {
        Self {
            enrollment_repo,
            person_repo,
            pilgrimage_repo,
        }
    }
}

impl<E, P, G> EnrollmentService<E, P, G>
where
    E: EnrollmentRepository,
    P: PersonRepository,
    G: PilgrimageRepository,
{
    async fn load(&self, id: i64) -> Result<Enrollment, Error> {
        self.enrollment_repo
            .find_by_id(id)
            .await
            .map_err(map_enrollment_error)?
            .ok_or_else(|| Error::not_found(format!("enrollment not found with id {id}")))
    }

    /// Project an enrollment into its view form.
    ///
    /// Foreign keys guarantee the referenced rows exist, so a miss here is an
    /// internal inconsistency rather than a client error.
    async fn to_view(&self, enrollment: Enrollment) -> Result<EnrollmentView, Error> {
        let person = self
            .person_repo
            .find_by_id(enrollment.person_id)
            .await
            .map_err(map_person_error)?
            .ok_or_else(|| {
                Error::internal(format!(
                    "enrollment {} references missing person {}",
                    enrollment.id, enrollment.person_id
                ))
            })?;
        let pilgrimage = self
            .pilgrimage_repo
            .find_by_id(enrollment.pilgrimage_id)
            .await
            .map_err(map_pilgrimage_error)?
            .ok_or_else(|| {
                Error::internal(format!(
                    "enrollment {} references missing pilgrimage {}",
                    enrollment.id, enrollment.pilgrimage_id
                ))
            })?;

        Ok(EnrollmentView {
            id: enrollment.id,
            person_id: enrollment.person_id,
            person_name: full_name(&person),
            pilgrimage_id: enrollment.pilgrimage_id,
            pilgrimage_name: pilgrimage.name,
            enrolled_at: enrollment.enrolled_at,
            status: enrollment.status,
            notes: enrollment.notes,
        })
    }

    async fn to_view_page(&self, page: Page<Enrollment>) -> Result<Page<EnrollmentView>, Error> {
        let page_number = page.page();
        let size = page.size();
        let total = page.total_elements();

        let mut views = Vec::with_capacity(page.items().len());
        for enrollment in page.into_items() {
            views.push(self.to_view(enrollment).await?);
        }

        Ok(Page::new(views, page_number, size, total))
    }
}

#[async_trait]
impl<E, P, G> EnrollmentsQuery for EnrollmentService<E, P, G>
where
    E: EnrollmentRepository,
    P: PersonRepository,
    G: PilgrimageRepository,
{
    async fn list(&self, request: PageRequest) -> Result<Page<EnrollmentView>, Error> {
        let page = self
            .enrollment_repo
            .find_page(&request)
            .await
            .map_err(map_enrollment_error)?;
        self.to_view_page(page).await
    }

    async fn get(&self, id: i64) -> Result<EnrollmentView, Error> {
        let enrollment = self.load(id).await?;
        self.to_view(enrollment).await
    }

    async fn list_by_person(
        &self,
        person_id: i64,
        request: PageRequest,
    ) -> Result<Page<EnrollmentView>, Error> {
        let page = self
            .enrollment_repo
            .find_page_by_person(person_id, &request)
            .await
            .map_err(map_enrollment_error)?;
        self.to_view_page(page).await
    }

    async fn list_by_pilgrimage(
        &self,
        pilgrimage_id: i64,
        request: PageRequest,
    ) -> Result<Page<EnrollmentView>, Error> {
        let page = self
            .enrollment_repo
            .find_page_by_pilgrimage(pilgrimage_id, &request)
            .await
            .map_err(map_enrollment_error)?;
        self.to_view_page(page).await
    }

    async fn list_by_status(
        &self,
        status: EnrollmentStatus,
        request: PageRequest,
    ) -> Result<Page<EnrollmentView>, Error> {
        let page = self
            .enrollment_repo
            .find_page_by_status(status, &request)
            .await
            .map_err(map_enrollment_error)?;
        self.to_view_page(page).await
    }
}

#[async_trait]
impl<E, P, G> EnrollmentsCommand for EnrollmentService<E, P, G>
where
    E: EnrollmentRepository,
    P: PersonRepository,
    G: PilgrimageRepository,
{
    async fn create(&self, draft: EnrollmentDraft) -> Result<EnrollmentView, Error> {
        let person_exists = self
            .person_repo
            .exists_by_id(draft.person_id)
            .await
            .map_err(map_person_error)?;
        if !person_exists {
            return Err(Error::not_found(format!(
                "person not found with id {}",
                draft.person_id
            )));
        }

        let pilgrimage_exists = self
            .pilgrimage_repo
            .exists_by_id(draft.pilgrimage_id)
            .await
            .map_err(map_pilgrimage_error)?;
        if !pilgrimage_exists {
            return Err(Error::not_found(format!(
                "pilgrimage not found with id {}",
                draft.pilgrimage_id
            )));
        }

        let already_enrolled = self
            .enrollment_repo
            .exists_for_person_and_pilgrimage(draft.person_id, draft.pilgrimage_id)
            .await
            .map_err(map_enrollment_error)?;
        if already_enrolled {
            return Err(Error::conflict(
                "enrollment already exists for this person and pilgrimage",
            ));
        }

        let created = self
            .enrollment_repo
            .create(&draft)
            .await
            .map_err(map_enrollment_error)?;
        self.to_view(created).await
    }

    async fn update(&self, id: i64, update: EnrollmentUpdate) -> Result<EnrollmentView, Error> {
        let mut enrollment = self.load(id).await?;
        if let Some(status) = update.status {
            enrollment.status = status;
        }
        if let Some(notes) = update.notes {
            enrollment.notes = Some(notes);
        }

        let saved = self
            .enrollment_repo
            .save(&enrollment)
            .await
            .map_err(map_enrollment_error)?;
        self.to_view(saved).await
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        let exists = self
            .enrollment_repo
            .exists_by_id(id)
            .await
            .map_err(map_enrollment_error)?;
        if !exists {
            return Err(Error::not_found(format!(
                "enrollment not found with id {id}"
            )));
        }
        self.enrollment_repo
            .delete_by_id(id)
            .await
            .map_err(map_enrollment_error)
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;
