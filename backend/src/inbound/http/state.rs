//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    EnrollmentRepository, EnrollmentsCommand, EnrollmentsQuery, PersonRepository, PersonsCommand,
    PersonsQuery, PilgrimageRepository, PilgrimagesCommand, PilgrimagesQuery,
};
use crate::domain::{EnrollmentService, PersonService, PilgrimageService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub persons: Arc<dyn PersonsQuery>,
    pub persons_command: Arc<dyn PersonsCommand>,
    pub pilgrimages: Arc<dyn PilgrimagesQuery>,
    pub pilgrimages_command: Arc<dyn PilgrimagesCommand>,
    pub enrollments: Arc<dyn EnrollmentsQuery>,
    pub enrollments_command: Arc<dyn EnrollmentsCommand>,
}

impl HttpState {
    /// Wire the domain services over the given repositories.
    pub fn new<P, G, E>(person_repo: Arc<P>, pilgrimage_repo: Arc<G>, enrollment_repo: Arc<E>) -> Self
    where
        P: PersonRepository + 'static,
        G: PilgrimageRepository + 'static,
        E: EnrollmentRepository + 'static,
    {
        let persons = Arc::new(PersonService::new(Arc::clone(&person_repo)));
        let pilgrimages = Arc::new(PilgrimageService::new(Arc::clone(&pilgrimage_repo)));
        let enrollments = Arc::new(EnrollmentService::new(
            enrollment_repo,
            person_repo,
            pilgrimage_repo,
        ));

        Self {
            persons_command: Arc::clone(&persons) as Arc<dyn PersonsCommand>,
            persons,
            pilgrimages_command: Arc::clone(&pilgrimages) as Arc<dyn PilgrimagesCommand>,
            pilgrimages,
            enrollments_command: Arc::clone(&enrollments) as Arc<dyn EnrollmentsCommand>,
            enrollments,
        }
    }
}
