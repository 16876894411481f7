//! Domain ports for the hexagonal boundary.
//!
//! Repository ports face outward towards persistence adapters; the query and
//! command ports face inward and are what the HTTP layer depends on.

mod macros;
pub(crate) use macros::define_port_error;

mod enrollment_repository;
mod enrollments;
mod person_repository;
mod persons;
mod pilgrimage_repository;
mod pilgrimages;

#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{
    EnrollmentRepository, EnrollmentRepositoryError, FixtureEnrollmentRepository,
};
#[cfg(test)]
pub use enrollments::{MockEnrollmentsCommand, MockEnrollmentsQuery};
pub use enrollments::{EnrollmentsCommand, EnrollmentsQuery};
#[cfg(test)]
pub use person_repository::MockPersonRepository;
pub use person_repository::{FixturePersonRepository, PersonRepository, PersonRepositoryError};
#[cfg(test)]
pub use persons::{MockPersonsCommand, MockPersonsQuery};
pub use persons::{PersonsCommand, PersonsQuery};
#[cfg(test)]
pub use pilgrimage_repository::MockPilgrimageRepository;
pub use pilgrimage_repository::{
    FixturePilgrimageRepository, PilgrimageRepository, PilgrimageRepositoryError,
};
#[cfg(test)]
pub use pilgrimages::{MockPilgrimagesCommand, MockPilgrimagesQuery};
pub use pilgrimages::{PilgrimagesCommand, PilgrimagesQuery};
