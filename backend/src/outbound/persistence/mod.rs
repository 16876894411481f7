//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! The adapters here implement the domain repository ports over `diesel-async`
//! with bb8 connection pooling. They are thin: no business rules, only row
//! mapping, query construction, and error translation into the strongly typed
//! repository errors.

mod diesel_enrollment_repository;
mod diesel_error_mapping;
mod diesel_person_repository;
mod diesel_pilgrimage_repository;
mod models;
mod pool;
mod schema;

pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_person_repository::DieselPersonRepository;
pub use diesel_pilgrimage_repository::DieselPilgrimageRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
