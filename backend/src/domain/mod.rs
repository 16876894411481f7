//! Domain entities, the partial-update engine, services, and ports.
//!
//! Types in this module are transport agnostic. Inbound adapters map them to
//! HTTP requests and responses; outbound adapters persist them.

pub mod enrollment;
pub mod enrollment_service;
pub mod error;
pub mod page;
pub mod person;
pub mod person_patch;
pub mod person_service;
pub mod pilgrimage;
pub mod pilgrimage_service;
pub mod ports;

pub use self::enrollment::{
    Enrollment, EnrollmentDraft, EnrollmentStatus, EnrollmentUpdate, EnrollmentView,
    ParseEnrollmentStatusError,
};
pub use self::enrollment_service::EnrollmentService;
pub use self::error::{Error, ErrorCode};
pub use self::page::{Page, PageRequest, PageValidationError, SortDirection, SortSpec};
pub use self::person::{Person, PersonDraft};
pub use self::person_patch::{PatchOperation, PersonFieldOverlay};
pub use self::person_service::PersonService;
pub use self::pilgrimage::{Pilgrimage, PilgrimageDraft};
pub use self::pilgrimage_service::PilgrimageService;

/// Convenient domain result alias.
pub type ApiResult<T> = Result<T, Error>;
