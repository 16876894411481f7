//! HTTP inbound adapter exposing REST endpoints.

pub mod enrollments;
pub mod error;
pub mod health;
pub mod links;
pub mod persons;
pub mod pilgrimages;
pub mod query;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

use actix_web::web;

/// Mount every REST route on the service config.
///
/// Handlers expect [`state::HttpState`] and [`health::HealthState`] to be
/// registered as application data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(persons::list_persons)
            .service(persons::get_person)
            .service(persons::create_person)
            .service(persons::update_person)
            .service(persons::merge_patch_person)
            .service(persons::patch_person_operations)
            .service(persons::patch_person_fields)
            .service(persons::delete_person)
            .service(pilgrimages::list_pilgrimages)
            .service(pilgrimages::get_pilgrimage)
            .service(pilgrimages::create_pilgrimage)
            .service(pilgrimages::update_pilgrimage)
            .service(pilgrimages::delete_pilgrimage)
            .service(enrollments::list_enrollments)
            .service(enrollments::list_enrollments_by_person)
            .service(enrollments::list_enrollments_by_pilgrimage)
            .service(enrollments::list_enrollments_by_status)
            .service(enrollments::get_enrollment)
            .service(enrollments::create_enrollment)
            .service(enrollments::update_enrollment)
            .service(enrollments::delete_enrollment),
    )
    .service(health::ready)
    .service(health::live);
}
