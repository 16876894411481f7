//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (persons,
//!   pilgrimages, enrollments, health)
//! - **Schemas**: the request and resource DTOs plus the shared error and
//!   pagination envelopes
//!
//! The generated specification backs the Swagger UI served in debug builds.

use utoipa::OpenApi;

use crate::domain::{EnrollmentStatus, Error, ErrorCode, PatchOperation, PersonFieldOverlay};
use crate::inbound::http::enrollments::{
    CreateEnrollmentRequest, EnrollmentResource, UpdateEnrollmentRequest,
};
use crate::inbound::http::links::{Link, PageMetadata, PagedResponse};
use crate::inbound::http::persons::{PatchPersonRequest, PersonRequest, PersonResource};
use crate::inbound::http::pilgrimages::{PilgrimageRequest, PilgrimageResource};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pilgrimage management API",
        description = "REST interface for persons, pilgrimages, and enrollments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::persons::list_persons,
        crate::inbound::http::persons::get_person,
        crate::inbound::http::persons::create_person,
        crate::inbound::http::persons::update_person,
        crate::inbound::http::persons::merge_patch_person,
        crate::inbound::http::persons::patch_person_operations,
        crate::inbound::http::persons::patch_person_fields,
        crate::inbound::http::persons::delete_person,
        crate::inbound::http::pilgrimages::list_pilgrimages,
        crate::inbound::http::pilgrimages::get_pilgrimage,
        crate::inbound::http::pilgrimages::create_pilgrimage,
        crate::inbound::http::pilgrimages::update_pilgrimage,
        crate::inbound::http::pilgrimages::delete_pilgrimage,
        crate::inbound::http::enrollments::list_enrollments,
        crate::inbound::http::enrollments::list_enrollments_by_person,
        crate::inbound::http::enrollments::list_enrollments_by_pilgrimage,
        crate::inbound::http::enrollments::list_enrollments_by_status,
        crate::inbound::http::enrollments::get_enrollment,
        crate::inbound::http::enrollments::create_enrollment,
        crate::inbound::http::enrollments::update_enrollment,
        crate::inbound::http::enrollments::delete_enrollment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        PatchOperation,
        PersonFieldOverlay,
        EnrollmentStatus,
        PersonRequest,
        PatchPersonRequest,
        PersonResource,
        PilgrimageRequest,
        PilgrimageResource,
        CreateEnrollmentRequest,
        UpdateEnrollmentRequest,
        EnrollmentResource,
        Link,
        PageMetadata,
        PagedResponse<PersonResource>,
        PagedResponse<PilgrimageResource>,
        PagedResponse<EnrollmentResource>,
    )),
    tags(
        (name = "persons", description = "Operations related to persons"),
        (name = "pilgrimages", description = "Operations related to pilgrimages"),
        (name = "enrollments", description = "Operations related to enrollments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use super::*;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_person_resource_carries_links() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let person_schema = schemas.get("PersonResource").expect("PersonResource schema");

        assert_object_schema_has_field(person_schema, "id");
        assert_object_schema_has_field(person_schema, "_links");
    }

    #[test]
    fn openapi_registers_every_rest_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for expected in [
            "/api/persons",
            "/api/persons/{id}",
            "/api/persons/{id}/operations",
            "/api/persons/{id}/fields",
            "/api/pilgrimages",
            "/api/pilgrimages/{id}",
            "/api/enrollments",
            "/api/enrollments/{id}",
            "/api/enrollments/person/{personId}",
            "/api/enrollments/pilgrimage/{pilgrimageId}",
            "/api/enrollments/status/{status}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(expected), "missing path {expected}");
        }
    }
}
