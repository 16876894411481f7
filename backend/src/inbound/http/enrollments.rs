//! Enrollment API handlers.
//!
//! ```text
//! POST /api/enrollments {"personId":1,"pilgrimageId":2,"notes":"veggie meals"}
//! GET  /api/enrollments/person/1
//! GET  /api/enrollments/status/PENDING
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    EnrollmentDraft, EnrollmentStatus, EnrollmentUpdate, EnrollmentView, Error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::links::{Link, PagedResponse, resource_links};
use crate::inbound::http::query::ListParams;
use crate::inbound::http::state::HttpState;

pub const BASE_PATH: &str = "/api/enrollments";

/// Request body for enrolling a person on a pilgrimage.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentRequest {
    #[schema(example = 1)]
    pub person_id: i64,
    #[schema(example = 2)]
    pub pilgrimage_id: i64,
    #[schema(example = "vegetarian meals")]
    pub notes: Option<String>,
}

/// Request body for updating an enrollment. Absent fields are untouched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnrollmentRequest {
    pub status: Option<EnrollmentStatus>,
    pub notes: Option<String>,
}

/// Enrollment in its wire form, with the referenced display names and
/// hypermedia links.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResource {
    #[schema(example = 1)]
    pub id: i64,
    pub person_id: i64,
    pub person_name: String,
    pub pilgrimage_id: i64,
    pub pilgrimage_name: String,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub notes: Option<String>,
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
}

impl From<EnrollmentView> for EnrollmentResource {
    fn from(view: EnrollmentView) -> Self {
        Self {
            links: resource_links(BASE_PATH, view.id),
            id: view.id,
            person_id: view.person_id,
            person_name: view.person_name,
            pilgrimage_id: view.pilgrimage_id,
            pilgrimage_name: view.pilgrimage_name,
            enrollment_date: view.enrolled_at,
            status: view.status,
            notes: view.notes,
        }
    }
}

fn parse_status(raw: &str) -> Result<EnrollmentStatus, Error> {
    EnrollmentStatus::from_str(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "status", "value": raw }))
    })
}

/// List enrollments as a paged, linked collection.
#[utoipa::path(
    get,
    path = "/api/enrollments",
    params(ListParams),
    responses(
        (status = 200, description = "One page of enrollments", body = PagedResponse<EnrollmentResource>),
        (status = 400, description = "Invalid pagination parameters", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "listEnrollments"
)]
#[get("/enrollments")]
pub async fn list_enrollments(
    state: web::Data<HttpState>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<PagedResponse<EnrollmentResource>>> {
    let request = params.into_inner().into_unsorted_page_request()?;
    let page = state.enrollments.list(request).await?;
    Ok(web::Json(PagedResponse::from_page(
        page,
        BASE_PATH,
        EnrollmentResource::from,
    )))
}

/// List a person's enrollments.
#[utoipa::path(
    get,
    path = "/api/enrollments/person/{personId}",
    params(
        ("personId" = i64, Path, description = "Person id"),
        ListParams
    ),
    responses(
        (status = 200, description = "One page of the person's enrollments", body = PagedResponse<EnrollmentResource>),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "listEnrollmentsByPerson"
)]
#[get("/enrollments/person/{person_id}")]
pub async fn list_enrollments_by_person(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<PagedResponse<EnrollmentResource>>> {
    let person_id = path.into_inner();
    let request = params.into_inner().into_unsorted_page_request()?;
    let page = state.enrollments.list_by_person(person_id, request).await?;
    Ok(web::Json(PagedResponse::from_page(
        page,
        &format!("{BASE_PATH}/person/{person_id}"),
        EnrollmentResource::from,
    )))
}

/// List a pilgrimage's enrollments.
#[utoipa::path(
    get,
    path = "/api/enrollments/pilgrimage/{pilgrimageId}",
    params(
        ("pilgrimageId" = i64, Path, description = "Pilgrimage id"),
        ListParams
    ),
    responses(
        (status = 200, description = "One page of the pilgrimage's enrollments", body = PagedResponse<EnrollmentResource>),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "listEnrollmentsByPilgrimage"
)]
#[get("/enrollments/pilgrimage/{pilgrimage_id}")]
pub async fn list_enrollments_by_pilgrimage(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<PagedResponse<EnrollmentResource>>> {
    let pilgrimage_id = path.into_inner();
    let request = params.into_inner().into_unsorted_page_request()?;
    let page = state
        .enrollments
        .list_by_pilgrimage(pilgrimage_id, request)
        .await?;
    Ok(web::Json(PagedResponse::from_page(
        page,
        &format!("{BASE_PATH}/pilgrimage/{pilgrimage_id}"),
        EnrollmentResource::from,
    )))
}

/// List enrollments in a status. The status segment is case-insensitive.
#[utoipa::path(
    get,
    path = "/api/enrollments/status/{status}",
    params(
        ("status" = String, Path, description = "Enrollment status, e.g. PENDING"),
        ListParams
    ),
    responses(
        (status = 200, description = "One page of matching enrollments", body = PagedResponse<EnrollmentResource>),
        (status = 400, description = "Unknown status", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "listEnrollmentsByStatus"
)]
#[get("/enrollments/status/{status}")]
pub async fn list_enrollments_by_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<PagedResponse<EnrollmentResource>>> {
    let raw = path.into_inner();
    let status = parse_status(&raw)?;
    let request = params.into_inner().into_unsorted_page_request()?;
    let page = state.enrollments.list_by_status(status, request).await?;
    Ok(web::Json(PagedResponse::from_page(
        page,
        &format!("{BASE_PATH}/status/{status}"),
        EnrollmentResource::from,
    )))
}

/// Fetch one enrollment.
#[utoipa::path(
    get,
    path = "/api/enrollments/{id}",
    params(("id" = i64, Path, description = "Enrollment id")),
    responses(
        (status = 200, description = "The enrollment", body = EnrollmentResource),
        (status = 404, description = "No enrollment with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "getEnrollment"
)]
#[get("/enrollments/{id:\\d+}")]
pub async fn get_enrollment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<EnrollmentResource>> {
    let view = state.enrollments.get(path.into_inner()).await?;
    Ok(web::Json(view.into()))
}

/// Enrol a person on a pilgrimage.
///
/// Fails with 404 if either side of the pair does not exist and with 409 if
/// the person is already enrolled on the pilgrimage.
#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = CreateEnrollmentRequest,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResource),
        (status = 404, description = "Person or pilgrimage missing", body = Error),
        (status = 409, description = "Already enrolled", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "createEnrollment"
)]
#[post("/enrollments")]
pub async fn create_enrollment(
    state: web::Data<HttpState>,
    payload: web::Json<CreateEnrollmentRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let draft = EnrollmentDraft {
        person_id: request.person_id,
        pilgrimage_id: request.pilgrimage_id,
        enrolled_at: Utc::now(),
        status: EnrollmentStatus::Pending,
        notes: request.notes,
    };
    let created = state.enrollments_command.create(draft).await?;
    Ok(HttpResponse::Created().json(EnrollmentResource::from(created)))
}

/// Update an enrollment's status and notes.
#[utoipa::path(
    put,
    path = "/api/enrollments/{id}",
    params(("id" = i64, Path, description = "Enrollment id")),
    request_body = UpdateEnrollmentRequest,
    responses(
        (status = 200, description = "Enrollment updated", body = EnrollmentResource),
        (status = 404, description = "No enrollment with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "updateEnrollment"
)]
#[put("/enrollments/{id}")]
pub async fn update_enrollment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateEnrollmentRequest>,
) -> ApiResult<web::Json<EnrollmentResource>> {
    let request = payload.into_inner();
    let update = EnrollmentUpdate {
        status: request.status,
        notes: request.notes,
    };
    let view = state
        .enrollments_command
        .update(path.into_inner(), update)
        .await?;
    Ok(web::Json(view.into()))
}

/// Delete an enrollment.
#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}",
    params(("id" = i64, Path, description = "Enrollment id")),
    responses(
        (status = 204, description = "Enrollment deleted"),
        (status = 404, description = "No enrollment with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "deleteEnrollment"
)]
#[delete("/enrollments/{id}")]
pub async fn delete_enrollment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.enrollments_command.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
