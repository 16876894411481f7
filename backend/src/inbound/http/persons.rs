//! Person API handlers.
//!
//! ```text
//! GET    /api/persons?page=0&size=10&sortBy=lastName&sortDir=desc
//! POST   /api/persons {"firstName":"John","lastName":"Doe","birthDate":"1990-01-01"}
//! PATCH  /api/persons/1 {"lastName":null}
//! PATCH  /api/persons/1/operations {"operations":[{"op":"replace","path":"/firstName","value":"Jane"}]}
//! PATCH  /api/persons/1/fields {"firstName":"Jane"}
//! ```

use std::collections::BTreeMap;

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, PatchOperation, Person, PersonDraft, PersonFieldOverlay};
use crate::inbound::http::ApiResult;
use crate::inbound::http::links::{Link, PagedResponse, resource_links};
use crate::inbound::http::query::ListParams;
use crate::inbound::http::state::HttpState;

pub const BASE_PATH: &str = "/api/persons";

const SORTABLE_FIELDS: &[&str] = &["id", "firstName", "lastName", "birthDate"];

/// Request body for creating or replacing a person.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonRequest {
    #[schema(example = "John")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[schema(example = "1990-01-01")]
    pub birth_date: Option<NaiveDate>,
}

impl From<PersonRequest> for PersonDraft {
    fn from(request: PersonRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            birth_date: request.birth_date,
        }
    }
}

/// Request body for the operation-list patch route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatchPersonRequest {
    pub operations: Vec<PatchOperation>,
}

/// Person in its wire form, with hypermedia links.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonResource {
    #[schema(example = 1)]
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
}

impl From<Person> for PersonResource {
    fn from(person: Person) -> Self {
        Self {
            links: resource_links(BASE_PATH, person.id),
            id: person.id,
            first_name: person.first_name,
            last_name: person.last_name,
            birth_date: person.birth_date,
        }
    }
}

/// List persons as a paged, linked collection.
#[utoipa::path(
    get,
    path = "/api/persons",
    params(ListParams),
    responses(
        (status = 200, description = "One page of persons", body = PagedResponse<PersonResource>),
        (status = 400, description = "Invalid pagination or sort parameters", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["persons"],
    operation_id = "listPersons"
)]
#[get("/persons")]
pub async fn list_persons(
    state: web::Data<HttpState>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<PagedResponse<PersonResource>>> {
    let request = params.into_inner().into_page_request(SORTABLE_FIELDS)?;
    let page = state.persons.list(request).await?;
    Ok(web::Json(PagedResponse::from_page(
        page,
        BASE_PATH,
        PersonResource::from,
    )))
}

/// Fetch one person.
#[utoipa::path(
    get,
    path = "/api/persons/{id}",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "The person", body = PersonResource),
        (status = 404, description = "No person with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["persons"],
    operation_id = "getPerson"
)]
#[get("/persons/{id}")]
pub async fn get_person(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<PersonResource>> {
    let person = state.persons.get(path.into_inner()).await?;
    Ok(web::Json(person.into()))
}

/// Create a person.
#[utoipa::path(
    post,
    path = "/api/persons",
    request_body = PersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonResource),
        (status = 400, description = "Invalid request body", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["persons"],
    operation_id = "createPerson"
)]
#[post("/persons")]
pub async fn create_person(
    state: web::Data<HttpState>,
    payload: web::Json<PersonRequest>,
) -> ApiResult<HttpResponse> {
    let created = state
        .persons_command
        .create(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(PersonResource::from(created)))
}

/// Replace a person's fields wholesale.
#[utoipa::path(
    put,
    path = "/api/persons/{id}",
    params(("id" = i64, Path, description = "Person id")),
    request_body = PersonRequest,
    responses(
        (status = 200, description = "Person updated", body = PersonResource),
        (status = 404, description = "No person with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["persons"],
    operation_id = "updatePerson"
)]
#[put("/persons/{id}")]
pub async fn update_person(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PersonRequest>,
) -> ApiResult<web::Json<PersonResource>> {
    let updated = state
        .persons_command
        .update(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(updated.into()))
}

/// Apply an RFC 7386 JSON Merge Patch document.
///
/// Null values remove fields, non-null values overwrite, absent fields are
/// untouched. The id cannot be changed this way.
#[utoipa::path(
    patch,
    path = "/api/persons/{id}",
    params(("id" = i64, Path, description = "Person id")),
    request_body(content = Object, description = "JSON Merge Patch, only the fields to change"),
    responses(
        (status = 200, description = "Person patched", body = PersonResource),
        (status = 400, description = "Malformed patch document", body = Error),
        (status = 404, description = "No person with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["persons"],
    operation_id = "mergePatchPerson"
)]
#[patch("/persons/{id}")]
pub async fn merge_patch_person(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<PersonResource>> {
    let patched = state
        .persons_command
        .merge_patch(path.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(patched.into()))
}

/// Apply an ordered list of path-addressed operations.
///
/// Supported ops are `replace`, `add` (same as replace), and `remove` on the
/// paths `/firstName`, `/lastName`, and `/birthDate`. The first failing
/// operation aborts the request; nothing is persisted.
#[utoipa::path(
    patch,
    path = "/api/persons/{id}/operations",
    params(("id" = i64, Path, description = "Person id")),
    request_body = PatchPersonRequest,
    responses(
        (status = 200, description = "Person patched", body = PersonResource),
        (status = 400, description = "Invalid path or value", body = Error),
        (status = 404, description = "No person with this id", body = Error),
        (status = 422, description = "Unsupported operation", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["persons"],
    operation_id = "patchPersonOperations"
)]
#[patch("/persons/{id}/operations")]
pub async fn patch_person_operations(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PatchPersonRequest>,
) -> ApiResult<web::Json<PersonResource>> {
    let patched = state
        .persons_command
        .apply_operations(path.into_inner(), payload.into_inner().operations)
        .await?;
    Ok(web::Json(patched.into()))
}

/// Overlay non-null fields onto a person.
///
/// Null or absent fields are left untouched, so this route can never clear a
/// field.
#[utoipa::path(
    patch,
    path = "/api/persons/{id}/fields",
    params(("id" = i64, Path, description = "Person id")),
    request_body = PersonFieldOverlay,
    responses(
        (status = 200, description = "Person patched", body = PersonResource),
        (status = 404, description = "No person with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["persons"],
    operation_id = "patchPersonFields"
)]
#[patch("/persons/{id}/fields")]
pub async fn patch_person_fields(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PersonFieldOverlay>,
) -> ApiResult<web::Json<PersonResource>> {
    let patched = state
        .persons_command
        .overlay(path.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(patched.into()))
}

/// Delete a person.
#[utoipa::path(
    delete,
    path = "/api/persons/{id}",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 404, description = "No person with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["persons"],
    operation_id = "deletePerson"
)]
#[delete("/persons/{id}")]
pub async fn delete_person(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.persons_command.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
