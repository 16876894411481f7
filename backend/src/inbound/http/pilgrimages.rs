//! Pilgrimage API handlers.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Pilgrimage, PilgrimageDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::links::{Link, PagedResponse, resource_links};
use crate::inbound::http::query::ListParams;
use crate::inbound::http::state::HttpState;

pub const BASE_PATH: &str = "/api/pilgrimages";

const SORTABLE_FIELDS: &[&str] = &["id", "name", "startDate", "endDate"];

/// Request body for creating or replacing a pilgrimage.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PilgrimageRequest {
    #[schema(example = "Camino de Santiago")]
    pub name: String,
    #[schema(example = "2026-05-01")]
    pub start_date: NaiveDate,
    #[schema(example = "2026-06-01")]
    pub end_date: NaiveDate,
}

impl From<PilgrimageRequest> for PilgrimageDraft {
    fn from(request: PilgrimageRequest) -> Self {
        Self {
            name: request.name,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

/// Pilgrimage in its wire form, with hypermedia links.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PilgrimageResource {
    #[schema(example = 1)]
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
}

impl From<Pilgrimage> for PilgrimageResource {
    fn from(pilgrimage: Pilgrimage) -> Self {
        Self {
            links: resource_links(BASE_PATH, pilgrimage.id),
            id: pilgrimage.id,
            name: pilgrimage.name,
            start_date: pilgrimage.start_date,
            end_date: pilgrimage.end_date,
        }
    }
}

/// List pilgrimages as a paged, linked collection.
#[utoipa::path(
    get,
    path = "/api/pilgrimages",
    params(ListParams),
    responses(
        (status = 200, description = "One page of pilgrimages", body = PagedResponse<PilgrimageResource>),
        (status = 400, description = "Invalid pagination or sort parameters", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pilgrimages"],
    operation_id = "listPilgrimages"
)]
#[get("/pilgrimages")]
pub async fn list_pilgrimages(
    state: web::Data<HttpState>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<PagedResponse<PilgrimageResource>>> {
    let request = params.into_inner().into_page_request(SORTABLE_FIELDS)?;
    let page = state.pilgrimages.list(request).await?;
    Ok(web::Json(PagedResponse::from_page(
        page,
        BASE_PATH,
        PilgrimageResource::from,
    )))
}

/// Fetch one pilgrimage.
#[utoipa::path(
    get,
    path = "/api/pilgrimages/{id}",
    params(("id" = i64, Path, description = "Pilgrimage id")),
    responses(
        (status = 200, description = "The pilgrimage", body = PilgrimageResource),
        (status = 404, description = "No pilgrimage with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pilgrimages"],
    operation_id = "getPilgrimage"
)]
#[get("/pilgrimages/{id}")]
pub async fn get_pilgrimage(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<PilgrimageResource>> {
    let pilgrimage = state.pilgrimages.get(path.into_inner()).await?;
    Ok(web::Json(pilgrimage.into()))
}

/// Create a pilgrimage.
#[utoipa::path(
    post,
    path = "/api/pilgrimages",
    request_body = PilgrimageRequest,
    responses(
        (status = 201, description = "Pilgrimage created", body = PilgrimageResource),
        (status = 400, description = "Invalid request body", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pilgrimages"],
    operation_id = "createPilgrimage"
)]
#[post("/pilgrimages")]
pub async fn create_pilgrimage(
    state: web::Data<HttpState>,
    payload: web::Json<PilgrimageRequest>,
) -> ApiResult<HttpResponse> {
    let created = state
        .pilgrimages_command
        .create(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(PilgrimageResource::from(created)))
}

/// Replace a pilgrimage's fields wholesale.
#[utoipa::path(
    put,
    path = "/api/pilgrimages/{id}",
    params(("id" = i64, Path, description = "Pilgrimage id")),
    request_body = PilgrimageRequest,
    responses(
        (status = 200, description = "Pilgrimage updated", body = PilgrimageResource),
        (status = 404, description = "No pilgrimage with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pilgrimages"],
    operation_id = "updatePilgrimage"
)]
#[put("/pilgrimages/{id}")]
pub async fn update_pilgrimage(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PilgrimageRequest>,
) -> ApiResult<web::Json<PilgrimageResource>> {
    let updated = state
        .pilgrimages_command
        .update(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(updated.into()))
}

/// Delete a pilgrimage.
#[utoipa::path(
    delete,
    path = "/api/pilgrimages/{id}",
    params(("id" = i64, Path, description = "Pilgrimage id")),
    responses(
        (status = 204, description = "Pilgrimage deleted"),
        (status = 404, description = "No pilgrimage with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pilgrimages"],
    operation_id = "deletePilgrimage"
)]
#[delete("/pilgrimages/{id}")]
pub async fn delete_pilgrimage(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.pilgrimages_command.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
