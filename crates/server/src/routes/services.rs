use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;
use filter::FilterSpec;
use models::{ServiceRecord, ServiceRecordInput};
use tracing::info;

use common::types::MessageResponse;
use service::{export, FilterFacets, StatusSummary};

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/filter", post(filter_list))
        .route("/summary", get(summary))
        .route("/facets", get(facets))
        .route("/export/csv", post(export_csv))
        .route("/export/html", post(export_html))
        .route("/:id", get(get_one).put(update).delete(delete))
        .route("/:id/enable", patch(enable))
        .route("/:id/disable", patch(disable))
}

/// Unwrap a JSON body, turning extractor rejections into the JSON error shape.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, JsonApiError> {
    payload.map(|Json(v)| v).map_err(|e| JsonApiError::bad_request(e.body_text()))
}

#[utoipa::path(
    get, path = "/api/services", tag = "services",
    responses(
        (status = 200, description = "All services, newest first", body = [crate::openapi::ServiceRecordDoc]),
        (status = 503, description = "Storage Unavailable", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ServiceRecord>>, JsonApiError> {
    let list = state.records.list().await?;
    info!(count = list.len(), "list services");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/api/services", tag = "services",
    request_body = crate::openapi::ServiceRecordInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ServiceRecordDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ServiceRecordInput>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let record = state.records.create(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ServiceRecordDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get_one(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<ServiceRecord>, JsonApiError> {
    Ok(Json(state.records.get(&id).await?))
}

#[utoipa::path(
    put, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    request_body = crate::openapi::ServiceRecordInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceRecordDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<ServiceRecordInput>, JsonRejection>,
) -> Result<Json<ServiceRecord>, JsonApiError> {
    Ok(Json(state.records.update(&id, body(payload)?).await?))
}

#[utoipa::path(
    delete, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<MessageResponse>, JsonApiError> {
    state.records.delete(&id).await?;
    Ok(Json(MessageResponse::new("Service deleted successfully")))
}

#[utoipa::path(
    patch, path = "/api/services/{id}/enable", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Enabled", body = crate::openapi::MessageResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "Already Active", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn enable(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<MessageResponse>, JsonApiError> {
    state.records.enable(&id).await?;
    Ok(Json(MessageResponse::new("Service enabled successfully")))
}

#[utoipa::path(
    patch, path = "/api/services/{id}/disable", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Disabled", body = crate::openapi::MessageResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "Not Active", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn disable(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<MessageResponse>, JsonApiError> {
    state.records.disable(&id).await?;
    Ok(Json(MessageResponse::new("Service disabled successfully")))
}

#[utoipa::path(
    post, path = "/api/services/filter", tag = "services",
    request_body = crate::openapi::FilterSpecDoc,
    responses(
        (status = 200, description = "Matching services, newest first", body = [crate::openapi::ServiceRecordDoc]),
        (status = 400, description = "Malformed filter", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn filter_list(
    State(state): State<ServerState>,
    payload: Result<Json<FilterSpec>, JsonRejection>,
) -> Result<Json<Vec<ServiceRecord>>, JsonApiError> {
    Ok(Json(state.records.filter_list(&body(payload)?).await?))
}

#[utoipa::path(
    get, path = "/api/services/summary", tag = "services",
    responses((status = 200, description = "Counts per status", body = crate::openapi::StatusSummaryDoc))
)]
pub async fn summary(State(state): State<ServerState>) -> Result<Json<StatusSummary>, JsonApiError> {
    Ok(Json(state.records.summary().await?))
}

#[utoipa::path(
    get, path = "/api/services/facets", tag = "services",
    responses((status = 200, description = "Distinct filter values", body = crate::openapi::FilterFacetsDoc))
)]
pub async fn facets(State(state): State<ServerState>) -> Result<Json<FilterFacets>, JsonApiError> {
    Ok(Json(state.records.facets().await?))
}

#[utoipa::path(
    post, path = "/api/services/export/csv", tag = "export",
    request_body = crate::openapi::FilterSpecDoc,
    responses((status = 200, description = "CSV of the filtered services", body = String, content_type = "text/csv"))
)]
pub async fn export_csv(
    State(state): State<ServerState>,
    payload: Result<Json<FilterSpec>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let records = state.records.filter_list(&body(payload)?).await?;
    let csv = export::render_csv(&records)
        .map_err(|e| JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Export Failed", Some(e.to_string())))?;
    info!(rows = records.len(), "exported services csv");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"services.csv\""),
        ],
        csv,
    ))
}

#[utoipa::path(
    post, path = "/api/services/export/html", tag = "export",
    request_body = crate::openapi::FilterSpecDoc,
    responses((status = 200, description = "HTML report of the filtered services", body = String, content_type = "text/html"))
)]
pub async fn export_html(
    State(state): State<ServerState>,
    payload: Result<Json<FilterSpec>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let records = state.records.filter_list(&body(payload)?).await?;
    let html = export::render_html(&records, Utc::now().date_naive());
    info!(rows = records.len(), "exported services html");
    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"services.html\""),
        ],
        html,
    ))
}
