// src/handlers/agencies.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PermDeleteAgencies, PermEditAgencies, PermViewAgencies, RequirePermission},
    },
    models::catalog::{Agency, AgencyPayload, CatalogListQuery},
};

// GET /api/agencies
#[utoipa::path(
    get,
    path = "/api/agencies",
    tag = "Agências",
    params(CatalogListQuery),
    responses(
        (status = 200, description = "Agências parceiras", body = Vec<Agency>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_agencies(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermViewAgencies>,
    locale: Locale,
    Query(query): Query<CatalogListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let agencies = app_state
        .catalog_service
        .list_agencies(&app_state.db_pool, query.active_only)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(agencies))
}

// GET /api/agencies/{id}
#[utoipa::path(
    get,
    path = "/api/agencies/{id}",
    tag = "Agências",
    params(("id" = Uuid, Path, description = "ID da agência")),
    responses(
        (status = 200, description = "Agência", body = Agency),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_agency(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermViewAgencies>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let agency = app_state
        .catalog_service
        .get_agency(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(agency))
}

// POST /api/agencies
#[utoipa::path(
    post,
    path = "/api/agencies",
    tag = "Agências",
    request_body = AgencyPayload,
    responses(
        (status = 201, description = "Agência criada", body = Agency),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_agency(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermEditAgencies>,
    locale: Locale,
    Json(payload): Json<AgencyPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let agency = app_state
        .catalog_service
        .create_agency(&app_state.db_pool, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(agency)))
}

// PUT /api/agencies/{id}
#[utoipa::path(
    put,
    path = "/api/agencies/{id}",
    tag = "Agências",
    params(("id" = Uuid, Path, description = "ID da agência")),
    request_body = AgencyPayload,
    responses(
        (status = 200, description = "Agência atualizada", body = Agency),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_agency(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermEditAgencies>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<AgencyPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let agency = app_state
        .catalog_service
        .update_agency(&app_state.db_pool, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(agency))
}

// DELETE /api/agencies/{id}
#[utoipa::path(
    delete,
    path = "/api/agencies/{id}",
    tag = "Agências",
    params(("id" = Uuid, Path, description = "ID da agência")),
    responses(
        (status = 204, description = "Agência removida"),
        (status = 403, description = "Sem permissão"),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_agency(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermDeleteAgencies>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete_agency(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
