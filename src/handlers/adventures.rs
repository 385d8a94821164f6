// src/handlers/adventures.rs

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
        rbac::{PermDeleteAdventures, PermEditAdventures, PermViewAdventures, RequirePermission},
    },
    models::catalog::{Adventure, AdventurePayload, CatalogListQuery},
};

// GET /api/adventures
#[utoipa::path(
    get,
    path = "/api/adventures",
    tag = "Aventuras",
    params(CatalogListQuery),
    responses(
        (status = 200, description = "Catálogo de aventuras", body = Vec<Adventure>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_adventures(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermViewAdventures>,
    locale: Locale,
    Query(query): Query<CatalogListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let adventures = app_state
        .catalog_service
        .list_adventures(&app_state.db_pool, query.active_only)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(adventures))
}

// GET /api/adventures/{id}
#[utoipa::path(
    get,
    path = "/api/adventures/{id}",
    tag = "Aventuras",
    params(("id" = Uuid, Path, description = "ID da aventura")),
    responses(
        (status = 200, description = "Aventura", body = Adventure),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_adventure(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermViewAdventures>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let adventure = app_state
        .catalog_service
        .get_adventure(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(adventure))
}

// POST /api/adventures
#[utoipa::path(
    post,
    path = "/api/adventures",
    tag = "Aventuras",
    request_body = AdventurePayload,
    responses(
        (status = 201, description = "Aventura criada", body = Adventure),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_adventure(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermEditAdventures>,
    locale: Locale,
    Json(payload): Json<AdventurePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let adventure = app_state
        .catalog_service
        .create_adventure(&app_state.db_pool, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(adventure)))
}

// PUT /api/adventures/{id}
#[utoipa::path(
    put,
    path = "/api/adventures/{id}",
    tag = "Aventuras",
    params(("id" = Uuid, Path, description = "ID da aventura")),
    request_body = AdventurePayload,
    responses(
        (status = 200, description = "Aventura atualizada", body = Adventure),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_adventure(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermEditAdventures>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdventurePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let adventure = app_state
        .catalog_service
        .update_adventure(&app_state.db_pool, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(adventure))
}

// DELETE /api/adventures/{id}
#[utoipa::path(
    delete,
    path = "/api/adventures/{id}",
    tag = "Aventuras",
    params(("id" = Uuid, Path, description = "ID da aventura")),
    responses(
        (status = 204, description = "Aventura removida"),
        (status = 404, description = "Não encontrada"),
        (status = 409, description = "Aventura com reservas")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_adventure(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermDeleteAdventures>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete_adventure(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
