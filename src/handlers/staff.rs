// src/handlers/staff.rs

use axum::{
    extract::{Path, State},
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
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermDeleteStaff, PermEditStaff, PermViewStaff, RequirePermission},
    },
    models::{
        auth::Profile,
        staff::{ProvisionStaffPayload, UpdateStaffPayload},
    },
};

// GET /api/staff
#[utoipa::path(
    get,
    path = "/api/staff",
    tag = "Equipe",
    responses(
        (status = 200, description = "Membros da equipe", body = Vec<Profile>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_staff(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermViewStaff>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let staff = app_state
        .staff_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(staff))
}

// GET /api/staff/{id}
#[utoipa::path(
    get,
    path = "/api/staff/{id}",
    tag = "Equipe",
    params(("id" = Uuid, Path, description = "ID do membro da equipe")),
    responses(
        (status = 200, description = "Membro da equipe", body = Profile),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_staff(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermViewStaff>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = app_state
        .staff_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(profile))
}

// POST /api/staff
// Cria conta + perfil. Em caso de falha nada é gravado.
#[utoipa::path(
    post,
    path = "/api/staff",
    tag = "Equipe",
    request_body = ProvisionStaffPayload,
    responses(
        (status = 201, description = "Membro cadastrado", body = Profile),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Cargo acima do permitido"),
        (status = 409, description = "E-mail já existe"),
        (status = 422, description = "Falha no cadastro, nada foi gravado")
    ),
    security(("api_jwt" = []))
)]
pub async fn provision_staff(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermEditStaff>,
    locale: Locale,
    Json(payload): Json<ProvisionStaffPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let profile = app_state
        .staff_service
        .provision(&caller, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(profile)))
}

// PUT /api/staff/{id}
#[utoipa::path(
    put,
    path = "/api/staff/{id}",
    tag = "Equipe",
    params(("id" = Uuid, Path, description = "ID do membro da equipe")),
    request_body = UpdateStaffPayload,
    responses(
        (status = 200, description = "Membro atualizado", body = Profile),
        (status = 403, description = "Cargo acima do permitido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_staff(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermEditStaff>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStaffPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let profile = app_state
        .staff_service
        .update(&caller, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(profile))
}

// DELETE /api/staff/{id}
#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    tag = "Equipe",
    params(("id" = Uuid, Path, description = "ID do membro da equipe")),
    responses(
        (status = 204, description = "Conta removida"),
        (status = 403, description = "Sem permissão"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_staff(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermDeleteStaff>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .staff_service
        .delete(&caller, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
