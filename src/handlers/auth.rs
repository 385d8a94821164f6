use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        auth::{AuthResponse, LoginUserPayload, MeResponse, PageQuery},
        rbac::{PageAccess, Role, RolePermissions},
    },
    services::permissions,
};

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login realizado", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(AuthResponse { token }))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário resolvido", body = MeResponse),
        (status = 401, description = "Token inválido ou conta desativada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<MeResponse> {
    let level = user.role.level();
    let default_path = permissions::default_path(user.role).to_string();
    Json(MeResponse { user, level, default_path })
}

// GET /api/users/me/pages?path=/staff
#[utoipa::path(
    get,
    path = "/api/users/me/pages",
    tag = "Auth",
    params(
        ("path" = String, Query, description = "Caminho da página (ex: /staff)")
    ),
    responses(
        (status = 200, description = "Acesso à página", body = PageAccess)
    ),
    security(("api_jwt" = []))
)]
pub async fn check_page(
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> Json<PageAccess> {
    let path = permissions::normalize_path(&query.path).to_string();
    let allowed = permissions::can_access_page(user.role, &path);
    let redirect_to = (!allowed).then(|| permissions::default_path(user.role).to_string());

    Json(PageAccess { path, allowed, redirect_to })
}

// GET /api/permissions
#[utoipa::path(
    get,
    path = "/api/permissions",
    tag = "Auth",
    responses(
        (status = 200, description = "Matriz de cargos e permissões", body = Vec<RolePermissions>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_permissions() -> Json<Vec<RolePermissions>> {
    let matrix = Role::ALL
        .into_iter()
        .map(|role| RolePermissions {
            role,
            level: role.level(),
            permissions: permissions::role_permissions(role).to_vec(),
            default_path: permissions::default_path(role).to_string(),
        })
        .collect();

    Json(matrix)
}
