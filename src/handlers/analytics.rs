// src/handlers/analytics.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    common::{
        db_utils::begin_rls_transaction,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermViewAnalytics, PermViewDashboard, RequirePermission},
    },
    models::analytics::{AnalyticsQuery, AnalyticsReport, DashboardSummary, FacetOptions},
};

// GET /api/analytics?period=30d&country=Portugal
#[utoipa::path(
    get,
    path = "/api/analytics",
    tag = "Análises",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Métricas do período e do período anterior", body = AnalyticsReport),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn analytics_report(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermViewAnalytics>,
    locale: Locale,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_rls_transaction(&app_state.db_pool, &user)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let today = Utc::now().date_naive();
    let report = app_state
        .analytics_service
        .report(&mut *tx, &query, today)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tx.commit().await.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    Ok(Json(report))
}

// GET /api/analytics/filters
#[utoipa::path(
    get,
    path = "/api/analytics/filters",
    tag = "Análises",
    responses(
        (status = 200, description = "Opções dos filtros", body = FacetOptions)
    ),
    security(("api_jwt" = []))
)]
pub async fn analytics_filters(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermViewAnalytics>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_rls_transaction(&app_state.db_pool, &user)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let options = app_state
        .analytics_service
        .facet_options(&mut *tx)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tx.commit().await.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    Ok(Json(options))
}

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Análises",
    responses(
        (status = 200, description = "Resumo do painel", body = DashboardSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn dashboard_summary(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermViewDashboard>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_rls_transaction(&app_state.db_pool, &user)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let today = Utc::now().date_naive();
    let summary = app_state
        .analytics_service
        .dashboard_summary(&mut *tx, today)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tx.commit().await.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    Ok(Json(summary))
}
