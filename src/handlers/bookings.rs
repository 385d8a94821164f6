// src/handlers/bookings.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        db_utils::begin_rls_transaction,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermDeleteBookings, PermEditBookings, PermViewBookings, PermViewCalendar, RequirePermission},
    },
    models::booking::{Booking, BookingListQuery, CalendarQuery, CreateBookingPayload, UpdateBookingPayload},
};

// =============================================================================
//  RESERVAS
// =============================================================================

// GET /api/bookings
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Reservas",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Reservas visíveis ao usuário", body = Vec<Booking>),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_bookings(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermViewBookings>,
    locale: Locale,
    Query(filter): Query<BookingListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_rls_transaction(&app_state.db_pool, &user)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let bookings = app_state
        .booking_service
        .list(&mut *tx, &filter)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tx.commit().await.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    Ok(Json(bookings))
}

// GET /api/bookings/{id}
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Reservas",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses(
        (status = 200, description = "Reserva", body = Booking),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_booking(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermViewBookings>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_rls_transaction(&app_state.db_pool, &user)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let booking = app_state
        .booking_service
        .get(&mut *tx, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tx.commit().await.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    Ok(Json(booking))
}

// POST /api/bookings
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Reservas",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Reserva criada", body = Booking),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Aventura, agência ou membro da equipe inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermEditBookings>,
    locale: Locale,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let mut tx = begin_rls_transaction(&app_state.db_pool, &user)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let booking = app_state
        .booking_service
        .create(&mut *tx, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tx.commit().await.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// PUT /api/bookings/{id}
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    tag = "Reservas",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    request_body = UpdateBookingPayload,
    responses(
        (status = 200, description = "Reserva atualizada", body = Booking),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_booking(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermEditBookings>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let mut tx = begin_rls_transaction(&app_state.db_pool, &user)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let booking = app_state
        .booking_service
        .update(&mut *tx, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tx.commit().await.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    Ok(Json(booking))
}

// DELETE /api/bookings/{id}
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = "Reservas",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses(
        (status = 204, description = "Reserva removida"),
        (status = 403, description = "Sem permissão"),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_booking(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermDeleteBookings>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_rls_transaction(&app_state.db_pool, &user)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    app_state
        .booking_service
        .delete(&mut *tx, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tx.commit().await.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  CALENDÁRIO
// =============================================================================

// GET /api/calendar?from=2026-07-01&to=2026-07-31
#[utoipa::path(
    get,
    path = "/api/calendar",
    tag = "Reservas",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Reservas por data de atividade", body = Vec<Booking>)
    ),
    security(("api_jwt" = []))
)]
pub async fn calendar(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermViewCalendar>,
    locale: Locale,
    Query(range): Query<CalendarQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_rls_transaction(&app_state.db_pool, &user)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let bookings = app_state
        .booking_service
        .calendar(&mut *tx, range.from, range.to)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tx.commit().await.map_err(|e| AppError::from(e).to_api_error(&locale))?;

    Ok(Json(bookings))
}
