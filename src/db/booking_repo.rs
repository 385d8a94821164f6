// src/db/booking_repo.rs
//
// Todas as consultas passam pelo executor da transação RLS: guias e
// condutores só enxergam as reservas atribuídas a eles.

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::classify_db_error, error::AppError},
    models::booking::{Booking, BookingListQuery, CreateBookingPayload, UpdateBookingPayload},
};

// Colunas projetadas sobre `b` (bookings ou CTE) com os nomes das relações
const BOOKING_COLUMNS: &str = r#"
    b.id, b.client_name, b.client_email, b.client_phone,
    b.adventure_id, a.name AS adventure_name,
    b.agency_id, ag.name AS agency_name,
    b.booking_date, b.activity_date, b.adults, b.children, b.babies,
    b.total_amount, b.status, b.payment_status, b.country,
    b.guide_id, b.driver_id, b.notes, b.created_at, b.updated_at
"#;

const BOOKING_JOINS: &str = r#"
    LEFT JOIN adventures a ON a.id = b.adventure_id
    LEFT JOIN agencies ag ON ag.id = b.agency_id
"#;

#[derive(Clone, Default)]
pub struct BookingRepository;

impl BookingRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &BookingListQuery) -> Result<Vec<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings b
            {BOOKING_JOINS}
            WHERE ($1::booking_status IS NULL OR b.status = $1)
              AND ($2::payment_status IS NULL OR b.payment_status = $2)
              AND ($3::uuid IS NULL OR b.adventure_id = $3)
              AND ($4::uuid IS NULL OR b.agency_id = $4)
              AND ($5::text IS NULL OR lower(b.country) = lower($5))
              AND ($6::date IS NULL OR b.activity_date >= $6)
              AND ($7::date IS NULL OR b.activity_date <= $7)
              AND ($8::text IS NULL
                   OR b.client_name ILIKE '%' || $8 || '%'
                   OR b.client_email ILIKE '%' || $8 || '%')
            ORDER BY b.activity_date DESC, b.created_at DESC
            "#
        );

        let bookings = sqlx::query_as::<_, Booking>(&sql)
            .bind(filter.status)
            .bind(filter.payment_status)
            .bind(filter.adventure_id)
            .bind(filter.agency_id)
            .bind(filter.country.as_deref())
            .bind(filter.from)
            .bind(filter.to)
            .bind(filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()))
            .fetch_all(executor)
            .await?;

        Ok(bookings)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings b {BOOKING_JOINS} WHERE b.id = $1");

        let booking = sqlx::query_as::<_, Booking>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(booking)
    }

    pub async fn create<'e, E>(&self, executor: E, input: &CreateBookingPayload) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // CTE: insere e devolve já com os nomes de aventura/agência
        let sql = format!(
            r#"
            WITH b AS (
                INSERT INTO bookings (
                    client_name, client_email, client_phone, adventure_id, agency_id,
                    booking_date, activity_date, adults, children, babies,
                    total_amount, status, payment_status, country,
                    guide_id, driver_id, notes
                )
                VALUES (
                    $1, $2, $3, $4, $5,
                    COALESCE($6, CURRENT_DATE), $7, $8, $9, $10,
                    $11, COALESCE($12, 'Pendente'::booking_status), COALESCE($13, 'Pendente'::payment_status), $14,
                    $15, $16, $17
                )
                RETURNING *
            )
            SELECT {BOOKING_COLUMNS} FROM b {BOOKING_JOINS}
            "#
        );

        sqlx::query_as::<_, Booking>(&sql)
            .bind(&input.client_name)
            .bind(input.client_email.as_deref())
            .bind(input.client_phone.as_deref())
            .bind(input.adventure_id)
            .bind(input.agency_id)
            .bind(input.booking_date)
            .bind(input.activity_date)
            .bind(input.adults)
            .bind(input.children)
            .bind(input.babies)
            .bind(input.total_amount)
            .bind(input.status)
            .bind(input.payment_status)
            .bind(input.country.as_deref())
            .bind(input.guide_id)
            .bind(input.driver_id)
            .bind(input.notes.as_deref())
            .fetch_one(executor)
            .await
            .map_err(|e| classify_db_error(e, "booking"))
    }

    // Campos ausentes no payload mantêm o valor atual (COALESCE)
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateBookingPayload,
    ) -> Result<Option<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH b AS (
                UPDATE bookings SET
                    client_name = COALESCE($2, client_name),
                    client_email = COALESCE($3, client_email),
                    client_phone = COALESCE($4, client_phone),
                    adventure_id = COALESCE($5, adventure_id),
                    agency_id = COALESCE($6, agency_id),
                    activity_date = COALESCE($7, activity_date),
                    adults = COALESCE($8, adults),
                    children = COALESCE($9, children),
                    babies = COALESCE($10, babies),
                    total_amount = COALESCE($11, total_amount),
                    status = COALESCE($12, status),
                    payment_status = COALESCE($13, payment_status),
                    country = COALESCE($14, country),
                    guide_id = COALESCE($15, guide_id),
                    driver_id = COALESCE($16, driver_id),
                    notes = COALESCE($17, notes),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {BOOKING_COLUMNS} FROM b {BOOKING_JOINS}
            "#
        );

        sqlx::query_as::<_, Booking>(&sql)
            .bind(id)
            .bind(input.client_name.as_deref())
            .bind(input.client_email.as_deref())
            .bind(input.client_phone.as_deref())
            .bind(input.adventure_id)
            .bind(input.agency_id)
            .bind(input.activity_date)
            .bind(input.adults)
            .bind(input.children)
            .bind(input.babies)
            .bind(input.total_amount)
            .bind(input.status)
            .bind(input.payment_status)
            .bind(input.country.as_deref())
            .bind(input.guide_id)
            .bind(input.driver_id)
            .bind(input.notes.as_deref())
            .fetch_optional(executor)
            .await
            .map_err(|e| classify_db_error(e, "booking"))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
