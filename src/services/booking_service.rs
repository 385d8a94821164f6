// src/services/booking_service.rs

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BookingRepository,
    models::booking::{Booking, BookingListQuery, CreateBookingPayload, UpdateBookingPayload},
};

#[derive(Clone)]
pub struct BookingService {
    repo: BookingRepository,
}

impl BookingService {
    pub fn new(repo: BookingRepository) -> Self {
        Self { repo }
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &BookingListQuery) -> Result<Vec<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list(executor, filter).await
    }

    /// Reservas com atividade entre `from` e `to` (inclusive).
    pub async fn calendar<'e, E>(&self, executor: E, from: NaiveDate, to: NaiveDate) -> Result<Vec<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if from > to {
            return Ok(Vec::new());
        }

        let filter = BookingListQuery {
            from: Some(from),
            to: Some(to),
            ..Default::default()
        };
        let mut bookings = self.repo.list(executor, &filter).await?;
        bookings.sort_by_key(|b| (b.activity_date, b.created_at));
        Ok(bookings)
    }

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .find_by_id(executor, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Reserva {}", id)))
    }

    pub async fn create<'e, E>(&self, executor: E, input: &CreateBookingPayload) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = self.repo.create(executor, input).await?;
        tracing::info!("📅 Reserva {} criada para {}", booking.id, booking.activity_date);
        Ok(booking)
    }

    pub async fn update<'e, E>(&self, executor: E, id: Uuid, input: &UpdateBookingPayload) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update(executor, id, input)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Reserva {}", id)))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !self.repo.delete(executor, id).await? {
            return Err(AppError::ResourceNotFound(format!("Reserva {}", id)));
        }
        tracing::info!("🗑️ Reserva {} removida", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[tokio::test]
    async fn calendar_with_reversed_range_is_empty() {
        // Pool preguiçoso: um intervalo invertido não chega ao banco
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/reservas_test")
            .expect("url válida");
        let service = BookingService::new(BookingRepository::new());

        let from = NaiveDate::from_ymd_opt(2026, 7, 31).expect("data");
        let to = NaiveDate::from_ymd_opt(2026, 7, 1).expect("data");

        let bookings = service.calendar(&pool, from, to).await.expect("sem erro");
        assert!(bookings.is_empty());
    }
}
