// src/models/booking.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status")]
pub enum BookingStatus {
    Pendente,
    Confirmada,
    #[sqlx(rename = "Concluída")]
    #[serde(rename = "Concluída")]
    Concluida,
    Cancelada,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pendente,
        BookingStatus::Confirmada,
        BookingStatus::Concluida,
        BookingStatus::Cancelada,
    ];

    /// Status cujo valor entra na receita.
    pub fn is_counted(self) -> bool {
        matches!(self, BookingStatus::Confirmada | BookingStatus::Concluida)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status")]
pub enum PaymentStatus {
    Pendente,
    Parcial,
    Pago,
    Reembolsado,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pendente,
        PaymentStatus::Parcial,
        PaymentStatus::Pago,
        PaymentStatus::Reembolsado,
    ];
}

// --- Reserva ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,

    #[schema(example = "Maria Silva")]
    pub client_name: String,
    #[schema(example = "maria@email.com")]
    pub client_email: Option<String>,
    pub client_phone: Option<String>,

    pub adventure_id: Uuid,
    #[schema(example = "Passeio de Barco")]
    pub adventure_name: Option<String>,
    pub agency_id: Option<Uuid>,
    pub agency_name: Option<String>,

    pub booking_date: NaiveDate,
    pub activity_date: NaiveDate,

    #[schema(example = 2)]
    pub adults: i32,
    #[schema(example = 1)]
    pub children: i32,
    #[schema(example = 0)]
    pub babies: i32,

    #[schema(example = "250.00")]
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    #[schema(example = "Portugal")]
    pub country: Option<String>,

    pub guide_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn participants(&self) -> i64 {
        i64::from(self.adults) + i64::from(self.children) + i64::from(self.babies)
    }
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_participants"))]
pub struct CreateBookingPayload {
    #[validate(length(min = 1, message = "O nome do cliente é obrigatório."))]
    #[schema(example = "Maria Silva")]
    pub client_name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub client_email: Option<String>,
    pub client_phone: Option<String>,

    pub adventure_id: Uuid,
    pub agency_id: Option<Uuid>,

    pub booking_date: Option<NaiveDate>,
    pub activity_date: NaiveDate,

    #[validate(range(min = 0, message = "Número de adultos inválido."))]
    pub adults: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Número de crianças inválido."))]
    pub children: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Número de bebês inválido."))]
    pub babies: i32,

    #[schema(example = "250.00")]
    #[validate(custom(function = "validate_amount"))]
    pub total_amount: Decimal,
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub country: Option<String>,

    pub guide_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub notes: Option<String>,
}

// Campos ausentes mantêm o valor atual
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingPayload {
    #[validate(length(min = 1, message = "O nome do cliente é obrigatório."))]
    pub client_name: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub adventure_id: Option<Uuid>,
    pub agency_id: Option<Uuid>,
    pub activity_date: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub adults: Option<i32>,
    #[validate(range(min = 0))]
    pub children: Option<i32>,
    #[validate(range(min = 0))]
    pub babies: Option<i32>,
    #[validate(custom(function = "validate_amount"))]
    pub total_amount: Option<Decimal>,
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub country: Option<String>,
    pub guide_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub notes: Option<String>,
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount < Decimal::ZERO {
        return Err(ValidationError::new("negative_amount").with_message("O valor não pode ser negativo.".into()));
    }
    Ok(())
}

// Uma reserva leva pelo menos uma pessoa
fn validate_participants(payload: &CreateBookingPayload) -> Result<(), ValidationError> {
    if payload.adults + payload.children + payload.babies < 1 {
        return Err(ValidationError::new("no_participants").with_message("A reserva precisa de pelo menos um participante.".into()));
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub adventure_id: Option<Uuid>,
    pub agency_id: Option<Uuid>,
    pub country: Option<String>,
    /// Data da atividade (início, inclusivo)
    pub from: Option<NaiveDate>,
    /// Data da atividade (fim, inclusivo)
    pub to: Option<NaiveDate>,
    /// Busca por nome ou e-mail do cliente
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_payload(adults: i32, amount: i64) -> CreateBookingPayload {
        serde_json::from_value(json!({
            "clientName": "Maria Silva",
            "adventureId": Uuid::new_v4(),
            "activityDate": "2026-07-14",
            "adults": adults,
            "totalAmount": amount,
            "status": "Confirmada",
        }))
        .expect("payload válido")
    }

    fn has_code(errors: &validator::ValidationErrors, code: &str) -> bool {
        errors.field_errors().values().flat_map(|list| list.iter()).any(|e| e.code == code)
    }

    #[test]
    fn negative_amount_is_rejected() {
        let errors = create_payload(2, -500).validate().unwrap_err();
        assert!(has_code(&errors, "negative_amount"));
    }

    #[test]
    fn booking_without_participants_is_rejected() {
        let errors = create_payload(0, 100).validate().unwrap_err();
        assert!(has_code(&errors, "no_participants"));
    }

    #[test]
    fn free_booking_with_one_adult_is_valid() {
        assert!(create_payload(1, 0).validate().is_ok());
    }

    #[test]
    fn update_rejects_negative_amount_only_when_present() {
        let update: UpdateBookingPayload = serde_json::from_value(json!({ "totalAmount": -1 })).expect("payload");
        assert!(update.validate().is_err());

        let untouched: UpdateBookingPayload = serde_json::from_value(json!({ "notes": "sem valor" })).expect("payload");
        assert!(untouched.validate().is_ok());
    }
}
