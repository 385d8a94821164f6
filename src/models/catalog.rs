// src/models/catalog.rs
//
// Aventuras (o que se vende) e agências (quem revende).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Adventure (A "Aventura")
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Adventure {
    pub id: Uuid,
    #[schema(example = "Passeio de Barco nas Grutas")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "Lagos")]
    pub location: Option<String>,
    #[schema(example = "45.00")]
    pub base_price: Decimal,
    #[schema(example = "2.5")]
    pub duration_hours: Option<Decimal>,
    #[schema(example = 12)]
    pub max_participants: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdventurePayload {
    #[validate(length(min = 1, message = "O nome da aventura é obrigatório."))]
    #[schema(example = "Passeio de Barco nas Grutas")]
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[schema(example = "45.00")]
    pub base_price: Decimal,
    pub duration_hours: Option<Decimal>,
    #[validate(range(min = 1, message = "A lotação deve ser positiva."))]
    pub max_participants: Option<i32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// ---
// 2. Agency (A "Agência" parceira)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    pub id: Uuid,
    #[schema(example = "Algarve Tours")]
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(example = "Portugal")]
    pub country: Option<String>,
    /// Comissão em percentagem (ex: 15.00)
    #[schema(example = "15.00")]
    pub commission_rate: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgencyPayload {
    #[validate(length(min = 1, message = "O nome da agência é obrigatório."))]
    #[schema(example = "Algarve Tours")]
    pub name: String,
    pub contact_name: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub commission_rate: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

// Filtro das listagens do catálogo
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CatalogListQuery {
    /// Só registros ativos
    #[serde(default)]
    pub active_only: bool,
}
