// src/models/analytics.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::booking::{BookingStatus, PaymentStatus};

// --- Filtros ---

// Presets de período. Cada um define a janela atual e a de comparação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum PeriodPreset {
    #[serde(rename = "7d")]
    Last7Days,
    #[default]
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "3m")]
    Last3Months,
    #[serde(rename = "6m")]
    Last6Months,
    #[serde(rename = "12m")]
    Last12Months,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "all")]
    All,
}

// Intervalo semiaberto [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

// Janelas resolvidas de um preset. `None` = sem limite (atual) ou vazio (anterior).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodWindows {
    pub current: Option<DateWindow>,
    pub previous: Option<DateWindow>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    pub adventure_id: Option<Uuid>,
    pub agency_id: Option<Uuid>,
    pub payment_status: Option<PaymentStatus>,
    pub status: Option<BookingStatus>,
    pub country: Option<String>,
    #[serde(default)]
    #[param(value_type = Option<String>, example = "3m")]
    pub period: PeriodPreset,
    /// Quantidade de aventuras no ranking (padrão 5)
    pub top: Option<usize>,
}

// --- Resultado ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodMetrics {
    pub revenue: Decimal,
    pub bookings: u64,
    pub participants: i64,
    pub average_ticket: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricChanges {
    #[schema(example = "+10%")]
    pub revenue: String,
    pub bookings: String,
    pub participants: String,
    pub average_ticket: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    #[schema(example = "2026-03")]
    pub month: String,
    pub revenue: Decimal,
    pub bookings: u64,
    pub participants: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub status: BookingStatus,
    pub count: u64,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub payment_status: PaymentStatus,
    pub count: u64,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdventureRanking {
    pub adventure_id: Uuid,
    pub adventure_name: String,
    pub bookings: u64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountryShare {
    #[schema(example = "Portugal")]
    pub country: String,
    pub revenue: Decimal,
    #[schema(example = 42.5)]
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub period: PeriodPreset,
    pub windows: PeriodWindows,
    pub current: PeriodMetrics,
    pub previous: PeriodMetrics,
    pub changes: MetricChanges,
    pub monthly: Vec<MonthlyPoint>,
    pub by_status: Vec<StatusBreakdown>,
    pub by_payment_status: Vec<PaymentBreakdown>,
    pub top_adventures: Vec<AdventureRanking>,
    pub revenue_by_country: Vec<CountryShare>,
}

// Opções para os filtros do painel
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacetOptions {
    pub adventures: Vec<FilterOption>,
    pub agencies: Vec<FilterOption>,
    pub countries: Vec<String>,
    pub statuses: Vec<BookingStatus>,
    pub payment_statuses: Vec<PaymentStatus>,
}

// Cards do topo do dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub activities_today: u64,
    pub participants_today: i64,
    pub upcoming_week: u64,
    pub pending_payments: u64,
    pub pending_amount: Decimal,
    pub last_30_days: PeriodMetrics,
    pub changes: MetricChanges,
}
