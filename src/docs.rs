// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::auth::check_page,
        handlers::auth::list_permissions,

        // --- Reservas ---
        handlers::bookings::list_bookings,
        handlers::bookings::get_booking,
        handlers::bookings::create_booking,
        handlers::bookings::update_booking,
        handlers::bookings::delete_booking,
        handlers::bookings::calendar,

        // --- Catálogo ---
        handlers::adventures::list_adventures,
        handlers::adventures::get_adventure,
        handlers::adventures::create_adventure,
        handlers::adventures::update_adventure,
        handlers::adventures::delete_adventure,
        handlers::agencies::list_agencies,
        handlers::agencies::get_agency,
        handlers::agencies::create_agency,
        handlers::agencies::update_agency,
        handlers::agencies::delete_agency,

        // --- Equipe ---
        handlers::staff::list_staff,
        handlers::staff::get_staff,
        handlers::staff::provision_staff,
        handlers::staff::update_staff,
        handlers::staff::delete_staff,

        // --- Análises ---
        handlers::analytics::analytics_report,
        handlers::analytics::analytics_filters,
        handlers::analytics::dashboard_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::AppUser,
            models::auth::MeResponse,
            models::auth::Profile,
            models::auth::SessionMetadata,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- RBAC ---
            models::rbac::Role,
            models::rbac::Resource,
            models::rbac::Permission,
            models::rbac::RolePermissions,
            models::rbac::PageAccess,

            // --- Reservas ---
            models::booking::BookingStatus,
            models::booking::PaymentStatus,
            models::booking::Booking,
            models::booking::CreateBookingPayload,
            models::booking::UpdateBookingPayload,

            // --- Catálogo ---
            models::catalog::Adventure,
            models::catalog::AdventurePayload,
            models::catalog::Agency,
            models::catalog::AgencyPayload,

            // --- Equipe ---
            models::staff::ProvisionStaffPayload,
            models::staff::UpdateStaffPayload,

            // --- Análises ---
            models::analytics::PeriodPreset,
            models::analytics::DateWindow,
            models::analytics::PeriodWindows,
            models::analytics::PeriodMetrics,
            models::analytics::MetricChanges,
            models::analytics::MonthlyPoint,
            models::analytics::StatusBreakdown,
            models::analytics::PaymentBreakdown,
            models::analytics::AdventureRanking,
            models::analytics::CountryShare,
            models::analytics::AnalyticsReport,
            models::analytics::FilterOption,
            models::analytics::FacetOptions,
            models::analytics::DashboardSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Login, usuário atual e permissões"),
        (name = "Reservas", description = "Reservas e calendário de atividades"),
        (name = "Aventuras", description = "Catálogo de aventuras"),
        (name = "Agências", description = "Agências parceiras"),
        (name = "Equipe", description = "Membros da equipe e cadastro de contas"),
        (name = "Análises", description = "Indicadores, gráficos e resumo do painel")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
