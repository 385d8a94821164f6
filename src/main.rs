//src/main.rs

use anyhow::Context;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Settings};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logger: nível via RUST_LOG (padrão "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let settings = Settings::from_env()?;
    let app_state = AppState::new(settings).await?;
    let server_addr = app_state.settings.server_addr.clone();

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados")?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Tudo abaixo exige token válido e conta ativa
    let protected_routes = Router::new()
        // Usuário e permissões
        .route("/users/me", get(handlers::auth::get_me))
        .route("/users/me/pages", get(handlers::auth::check_page))
        .route("/permissions", get(handlers::auth::list_permissions))
        // Reservas
        .route(
            "/bookings",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route(
            "/bookings/{id}",
            get(handlers::bookings::get_booking)
                .put(handlers::bookings::update_booking)
                .delete(handlers::bookings::delete_booking),
        )
        .route("/calendar", get(handlers::bookings::calendar))
        // Catálogo
        .route(
            "/adventures",
            get(handlers::adventures::list_adventures).post(handlers::adventures::create_adventure),
        )
        .route(
            "/adventures/{id}",
            get(handlers::adventures::get_adventure)
                .put(handlers::adventures::update_adventure)
                .delete(handlers::adventures::delete_adventure),
        )
        .route(
            "/agencies",
            get(handlers::agencies::list_agencies).post(handlers::agencies::create_agency),
        )
        .route(
            "/agencies/{id}",
            get(handlers::agencies::get_agency)
                .put(handlers::agencies::update_agency)
                .delete(handlers::agencies::delete_agency),
        )
        // Equipe
        .route(
            "/staff",
            get(handlers::staff::list_staff).post(handlers::staff::provision_staff),
        )
        .route(
            "/staff/{id}",
            get(handlers::staff::get_staff)
                .put(handlers::staff::update_staff)
                .delete(handlers::staff::delete_staff),
        )
        // Análises
        .route("/analytics", get(handlers::analytics::analytics_report))
        .route("/analytics/filters", get(handlers::analytics::analytics_filters))
        .route("/dashboard/summary", get(handlers::analytics::dashboard_summary))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let api_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    let app = Router::new()
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&server_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", server_addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;

    Ok(())
}
