// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{AdventureRepository, AgencyRepository, BookingRepository, ProfileRepository, UserRepository},
    models::rbac::Role,
    services::{
        analytics_service::AnalyticsService,
        auth::AuthService,
        booking_service::BookingService,
        catalog_service::CatalogService,
        session::SessionResolver,
        staff_service::StaffService,
    },
};

// Configurações lidas do ambiente (.env)
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_addr: String,
    pub profile_lookup_timeout: Duration,
    pub fallback_role: Role,
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Valor inválido para {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 5)?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?,
            jwt_expiration_hours: env_or("JWT_EXPIRATION_HOURS", 24 * 7)?,
            server_addr: env_or("SERVER_ADDR", "0.0.0.0:3000".to_string())?,
            profile_lookup_timeout: Duration::from_millis(env_or("PROFILE_LOOKUP_TIMEOUT_MS", 5000)?),
            fallback_role: env_or("FALLBACK_ROLE", Role::Administrador)?,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub settings: Arc<Settings>,
    pub auth_service: AuthService,
    pub session_resolver: SessionResolver,
    pub booking_service: BookingService,
    pub catalog_service: CatalogService,
    pub staff_service: StaffService,
    pub analytics_service: AnalyticsService,
}

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.database_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let profile_repo = ProfileRepository::new(db_pool.clone());
        let booking_repo = BookingRepository::new();

        let auth_service = AuthService::new(
            user_repo.clone(),
            settings.jwt_secret.clone(),
            settings.jwt_expiration_hours,
        );
        let session_resolver = SessionResolver::new(
            Arc::new(profile_repo.clone()),
            settings.profile_lookup_timeout,
            settings.fallback_role,
        );
        let booking_service = BookingService::new(booking_repo.clone());
        let catalog_service = CatalogService::new(AdventureRepository::new(), AgencyRepository::new());
        let staff_service = StaffService::new(user_repo, profile_repo, db_pool.clone());
        let analytics_service = AnalyticsService::new(booking_repo);

        Ok(Self {
            db_pool,
            settings: Arc::new(settings),
            auth_service,
            session_resolver,
            booking_service,
            catalog_service,
            staff_service,
            analytics_service,
        })
    }
}
