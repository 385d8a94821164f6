// src/services/session.rs
//
// Resolve a sessão (claims do JWT) no usuário da aplicação.
// O perfil no banco é um enriquecimento com timeout, não uma dependência dura.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::{AppUser, Claims, Profile},
        rbac::Role,
    },
    services::permissions::role_permissions,
};

/// O que a busca encontrou para a identidade do token.
#[derive(Debug, Clone)]
pub enum ProfileRecord {
    Found(Profile),
    // Conta existe, mas ainda sem perfil
    AccountOnly,
    // Conta removida: o token sobreviveu à conta
    AccountGone,
}

/// Busca de perfil por identidade. Implementado pelo `ProfileRepository`.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    async fn find_profile(&self, user_id: Uuid) -> Result<ProfileRecord, AppError>;
}

#[derive(Debug, PartialEq)]
pub enum SessionOutcome {
    Active(AppUser),
    // Perfil inativo ou conta removida: tratar como deslogado
    Inactive,
}

#[derive(Clone)]
pub struct SessionResolver {
    profiles: Arc<dyn ProfileLookup>,
    lookup_timeout: Duration,
    fallback_role: Role,
}

pub fn build_user(id: Uuid, email: String, name: String, role: Role) -> AppUser {
    AppUser {
        id,
        email,
        name,
        role,
        permissions: role_permissions(role).to_vec(),
    }
}

impl SessionResolver {
    pub fn new(profiles: Arc<dyn ProfileLookup>, lookup_timeout: Duration, fallback_role: Role) -> Self {
        Self { profiles, lookup_timeout, fallback_role }
    }

    /// Usuário derivado só dos metadados da sessão.
    fn seed_from_metadata(&self, claims: &Claims) -> AppUser {
        let metadata = &claims.user_metadata;

        let role = match metadata.role.as_deref().map(str::parse::<Role>) {
            Some(Ok(role)) => role,
            Some(Err(e)) => {
                tracing::warn!("⚠️ Cargo inválido nos metadados de {}: {}", claims.sub, e);
                self.fallback_role
            }
            None => self.fallback_role,
        };

        let name = metadata
            .full_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| claims.email.clone());

        build_user(claims.sub, claims.email.clone(), name, role)
    }

    pub async fn resolve(&self, claims: &Claims) -> SessionOutcome {
        let seeded = self.seed_from_metadata(claims);

        let lookup = tokio::time::timeout(self.lookup_timeout, self.profiles.find_profile(claims.sub)).await;

        match lookup {
            Ok(Ok(ProfileRecord::Found(profile))) => {
                if !profile.is_active {
                    tracing::info!("🚫 Sessão recusada: perfil {} está inativo", profile.id);
                    return SessionOutcome::Inactive;
                }
                SessionOutcome::Active(build_user(
                    seeded.id,
                    seeded.email,
                    profile.full_name,
                    profile.role,
                ))
            }
            Ok(Ok(ProfileRecord::AccountOnly)) => {
                tracing::warn!("⚠️ Perfil de {} não encontrado, usando metadados da sessão", claims.sub);
                SessionOutcome::Active(seeded)
            }
            Ok(Ok(ProfileRecord::AccountGone)) => {
                tracing::info!("🚫 Sessão recusada: conta {} não existe mais", claims.sub);
                SessionOutcome::Inactive
            }
            Ok(Err(e)) => {
                tracing::error!("🔥 Falha ao buscar perfil de {}: {}", claims.sub, e);
                SessionOutcome::Active(seeded)
            }
            Err(_) => {
                tracing::warn!(
                    "⏱️ Busca de perfil de {} excedeu {:?}, usando metadados da sessão",
                    claims.sub,
                    self.lookup_timeout
                );
                SessionOutcome::Active(seeded)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::SessionMetadata;
    use chrono::Utc;

    enum Behaviour {
        Found(Profile),
        Missing,
        Gone,
        Fails,
        Hangs,
    }

    struct FakeProfiles(Behaviour);

    #[async_trait]
    impl ProfileLookup for FakeProfiles {
        async fn find_profile(&self, _user_id: Uuid) -> Result<ProfileRecord, AppError> {
            match &self.0 {
                Behaviour::Found(p) => Ok(ProfileRecord::Found(p.clone())),
                Behaviour::Missing => Ok(ProfileRecord::AccountOnly),
                Behaviour::Gone => Ok(ProfileRecord::AccountGone),
                Behaviour::Fails => Err(AppError::InternalServerError(anyhow::anyhow!("conexão recusada"))),
                Behaviour::Hangs => {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(ProfileRecord::AccountOnly)
                }
            }
        }
    }

    fn resolver(behaviour: Behaviour) -> SessionResolver {
        SessionResolver::new(
            Arc::new(FakeProfiles(behaviour)),
            Duration::from_millis(50),
            Role::Administrador,
        )
    }

    fn claims(role: Option<&str>, name: Option<&str>) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            email: "ana@aventuras.pt".into(),
            user_metadata: SessionMetadata {
                role: role.map(String::from),
                full_name: name.map(String::from),
            },
            exp: 0,
            iat: 0,
        }
    }

    fn profile(role: Role, is_active: bool) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: "ana@aventuras.pt".into(),
            full_name: "Ana do Perfil".into(),
            phone: None,
            role,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn active(outcome: SessionOutcome) -> AppUser {
        match outcome {
            SessionOutcome::Active(user) => user,
            SessionOutcome::Inactive => panic!("esperava sessão ativa"),
        }
    }

    #[tokio::test]
    async fn active_profile_overrides_metadata() {
        let user = active(
            resolver(Behaviour::Found(profile(Role::Guia, true)))
                .resolve(&claims(Some("Gestor"), Some("Ana")))
                .await,
        );
        assert_eq!(user.role, Role::Guia);
        assert_eq!(user.name, "Ana do Perfil");
        assert_eq!(user.permissions, role_permissions(Role::Guia));
    }

    #[tokio::test]
    async fn inactive_profile_rejects_session() {
        let outcome = resolver(Behaviour::Found(profile(Role::Gestor, false)))
            .resolve(&claims(Some("Gestor"), None))
            .await;
        assert_eq!(outcome, SessionOutcome::Inactive);
    }

    #[tokio::test]
    async fn deleted_account_rejects_session_despite_signed_role() {
        let outcome = resolver(Behaviour::Gone)
            .resolve(&claims(Some("Gestor"), Some("Ana")))
            .await;
        assert_eq!(outcome, SessionOutcome::Inactive);
    }

    #[tokio::test]
    async fn account_without_profile_keeps_metadata_role() {
        let user = active(resolver(Behaviour::Missing).resolve(&claims(Some("Gestor"), None)).await);
        assert_eq!(user.role, Role::Gestor);
    }

    #[tokio::test]
    async fn lookup_error_keeps_metadata_role() {
        let user = active(resolver(Behaviour::Fails).resolve(&claims(Some("Condutor"), Some("Rui"))).await);
        assert_eq!(user.role, Role::Condutor);
        assert_eq!(user.name, "Rui");
    }

    #[tokio::test]
    async fn timeout_keeps_metadata_role() {
        let user = active(resolver(Behaviour::Hangs).resolve(&claims(Some("Guia"), None)).await);
        assert_eq!(user.role, Role::Guia);
        assert_eq!(user.name, "ana@aventuras.pt");
    }

    #[tokio::test]
    async fn missing_metadata_role_uses_fallback() {
        let user = active(resolver(Behaviour::Missing).resolve(&claims(None, None)).await);
        assert_eq!(user.role, Role::Administrador);
        assert_eq!(user.permissions, role_permissions(Role::Administrador));
    }

    #[tokio::test]
    async fn unknown_metadata_role_uses_fallback() {
        let user = active(resolver(Behaviour::Missing).resolve(&claims(Some("Motorista"), None)).await);
        assert_eq!(user.role, Role::Administrador);
    }
}
