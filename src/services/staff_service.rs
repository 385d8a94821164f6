// src/services/staff_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProfileRepository, UserRepository},
    models::{
        auth::{AppUser, Profile, SessionMetadata},
        rbac::Role,
        staff::{ProvisionStaffPayload, UpdateStaffPayload},
    },
    services::auth::hash_password,
};

#[derive(Clone)]
pub struct StaffService {
    user_repo: UserRepository,
    profile_repo: ProfileRepository,
    pool: PgPool,
}

/// Ninguém atribui um cargo acima do seu.
pub fn ensure_can_assign(caller: &AppUser, target: Role) -> Result<(), AppError> {
    if caller.role.outranks_or_equals(target) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!("assign_{}", target.as_str().to_lowercase())))
    }
}

/// Ninguém desativa a própria conta.
pub fn ensure_not_self_deactivation(caller: &AppUser, id: Uuid, payload: &UpdateStaffPayload) -> Result<(), AppError> {
    if caller.id == id && payload.is_active == Some(false) {
        return Err(AppError::Forbidden("deactivate_self".into()));
    }
    Ok(())
}

impl StaffService {
    pub fn new(user_repo: UserRepository, profile_repo: ProfileRepository, pool: PgPool) -> Self {
        Self { user_repo, profile_repo, pool }
    }

    pub async fn list(&self) -> Result<Vec<Profile>, AppError> {
        self.profile_repo.list(&self.pool).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Profile, AppError> {
        self.profile_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Membro da equipe {}", id)))
    }

    /// Cria a conta e o perfil numa única transação.
    /// Se qualquer passo falhar, nada fica gravado.
    pub async fn provision(&self, caller: &AppUser, payload: ProvisionStaffPayload) -> Result<Profile, AppError> {
        ensure_can_assign(caller, payload.role)?;

        let email = payload.email.trim().to_lowercase();
        let hashed_password = hash_password(&payload.password).await?;
        let metadata = SessionMetadata {
            role: Some(payload.role.to_string()),
            full_name: Some(payload.full_name.clone()),
        };

        let mut tx = self.pool.begin().await?;

        let account = self
            .user_repo
            .create_account(&mut *tx, &email, &hashed_password, &metadata)
            .await?;

        let profile = self
            .profile_repo
            .create_profile(
                &mut *tx,
                account.id,
                &email,
                &payload.full_name,
                payload.phone.as_deref(),
                payload.role,
            )
            .await
            .map_err(|e| {
                // A transação é desfeita no drop; a conta criada acima some junto.
                tracing::error!("❌ Falha ao criar perfil de {}: {}", email, e);
                AppError::ProvisioningFailed(e.to_string())
            })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("❌ Falha ao confirmar cadastro de {}: {}", email, e);
            AppError::ProvisioningFailed(e.to_string())
        })?;

        tracing::info!("✅ {} cadastrado como {} por {}", profile.email, profile.role, caller.email);
        Ok(profile)
    }

    pub async fn update(&self, caller: &AppUser, id: Uuid, payload: &UpdateStaffPayload) -> Result<Profile, AppError> {
        ensure_not_self_deactivation(caller, id, payload)?;

        let current = self.get(id).await?;
        ensure_can_assign(caller, current.role)?;
        if let Some(role) = payload.role {
            ensure_can_assign(caller, role)?;
        }

        let mut tx = self.pool.begin().await?;

        let profile = self
            .profile_repo
            .update_profile(&mut *tx, id, payload)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Membro da equipe {}", id)))?;

        // O token carrega estes metadados; o resolvedor de sessão usa-os como reserva.
        let metadata = SessionMetadata {
            role: Some(profile.role.to_string()),
            full_name: Some(profile.full_name.clone()),
        };
        self.user_repo.update_metadata(&mut *tx, id, &metadata).await?;

        tx.commit().await?;
        Ok(profile)
    }

    pub async fn delete(&self, caller: &AppUser, id: Uuid) -> Result<(), AppError> {
        if caller.id == id {
            return Err(AppError::Forbidden("delete_self".into()));
        }

        let current = self.get(id).await?;
        ensure_can_assign(caller, current.role)?;

        // O perfil cai junto com a conta (ON DELETE CASCADE)
        if !self.user_repo.delete_account(&self.pool, id).await? {
            return Err(AppError::ResourceNotFound(format!("Membro da equipe {}", id)));
        }

        tracing::info!("🗑️ Conta {} removida por {}", current.email, caller.email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session::build_user;

    fn caller(role: Role) -> AppUser {
        build_user(Uuid::new_v4(), "quem@aventuras.pt".into(), "Quem".into(), role)
    }

    #[test]
    fn admin_can_assign_every_role() {
        let admin = caller(Role::Administrador);
        for role in Role::ALL {
            assert!(ensure_can_assign(&admin, role).is_ok());
        }
    }

    #[test]
    fn gestor_cannot_promote_to_administrador() {
        let gestor = caller(Role::Gestor);
        assert!(ensure_can_assign(&gestor, Role::Gestor).is_ok());
        assert!(ensure_can_assign(&gestor, Role::Guia).is_ok());

        let err = ensure_can_assign(&gestor, Role::Administrador).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(ref what) if what == "assign_administrador"));
    }

    fn deactivate() -> UpdateStaffPayload {
        UpdateStaffPayload { full_name: None, phone: None, role: None, is_active: Some(false) }
    }

    #[test]
    fn admin_cannot_deactivate_own_account() {
        let admin = caller(Role::Administrador);
        let err = ensure_not_self_deactivation(&admin, admin.id, &deactivate()).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(ref what) if what == "deactivate_self"));
    }

    #[test]
    fn other_self_edits_and_deactivating_others_pass() {
        let admin = caller(Role::Administrador);
        let rename = UpdateStaffPayload { full_name: Some("Novo Nome".into()), is_active: None, ..deactivate() };
        assert!(ensure_not_self_deactivation(&admin, admin.id, &rename).is_ok());
        assert!(ensure_not_self_deactivation(&admin, Uuid::new_v4(), &deactivate()).is_ok());
    }

    #[test]
    fn condutor_only_assigns_condutor() {
        let condutor = caller(Role::Condutor);
        assert!(ensure_can_assign(&condutor, Role::Condutor).is_ok());
        assert!(ensure_can_assign(&condutor, Role::Guia).is_err());
    }
}
