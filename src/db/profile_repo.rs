// src/db/profile_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{auth::Profile, rbac::Role, staff::UpdateStaffPayload},
    services::session::{ProfileLookup, ProfileRecord},
};

#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Profile>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(profile)
    }

    pub async fn account_exists<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM auth_users WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await?;

        Ok(exists)
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<Profile>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profiles = sqlx::query_as::<_, Profile>("SELECT * FROM profiles ORDER BY full_name ASC")
            .fetch_all(executor)
            .await?;

        Ok(profiles)
    }

    // O id do perfil é o mesmo da conta em 'auth_users'
    pub async fn create_profile<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        email: &str,
        full_name: &str,
        phone: Option<&str>,
        role: Role,
    ) -> Result<Profile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, email, full_name, phone, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(full_name)
        .bind(phone)
        .bind(role)
        .fetch_one(executor)
        .await?;

        Ok(profile)
    }

    pub async fn update_profile<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateStaffPayload,
    ) -> Result<Option<Profile>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                role = COALESCE($4, role),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.full_name.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.role)
        .bind(input.is_active)
        .fetch_optional(executor)
        .await?;

        Ok(profile)
    }
}

#[async_trait]
impl ProfileLookup for ProfileRepository {
    async fn find_profile(&self, user_id: Uuid) -> Result<ProfileRecord, AppError> {
        if let Some(profile) = self.find_by_id(&self.pool, user_id).await? {
            return Ok(ProfileRecord::Found(profile));
        }

        // Sem perfil: distingue conta recém-criada de conta apagada
        if self.account_exists(&self.pool, user_id).await? {
            Ok(ProfileRecord::AccountOnly)
        } else {
            Ok(ProfileRecord::AccountGone)
        }
    }
}
