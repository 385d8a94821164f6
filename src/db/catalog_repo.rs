// src/db/catalog_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::classify_db_error, error::AppError},
    models::catalog::{Adventure, AdventurePayload, Agency, AgencyPayload},
};

// =============================================================================
//  AVENTURAS
// =============================================================================

#[derive(Clone, Default)]
pub struct AdventureRepository;

impl AdventureRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, only_active: bool) -> Result<Vec<Adventure>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let adventures = sqlx::query_as::<_, Adventure>(
            "SELECT * FROM adventures WHERE (NOT $1 OR is_active) ORDER BY name ASC",
        )
        .bind(only_active)
        .fetch_all(executor)
        .await?;

        Ok(adventures)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Adventure>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let adventure = sqlx::query_as::<_, Adventure>("SELECT * FROM adventures WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(adventure)
    }

    pub async fn create<'e, E>(&self, executor: E, input: &AdventurePayload) -> Result<Adventure, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let adventure = sqlx::query_as::<_, Adventure>(
            r#"
            INSERT INTO adventures (name, description, location, base_price, duration_hours, max_participants, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.location.as_deref())
        .bind(input.base_price)
        .bind(input.duration_hours)
        .bind(input.max_participants)
        .bind(input.is_active)
        .fetch_one(executor)
        .await?;

        Ok(adventure)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &AdventurePayload,
    ) -> Result<Option<Adventure>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let adventure = sqlx::query_as::<_, Adventure>(
            r#"
            UPDATE adventures SET
                name = $2, description = $3, location = $4, base_price = $5,
                duration_hours = $6, max_participants = $7, is_active = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.location.as_deref())
        .bind(input.base_price)
        .bind(input.duration_hours)
        .bind(input.max_participants)
        .bind(input.is_active)
        .fetch_optional(executor)
        .await?;

        Ok(adventure)
    }

    // Aventuras com reservas não podem ser apagadas (FK); desative-as.
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM adventures WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                let in_use = e
                    .as_database_error()
                    .is_some_and(|db_err| db_err.is_foreign_key_violation());
                if in_use {
                    AppError::ResourceInUse("adventure".into())
                } else {
                    classify_db_error(e, "adventure")
                }
            })?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
//  AGÊNCIAS
// =============================================================================

#[derive(Clone, Default)]
pub struct AgencyRepository;

impl AgencyRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, only_active: bool) -> Result<Vec<Agency>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agencies = sqlx::query_as::<_, Agency>(
            "SELECT * FROM agencies WHERE (NOT $1 OR is_active) ORDER BY name ASC",
        )
        .bind(only_active)
        .fetch_all(executor)
        .await?;

        Ok(agencies)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Agency>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agency = sqlx::query_as::<_, Agency>("SELECT * FROM agencies WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(agency)
    }

    pub async fn create<'e, E>(&self, executor: E, input: &AgencyPayload) -> Result<Agency, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agency = sqlx::query_as::<_, Agency>(
            r#"
            INSERT INTO agencies (name, contact_name, email, phone, country, commission_rate, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.contact_name.as_deref())
        .bind(input.email.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.country.as_deref())
        .bind(input.commission_rate)
        .bind(input.is_active)
        .fetch_one(executor)
        .await?;

        Ok(agency)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &AgencyPayload,
    ) -> Result<Option<Agency>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agency = sqlx::query_as::<_, Agency>(
            r#"
            UPDATE agencies SET
                name = $2, contact_name = $3, email = $4, phone = $5,
                country = $6, commission_rate = $7, is_active = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.contact_name.as_deref())
        .bind(input.email.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.country.as_deref())
        .bind(input.commission_rate)
        .bind(input.is_active)
        .fetch_optional(executor)
        .await?;

        Ok(agency)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM agencies WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| classify_db_error(e, "agency"))?;

        Ok(result.rows_affected() > 0)
    }
}
