// src/services/catalog_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AdventureRepository, AgencyRepository},
    models::catalog::{Adventure, AdventurePayload, Agency, AgencyPayload},
};

#[derive(Clone)]
pub struct CatalogService {
    adventures: AdventureRepository,
    agencies: AgencyRepository,
}

impl CatalogService {
    pub fn new(adventures: AdventureRepository, agencies: AgencyRepository) -> Self {
        Self { adventures, agencies }
    }

    // =========================================================================
    //  AVENTURAS
    // =========================================================================

    pub async fn list_adventures<'e, E>(&self, executor: E, only_active: bool) -> Result<Vec<Adventure>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.adventures.list(executor, only_active).await
    }

    pub async fn get_adventure<'e, E>(&self, executor: E, id: Uuid) -> Result<Adventure, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.adventures
            .find_by_id(executor, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Aventura {}", id)))
    }

    pub async fn create_adventure<'e, E>(&self, executor: E, input: &AdventurePayload) -> Result<Adventure, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.adventures.create(executor, input).await
    }

    pub async fn update_adventure<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &AdventurePayload,
    ) -> Result<Adventure, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.adventures
            .update(executor, id, input)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Aventura {}", id)))
    }

    pub async fn delete_adventure<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !self.adventures.delete(executor, id).await? {
            return Err(AppError::ResourceNotFound(format!("Aventura {}", id)));
        }
        Ok(())
    }

    // =========================================================================
    //  AGÊNCIAS
    // =========================================================================

    pub async fn list_agencies<'e, E>(&self, executor: E, only_active: bool) -> Result<Vec<Agency>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.agencies.list(executor, only_active).await
    }

    pub async fn get_agency<'e, E>(&self, executor: E, id: Uuid) -> Result<Agency, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.agencies
            .find_by_id(executor, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Agência {}", id)))
    }

    pub async fn create_agency<'e, E>(&self, executor: E, input: &AgencyPayload) -> Result<Agency, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.agencies.create(executor, input).await
    }

    pub async fn update_agency<'e, E>(&self, executor: E, id: Uuid, input: &AgencyPayload) -> Result<Agency, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.agencies
            .update(executor, id, input)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Agência {}", id)))
    }

    pub async fn delete_agency<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !self.agencies.delete(executor, id).await? {
            return Err(AppError::ResourceNotFound(format!("Agência {}", id)));
        }
        Ok(())
    }
}
