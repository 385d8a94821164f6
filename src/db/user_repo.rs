use sqlx::{types::Json, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{AuthAccount, SessionMetadata},
};

// O repositório de contas, responsável pela tabela 'auth_users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca uma conta pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AuthAccount>, AppError> {
        let account = sqlx::query_as::<_, AuthAccount>("SELECT * FROM auth_users WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    // Cria uma nova conta (dentro da transação de cadastro)
    pub async fn create_account<'e, E>(
        &self,
        executor: E,
        email: &str,
        hashed_password: &str,
        metadata: &SessionMetadata,
    ) -> Result<AuthAccount, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, AuthAccount>(
            "INSERT INTO auth_users (email, password_hash, user_metadata) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(email)
        .bind(hashed_password)
        .bind(Json(metadata))
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Converte erro de violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    // Mantém os metadados da sessão alinhados com o perfil
    pub async fn update_metadata<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        metadata: &SessionMetadata,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE auth_users SET user_metadata = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(Json(metadata))
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn delete_account<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM auth_users WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
