use sqlx::{PgPool, Postgres, Transaction};

use crate::common::error::AppError;
use crate::models::auth::AppUser;

// ---
// Helper RLS: A "Chave" para o Banco de Dados
// ---
/// Abre uma transação e define as variáveis lidas pelas políticas RLS.
/// As variáveis são locais à transação (`is_local = true`).
pub(crate) async fn begin_rls_transaction(
    pool: &PgPool,
    user: &AppUser,
) -> Result<Transaction<'static, Postgres>, AppError> {
    // O operador '?' converte automaticamente sqlx::Error -> AppError::DatabaseError
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT set_config('app.user_id', $1, true), set_config('app.user_role', $2, true)")
        .bind(user.id.to_string())
        .bind(user.role.as_str())
        .execute(&mut *tx)
        .await?;

    Ok(tx)
}

/// Traduz códigos do Postgres em erros de domínio.
pub(crate) fn classify_db_error(e: sqlx::Error, resource: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::ResourceNotFound(resource.to_string());
        }
        if db_err.is_check_violation() {
            let constraint = db_err.constraint().unwrap_or(resource).to_string();
            return AppError::ConstraintViolation(constraint);
        }
        // insufficient_privilege: política RLS recusou a linha
        if db_err.code().as_deref() == Some("42501") {
            return AppError::Forbidden(resource.to_string());
        }
    }
    AppError::DatabaseError(e)
}
