// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{AuthAccount, Claims},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    expiration_hours: i64,
}

/// Gera o hash fora do runtime assíncrono.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

pub fn create_token(account: &AuthAccount, secret: &str, expiration_hours: i64) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::hours(expiration_hours);

    let claims = Claims {
        sub: account.id,
        email: account.email.clone(),
        user_metadata: account.user_metadata.0.clone(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_ref()))?)
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_ref()), &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AppError::InvalidToken)
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, expiration_hours: i64) -> Self {
        Self { user_repo, jwt_secret, expiration_hours }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let account = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = account.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
        ?;

        if !is_password_valid {
            tracing::info!("🔒 Tentativa de login inválida para {}", email);
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!("🔑 Sessão emitida para {}", account.id);
        create_token(&account, &self.jwt_secret, self.expiration_hours)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        decode_token(token, &self.jwt_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::SessionMetadata;
    use uuid::Uuid;

    const TEST_SECRET: &str = "segredo-apenas-para-testes";

    fn account() -> AuthAccount {
        AuthAccount {
            id: Uuid::new_v4(),
            email: "ana@aventuras.pt".into(),
            password_hash: String::new(),
            user_metadata: sqlx::types::Json(SessionMetadata {
                role: Some("Gestor".into()),
                full_name: Some("Ana Costa".into()),
            }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn token_carries_identity_and_metadata() {
        let acc = account();
        let token = create_token(&acc, TEST_SECRET, 1).expect("token gerado");
        let claims = decode_token(&token, TEST_SECRET).expect("token válido");

        assert_eq!(claims.sub, acc.id);
        assert_eq!(claims.email, acc.email);
        assert_eq!(claims.user_metadata.role.as_deref(), Some("Gestor"));
        assert_eq!(claims.user_metadata.full_name.as_deref(), Some("Ana Costa"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token(&account(), TEST_SECRET, 1).expect("token gerado");
        assert!(matches!(decode_token(&token, "outro-segredo"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = create_token(&account(), TEST_SECRET, -2).expect("token gerado");
        assert!(matches!(decode_token(&token, TEST_SECRET), Err(AppError::InvalidToken)));
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(decode_token("isto.nao.e-um-jwt", TEST_SECRET).is_err());
        assert!(decode_token("", TEST_SECRET).is_err());
    }
}
