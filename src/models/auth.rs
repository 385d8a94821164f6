// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::rbac::{Permission, Role};

// Conta de autenticação vinda do banco (tabela 'auth_users')
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuthAccount {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    // Metadados gravados no cadastro ({"role": "...", "fullName": "..."})
    pub user_metadata: sqlx::types::Json<SessionMetadata>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Metadados embutidos na sessão. Podem estar incompletos.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetadata {
    #[schema(example = "Gestor")]
    pub role: Option<String>,
    #[schema(example = "Ana Costa")]
    pub full_name: Option<String>,
}

// Perfil da equipe (tabela 'profiles'), fonte de verdade do cargo
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    #[schema(example = "ana@aventuras.pt")]
    pub email: String,
    #[schema(example = "Ana Costa")]
    pub full_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Usuário resolvido da aplicação (vive só durante a requisição)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    // Sempre derivado do cargo
    pub permissions: Vec<Permission>,
}

// Resposta do /me
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: AppUser,
    #[schema(example = 3)]
    pub level: u8,
    #[schema(example = "/")]
    pub default_path: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "ana@aventuras.pt")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub email: String,
    #[serde(default)]
    pub user_metadata: SessionMetadata,
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub path: String,
}
