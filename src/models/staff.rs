// src/models/staff.rs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::rbac::Role;

// Cadastro de um novo membro da equipe (conta + perfil)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionStaffPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "joao@aventuras.pt")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "João Pereira")]
    pub full_name: String,
    pub phone: Option<String>,
    #[schema(example = "Guia")]
    pub role: Role,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}
