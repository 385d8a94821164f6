use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::middleware::i18n::Locale;

// Nosso tipo de erro, agora com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Conta desativada")]
    AccountInactive,

    #[error("Sem permissão: {0}")]
    Forbidden(String),

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Dados recusados pelo banco: {0}")]
    ConstraintViolation(String),

    #[error("Recurso em uso: {0}")]
    ResourceInUse(String),

    #[error("Falha ao cadastrar usuário: {0}")]
    ProvisioningFailed(String),

    // Variante para erros de banco de dados (exemplo com sqlx)
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro que sai na resposta HTTP, já traduzido
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

fn translate(locale: &Locale, pt: &str, en: &str) -> String {
    if locale.is_portuguese() { pt.to_string() } else { en.to_string() }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::ConstraintViolation(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::AccountInactive => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ResourceInUse(_) => StatusCode::CONFLICT,
            AppError::ProvisioningFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro interno na resposta pública, no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let status = self.status_code();
        let mut details = None;

        let error = match self {
            AppError::ValidationError(errors) => {
                let mut fields = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    fields.insert(field.to_string(), json!(messages));
                }
                details = Some(Value::Object(fields));
                translate(locale, "Um ou mais campos são inválidos.", "One or more fields are invalid.")
            }
            AppError::EmailAlreadyExists => {
                translate(locale, "Este e-mail já está em uso.", "This e-mail is already in use.")
            }
            AppError::InvalidCredentials => {
                translate(locale, "E-mail ou senha inválidos.", "Invalid e-mail or password.")
            }
            AppError::InvalidToken => translate(
                locale,
                "Token de autenticação inválido ou ausente.",
                "Missing or invalid authentication token.",
            ),
            AppError::AccountInactive => translate(
                locale,
                "Esta conta está desativada. Contacte um administrador.",
                "This account is disabled. Contact an administrator.",
            ),
            AppError::Forbidden(what) => {
                details = Some(json!({ "required": what }));
                translate(
                    locale,
                    "O seu cargo não permite realizar esta ação.",
                    "Your role does not allow this action.",
                )
            }
            AppError::ResourceNotFound(what) => {
                details = Some(json!({ "resource": what }));
                translate(locale, "Registro não encontrado.", "Record not found.")
            }
            AppError::ConstraintViolation(constraint) => {
                details = Some(json!({ "constraint": constraint }));
                translate(
                    locale,
                    "Os dados violam uma regra do cadastro.",
                    "The data breaks a record constraint.",
                )
            }
            AppError::ResourceInUse(what) => {
                details = Some(json!({ "resource": what }));
                translate(
                    locale,
                    "O registro possui reservas associadas. Desative-o em vez de apagar.",
                    "The record has bookings attached. Deactivate it instead of deleting.",
                )
            }
            AppError::ProvisioningFailed(reason) => {
                details = Some(json!({ "reason": reason }));
                translate(
                    locale,
                    "Não foi possível criar o usuário. Nenhum dado foi gravado.",
                    "Could not create the user. Nothing was saved.",
                )
            }
            // Todos os outros erros viram 500. O detalhe fica só no log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                translate(locale, "Ocorreu um erro inesperado.", "An unexpected error occurred.")
            }
        };

        ApiError { status, error, details }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

// Sem idioma conhecido (ex: rejeição de middleware), responde no padrão.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_unauthorized() {
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AccountInactive.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn forbidden_carries_the_required_permission() {
        let api = AppError::Forbidden("delete_staff".into()).to_api_error(&Locale("pt".into()));
        assert_eq!(api.status, StatusCode::FORBIDDEN);
        assert_eq!(api.details, Some(json!({ "required": "delete_staff" })));
    }

    #[test]
    fn messages_follow_the_locale() {
        let pt = AppError::ResourceNotFound("Reserva".into()).to_api_error(&Locale("pt".into()));
        let en = AppError::ResourceNotFound("Reserva".into()).to_api_error(&Locale("en".into()));
        assert_eq!(pt.error, "Registro não encontrado.");
        assert_eq!(en.error, "Record not found.");
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::InternalServerError(anyhow::anyhow!("senha do banco vazou"));
        let api = err.to_api_error(&Locale("en".into()));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("senha"));
        assert!(api.details.is_none());
    }

    #[test]
    fn constraint_violation_is_a_bad_request() {
        let api = AppError::ConstraintViolation("bookings_total_amount_check".into()).to_api_error(&Locale("en".into()));
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.details, Some(json!({ "constraint": "bookings_total_amount_check" })));
    }

    #[test]
    fn provisioning_failure_is_user_facing() {
        let api = AppError::ProvisioningFailed("e-mail duplicado".into()).to_api_error(&Locale("pt".into()));
        assert_eq!(api.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(api.error.contains("Nenhum dado foi gravado"));
    }
}
