// src/common/error.rs

use std::collections::HashMap;

use reqwest::StatusCode;
use thiserror::Error;

// Mensagem fixa para quando o formulário não passa na validação local.
pub const INVALID_FIELDS_MESSAGE: &str = "Um ou mais campos são inválidos.";

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Nenhum controller deixa esse erro escapar: tudo vira texto na área de status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Detectado localmente, nunca chega ao servidor.
    #[error("Usuário não autenticado.")]
    NotAuthenticated,

    #[error("Operação de delete não permitida.")]
    DeleteNotAllowed,

    // Regra de tela (ex: "Selecione ou cadastre uma categoria.")
    #[error("{0}")]
    Rule(String),

    // Resposta não-2xx. O `detail` vem do corpo JSON quando existir.
    #[error("Erro da API ({status})")]
    Api {
        status: StatusCode,
        detail: Option<String>,
    },

    // Falha de rede, timeout, corpo ilegível...
    #[error("Erro de rede: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Resposta inválida do servidor: {0}")]
    Parse(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Texto exibido ao usuário.
    ///
    /// Erros locais usam a própria mensagem, erros HTTP usam o `detail` do
    /// servidor quando houver, e o resto cai no `fallback` da operação.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::NotAuthenticated | AppError::DeleteNotAllowed | AppError::Rule(_) => {
                self.to_string()
            }
            AppError::ValidationError(_) => INVALID_FIELDS_MESSAGE.to_string(),
            AppError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ref e => {
                tracing::debug!("Mensagem genérica para o erro: {}", e);
                fallback.to_string()
            }
        }
    }

    /// Detalhes por campo, no mesmo formato `{ campo: [mensagens] }`.
    pub fn field_messages(&self) -> HashMap<String, Vec<String>> {
        let mut details = HashMap::new();
        if let AppError::ValidationError(errors) = self {
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
                details.insert(field.to_string(), messages);
            }
        }
        details
    }

    pub fn is_http_failure(&self) -> bool {
        matches!(self, AppError::Api { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn api_detail_is_used_verbatim() {
        let err = AppError::Api {
            status: StatusCode::BAD_REQUEST,
            detail: Some("SKU duplicado.".into()),
        };
        assert_eq!(err.user_message("Erro ao salvar produto."), "SKU duplicado.");
    }

    #[test]
    fn api_without_detail_falls_back() {
        let err = AppError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        };
        assert_eq!(
            err.user_message("Erro ao salvar categoria."),
            "Erro ao salvar categoria."
        );
        assert!(err.is_http_failure());
    }

    #[test]
    fn local_errors_keep_their_own_text() {
        assert_eq!(
            AppError::NotAuthenticated.user_message("x"),
            "Usuário não autenticado."
        );
        assert_eq!(
            AppError::Rule("Selecione ou cadastre um estoque.".into()).user_message("x"),
            "Selecione ou cadastre um estoque."
        );
    }

    #[test]
    fn parse_errors_use_fallback() {
        let parse = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = AppError::from(parse);
        assert_eq!(err.user_message("Erro ao carregar logs."), "Erro ao carregar logs.");
    }

    #[test]
    fn validation_details_are_grouped_by_field() {
        let mut errors = ValidationErrors::new();
        let mut e = ValidationError::new("length");
        e.message = Some("O nome é obrigatório.".into());
        errors.add("nome", e);
        errors.add("sku", ValidationError::new("length"));

        let err = AppError::ValidationError(errors);
        let details = err.field_messages();

        assert_eq!(details["nome"], vec!["O nome é obrigatório.".to_string()]);
        assert_eq!(details["sku"], vec!["length".to_string()]);
        assert_eq!(err.user_message("x"), INVALID_FIELDS_MESSAGE);
    }
}
