// src/session/auth.rs

use crate::common::error::AppError;

use super::store::{SessionStore, ACCESS_KEY};

/// O token da sessão, lido explicitamente antes de cada operação.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub token: Option<String>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn from_store(store: &dyn SessionStore) -> Self {
        Self {
            // Token vazio conta como ausente
            token: store.get(ACCESS_KEY).filter(|t| !t.is_empty()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Operações de escrita exigem token; sem ele nada vai para a rede.
    pub fn require_token(&self) -> Result<&str, AppError> {
        self.token().ok_or(AppError::NotAuthenticated)
    }
}
