// src/models/auth.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

// Dados para login
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 1, message = "Senha obrigatória"))]
    pub password: String,
}

// Usuário devolvido junto com os tokens
#[derive(Debug, Clone, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub nome: Option<String>,
}

// Resposta de autenticação (par de tokens JWT)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: SessionUser,
}
