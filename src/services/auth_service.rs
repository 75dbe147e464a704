// src/services/auth_service.rs

use std::{collections::HashMap, sync::Arc};

use validator::Validate;

use crate::{
    api::AuthRepository,
    common::error::AppError,
    config::AppState,
    models::auth::{LoginPayload, LoginResponse},
    session::{
        navigator::{AFTER_LOGIN_ROUTE, LOGIN_ROUTE},
        store::{
            ACCESS_KEY, REFRESH_KEY, SESSION_KEYS, USER_EMAIL_KEY, USER_ID_KEY, USER_NAME_KEY,
        },
        AuthContext, Navigator, SessionStore,
    },
};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Credenciais inválidas. Verifique seus dados.";
pub const LOGIN_ERROR_MESSAGE: &str = "Erro ao fazer login.";
pub const INVALID_LOGIN_FIELDS_MESSAGE: &str =
    "Existem campos inválidos ou em branco. Verifique os dados e tente novamente.";
pub const DEFAULT_USER_NAME: &str = "Usuário";

// Falha de login já traduzida para a tela
#[derive(Debug, Clone, PartialEq)]
pub struct LoginFailure {
    pub message: String,
    pub field_errors: HashMap<String, Vec<String>>,
}

#[derive(Clone)]
pub struct AuthService {
    repo: AuthRepository,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthService {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            repo: AuthRepository::new(app_state.api.clone()),
            session: app_state.session.clone(),
            navigator: app_state.navigator.clone(),
        }
    }

    /// Autentica, grava a sessão e segue para a lista de produtos.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), LoginFailure> {
        let payload = LoginPayload {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        if let Err(errors) = payload.validate() {
            let err = AppError::from(errors);
            return Err(LoginFailure {
                message: INVALID_LOGIN_FIELDS_MESSAGE.to_string(),
                field_errors: err.field_messages(),
            });
        }

        let response = self.repo.login(&payload).await.map_err(|err| {
            tracing::warn!("Login recusado para {}: {}", payload.email, err);
            let message = if err.is_http_failure() {
                INVALID_CREDENTIALS_MESSAGE
            } else {
                LOGIN_ERROR_MESSAGE
            };
            LoginFailure {
                message: message.to_string(),
                field_errors: HashMap::new(),
            }
        })?;

        self.store_session(&response);
        tracing::info!("🔐 Usuário {} autenticado", response.user.email);
        self.navigator.push(AFTER_LOGIN_ROUTE);
        Ok(())
    }

    fn store_session(&self, response: &LoginResponse) {
        self.session.set(ACCESS_KEY, &response.access);
        self.session.set(REFRESH_KEY, &response.refresh);
        self.session.set(USER_ID_KEY, &response.user.id.to_string());
        match &response.user.nome {
            Some(nome) => self.session.set(USER_NAME_KEY, nome),
            None => self.session.remove(USER_NAME_KEY),
        }
        self.session.set(USER_EMAIL_KEY, &response.user.email);
    }

    pub fn logout(&self) {
        for key in SESSION_KEYS {
            self.session.remove(key);
        }
        tracing::info!("Sessão encerrada");
        self.navigator.push(LOGIN_ROUTE);
    }
}

// Guarda das telas do painel: sem token, volta para o login.
#[derive(Clone)]
pub struct DashboardGuard {
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl DashboardGuard {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            session: app_state.session.clone(),
            navigator: app_state.navigator.clone(),
        }
    }

    /// Nome para o cabeçalho, ou `None` se redirecionou para o login.
    pub fn check(&self) -> Option<String> {
        if AuthContext::from_store(self.session.as_ref()).token().is_none() {
            self.navigator.replace(LOGIN_ROUTE);
            return None;
        }
        let name = self
            .session
            .get(USER_NAME_KEY)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());
        Some(name)
    }
}
