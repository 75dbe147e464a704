// src/api/auth_repo.rs

use reqwest::Method;

use crate::{
    common::error::AppError,
    models::auth::{LoginPayload, LoginResponse},
    session::AuthContext,
};

use super::ApiClient;

pub const LOGIN_PATH: &str = "/login/";

#[derive(Debug, Clone)]
pub struct AuthRepository {
    api: ApiClient,
}

impl AuthRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // Login é sempre anônimo
    pub async fn login(&self, payload: &LoginPayload) -> Result<LoginResponse, AppError> {
        self.api
            .send_json(Method::POST, LOGIN_PATH, &AuthContext::anonymous(), payload)
            .await
    }
}
