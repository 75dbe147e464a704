// src/api/log_repo.rs

use reqwest::Method;

use crate::{
    common::error::AppError,
    models::logs::{Log, LogActivationPayload},
    session::AuthContext,
};

use super::ApiClient;

pub const LOGS_PATH: &str = "/logs/";

#[derive(Debug, Clone)]
pub struct LogRepository {
    api: ApiClient,
}

impl LogRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, auth: &AuthContext) -> Result<Vec<Log>, AppError> {
        self.api.get_list(LOGS_PATH, auth, &[]).await
    }

    // PUT /logs/{id}/ativar-desativar/
    pub async fn set_active(
        &self,
        auth: &AuthContext,
        id: i64,
        is_active: bool,
    ) -> Result<Log, AppError> {
        let path = format!("{LOGS_PATH}{id}/ativar-desativar/");
        self.api
            .send_json(Method::PUT, &path, auth, &LogActivationPayload { is_active })
            .await
    }
}
