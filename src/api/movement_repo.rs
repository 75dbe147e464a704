// src/api/movement_repo.rs

use reqwest::Method;

use crate::{
    common::error::AppError,
    models::{MovementPayload, MovementReceipt},
    session::AuthContext,
};

use super::ApiClient;

pub const MOVEMENTS_PATH: &str = "/movimentacoes/";

#[derive(Debug, Clone)]
pub struct MovementRepository {
    api: ApiClient,
}

impl MovementRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Registra a movimentação. A resposta já traz o saldo recalculado.
    pub async fn record(
        &self,
        auth: &AuthContext,
        payload: &MovementPayload,
    ) -> Result<MovementReceipt, AppError> {
        self.api
            .send_json(Method::POST, MOVEMENTS_PATH, auth, payload)
            .await
    }
}
