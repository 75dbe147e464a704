// src/services/log_viewer.rs

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::RwLock;

use crate::{
    api::LogRepository,
    common::error::AppError,
    config::AppState,
    models::Log,
    session::{AuthContext, SessionStore},
};

pub const LOAD_FAILED_MESSAGE: &str = "Falha ao carregar logs.";
pub const LOAD_ERROR_MESSAGE: &str = "Erro ao carregar logs.";
pub const TOGGLE_FAILED_MESSAGE: &str = "Erro ao atualizar log.";

#[derive(Debug, Clone, Default)]
pub struct LogViewerState {
    pub logs: Vec<Log>,
    pub only_active: bool,
    pub error_message: Option<String>,
    pub is_loading: bool,
}

impl LogViewerState {
    pub fn visible_logs(&self) -> Vec<Log> {
        self.logs
            .iter()
            .filter(|log| !self.only_active || log.is_active)
            .cloned()
            .collect()
    }
}

#[derive(Clone)]
pub struct LogViewer {
    repo: LogRepository,
    session: Arc<dyn SessionStore>,
    state: Arc<RwLock<LogViewerState>>,
    load_seq: Arc<AtomicU64>,
}

impl LogViewer {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            repo: LogRepository::new(app_state.api.clone()),
            session: app_state.session.clone(),
            state: Arc::new(RwLock::new(LogViewerState::default())),
            load_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    fn auth(&self) -> AuthContext {
        AuthContext::from_store(self.session.as_ref())
    }

    pub async fn snapshot(&self) -> LogViewerState {
        self.state.read().await.clone()
    }

    pub async fn visible_logs(&self) -> Vec<Log> {
        self.state.read().await.visible_logs()
    }

    pub async fn set_only_active(&self, only_active: bool) {
        self.state.write().await.only_active = only_active;
    }

    pub async fn load(&self) {
        let ticket = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error_message = None;
        }

        let result = self.repo.list(&self.auth()).await;

        let mut state = self.state.write().await;
        if self.load_seq.load(Ordering::SeqCst) != ticket {
            tracing::debug!("Descartando resposta antiga de logs");
            return;
        }
        match result {
            Ok(logs) => state.logs = logs,
            Err(err) => {
                tracing::error!("Falha ao carregar logs: {}", err);
                let message = if err.is_http_failure() {
                    err.user_message(LOAD_FAILED_MESSAGE)
                } else {
                    LOAD_ERROR_MESSAGE.to_string()
                };
                state.error_message = Some(message);
            }
        }
        state.is_loading = false;
    }

    /// Liga/desliga um log no servidor e recarrega a lista.
    pub async fn toggle_active(&self, id: i64, is_active: bool) -> bool {
        self.state.write().await.error_message = None;

        match self.try_toggle(id, is_active).await {
            Ok(log) => {
                tracing::info!("Log {} agora está ativo={}", log.id, log.is_active);
                self.load().await;
                true
            }
            Err(err) => {
                tracing::error!("Falha ao alterar log {}: {}", id, err);
                self.state.write().await.error_message =
                    Some(err.user_message(TOGGLE_FAILED_MESSAGE));
                false
            }
        }
    }

    async fn try_toggle(&self, id: i64, is_active: bool) -> Result<Log, AppError> {
        let auth = self.auth();
        auth.require_token()?;
        self.repo.set_active(&auth, id, is_active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn log(id: i64, is_active: bool) -> Log {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Log {
            id,
            created_at: at,
            updated_at: at,
            is_active,
        }
    }

    #[test]
    fn only_active_filter() {
        let mut state = LogViewerState {
            logs: vec![log(1, true), log(2, false), log(3, true)],
            ..Default::default()
        };
        assert_eq!(state.visible_logs().len(), 3);

        state.only_active = true;
        let ids: Vec<i64> = state.visible_logs().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
