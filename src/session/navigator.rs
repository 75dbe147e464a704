// src/session/navigator.rs

use std::sync::{Arc, Mutex};

// Rotas usadas pelos fluxos de sessão
pub const LOGIN_ROUTE: &str = "/login";
pub const AFTER_LOGIN_ROUTE: &str = "/dashboard/products";
pub const AFTER_PRODUCT_WIZARD_ROUTE: &str = "/products";

/// Capacidade de "ir para a rota X", fornecida pela camada de apresentação.
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);

    // Sem suporte a histórico, substituir é o mesmo que empilhar
    fn replace(&self, path: &str) {
        self.push(path);
    }
}

// Guarda as rotas visitadas. Útil no binário de console e nos testes.
#[derive(Debug, Clone, Default)]
pub struct HistoryNavigator {
    visited: Arc<Mutex<Vec<String>>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn current(&self) -> Option<String> {
        self.visited().last().cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, path: &str) {
        tracing::debug!("Navegando para {}", path);
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_string());
    }
}
