// src/services/product_browser.rs

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::RwLock;

use crate::{
    api::ResourceRepository,
    common::text::filter_by_search,
    config::AppState,
    models::{Product, Resource},
    session::{AuthContext, SessionStore},
};

pub const EMPTY_RESULT_MESSAGE: &str = "Nenhum produto encontrado para o filtro atual.";

#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    pub products: Vec<Product>,
    pub search_text: String,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
    pub is_loading: bool,
}

impl BrowserState {
    pub fn filtered_products(&self) -> Vec<Product> {
        filter_by_search(&self.products, &self.search_text, Product::searchable_fields)
    }

    /// Produtos visíveis com saldo abaixo do mínimo configurado.
    pub fn below_minimum(&self) -> Vec<Product> {
        self.filtered_products()
            .into_iter()
            .filter(Product::is_below_minimum)
            .collect()
    }
}

// Consulta de produtos com busca feita no servidor (somente leitura)
#[derive(Clone)]
pub struct ProductBrowser {
    repo: ResourceRepository<Product>,
    session: Arc<dyn SessionStore>,
    state: Arc<RwLock<BrowserState>>,
    load_seq: Arc<AtomicU64>,
}

impl ProductBrowser {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            repo: ResourceRepository::new(app_state.api.clone()),
            session: app_state.session.clone(),
            state: Arc::new(RwLock::new(BrowserState::default())),
            load_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn snapshot(&self) -> BrowserState {
        self.state.read().await.clone()
    }

    pub async fn set_search_text(&self, text: impl Into<String>) {
        self.state.write().await.search_text = text.into();
    }

    pub async fn load(&self) {
        let ticket = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let term = {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error_message = None;
            state.info_message = None;
            state.search_text.clone()
        };

        let auth = AuthContext::from_store(self.session.as_ref());
        let result = self.repo.search(&auth, &term).await;

        let mut state = self.state.write().await;
        if self.load_seq.load(Ordering::SeqCst) != ticket {
            return;
        }

        match result {
            Ok(products) => {
                if products.is_empty() {
                    state.info_message = Some(EMPTY_RESULT_MESSAGE.to_string());
                }
                tracing::debug!("{} produtos para a busca {:?}", products.len(), term);
                state.products = products;
            }
            Err(err) => {
                tracing::error!("Falha ao buscar produtos: {}", err);
                // Aqui o detail do servidor aparece também na listagem
                let message = if err.is_http_failure() {
                    err.user_message(Product::MESSAGES.load_failed)
                } else {
                    Product::MESSAGES.load_error.to_string()
                };
                state.error_message = Some(message);
            }
        }
        state.is_loading = false;
    }
}
