// src/services/movement_recorder.rs

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::RwLock;
use validator::Validate;

use crate::{
    api::{MovementRepository, ResourceRepository},
    common::{
        error::AppError,
        text::{filter_by_search, sort_by_name},
    },
    config::AppState,
    models::{
        MovementForm, MovementNotice, MovementPayload, MovementReceipt, Product, StockLocation,
    },
    session::{AuthContext, SessionStore},
};

use super::form_state::FormModal;

pub const LOAD_FAILED_MESSAGE: &str = "Falha ao carregar dados de produtos/estoques.";
pub const LOAD_ERROR_MESSAGE: &str = "Erro ao carregar dados.";
pub const RECORD_FAILED_MESSAGE: &str = "Erro ao registrar movimentação.";

#[derive(Debug, Clone, Default)]
pub struct MovementState {
    /// Sempre ordenados por nome.
    pub products: Vec<Product>,
    pub stock_locations: Vec<StockLocation>,
    pub search_text: String,
    pub error_message: Option<String>,
    pub is_loading: bool,
    pub modal: FormModal<MovementForm>,
    // Resultado da última movimentação registrada
    pub notice: Option<MovementNotice>,
}

impl MovementState {
    pub fn filtered_products(&self) -> Vec<Product> {
        filter_by_search(&self.products, &self.search_text, |p| {
            vec![p.name.as_str(), p.sku.as_str()]
        })
    }
}

/// Tela de gestão de estoque: produtos + locais, e o registro de entradas/saídas.
#[derive(Clone)]
pub struct MovementRecorder {
    products: ResourceRepository<Product>,
    stock_locations: ResourceRepository<StockLocation>,
    movements: MovementRepository,
    session: Arc<dyn SessionStore>,
    state: Arc<RwLock<MovementState>>,
    load_seq: Arc<AtomicU64>,
}

impl MovementRecorder {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            products: ResourceRepository::new(app_state.api.clone()),
            stock_locations: ResourceRepository::new(app_state.api.clone()),
            movements: MovementRepository::new(app_state.api.clone()),
            session: app_state.session.clone(),
            state: Arc::new(RwLock::new(MovementState::default())),
            load_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn snapshot(&self) -> MovementState {
        self.state.read().await.clone()
    }

    pub async fn filtered_products(&self) -> Vec<Product> {
        self.state.read().await.filtered_products()
    }

    pub async fn set_search_text(&self, text: impl Into<String>) {
        self.state.write().await.search_text = text.into();
    }

    /// Carrega produtos e locais em paralelo. Se qualquer um falhar, nada é trocado.
    pub async fn load(&self) {
        let ticket = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error_message = None;
        }

        let auth = AuthContext::from_store(self.session.as_ref());
        let (products, locations) = tokio::join!(
            self.products.list(&auth),
            self.stock_locations.list(&auth)
        );

        let mut state = self.state.write().await;
        if self.load_seq.load(Ordering::SeqCst) != ticket {
            tracing::debug!("Descartando resposta antiga de produtos/estoques");
            return;
        }

        match (products, locations) {
            (Ok(mut products), Ok(locations)) => {
                sort_by_name(&mut products, |p| p.name.as_str());
                state.products = products;
                state.stock_locations = locations;
            }
            (products, locations) => {
                let errors: Vec<AppError> = [products.err(), locations.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                for err in &errors {
                    tracing::error!("Falha ao carregar dados do estoque: {}", err);
                }
                let message = if errors.iter().all(AppError::is_http_failure) {
                    LOAD_FAILED_MESSAGE
                } else {
                    LOAD_ERROR_MESSAGE
                };
                state.error_message = Some(message.to_string());
            }
        }
        state.is_loading = false;
    }

    pub async fn open_modal(&self) {
        let mut state = self.state.write().await;
        state.error_message = None;
        state.notice = None;
        state.modal = FormModal::opened_with(MovementForm::default());
    }

    pub async fn close_modal(&self) {
        self.state.write().await.modal.reset();
    }

    // Clicar numa linha da tabela escolhe o produto no formulário
    pub async fn select_product(&self, product_id: i64) {
        self.state.write().await.modal.form.product_id = product_id;
    }

    pub async fn dismiss_notice(&self) {
        self.state.write().await.notice = None;
    }

    /// Registra a movimentação e recarrega tudo. Devolve `true` em caso de sucesso.
    pub async fn submit(&self, values: MovementForm) -> bool {
        // Nome conhecido antes do recarregamento, caso o servidor não mande o produto
        let fallback_name = {
            let mut state = self.state.write().await;
            state.error_message = None;
            state.notice = None;
            state.modal.form = values.clone();
            state.modal.field_errors.clear();
            state
                .products
                .iter()
                .find(|p| p.id == values.product_id)
                .map(|p| p.name.clone())
        };

        let receipt = match self.try_record(&values).await {
            Ok(receipt) => receipt,
            Err(err) => {
                let mut state = self.state.write().await;
                if let AppError::ValidationError(_) = err {
                    state.modal.record_validation(&err);
                } else {
                    tracing::error!("Falha ao registrar movimentação: {}", err);
                    state.error_message = Some(err.user_message(RECORD_FAILED_MESSAGE));
                }
                return false;
            }
        };

        self.load().await;

        let notice = MovementNotice::new(&receipt, &values, fallback_name.as_deref());
        tracing::info!(
            "📦 {} de {} un. de '{}' (saldo {:?}, {:?})",
            notice.type_label,
            notice.quantity,
            notice.product_name,
            notice.current_stock,
            notice.severity
        );

        let mut state = self.state.write().await;
        state.notice = Some(notice);
        state.modal.reset();
        true
    }

    async fn try_record(&self, values: &MovementForm) -> Result<MovementReceipt, AppError> {
        values.validate()?;
        let auth = AuthContext::from_store(self.session.as_ref());
        auth.require_token()?;
        self.movements
            .record(&auth, &MovementPayload::from_form(values))
            .await
    }
}
