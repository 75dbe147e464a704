// src/services/resource_controller.rs

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::RwLock;
use validator::Validate;

use crate::{
    api::ResourceRepository,
    common::{error::AppError, text::filter_by_search},
    config::AppState,
    models::Resource,
    session::{AuthContext, SessionStore},
};

use super::form_state::FormModal;

// ---
// Estado de uma tela de cadastro
// ---
#[derive(Debug, Clone)]
pub struct ListState<R: Resource> {
    pub items: Vec<R>,
    pub search_text: String,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
    pub is_loading: bool,
    pub create_modal: FormModal<R::Form>,
    pub edit_modal: FormModal<R::Form>,
    pub edit_target: Option<R>,
    pub delete_target: Option<R>,
}

impl<R: Resource> Default for ListState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_text: String::new(),
            error_message: None,
            info_message: None,
            is_loading: false,
            create_modal: FormModal::default(),
            edit_modal: FormModal::default(),
            edit_target: None,
            delete_target: None,
        }
    }
}

impl<R: Resource> ListState<R> {
    /// Itens cuja junção dos campos pesquisáveis contém o texto de busca.
    pub fn filtered_items(&self) -> Vec<R> {
        filter_by_search(&self.items, &self.search_text, R::searchable_fields)
    }

    fn clear_messages(&mut self) {
        self.error_message = None;
        self.info_message = None;
    }
}

#[derive(Debug, Clone, Copy)]
enum Modal {
    Create,
    Edit,
    Hidden,
}

/// Controller genérico de uma coleção REST (listar, criar, editar, excluir).
///
/// Toda escrita bem-sucedida recarrega a coleção inteira do servidor; não há
/// merge local. É um handle barato de clonar: os clones compartilham o estado.
#[derive(Clone)]
pub struct ResourceController<R: Resource> {
    repo: ResourceRepository<R>,
    session: Arc<dyn SessionStore>,
    state: Arc<RwLock<ListState<R>>>,
    // Cada load() pega um número; só o mais recente pode gravar o resultado.
    load_seq: Arc<AtomicU64>,
}

impl<R: Resource> ResourceController<R> {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            repo: ResourceRepository::new(app_state.api.clone()),
            session: app_state.session.clone(),
            state: Arc::new(RwLock::new(ListState::default())),
            load_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    fn auth(&self) -> AuthContext {
        AuthContext::from_store(self.session.as_ref())
    }

    pub async fn snapshot(&self) -> ListState<R> {
        self.state.read().await.clone()
    }

    pub async fn filtered_items(&self) -> Vec<R> {
        self.state.read().await.filtered_items()
    }

    pub async fn set_search_text(&self, text: impl Into<String>) {
        self.state.write().await.search_text = text.into();
    }

    // ---
    // Listagem
    // ---
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
            // Um load() mais novo já está em andamento e é dono do resultado.
            tracing::debug!("Descartando resposta antiga de {}", R::PATH);
            return;
        }

        match result {
            Ok(items) => {
                tracing::debug!("{} itens carregados de {}", items.len(), R::PATH);
                state.items = items;
            }
            Err(err) => {
                // Mantém os itens antigos visíveis
                let message = if err.is_http_failure() {
                    R::MESSAGES.load_failed
                } else {
                    R::MESSAGES.load_error
                };
                tracing::error!("Falha ao listar {}: {}", R::PATH, err);
                state.error_message = Some(message.to_string());
            }
        }
        state.is_loading = false;
    }

    // ---
    // Modais
    // ---
    pub async fn open_create_modal(&self) {
        let mut state = self.state.write().await;
        state.clear_messages();
        state.create_modal = FormModal::opened_with(Default::default());
    }

    pub async fn close_create_modal(&self) {
        self.state.write().await.create_modal.reset();
    }

    pub async fn open_edit_modal(&self, item: R) {
        let mut state = self.state.write().await;
        state.edit_modal = FormModal::opened_with(item.to_form());
        state.edit_target = Some(item);
    }

    pub async fn close_edit_modal(&self) {
        let mut state = self.state.write().await;
        state.edit_modal.open = false;
        state.edit_modal.field_errors.clear();
        state.edit_target = None;
    }

    pub async fn request_delete(&self, item: R) {
        self.state.write().await.delete_target = Some(item);
    }

    pub async fn cancel_delete(&self) {
        self.state.write().await.delete_target = None;
    }

    // ---
    // Escritas
    // ---

    /// Cria um item. Devolve `true` se o servidor aceitou.
    pub async fn submit_create(&self, values: R::Form) -> bool {
        {
            let mut state = self.state.write().await;
            state.clear_messages();
            state.create_modal.form = values.clone();
            state.create_modal.field_errors.clear();
        }

        let result = self.try_create(&values).await;
        match result {
            Ok(()) => {
                self.load().await;
                let mut state = self.state.write().await;
                state.info_message = Some(R::MESSAGES.created.to_string());
                state.create_modal.reset();
                tracing::info!("✅ Item criado em {}", R::PATH);
                true
            }
            Err(err) => {
                self.report(err, R::MESSAGES.create_failed, Modal::Create).await;
                false
            }
        }
    }

    async fn try_create(&self, values: &R::Form) -> Result<(), AppError> {
        values.validate()?;
        let auth = self.auth();
        auth.require_token()?;
        self.repo.create(&auth, values).await?;
        Ok(())
    }

    /// Atualização parcial (PATCH) do item em edição. Sem alvo, não faz nada.
    pub async fn submit_edit(&self, values: R::Form) -> bool {
        let target_id = {
            let mut state = self.state.write().await;
            let Some(target_id) = state.edit_target.as_ref().map(R::id) else {
                return false;
            };
            state.clear_messages();
            state.edit_modal.form = values.clone();
            state.edit_modal.field_errors.clear();
            target_id
        };

        match self.try_update(target_id, &values).await {
            Ok(()) => {
                self.load().await;
                let mut state = self.state.write().await;
                state.info_message = Some(R::MESSAGES.updated.to_string());
                state.edit_modal.open = false;
                state.edit_target = None;
                tracing::info!("✅ Item {} atualizado em {}", target_id, R::PATH);
                true
            }
            Err(err) => {
                self.report(err, R::MESSAGES.update_failed, Modal::Edit).await;
                false
            }
        }
    }

    async fn try_update(&self, id: i64, values: &R::Form) -> Result<(), AppError> {
        values.validate()?;
        let auth = self.auth();
        auth.require_token()?;
        self.repo.update(&auth, id, values).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> bool {
        self.state.write().await.clear_messages();

        match self.try_delete(id).await {
            Ok(()) => {
                self.load().await;
                let mut state = self.state.write().await;
                state.info_message = Some(R::MESSAGES.deleted.to_string());
                state.delete_target = None;
                tracing::info!("🗑️ Item {} excluído de {}", id, R::PATH);
                true
            }
            Err(err) => {
                self.report(err, R::MESSAGES.delete_failed, Modal::Hidden).await;
                false
            }
        }
    }

    /// Exclui o item guardado em `delete_target` (confirmação do diálogo).
    pub async fn confirm_delete(&self) -> bool {
        let target = self.state.read().await.delete_target.as_ref().map(R::id);
        match target {
            Some(id) => self.delete(id).await,
            None => false,
        }
    }

    async fn try_delete(&self, id: i64) -> Result<(), AppError> {
        let auth = self.auth();
        auth.require_token()?;
        self.repo.delete(&auth, id).await
    }

    // Converte qualquer falha em estado visível; nada escapa para quem chamou.
    async fn report(&self, err: AppError, fallback: &str, modal: Modal) {
        let mut state = self.state.write().await;

        if let AppError::ValidationError(_) = err {
            match modal {
                Modal::Create => state.create_modal.record_validation(&err),
                Modal::Edit => state.edit_modal.record_validation(&err),
                Modal::Hidden => {}
            }
            return;
        }

        tracing::error!("Falha em {}: {}", R::PATH, err);
        state.error_message = Some(err.user_message(fallback));
    }
}
