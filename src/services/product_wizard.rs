// src/services/product_wizard.rs

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use validator::Validate;

use crate::{
    api::{MovementRepository, ResourceRepository},
    common::error::AppError,
    config::AppState,
    models::{
        Category, CategoryForm, MovementPayload, MovementType, NewProductForm, NewProductPayload,
        Product, StockLocation, StockLocationForm,
    },
    session::{navigator::AFTER_PRODUCT_WIZARD_ROUTE, AuthContext, Navigator, SessionStore},
};

pub const NOT_AUTHENTICATED_MESSAGE: &str = "Usuário não autenticado. Faça login novamente.";
pub const MISSING_CATEGORY_MESSAGE: &str = "Selecione ou cadastre uma categoria.";
pub const MISSING_STOCK_LOCATION_MESSAGE: &str = "Selecione ou cadastre um estoque.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Erro inesperado.";
// Setor usado quando o estoque é criado a partir do cadastro de produto
pub const DEFAULT_SECTOR: &str = "Padrão";

#[derive(Debug, Clone, Copy)]
enum Step {
    Category,
    StockLocation,
    Product,
    InitialMovement,
}

impl Step {
    fn fallback(self) -> &'static str {
        match self {
            Step::Category => "Erro ao criar categoria",
            Step::StockLocation => "Erro ao criar estoque",
            Step::Product => "Erro ao salvar produto",
            Step::InitialMovement => "Erro ao registrar movimentação inicial",
        }
    }
}

// Uma falha do fluxo, já presa à etapa em que aconteceu
#[derive(Debug)]
struct StepFailure {
    step: Option<Step>,
    error: AppError,
}

impl StepFailure {
    fn at(step: Step) -> impl FnOnce(AppError) -> Self {
        move |error| Self {
            step: Some(step),
            error,
        }
    }

    fn message(&self) -> String {
        match (&self.error, self.step) {
            (AppError::NotAuthenticated, _) => NOT_AUTHENTICATED_MESSAGE.to_string(),
            (AppError::Rule(text), _) => text.clone(),
            (AppError::Api { .. }, Some(step)) => self.error.user_message(step.fallback()),
            _ => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<AppError> for StepFailure {
    fn from(error: AppError) -> Self {
        Self { step: None, error }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WizardState {
    pub categories: Vec<Category>,
    pub stock_locations: Vec<StockLocation>,
    pub form: NewProductForm,
    pub field_errors: HashMap<String, Vec<String>>,
    pub server_error: Option<String>,
    pub success: bool,
}

/// Cadastro de produto em etapas: categoria, estoque, produto e a entrada inicial.
#[derive(Clone)]
pub struct ProductWizard {
    categories: ResourceRepository<Category>,
    stock_locations: ResourceRepository<StockLocation>,
    products: ResourceRepository<Product>,
    movements: MovementRepository,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    state: Arc<RwLock<WizardState>>,
}

impl ProductWizard {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            categories: ResourceRepository::new(app_state.api.clone()),
            stock_locations: ResourceRepository::new(app_state.api.clone()),
            products: ResourceRepository::new(app_state.api.clone()),
            movements: MovementRepository::new(app_state.api.clone()),
            session: app_state.session.clone(),
            navigator: app_state.navigator.clone(),
            state: Arc::new(RwLock::new(WizardState::default())),
        }
    }

    pub async fn snapshot(&self) -> WizardState {
        self.state.read().await.clone()
    }

    // As listas de escolha são opcionais: uma falha aqui só vai para o log.
    pub async fn load_options(&self) {
        let auth = AuthContext::from_store(self.session.as_ref());
        let (categories, locations) = tokio::join!(
            self.categories.list(&auth),
            self.stock_locations.list(&auth)
        );

        let mut state = self.state.write().await;
        match categories {
            Ok(items) => state.categories = items,
            Err(err) => tracing::warn!("Erro ao carregar categorias: {}", err),
        }
        match locations {
            Ok(items) => state.stock_locations = items,
            Err(err) => tracing::warn!("Erro ao carregar estoques: {}", err),
        }
    }

    pub async fn submit(&self, values: NewProductForm) -> bool {
        {
            let mut state = self.state.write().await;
            state.server_error = None;
            state.success = false;
            state.field_errors.clear();
            state.form = values.clone();
        }

        if let Err(errors) = values.validate() {
            let err = AppError::from(errors);
            self.state.write().await.field_errors = err.field_messages();
            return false;
        }

        match self.run(&values).await {
            Ok(product) => {
                tracing::info!(
                    "✅ Produto '{}' cadastrado com {} un.",
                    product.name,
                    values.quantity
                );
                {
                    let mut state = self.state.write().await;
                    state.success = true;
                    state.form = NewProductForm::default();
                }
                self.navigator.push(AFTER_PRODUCT_WIZARD_ROUTE);
                true
            }
            Err(failure) => {
                tracing::error!(
                    "Cadastro de produto interrompido ({:?}): {}",
                    failure.step,
                    failure.error
                );
                self.state.write().await.server_error = Some(failure.message());
                false
            }
        }
    }

    async fn run(&self, values: &NewProductForm) -> Result<Product, StepFailure> {
        let auth = AuthContext::from_store(self.session.as_ref());
        auth.require_token()?;

        let category_id = self.resolve_category(&auth, values).await?;
        tracing::debug!("Categoria resolvida: {}", category_id);
        let stock_location_id = self.resolve_stock_location(&auth, values).await?;

        let product = self
            .products
            .create_returning(&auth, &NewProductPayload::from(values))
            .await
            .map_err(StepFailure::at(Step::Product))?;

        let movement = MovementPayload {
            product_id: product.id,
            stock_location_id,
            customer_id: None,
            quantity: values.quantity,
            movement_type: MovementType::In,
            moved_at: None,
        };
        self.movements
            .record(&auth, &movement)
            .await
            .map_err(StepFailure::at(Step::InitialMovement))?;

        Ok(product)
    }

    async fn resolve_category(
        &self,
        auth: &AuthContext,
        values: &NewProductForm,
    ) -> Result<i64, StepFailure> {
        if let Some(id) = values.existing_category_id {
            return Ok(id);
        }
        let name = values.new_category.trim();
        if name.is_empty() {
            return Err(AppError::Rule(MISSING_CATEGORY_MESSAGE.to_string()).into());
        }

        // Categoria nova: a descrição repete o nome
        let body = CategoryForm {
            name: values.new_category.clone(),
            description: values.new_category.clone(),
        };
        let created = self
            .categories
            .create_returning(auth, &body)
            .await
            .map_err(StepFailure::at(Step::Category))?;
        Ok(created.id)
    }

    async fn resolve_stock_location(
        &self,
        auth: &AuthContext,
        values: &NewProductForm,
    ) -> Result<i64, StepFailure> {
        if let Some(id) = values.existing_stock_location_id {
            return Ok(id);
        }
        if values.new_stock_location.trim().is_empty() {
            return Err(AppError::Rule(MISSING_STOCK_LOCATION_MESSAGE.to_string()).into());
        }

        let body = StockLocationForm {
            sector: DEFAULT_SECTOR.to_string(),
            description: values.new_stock_location.clone(),
        };
        let created = self
            .stock_locations
            .create_returning(auth, &body)
            .await
            .map_err(StepFailure::at(Step::StockLocation))?;
        Ok(created.id)
    }
}
