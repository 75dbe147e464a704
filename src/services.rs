pub mod form_state;
pub use form_state::FormModal;
pub mod resource_controller;
pub use resource_controller::{ListState, ResourceController};
pub mod movement_recorder;
pub use movement_recorder::{MovementRecorder, MovementState};
pub mod product_browser;
pub use product_browser::{BrowserState, ProductBrowser};
pub mod log_viewer;
pub use log_viewer::{LogViewer, LogViewerState};
pub mod auth_service;
pub use auth_service::{AuthService, DashboardGuard, LoginFailure};
pub mod product_wizard;
pub use product_wizard::{ProductWizard, WizardState};

use crate::models::{Category, Customer, Product, StockLocation};

// As quatro telas de cadastro
pub type CategoryController = ResourceController<Category>;
pub type CustomerController = ResourceController<Customer>;
pub type StockLocationController = ResourceController<StockLocation>;
pub type ProductController = ResourceController<Product>;
