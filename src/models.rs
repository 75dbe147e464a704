pub mod resource;
pub mod catalog;
pub mod crm;
pub mod inventory;
pub mod logs;
pub mod auth;

pub use resource::{Resource, ResourceMessages};
pub use catalog::{Category, CategoryForm, NewProductForm, NewProductPayload, Product, ProductForm};
pub use crm::{Customer, CustomerForm};
pub use inventory::{
    MovementForm, MovementNotice, MovementPayload, MovementReceipt, MovementType, StockLocation,
    StockLocationForm, StockSeverity,
};
pub use logs::Log;
