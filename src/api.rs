pub mod api_client;
pub use api_client::{ApiClient, ListEnvelope};
pub mod resource_repo;
pub use resource_repo::ResourceRepository;
pub mod movement_repo;
pub use movement_repo::MovementRepository;
pub mod auth_repo;
pub use auth_repo::AuthRepository;
pub mod log_repo;
pub use log_repo::LogRepository;
