pub mod auth;
pub mod navigator;
pub mod store;

pub use auth::AuthContext;
pub use navigator::{HistoryNavigator, Navigator};
pub use store::{MemorySessionStore, SessionStore};
