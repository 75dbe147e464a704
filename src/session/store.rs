// src/session/store.rs

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

// Chaves gravadas no login (mesmos nomes do armazenamento do navegador)
pub const ACCESS_KEY: &str = "access";
pub const REFRESH_KEY: &str = "refresh";
pub const USER_ID_KEY: &str = "user_id";
pub const USER_NAME_KEY: &str = "user_nome";
pub const USER_EMAIL_KEY: &str = "user_email";

pub const SESSION_KEYS: [&str; 5] = [
    ACCESS_KEY,
    REFRESH_KEY,
    USER_ID_KEY,
    USER_NAME_KEY,
    USER_EMAIL_KEY,
];

/// Armazenamento chave-valor da sessão.
///
/// Só o fluxo de login escreve; os controllers apenas leem o token a cada
/// requisição.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

// Implementação em memória, compartilhável entre controllers.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(ACCESS_KEY, token);
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        // Lock envenenado: ainda dá para ler o mapa
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
    }
}
