// src/models/resource.rs

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

// Textos fixos exibidos por cada tela de cadastro.
#[derive(Debug, Clone, Copy)]
pub struct ResourceMessages {
    pub load_failed: &'static str,  // resposta não-2xx na listagem
    pub load_error: &'static str,   // falha de rede/JSON na listagem
    pub create_failed: &'static str,
    pub created: &'static str,
    pub update_failed: &'static str,
    pub updated: &'static str,
    pub delete_failed: &'static str,
    pub deleted: &'static str,
}

/// Um recurso REST com CRUD completo (ou parcial) exposto pelo backend.
///
/// Cada entidade diz onde mora (`PATH`), quais campos entram na busca e
/// como vira formulário de edição. O resto do fluxo é genérico.
pub trait Resource: Debug + Clone + Send + Sync + DeserializeOwned + 'static {
    /// Valores do formulário de criar/editar. `Default` é o formulário vazio.
    type Form: Debug + Validate + Serialize + Default + Clone + Send + Sync + 'static;

    /// Caminho da coleção, relativo à base da API (ex: "/categorias/").
    const PATH: &'static str;

    const DELETABLE: bool = true;

    const MESSAGES: ResourceMessages;

    fn id(&self) -> i64;

    fn searchable_fields(&self) -> Vec<&str>;

    fn to_form(&self) -> Self::Form;

    fn item_path(id: i64) -> String {
        format!("{}{}/", Self::PATH, id)
    }
}
