// src/models/catalog.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::resource::{Resource, ResourceMessages};

// --- 1. Categorias ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CategoryForm {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[serde(rename = "descricao")]
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,
}

impl Resource for Category {
    type Form = CategoryForm;

    const PATH: &'static str = "/categorias/";

    const MESSAGES: ResourceMessages = ResourceMessages {
        load_failed: "Falha ao carregar categorias.",
        load_error: "Erro ao carregar categorias.",
        create_failed: "Erro ao salvar categoria.",
        created: "Categoria cadastrada com sucesso.",
        update_failed: "Erro ao atualizar categoria.",
        updated: "Categoria atualizada com sucesso.",
        delete_failed: "Erro ao excluir categoria.",
        deleted: "Categoria excluída com sucesso.",
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn to_form(&self) -> CategoryForm {
        CategoryForm {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

// --- 2. Produtos ---
// `estoque_atual` é calculado pelo servidor (entradas - saídas), só leitura.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(default)]
    pub sku: String,
    #[serde(rename = "estoque_minimo", default)]
    pub minimum_stock: i64,
    #[serde(rename = "estoque_atual", default)]
    pub current_stock: i64,
}

impl Product {
    pub fn is_below_minimum(&self) -> bool {
        self.current_stock < self.minimum_stock
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[serde(rename = "descricao")]
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,

    #[serde(rename = "estoque_minimo")]
    #[validate(range(min = 0, message = "Valor mínimo é 0"))]
    pub minimum_stock: i64,
}

impl Resource for Product {
    type Form = ProductForm;

    const PATH: &'static str = "/produtos/";

    const MESSAGES: ResourceMessages = ResourceMessages {
        load_failed: "Falha ao carregar produtos.",
        load_error: "Erro ao carregar produtos.",
        create_failed: "Erro ao salvar produto.",
        created: "Produto cadastrado com sucesso.",
        update_failed: "Erro ao salvar produto.",
        updated: "Produto atualizado com sucesso.",
        delete_failed: "Erro ao excluir produto.",
        deleted: "Produto excluído com sucesso.",
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str(), self.sku.as_str()]
    }

    fn to_form(&self) -> ProductForm {
        ProductForm {
            name: self.name.clone(),
            description: self.description.clone(),
            sku: self.sku.clone(),
            minimum_stock: self.minimum_stock,
        }
    }
}

// --- 3. Cadastro guiado de produto ---
// Produto + categoria/estoque (existentes ou novos) + quantidade inicial.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewProductForm {
    #[validate(length(min = 1, message = "Nome obrigatório"))]
    pub name: String,

    #[validate(length(min = 1, message = "Descrição obrigatória"))]
    pub description: String,

    #[validate(length(min = 1, message = "SKU obrigatório"))]
    pub sku: String,

    #[validate(range(min = 1, message = "Quantidade obrigatória"))]
    pub quantity: i64,

    pub existing_category_id: Option<i64>,
    pub new_category: String,

    pub existing_stock_location_id: Option<i64>,
    pub new_stock_location: String,
}

impl Default for NewProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            sku: String::new(),
            quantity: 1,
            existing_category_id: None,
            new_category: String::new(),
            existing_stock_location_id: None,
            new_stock_location: String::new(),
        }
    }
}

// Corpo do POST /produtos/ no cadastro guiado (o mínimo fica com o padrão do servidor)
#[derive(Debug, Clone, Serialize)]
pub struct NewProductPayload<'a> {
    #[serde(rename = "nome")]
    pub name: &'a str,
    #[serde(rename = "descricao")]
    pub description: &'a str,
    pub sku: &'a str,
}

impl<'a> From<&'a NewProductForm> for NewProductPayload<'a> {
    fn from(form: &'a NewProductForm) -> Self {
        Self {
            name: &form.name,
            description: &form.description,
            sku: &form.sku,
        }
    }
}
