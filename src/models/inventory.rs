// src/models/inventory.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::catalog::Product;
use super::resource::{Resource, ResourceMessages};

// --- 1. Locais de Estoque ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLocation {
    pub id: i64,
    #[serde(rename = "setor")]
    pub sector: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct StockLocationForm {
    #[serde(rename = "setor")]
    #[validate(length(min = 1, message = "O setor é obrigatório."))]
    pub sector: String,

    #[serde(rename = "descricao")]
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,
}

impl Resource for StockLocation {
    type Form = StockLocationForm;

    const PATH: &'static str = "/estoques/";

    const MESSAGES: ResourceMessages = ResourceMessages {
        load_failed: "Falha ao carregar estoques.",
        load_error: "Erro ao carregar estoques.",
        create_failed: "Erro ao salvar estoque.",
        created: "Local de estoque cadastrado com sucesso.",
        update_failed: "Erro ao atualizar estoque.",
        updated: "Local de estoque atualizado com sucesso.",
        delete_failed: "Erro ao excluir estoque.",
        deleted: "Local de estoque excluído com sucesso.",
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.sector.as_str(), self.description.as_str()]
    }

    fn to_form(&self) -> StockLocationForm {
        StockLocationForm {
            sector: self.sector.clone(),
            description: self.description.clone(),
        }
    }
}

// --- 2. Movimentações de Estoque ---

// No fio: "E" (Entrada) e "S" (Saída)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementType {
    #[default]
    #[serde(rename = "E")]
    In,
    #[serde(rename = "S")]
    Out,
}

impl MovementType {
    pub fn label(&self) -> &'static str {
        match self {
            MovementType::In => "Entrada",
            MovementType::Out => "Saída",
        }
    }
}

// Formulário do modal "Registrar movimentação".
// Os ids começam em 0, que significa "nada selecionado".
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct MovementForm {
    #[validate(range(min = 1, message = "Selecione um produto"))]
    pub product_id: i64,

    #[validate(range(min = 1, message = "Selecione um estoque"))]
    pub stock_location_id: i64,

    pub movement_type: MovementType,

    #[validate(range(min = 1, message = "Quantidade mínima é 1"))]
    pub quantity: i64,

    #[validate(required(message = "Data obrigatória"))]
    pub moved_at: Option<NaiveDate>,

    pub customer_id: Option<i64>,
}

impl Default for MovementForm {
    fn default() -> Self {
        Self {
            product_id: 0,
            stock_location_id: 0,
            movement_type: MovementType::In,
            quantity: 1,
            moved_at: None,
            customer_id: None,
        }
    }
}

// Corpo do POST /movimentacoes/
#[derive(Debug, Clone, Serialize)]
pub struct MovementPayload {
    #[serde(rename = "id_produto")]
    pub product_id: i64,
    #[serde(rename = "id_estoque")]
    pub stock_location_id: i64,
    #[serde(rename = "id_cliente")]
    pub customer_id: Option<i64>,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    #[serde(rename = "tipo")]
    pub movement_type: MovementType,
    // "YYYY-MM-DDT00:00:00Z". Ausente = o servidor usa "agora".
    #[serde(rename = "movimentedAt", skip_serializing_if = "Option::is_none")]
    pub moved_at: Option<String>,
}

impl MovementPayload {
    pub fn from_form(form: &MovementForm) -> Self {
        Self {
            product_id: form.product_id,
            stock_location_id: form.stock_location_id,
            customer_id: form.customer_id,
            quantity: form.quantity,
            movement_type: form.movement_type,
            moved_at: form
                .moved_at
                .map(|d| format!("{}T00:00:00Z", d.format("%Y-%m-%d"))),
        }
    }
}

// Resposta do POST /movimentacoes/: a movimentação + o saldo calculado pelo servidor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementReceipt {
    pub id: Option<i64>,
    #[serde(rename = "quantidade")]
    pub quantity: Option<i64>,
    #[serde(rename = "tipo")]
    pub movement_type: Option<MovementType>,
    #[serde(rename = "produto")]
    pub product: Option<Product>,

    // Alguns servidores devolvem `quantidade_atual` no lugar de `estoque_atual`
    #[serde(rename = "quantidade_atual")]
    pub resulting_quantity: Option<i64>,
    #[serde(rename = "estoque_atual")]
    pub current_stock: Option<i64>,
    #[serde(rename = "estoque_minimo")]
    pub minimum_stock: Option<i64>,
    // `null` conta como falso
    #[serde(rename = "estoque_abaixo_minimo", default)]
    pub below_minimum: Option<bool>,
}

impl MovementReceipt {
    pub fn resulting_stock(&self) -> Option<i64> {
        self.resulting_quantity.or(self.current_stock)
    }

    pub fn is_below_minimum(&self) -> bool {
        self.below_minimum.unwrap_or(false)
    }
}

// ---
// Classificação do saldo após a movimentação
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockSeverity {
    Ok,
    Warning,
    Critical,
}

// Margem (em unidades) acima do mínimo que ainda conta como alerta.
pub const WARNING_MARGIN: i64 = 3;

impl StockSeverity {
    pub fn classify(current_stock: i64, minimum_stock: i64, below_minimum: bool) -> Self {
        if below_minimum {
            StockSeverity::Critical
        } else if minimum_stock > 0 && current_stock - minimum_stock <= WARNING_MARGIN {
            StockSeverity::Warning
        } else {
            StockSeverity::Ok
        }
    }
}

// Notificação exibida depois de registrar uma movimentação.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementNotice {
    pub message: String,
    pub product_name: String,
    pub type_label: &'static str,
    pub quantity: i64,
    pub current_stock: Option<i64>,
    pub minimum_stock: Option<i64>,
    pub below_minimum: bool,
    pub severity: StockSeverity,
}

impl MovementNotice {
    pub fn new(
        receipt: &MovementReceipt,
        form: &MovementForm,
        fallback_name: Option<&str>,
    ) -> Self {
        let current_stock = receipt.resulting_stock();
        let minimum_stock = receipt.minimum_stock;
        let below_minimum = receipt.is_below_minimum();

        let product_name = receipt
            .product
            .as_ref()
            .map(|p| p.name.clone())
            .or_else(|| fallback_name.map(str::to_string))
            .unwrap_or_else(|| "Produto selecionado".to_string());

        let message = if below_minimum {
            "Estoque abaixo do mínimo após movimentação"
        } else {
            "Movimentação registrada com sucesso"
        };

        Self {
            message: message.to_string(),
            product_name,
            type_label: form.movement_type.label(),
            quantity: form.quantity,
            current_stock,
            minimum_stock,
            below_minimum,
            severity: StockSeverity::classify(
                current_stock.unwrap_or(0),
                minimum_stock.unwrap_or(0),
                below_minimum,
            ),
        }
    }
}
