// src/models/crm.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::resource::{Resource, ResourceMessages};

// --- CLIENTE ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CustomerForm {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[serde(rename = "telefone")]
    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub phone: String,
}

impl Resource for Customer {
    type Form = CustomerForm;

    const PATH: &'static str = "/clientes/";

    // O backend responde 405 para DELETE em clientes.
    const DELETABLE: bool = false;

    const MESSAGES: ResourceMessages = ResourceMessages {
        load_failed: "Falha ao carregar clientes.",
        load_error: "Erro ao carregar clientes.",
        create_failed: "Erro ao salvar cliente.",
        created: "Cliente cadastrado com sucesso.",
        update_failed: "Erro ao atualizar cliente.",
        updated: "Cliente atualizado com sucesso.",
        delete_failed: "Erro ao excluir cliente.",
        deleted: "Cliente excluído com sucesso.",
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()]
    }

    fn to_form(&self) -> CustomerForm {
        CustomerForm {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str) -> CustomerForm {
        CustomerForm {
            name: "Maria".into(),
            email: email.into(),
            phone: "11 99999-0000".into(),
        }
    }

    #[test]
    fn valid_email_passes() {
        assert!(form("maria@exemplo.com").validate().is_ok());
    }

    #[test]
    fn malformed_email_fails() {
        let errors = form("maria@").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(form("").validate().is_err());
    }

    #[test]
    fn search_covers_name_email_and_phone() {
        let c = Customer {
            id: 1,
            name: "Maria".into(),
            email: "maria@exemplo.com".into(),
            phone: "1199".into(),
        };
        assert_eq!(c.searchable_fields(), vec!["Maria", "maria@exemplo.com", "1199"]);
        assert_eq!(serde_json::to_value(c.to_form()).unwrap()["telefone"], "1199");
    }
}
