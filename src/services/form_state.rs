// src/services/form_state.rs

use std::collections::HashMap;

use crate::common::error::AppError;

/// Um modal com formulário: visibilidade, valores digitados e erros por campo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormModal<F> {
    pub open: bool,
    pub form: F,
    pub field_errors: HashMap<String, Vec<String>>,
}

impl<F: Default> FormModal<F> {
    pub fn opened_with(form: F) -> Self {
        Self {
            open: true,
            form,
            field_errors: HashMap::new(),
        }
    }

    // Fecha e volta para o formulário vazio
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record_validation(&mut self, err: &AppError) {
        self.field_errors = err.field_messages();
    }
}
