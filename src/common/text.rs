// src/common/text.rs

use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

// ---
// Filtro de busca (lado do cliente)
// ---

/// Verdadeiro se os campos, unidos por espaço e em minúsculas, contêm o termo.
pub fn matches_search(fields: &[&str], term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    fields
        .join(" ")
        .to_lowercase()
        .contains(&term.to_lowercase())
}

/// Subsequência de `items` que casa com `term`, na ordem original.
pub fn filter_by_search<T, F>(items: &[T], term: &str, fields: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Vec<&str>,
{
    items
        .iter()
        .filter(|item| matches_search(&fields(item), term))
        .cloned()
        .collect()
}

// ---
// Ordenação por nome
// ---

// "Água" -> "agua": decompõe (NFD), descarta os acentos e põe em minúsculas
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Comparação "tipo locale": primeiro sem acento e sem caixa, depois o acento,
/// e por fim minúsculas antes de maiúsculas.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Ordena de forma estável e ascendente pelo nome.
pub fn sort_by_name<T, F>(items: &mut [T], name: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| compare_names(name(a), name(b)));
}
