//! Category catalog
//!
//! Categories are open strings. The catalog only fixes display order for the
//! known ones and the bucket used for items with no category.

/// Known categories, in display order.
pub const CATALOG: [&str; 10] = [
    "Alimentos Básicos",
    "Hortifruti",
    "Carnes e Peixes",
    "Frios e Laticínios",
    "Bebidas",
    "Higiene Pessoal",
    "Limpeza",
    "Padaria",
    "Congelados",
    "Outros",
];

/// Bucket for items without a category.
pub const DEFAULT_CATEGORY: &str = "Outros";

/// Position of a category in the catalog, if it is a known one.
///
/// Matching is exact and case-sensitive.
pub fn catalog_position(category: &str) -> Option<usize> {
    CATALOG.iter().position(|known| *known == category)
}

/// The grouping key for a category: the category itself, or
/// [`DEFAULT_CATEGORY`] when it is empty.
pub fn grouping_key(category: &str) -> &str {
    if category.is_empty() {
        DEFAULT_CATEGORY
    } else {
        category
    }
}
