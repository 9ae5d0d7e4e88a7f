//! Case-insensitive substring search over loaded products.

use pdfex_core::NormalizedProduct;

/// Returns `true` if the lowercased `term` occurs in the product's display
/// name, product code, or category.
#[must_use]
pub fn matches(product: &NormalizedProduct, term: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(term);

    contains(&product.display_name)
        || (!product.product_code.is_empty() && contains(&product.product_code))
        || product.category.as_deref().is_some_and(contains)
}

/// Indices into `items` of the products visible under `search_term`.
///
/// A blank term selects every item. Otherwise the term is lowercased but not
/// trimmed, so `" blue"` only matches where a space precedes "blue".
#[must_use]
pub fn visible_indices(items: &[NormalizedProduct], search_term: &str) -> Vec<usize> {
    if search_term.trim().is_empty() {
        return (0..items.len()).collect();
    }

    let term = search_term.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, product)| matches(product, &term))
        .map(|(idx, _)| idx)
        .collect()
}
