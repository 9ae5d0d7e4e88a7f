//! Display-ready view of the session: one [`ProductCardView`] per visible
//! product plus the page-level flags the templates branch on.

use std::fmt;

use pdfex_core::NormalizedProduct;
use serde::Serialize;

use crate::state::CatalogueState;

/// One `label: value` row in the card's dimensions block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionLine {
    pub label: String,
    pub value: String,
}

impl fmt::Display for DimensionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCardView {
    pub product_code: String,
    pub display_name: String,
    pub category: Option<String>,
    /// `None` renders the "no image" placeholder.
    pub primary_image: Option<String>,
    /// Images after the first; `None` means the gallery region is omitted.
    pub gallery: Option<Vec<String>>,
    /// e.g. `"EUR 12.50"`; `None` when there is no price or it is zero.
    pub price: Option<String>,
    pub spec_features: Vec<String>,
    pub dimensions: Vec<DimensionLine>,
    /// e.g. `"Pack of 6"`; `None` when absent or zero.
    pub pack_quantity: Option<String>,
}

impl From<&NormalizedProduct> for ProductCardView {
    fn from(product: &NormalizedProduct) -> Self {
        let price = product.price.filter(|p| !p.is_zero()).map(|p| {
            match product.currency.as_deref() {
                Some(currency) => format!("{currency} {p}"),
                None => p.to_string(),
            }
        });

        Self {
            product_code: product.product_code.clone(),
            display_name: product.display_name.clone(),
            category: product.category.clone(),
            primary_image: product.primary_image().map(str::to_owned),
            gallery: product.secondary_images().map(<[String]>::to_vec),
            price,
            spec_features: product.spec_features.clone(),
            dimensions: product
                .dimensions
                .iter()
                .map(|(label, dimension)| DimensionLine {
                    label: label.clone(),
                    value: dimension.display_value(),
                })
                .collect(),
            pack_quantity: product
                .pack_quantity
                .filter(|&n| n != 0)
                .map(|n| format!("Pack of {n}")),
        }
    }
}

/// Snapshot of everything the page template needs.
#[derive(Debug, Clone, Serialize)]
pub struct CataloguePage {
    pub cards: Vec<ProductCardView>,
    pub search_term: String,
    pub error_message: Option<String>,
    pub loading: bool,
    pub show_load_more: bool,
    pub show_empty_state: bool,
    pub loaded_count: usize,
    pub current_page_index: u64,
}

impl CataloguePage {
    /// The page as seen with `search_term`, whether or not it is the
    /// session's own term.
    #[must_use]
    pub fn for_search(state: &CatalogueState, search_term: &str) -> Self {
        let visible = state.visible_for(search_term);
        let items = state.items();
        Self {
            cards: visible
                .iter()
                .filter_map(|&idx| items.get(idx))
                .map(ProductCardView::from)
                .collect(),
            search_term: search_term.to_owned(),
            error_message: state.error_message().map(str::to_owned),
            loading: state.loading(),
            show_load_more: state.can_load_more_for(search_term),
            show_empty_state: visible.is_empty() && !state.loading(),
            loaded_count: items.len(),
            current_page_index: state.current_page_index(),
        }
    }
}

impl From<&CatalogueState> for CataloguePage {
    fn from(state: &CatalogueState) -> Self {
        Self::for_search(state, state.search_term())
    }
}

#[cfg(test)]
mod tests {
    use pdfex_core::{normalize, ListField, RawProductRecord};
    use rust_decimal::Decimal;

    use super::*;

    fn card(raw: RawProductRecord) -> ProductCardView {
        ProductCardView::from(&normalize(raw))
    }

    fn base() -> RawProductRecord {
        RawProductRecord {
            product_code: "AB-1001".to_owned(),
            name: Some("Storage Box".to_owned()),
            ..RawProductRecord::default()
        }
    }

    #[test]
    fn primary_url_wins_and_gallery_holds_the_rest() {
        let mut raw = base();
        raw.primary_image_url = Some("hero.jpg".to_owned());
        raw.image_urls = ListField::Multiple(vec!["front.jpg".to_owned(), "side.jpg".to_owned()]);
        let view = card(raw);
        assert_eq!(view.primary_image.as_deref(), Some("hero.jpg"));
        assert_eq!(view.gallery, Some(vec!["side.jpg".to_owned()]));
    }

    #[test]
    fn single_image_has_no_gallery() {
        let mut raw = base();
        raw.image_urls = ListField::Single("front.jpg".to_owned());
        let view = card(raw);
        assert_eq!(view.primary_image.as_deref(), Some("front.jpg"));
        assert!(view.gallery.is_none());
    }

    #[test]
    fn no_images_means_placeholder() {
        let view = card(base());
        assert!(view.primary_image.is_none());
        assert!(view.gallery.is_none());
    }

    #[test]
    fn price_with_currency_prefix() {
        let mut raw = base();
        raw.price = Some(Decimal::new(1250, 2));
        raw.currency = Some("EUR".to_owned());
        assert_eq!(card(raw).price.as_deref(), Some("EUR 12.50"));
    }

    #[test]
    fn price_without_currency() {
        let mut raw = base();
        raw.price = Some(Decimal::new(7, 0));
        assert_eq!(card(raw).price.as_deref(), Some("7"));
    }

    #[test]
    fn zero_or_missing_price_is_hidden() {
        let mut raw = base();
        raw.price = Some(Decimal::ZERO);
        raw.currency = Some("EUR".to_owned());
        assert!(card(raw).price.is_none());
        assert!(card(base()).price.is_none());
    }

    #[test]
    fn pack_quantity_line_only_when_non_zero() {
        let mut raw = base();
        raw.pack_quantity = Some(6);
        assert_eq!(card(raw).pack_quantity.as_deref(), Some("Pack of 6"));

        let mut zero = base();
        zero.pack_quantity = Some(0);
        assert!(card(zero).pack_quantity.is_none());
    }

    #[test]
    fn dimension_lines_pair_value_and_unit() {
        let raw: RawProductRecord = serde_json::from_value(serde_json::json!({
            "product_code": "AB-1001",
            "dimensions": {
                "width": { "value": 400, "unit": "mm" },
                "volume": { "value": "12", "unit": "L" }
            }
        }))
        .unwrap();
        let lines: Vec<String> = card(raw).dimensions.iter().map(ToString::to_string).collect();
        assert_eq!(lines, vec!["width: 400mm", "volume: 12L"]);
    }

    #[test]
    fn details_always_carry_product_code() {
        let view = card(base());
        assert_eq!(view.product_code, "AB-1001");
        assert!(view.spec_features.is_empty());
        assert!(view.dimensions.is_empty());
        assert!(view.pack_quantity.is_none());
    }

    #[test]
    fn page_reflects_state_flags() {
        let mut state = CatalogueState::new();
        let ticket = state.begin_load(0, true).unwrap();
        state.finish_load(ticket, Ok(vec![base()]));
        state.set_search_term("box");

        let page = CataloguePage::from(&state);
        assert_eq!(page.cards.len(), 1);
        assert_eq!(page.search_term, "box");
        assert_eq!(page.loaded_count, 1);
        assert!(!page.loading);
        assert!(!page.show_load_more);
        assert!(!page.show_empty_state);
        assert!(page.error_message.is_none());
    }
}
