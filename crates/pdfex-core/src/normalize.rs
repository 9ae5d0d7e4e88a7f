//! Normalization from [`RawProductRecord`] to [`NormalizedProduct`].
//!
//! Pure and total: every malformed or missing shape degrades to an empty
//! default, so there is no error path.

use crate::products::{NormalizedProduct, RawProductRecord};

/// Joins name and subtitle in the display name.
pub const DISPLAY_NAME_SEPARATOR: &str = " – ";

/// Last-resort display name when a row has no name, subtitle, or code.
pub const UNNAMED_PRODUCT: &str = "Unnamed product";

/// Normalizes a raw store row into the canonical in-memory product.
#[must_use]
pub fn normalize(raw: RawProductRecord) -> NormalizedProduct {
    let display_name = display_name(
        raw.name.as_deref(),
        raw.subtitle.as_deref(),
        &raw.product_code,
    );

    NormalizedProduct {
        display_name,
        product_code: raw.product_code,
        name: raw.name,
        subtitle: raw.subtitle,
        category: non_empty(raw.category),
        pack_quantity: raw.pack_quantity,
        price: raw.price,
        currency: non_empty(raw.currency),
        spec_features: raw.spec_features.into_vec(),
        dimensions: raw.dimensions.unwrap_or_default(),
        primary_image_url: non_empty(raw.primary_image_url),
        image_urls: raw.image_urls.into_vec(),
    }
}

/// Builds the card title: `name – subtitle` with empty parts dropped, falling
/// back to the product code and then to [`UNNAMED_PRODUCT`]. Never empty.
#[must_use]
pub fn display_name(name: Option<&str>, subtitle: Option<&str>, product_code: &str) -> String {
    let joined = [name, subtitle]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(DISPLAY_NAME_SEPARATOR);

    if !joined.is_empty() {
        joined
    } else if !product_code.is_empty() {
        product_code.to_owned()
    } else {
        UNNAMED_PRODUCT.to_owned()
    }
}

// Empty strings behave like missing values on the card.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
