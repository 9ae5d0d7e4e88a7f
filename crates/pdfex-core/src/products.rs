//! Catalogue product types as stored in the `products` table and as held in
//! memory once normalized.
//!
//! ## Observed shape from the importer
//!
//! The PDF importer writes rows with `spec_features` and `image_urls` as JSON
//! arrays, but older rows (and hand-edited ones) carry a bare string or
//! `null`. [`ListField`] captures all three shapes explicitly so the
//! normalizer is the only place that interprets them.
//!
//! `dimensions` is a JSON object keyed by dimension name, each entry shaped
//! `{"value": 120, "unit": "mm"}`. Key order from the payload is kept.

use std::fmt;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient;

/// Columns selected from the `products` table, in the order the store is
/// asked for them.
pub const PRODUCT_COLUMNS: &[&str] = &[
    "product_code",
    "name",
    "subtitle",
    "category",
    "pack_quantity",
    "price",
    "currency",
    "spec_features",
    "dimensions",
    "primary_image_url",
    "image_urls",
];

/// A field declared as "list of strings" that may arrive absent, as a single
/// string, or as an array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListField {
    #[default]
    Absent,
    Single(String),
    Multiple(Vec<String>),
}

impl ListField {
    /// Interprets an arbitrary JSON value. Anything that is neither a string
    /// nor an array is treated as absent; non-string array elements are
    /// skipped.
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::Single(s),
            serde_json::Value::Array(items) => Self::Multiple(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        serde_json::Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => Self::Absent,
        }
    }

    /// Collapses the field into a list, possibly empty.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Absent => Vec::new(),
            Self::Single(s) => vec![s],
            Self::Multiple(items) => items,
        }
    }
}

impl<'de> Deserialize<'de> for ListField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(value))
    }
}

/// Scalar measurement value; the importer writes numbers, older rows strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DimensionValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One named measurement, e.g. `width: 120mm`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub value: Option<DimensionValue>,
    pub unit: Option<String>,
}

impl Dimension {
    /// Value immediately followed by unit, e.g. `"120mm"`. Missing parts
    /// render as empty.
    #[must_use]
    pub fn display_value(&self) -> String {
        let value = self
            .value
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        format!("{value}{}", self.unit.as_deref().unwrap_or_default())
    }
}

/// A row as received from the store. Every field is optional except the
/// product code, and every field is deserialized leniently: an unexpected
/// shape degrades to absent rather than failing the whole page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProductRecord {
    /// Primary key of the `products` table (e.g. `"AB-1042"`).
    #[serde(default, deserialize_with = "lenient::code")]
    pub product_code: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub subtitle: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient::integer")]
    pub pack_quantity: Option<i64>,

    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price: Option<Decimal>,

    /// ISO 4217 code or symbol as printed in the source catalogue.
    #[serde(default, deserialize_with = "lenient::string")]
    pub currency: Option<String>,

    #[serde(default)]
    pub spec_features: ListField,

    #[serde(default, deserialize_with = "lenient::dimensions")]
    pub dimensions: Option<IndexMap<String, Dimension>>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub primary_image_url: Option<String>,

    #[serde(default)]
    pub image_urls: ListField,
}

/// A product with fixed-shape fields and a computed display name, ready for
/// filtering and rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedProduct {
    pub product_code: String,
    pub name: Option<String>,
    pub subtitle: Option<String>,
    /// `None` when the store sent nothing or an empty string.
    pub category: Option<String>,
    pub pack_quantity: Option<i64>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub spec_features: Vec<String>,
    pub dimensions: IndexMap<String, Dimension>,
    pub primary_image_url: Option<String>,
    pub image_urls: Vec<String>,
    /// Never empty; see [`crate::normalize::display_name`].
    pub display_name: String,
}

impl NormalizedProduct {
    /// The image shown on the card face: the primary URL if set, otherwise
    /// the first gallery image.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.primary_image_url
            .as_deref()
            .or_else(|| self.image_urls.first().map(String::as_str))
    }

    /// Images after the first, present only when the product has more than
    /// one image in total.
    #[must_use]
    pub fn secondary_images(&self) -> Option<&[String]> {
        if self.image_urls.len() > 1 {
            Some(&self.image_urls[1..])
        } else {
            None
        }
    }
}
