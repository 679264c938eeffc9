//! Data model types for the board-game catalog.
//!
//! These types represent products at the two stages of the pipeline: the raw
//! shape emitted by the storefront scraper, and the canonical shape consumed
//! by the export writers and the commerce-platform import.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Localized strings ───────────────────────────────────────────────────────

/// A mapping from language tag (`ru`, `en`, …) to text.
///
/// Serialized transparently as a JSON object, matching the commerce
/// platform's `LocalizedString` shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedString(pub BTreeMap<String, String>);

impl LocalizedString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from literal (language, text) pairs. Empty texts are skipped.
    pub fn of(pairs: &[(&str, &str)]) -> Self {
        let mut map = BTreeMap::new();
        for (lang, text) in pairs {
            if !text.is_empty() {
                map.insert((*lang).to_string(), (*text).to_string());
            }
        }
        Self(map)
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(|s| s.as_str())
    }

    /// The value for `lang`, or `""` when absent.
    pub fn get_or_empty(&self, lang: &str) -> &str {
        self.get(lang).unwrap_or("")
    }

    pub fn set(&mut self, lang: &str, text: impl Into<String>) {
        self.0.insert(lang.to_string(), text.into());
    }

    /// The first non-empty value among `langs`, if any.
    pub fn first_of(&self, langs: &[&str]) -> Option<&str> {
        langs
            .iter()
            .filter_map(|lang| self.get(lang))
            .find(|s| !s.is_empty())
    }

    /// True when no language has a non-empty value.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|s| s.is_empty())
    }
}

// ── Attributes ──────────────────────────────────────────────────────────────

/// A product attribute value: either a scalar or a per-language mapping.
///
/// `Other` absorbs platform attribute shapes this pipeline does not manage
/// (enum sets, references), so deserializing a product never fails on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Localized(LocalizedString),
    Integer(i64),
    Number(f64),
    Bool(bool),
    Text(String),
    Other(serde_json::Value),
}

impl AttributeValue {
    pub fn as_localized(&self) -> Option<&LocalizedString> {
        match self {
            Self::Localized(l) => Some(l),
            _ => None,
        }
    }
}

// ── Raw scraped products ────────────────────────────────────────────────────

/// A category link captured from the source storefront (sidebar or
/// breadcrumb), identified by the last segment of its URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceCategory {
    pub key: String,
    #[serde(default)]
    pub name: LocalizedString,
}

/// Source bookkeeping carried through the pipeline for traceability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_product_id: Option<String>,
    /// Box contents list, as scraped from the product page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_complectation: Vec<String>,
}

/// A product record as produced by the storefront scraper, before
/// normalization. Free-text fields (`players_raw`, `age_raw`, …) keep the
/// storefront's original wording; the normalizers turn them into typed
/// attribute values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Stable external identifier, unique across the catalog.
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default)]
    pub name: LocalizedString,
    #[serde(default)]
    pub slug: LocalizedString,
    #[serde(default)]
    pub description: LocalizedString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_images: Vec<String>,
    /// Price text as displayed by the storefront, e.g. `"2 990 ₽"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_category: Option<SourceCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<SourceCategory>,
    /// Publisher name, localized once enrichment has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<LocalizedString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players_raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime_raw: Option<String>,
    /// Comma-separated country list, localized once enrichment has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_origin: Option<LocalizedString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_published: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ProductMeta>,
}

// ── Canonical products ──────────────────────────────────────────────────────

/// A normalized product record, built once per product per run. Immutable
/// after construction; this is the shape handed to the export writers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub key: String,
    pub product_type_key: String,
    pub name: LocalizedString,
    pub slug: LocalizedString,
    pub description: LocalizedString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Canonical key of the product's primary category, when it mapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_category_key: Option<String>,
    /// Deduplicated canonical category keys; order carries no meaning.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category_keys: Vec<String>,
    /// Minor-unit amount (kopecks) in the source currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_rub_minor: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_images: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ProductMeta>,
}

/// Product type key assigned to every migrated record.
pub const PRODUCT_TYPE_KEY: &str = "board-game";
