//! Wire types for the commerce platform's product API.
//!
//! These mirror the subset of the platform's product projection the
//! migration needs: identity + version, the current catalog data, variants
//! with prices and attributes. Unknown fields are ignored on
//! deserialization.

use meeple_catalog::{AttributeValue, LocalizedString};
use serde::{Deserialize, Serialize};

/// A stored product, as returned by the product endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    /// Optimistic-concurrency version; the write API requires it to match.
    pub version: i64,
    #[serde(default)]
    pub key: Option<String>,
    pub master_data: ProductCatalogData,
}

impl Product {
    /// Human-facing label for log lines: the key when set, else the id.
    pub fn label(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.id)
    }

    /// The product's display name (ru first, then en), when present.
    pub fn display_name(&self) -> Option<&str> {
        self.master_data
            .current
            .as_ref()
            .and_then(|d| d.name.first_of(&["ru", "en"]))
    }

    /// The current master variant, when published data exists.
    pub fn master_variant(&self) -> Option<&ProductVariant> {
        self.master_data.current.as_ref().map(|d| &d.master_variant)
    }

    /// Master variant plus all other variants of the current data.
    pub fn all_variants(&self) -> Vec<&ProductVariant> {
        match &self.master_data.current {
            Some(data) => std::iter::once(&data.master_variant)
                .chain(data.variants.iter())
                .collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductCatalogData {
    #[serde(default)]
    pub current: Option<ProductData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    #[serde(default)]
    pub name: LocalizedString,
    #[serde(default)]
    pub slug: Option<LocalizedString>,
    #[serde(default)]
    pub description: Option<LocalizedString>,
    pub master_variant: ProductVariant,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub categories: Vec<Reference>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: i64,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl ProductVariant {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// First price entry in `currency`, if any.
    pub fn price_in(&self, currency: &str) -> Option<&PriceEntry> {
        self.prices.iter().find(|p| p.value.currency_code == currency)
    }
}

/// A price entry held by the platform.
///
/// Identity within a variant is the (currency, country, channel, customer
/// group) tuple; two entries differing only in amount are the same entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    /// Assigned by the platform; absent until the entry is first created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub value: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_group: Option<Reference>,
}

impl PriceEntry {
    /// The scoping dimensions that, with the currency code, identify this
    /// entry within its variant. Absence of a dimension is part of the
    /// identity.
    pub fn scope(&self) -> PriceScope {
        PriceScope {
            country: self.country.clone(),
            channel_id: self.channel.as_ref().map(|r| r.id.clone()),
            customer_group_id: self.customer_group.as_ref().map(|r| r.id.clone()),
        }
    }
}

/// The non-currency part of a price entry's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceScope {
    pub country: Option<String>,
    pub channel_id: Option<String>,
    pub customer_group_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub currency_code: String,
    pub cent_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// One page of a product listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPagedResponse {
    pub limit: u32,
    pub count: u32,
    #[serde(default)]
    pub total: Option<u64>,
    pub results: Vec<Product>,
}

/// Error body shape returned by the platform on 4xx responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
