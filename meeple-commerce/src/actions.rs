//! Product update actions.
//!
//! Actions are produced by the reconciler, consumed exactly once by the
//! batch driver, and applied atomically per product: the platform either
//! applies every action in one update call or none of them.

use meeple_catalog::AttributeValue;
use serde::Serialize;

use crate::types::{Money, PriceEntry, Reference};

/// A single update action in the platform's product update language.
///
/// All actions target the `current` (published) data, never staged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum UpdateAction {
    #[serde(rename_all = "camelCase")]
    AddPrice {
        variant_id: i64,
        price: PriceDraft,
        staged: bool,
    },
    #[serde(rename_all = "camelCase")]
    ChangePrice {
        price_id: String,
        price: PriceDraft,
        staged: bool,
    },
    #[serde(rename_all = "camelCase")]
    RemovePrice {
        price_id: String,
        staged: bool,
    },
    /// Sets an attribute value, creating the attribute when absent; the
    /// platform has no separate add action.
    #[serde(rename_all = "camelCase")]
    SetAttribute {
        variant_id: i64,
        name: String,
        value: AttributeValue,
        staged: bool,
    },
}

impl UpdateAction {
    pub fn add_price(variant_id: i64, price: PriceDraft) -> Self {
        Self::AddPrice {
            variant_id,
            price,
            staged: false,
        }
    }

    pub fn change_price(price_id: impl Into<String>, price: PriceDraft) -> Self {
        Self::ChangePrice {
            price_id: price_id.into(),
            price,
            staged: false,
        }
    }

    pub fn remove_price(price_id: impl Into<String>) -> Self {
        Self::RemovePrice {
            price_id: price_id.into(),
            staged: false,
        }
    }

    pub fn set_attribute(variant_id: i64, name: impl Into<String>, value: AttributeValue) -> Self {
        Self::SetAttribute {
            variant_id,
            name: name.into(),
            value,
            staged: false,
        }
    }
}

/// A new price value for add/change actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDraft {
    pub value: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_group: Option<Reference>,
}

impl PriceDraft {
    /// Build a draft for `value`, inheriting the scoping dimensions
    /// (country, channel, customer group) of a source price entry.
    pub fn inheriting_scope(value: Money, source: &PriceEntry) -> Self {
        Self {
            value,
            country: source.country.clone(),
            channel: source.channel.as_ref().map(|r| Reference {
                type_id: Some("channel".to_string()),
                id: r.id.clone(),
            }),
            customer_group: source.customer_group.as_ref().map(|r| Reference {
                type_id: Some("customer-group".to_string()),
                id: r.id.clone(),
            }),
        }
    }
}

/// Request body of a product update call.
#[derive(Debug, Clone, Serialize)]
pub struct ProductUpdate {
    pub version: i64,
    pub actions: Vec<UpdateAction>,
}
