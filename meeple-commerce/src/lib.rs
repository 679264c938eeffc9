//! Commerce platform API client: wire types, update actions, OAuth + HTTP.
//!
//! The platform enforces optimistic concurrency: every write carries the
//! product version read beforehand, and a stale version fails the whole
//! call. Callers therefore read a product's current state immediately
//! before writing it and never cache state across products.

pub mod actions;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use actions::{PriceDraft, ProductUpdate, UpdateAction};
pub use client::{CommerceClient, EXPAND_MASTER_PRICES};
pub use config::{CommerceConfig, config_path};
pub use error::CommerceError;
pub use types::{
    Attribute, ErrorResponse, Image, Money, PriceEntry, PriceScope, Product, ProductData,
    ProductPagedResponse, ProductVariant, Reference,
};
