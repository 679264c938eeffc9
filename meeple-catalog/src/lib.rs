//! Board-game catalog data model, taxonomy registry, and field normalizers.
//!
//! This crate defines the product shapes shared across the migration
//! pipeline without any I/O or async dependencies. Consumers use these types
//! directly for serialization, normalization, and taxonomy resolution.

pub mod normalize;
pub mod slug;
pub mod taxonomy;
pub mod types;

pub use normalize::{
    NumericRange, OPEN_RANGE_MAX, first_list_item, normalize_ws, parse_age, parse_player_count,
    parse_playtime, parse_price_rub, parse_weight_kg,
};
pub use slug::slugify;
pub use taxonomy::{CanonicalCategory, all_categories, resolve};
pub use types::{
    AttributeValue, LocalizedString, PRODUCT_TYPE_KEY, ProductMeta, ProductRecord, RawProduct,
    SourceCategory,
};
