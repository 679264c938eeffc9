//! Catalog migration pipeline: normalization, reconciliation, batch sync.
//!
//! This crate owns the pipeline logic between the scraper's raw JSON and
//! the commerce platform: post-processing raw records into the canonical
//! shape, enriching them from the game database, converting prices,
//! computing idempotent update plans, and driving paginated batch syncs.

pub mod currency;
pub mod driver;
pub mod enrich;
pub mod export;
pub mod pace;
pub mod postprocess;
pub mod reconcile;

pub use currency::{CurrencyTable, TargetCurrency, convert_minor};
pub use driver::{SyncEvent, SyncOptions, SyncStats, run_sync};
pub use enrich::{EnrichLog, EnrichLogEntry, EnrichOptions, EnrichStats, enrich_products};
pub use export::{
    ExportError, read_raw_products, write_categories_csv, write_product_records,
    write_products_csv, write_raw_products,
};
pub use pace::Pacer;
pub use postprocess::{PostprocessStats, process_products};
pub use reconcile::{
    COUNTRY_ATTRIBUTE, CountryTranslations, plan_country_update, plan_price_removal,
    plan_price_updates, resolve_category_keys,
};
