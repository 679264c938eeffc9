//! Game-database enrichment client.
//!
//! Looks up scraped games on a community game database (XML API) to fill
//! in English names, descriptions, and publication years. The API is
//! rate-limited by contract to roughly one request per five seconds; the
//! client enforces that interval itself.

pub mod client;
pub mod error;
pub mod extract;
pub mod types;
pub mod xml;

pub use client::{GameDbClient, pick_best_match};
pub use error::EnrichError;
pub use extract::{extract_english, has_cyrillic};
pub use types::{EnrichedData, GameDetails, GameName, SearchHit};
