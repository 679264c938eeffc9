//! Enrichment pass: fill English names, descriptions, and publication years
//! from the game database into raw product records.
//!
//! Runs between scraping and post-processing. Lookups happen one at a time
//! through the rate-limited client; a failed or missing lookup never aborts
//! the pass, it is recorded and the next product proceeds.

use std::path::Path;

use meeple_catalog::{RawProduct, slugify};
use meeple_enrich::{EnrichError, GameDbClient, extract_english, pick_best_match};

/// Options for an enrichment run.
#[derive(Debug, Clone, Default)]
pub struct EnrichOptions {
    /// Maximum number of products to process.
    pub limit: Option<usize>,
    /// Skip products that already have an English name.
    pub skip_existing: bool,
}

/// Statistics from an enrichment run.
#[derive(Debug, Default, Clone)]
pub struct EnrichStats {
    pub processed: u64,
    pub enriched: u64,
    pub not_found: u64,
    pub skipped: u64,
    pub errors: u64,
}

/// A single entry in the enrichment log.
#[derive(Debug, Clone)]
pub enum EnrichLogEntry {
    Enriched {
        key: String,
        name_ru: String,
        name_en: String,
        year: Option<i64>,
    },
    NotFound {
        key: String,
        name_ru: String,
        reason: String,
    },
    Skipped {
        key: String,
        reason: String,
    },
    Error {
        key: String,
        message: String,
    },
}

/// Collects enrichment results and writes a log file.
#[derive(Debug, Default)]
pub struct EnrichLog {
    entries: Vec<EnrichLogEntry>,
}

impl EnrichLog {
    pub fn add(&mut self, entry: EnrichLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[EnrichLogEntry] {
        &self.entries
    }

    /// Write the log to a file.
    pub fn write_to_file(&self, path: &Path, stats: &EnrichStats) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;

        writeln!(file, "=== Enrichment Log ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(file, "Processed: {}", stats.processed)?;
        writeln!(file, "Enriched: {}", stats.enriched)?;
        writeln!(file, "Not found: {}", stats.not_found)?;
        writeln!(file, "Skipped: {}", stats.skipped)?;
        writeln!(file, "Errors: {}", stats.errors)?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                EnrichLogEntry::Enriched {
                    key,
                    name_ru,
                    name_en,
                    year,
                } => {
                    write!(file, "[OK] {key} \"{name_ru}\" -> \"{name_en}\"")?;
                    match year {
                        Some(y) => writeln!(file, " ({y})")?,
                        None => writeln!(file)?,
                    }
                }
                EnrichLogEntry::NotFound {
                    key,
                    name_ru,
                    reason,
                } => {
                    writeln!(file, "[NOT FOUND] {key} \"{name_ru}\": {reason}")?;
                }
                EnrichLogEntry::Skipped { key, reason } => {
                    writeln!(file, "[SKIPPED] {key}: {reason}")?;
                }
                EnrichLogEntry::Error { key, message } => {
                    writeln!(file, "[ERROR] {key}: {message}")?;
                }
            }
        }

        Ok(())
    }
}

/// Progress callback: (index, total, product label).
pub type EnrichProgress<'a> = &'a mut dyn FnMut(usize, usize, &str);

/// Enrich products in place from the game database.
///
/// English values already present are only ever improved, never blanked:
/// an extraction that comes back empty leaves the existing value alone.
/// The English slug is regenerated from the (possibly updated) English
/// name, falling back to the Russian one.
pub async fn enrich_products(
    client: &GameDbClient,
    products: &mut [RawProduct],
    options: &EnrichOptions,
    progress: EnrichProgress<'_>,
) -> (EnrichStats, EnrichLog) {
    let mut stats = EnrichStats::default();
    let mut log_file = EnrichLog::default();

    let total = match options.limit {
        Some(limit) => products.len().min(limit),
        None => products.len(),
    };

    for (index, product) in products.iter_mut().take(total).enumerate() {
        stats.processed += 1;

        let Some(name_ru) = product.name.get("ru").map(str::to_string) else {
            stats.skipped += 1;
            log_file.add(EnrichLogEntry::Skipped {
                key: product.key.clone(),
                reason: "missing Russian name".to_string(),
            });
            continue;
        };
        progress(index, total, &name_ru);

        if options.skip_existing && product.name.get("en").is_some_and(|en| !en.is_empty()) {
            stats.skipped += 1;
            log_file.add(EnrichLogEntry::Skipped {
                key: product.key.clone(),
                reason: "already has an English name".to_string(),
            });
            continue;
        }

        match lookup(client, &name_ru).await {
            Ok(Some(data)) => {
                stats.enriched += 1;

                if !data.name_en.is_empty() {
                    product.name.set("en", data.name_en.clone());
                }
                if !data.description_en.is_empty() {
                    product.description.set("en", data.description_en);
                }
                if product.year_published.is_none() {
                    product.year_published = data.year_published;
                }

                log_file.add(EnrichLogEntry::Enriched {
                    key: product.key.clone(),
                    name_ru: name_ru.clone(),
                    name_en: data.name_en,
                    year: data.year_published,
                });
            }
            Ok(None) => {
                stats.not_found += 1;
                log::info!("\"{name_ru}\": not found in the game database");
                log_file.add(EnrichLogEntry::NotFound {
                    key: product.key.clone(),
                    name_ru: name_ru.clone(),
                    reason: "no search results".to_string(),
                });
            }
            Err(e) => {
                stats.errors += 1;
                log::error!("\"{name_ru}\": lookup failed: {e}");
                log_file.add(EnrichLogEntry::Error {
                    key: product.key.clone(),
                    message: e.to_string(),
                });
            }
        }

        // The English slug doubles as a derived-image filename, so it is
        // regenerated deterministically from the best name we have.
        let slug_base = product
            .name
            .first_of(&["en", "ru"])
            .unwrap_or(&name_ru)
            .to_string();
        product.slug.set("en", slugify(&slug_base));
    }

    (stats, log_file)
}

async fn lookup(
    client: &GameDbClient,
    name_ru: &str,
) -> Result<Option<meeple_enrich::EnrichedData>, EnrichError> {
    let hits = client.search(name_ru).await?;
    let Some(best) = pick_best_match(&hits, name_ru) else {
        return Ok(None);
    };
    let Some(details) = client.game_details(&best.object_id).await? else {
        return Ok(None);
    };
    Ok(Some(extract_english(&details, name_ru)))
}
