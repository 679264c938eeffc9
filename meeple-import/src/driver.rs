//! Batch driver: paginate the catalog, reconcile each product, apply.
//!
//! One logical task, strictly sequential. Each product is re-read
//! immediately before its write so the version number the update carries is
//! as fresh as possible; no product state is ever reused across products.
//! A failure applying one product's actions (version conflicts included) is
//! logged and the batch moves on; there are no automatic retries, a rerun
//! of the whole batch is the retry.

use meeple_commerce::{CommerceClient, CommerceError, Product, UpdateAction};

use crate::pace::Pacer;

/// Options for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Listing page size.
    pub page_size: u32,
    /// Plan but do not write.
    pub dry_run: bool,
    /// Maximum number of products to process.
    pub limit: Option<usize>,
    /// Reference expansions for the listing request.
    pub expand: Vec<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            page_size: 100,
            dry_run: false,
            limit: None,
            expand: Vec::new(),
        }
    }
}

/// Statistics from a sync run.
#[derive(Debug, Default, Clone)]
pub struct SyncStats {
    pub processed: u64,
    /// Products written (or, on a dry run, products that would be written).
    pub updated: u64,
    /// Products already converged, zero actions planned.
    pub unchanged: u64,
    pub failed: u64,
}

/// Progress events emitted during a sync run, consumed by the CLI.
#[derive(Debug)]
pub enum SyncEvent<'a> {
    /// A listing page arrived.
    PageFetched { fetched: usize, total_so_far: usize },
    /// A product is about to be reconciled.
    ProductStarted {
        index: usize,
        total: usize,
        label: &'a str,
        name: Option<&'a str>,
    },
    /// Reconciliation produced no actions.
    ProductUnchanged { index: usize, label: &'a str },
    /// Actions were applied.
    ProductUpdated {
        index: usize,
        label: &'a str,
        actions: usize,
    },
    /// Dry run: actions were planned but not applied.
    ProductWouldUpdate {
        index: usize,
        label: &'a str,
        actions: usize,
    },
    /// Applying (or fetching) this product failed; the batch continues.
    ProductFailed {
        index: usize,
        label: &'a str,
        error: String,
    },
}

/// Run a full sync: list every product id, then for each product read its
/// authoritative state, plan actions with `plan`, and apply them in one
/// atomic update call.
///
/// A failure during the initial listing is fatal: the driver cannot
/// proceed without the full catalog. Per-product failures are isolated.
/// The injected [`Pacer`] is awaited before every network call.
pub async fn run_sync<F>(
    client: &CommerceClient,
    pacer: &mut Pacer,
    options: &SyncOptions,
    mut plan: F,
    mut on_event: impl FnMut(&SyncEvent<'_>),
) -> Result<SyncStats, CommerceError>
where
    F: FnMut(&Product) -> Vec<UpdateAction>,
{
    // Phase 1: collect every product id via cursor pagination. Errors here
    // abort the run.
    let mut ids: Vec<String> = Vec::new();
    let mut last_id: Option<String> = None;
    loop {
        pacer.wait().await;
        let expand: Vec<&str> = options.expand.iter().map(String::as_str).collect();
        let page = client
            .list_products(last_id.as_deref(), options.page_size, &expand)
            .await?;

        let count = page.results.len();
        if count == 0 {
            break;
        }
        last_id = page.results.last().map(|p| p.id.clone());
        ids.extend(page.results.into_iter().map(|p| p.id));
        on_event(&SyncEvent::PageFetched {
            fetched: count,
            total_so_far: ids.len(),
        });

        if count < options.page_size as usize {
            break;
        }
    }
    if let Some(limit) = options.limit {
        ids.truncate(limit);
    }
    log::info!("listing complete: {} products", ids.len());

    // Phase 2: sequential read-reconcile-write per product.
    let mut stats = SyncStats::default();
    let total = ids.len();

    for (index, id) in ids.iter().enumerate() {
        stats.processed += 1;

        pacer.wait().await;
        let product = match client.fetch_product(id).await {
            Ok(p) => p,
            Err(e) => {
                log::error!("failed to fetch product {id}: {e}");
                on_event(&SyncEvent::ProductFailed {
                    index,
                    label: id,
                    error: e.to_string(),
                });
                stats.failed += 1;
                continue;
            }
        };

        on_event(&SyncEvent::ProductStarted {
            index,
            total,
            label: product.label(),
            name: product.display_name(),
        });

        let actions = plan(&product);
        if actions.is_empty() {
            stats.unchanged += 1;
            on_event(&SyncEvent::ProductUnchanged {
                index,
                label: product.label(),
            });
            continue;
        }

        let action_count = actions.len();
        if options.dry_run {
            stats.updated += 1;
            on_event(&SyncEvent::ProductWouldUpdate {
                index,
                label: product.label(),
                actions: action_count,
            });
            continue;
        }

        pacer.wait().await;
        match client
            .update_product(&product.id, product.version, actions)
            .await
        {
            Ok(_) => {
                stats.updated += 1;
                on_event(&SyncEvent::ProductUpdated {
                    index,
                    label: product.label(),
                    actions: action_count,
                });
            }
            Err(e) => {
                // Version conflicts land here too: logged, skipped, the
                // batch continues. A rerun picks the product up again.
                log::error!("failed to update product {}: {e}", product.label());
                stats.failed += 1;
                on_event(&SyncEvent::ProductFailed {
                    index,
                    label: product.label(),
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(stats)
}
