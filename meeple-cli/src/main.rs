//! meeple CLI
//!
//! Command-line tools for migrating a scraped board-game catalog into the
//! commerce platform: normalization, enrichment, import-file export, and
//! idempotent catalog syncs.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use meeple_commerce::{CommerceClient, CommerceConfig, EXPAND_MASTER_PRICES};
use meeple_import::driver::{SyncEvent, SyncOptions, SyncStats, run_sync};
use meeple_import::enrich::{EnrichOptions, enrich_products};
use meeple_import::export;
use meeple_import::postprocess::process_products;
use meeple_import::reconcile::{
    CountryTranslations, plan_country_update, plan_price_removal, plan_price_updates,
};
use meeple_import::{CurrencyTable, Pacer};

#[derive(Parser)]
#[command(name = "meeple")]
#[command(about = "Board-game catalog migration tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Common arguments for commands that sync against the live catalog.
#[derive(Args, Clone)]
struct SyncArgs {
    /// Listing page size
    #[arg(long, default_value_t = 100)]
    page_size: u32,

    /// Minimum delay between API calls, in milliseconds
    #[arg(long, default_value_t = 300)]
    delay_ms: u64,

    /// Maximum number of products to process
    #[arg(short, long)]
    limit: Option<usize>,

    /// Plan updates without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize raw scraped products into import-ready records
    Postprocess {
        /// Raw products JSON (scraper output)
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the processed records JSON
        #[arg(short, long)]
        output: PathBuf,

        /// Also write a product import CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Fill English names and descriptions from the game database
    Enrich {
        /// Raw products JSON to enrich
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the enriched JSON
        #[arg(short, long)]
        output: PathBuf,

        /// Write a detailed enrichment log to this path
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Maximum number of products to look up
        #[arg(short, long)]
        limit: Option<usize>,

        /// Skip products that already have an English name
        #[arg(long)]
        skip_existing: bool,
    },

    /// Write the category import CSV from the built-in taxonomy
    ExportCategories {
        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Derive and converge foreign-currency prices from RUB prices
    SyncPrices {
        #[command(flatten)]
        sync: SyncArgs,

        /// RUB → USD exchange rate
        #[arg(long, default_value_t = 0.01256)]
        usd_rate: f64,

        /// RUB → EUR exchange rate
        #[arg(long, default_value_t = 0.011001)]
        eur_rate: f64,
    },

    /// Converge English country-of-origin translations
    TranslateCountries {
        #[command(flatten)]
        sync: SyncArgs,
    },

    /// Remove prices in given currencies (asks for confirmation)
    RemovePrices {
        #[command(flatten)]
        sync: SyncArgs,

        /// Currencies to remove (e.g., RUB,USD)
        #[arg(long, value_delimiter = ',', required = true)]
        remove: Vec<String>,

        /// Currency that must remain on every variant
        #[arg(long)]
        keep: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Postprocess { input, output, csv } => run_postprocess(input, output, csv),
        Commands::Enrich {
            input,
            output,
            log_file,
            limit,
            skip_existing,
        } => run_enrich(input, output, log_file, limit, skip_existing),
        Commands::ExportCategories { output } => run_export_categories(output),
        Commands::SyncPrices {
            sync,
            usd_rate,
            eur_rate,
        } => run_sync_prices(sync, usd_rate, eur_rate),
        Commands::TranslateCountries { sync } => run_translate_countries(sync),
        Commands::RemovePrices { sync, remove, keep } => run_remove_prices(sync, remove, keep),
    }
}

// ── Offline commands ────────────────────────────────────────────────────────

fn run_postprocess(input: PathBuf, output: PathBuf, csv: Option<PathBuf>) {
    let raw = match export::read_raw_products(&input) {
        Ok(raw) => raw,
        Err(e) => return fail(&format!("Failed to read {}: {e}", input.display())),
    };
    println!("Processing {} products...", raw.len());

    let (records, stats) = process_products(&raw);

    if let Err(e) = export::write_product_records(&output, &records) {
        return fail(&format!("Failed to write {}: {e}", output.display()));
    }
    println!(
        "{} Processed records saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        output.display(),
    );

    if let Some(csv_path) = csv {
        if let Err(e) = export::write_products_csv(&csv_path, &records) {
            return fail(&format!("Failed to write {}: {e}", csv_path.display()));
        }
        println!(
            "{} Import CSV saved to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            csv_path.display(),
        );
    }

    println!();
    println!("Products: {}", stats.products);
    println!("Without price: {}", stats.without_price);
    if stats.unmapped_categories > 0 {
        println!(
            "{}",
            format!(
                "Unmapped category references: {}",
                stats.unmapped_categories
            )
            .if_supports_color(Stdout, |t| t.yellow()),
        );
    }
}

fn run_export_categories(output: PathBuf) {
    match export::write_categories_csv(&output) {
        Ok(()) => println!(
            "{} Categories CSV saved to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            output.display(),
        ),
        Err(e) => fail(&format!("Failed to write {}: {e}", output.display())),
    }
}

fn run_enrich(
    input: PathBuf,
    output: PathBuf,
    log_file: Option<PathBuf>,
    limit: Option<usize>,
    skip_existing: bool,
) {
    let mut products = match export::read_raw_products(&input) {
        Ok(raw) => raw,
        Err(e) => return fail(&format!("Failed to read {}: {e}", input.display())),
    };

    let client = match meeple_enrich::GameDbClient::new() {
        Ok(client) => client,
        Err(e) => return fail(&format!("Failed to create enrichment client: {e}")),
    };

    let options = EnrichOptions {
        limit,
        skip_existing,
    };

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    rt.block_on(async {
        let total = limit.unwrap_or(products.len()).min(products.len());
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} [{pos}/{len}] {msg}")
                .unwrap()
                .tick_chars("/-\\|"),
        );

        let mut on_progress = |index: usize, _total: usize, name: &str| {
            pb.set_position(index as u64);
            pb.set_message(name.to_string());
            pb.tick();
        };

        let (stats, log) =
            enrich_products(&client, &mut products, &options, &mut on_progress).await;
        pb.finish_and_clear();

        if let Err(e) = export::write_raw_products(&output, &products) {
            return fail(&format!("Failed to write {}: {e}", output.display()));
        }
        println!(
            "{} Enriched data saved to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            output.display(),
        );

        if let Some(path) = log_file {
            match log.write_to_file(&path, &stats) {
                Ok(()) => println!("Log written to {}", path.display()),
                Err(e) => eprintln!(
                    "{} Failed to write log {}: {e}",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                    path.display(),
                ),
            }
        }

        println!();
        println!("Processed: {}", stats.processed);
        println!(
            "{}",
            format!("Enriched: {}", stats.enriched).if_supports_color(Stdout, |t| t.green()),
        );
        println!("Not found: {}", stats.not_found);
        println!("Skipped: {}", stats.skipped);
        if stats.errors > 0 {
            println!(
                "{}",
                format!("Errors: {}", stats.errors).if_supports_color(Stdout, |t| t.red()),
            );
        }
    });
}

// ── Live catalog syncs ──────────────────────────────────────────────────────

fn run_sync_prices(args: SyncArgs, usd_rate: f64, eur_rate: f64) {
    let rates = CurrencyTable::new("RUB")
        .with_target("USD", usd_rate)
        .with_target("EUR", eur_rate);

    run_catalog_sync(
        args,
        vec![EXPAND_MASTER_PRICES.to_string()],
        move |product| match product.master_variant() {
            Some(variant) => plan_price_updates(product.label(), variant, &rates),
            None => {
                log::warn!("{}: no current master variant", product.label());
                Vec::new()
            }
        },
    );
}

fn run_translate_countries(args: SyncArgs) {
    let table = CountryTranslations::default();

    run_catalog_sync(args, Vec::new(), move |product| {
        match product.master_variant() {
            Some(variant) => plan_country_update(product.label(), variant, &table)
                .into_iter()
                .collect(),
            None => {
                log::warn!("{}: no current master variant", product.label());
                Vec::new()
            }
        }
    });
}

fn run_remove_prices(args: SyncArgs, remove: Vec<String>, keep: String) {
    println!(
        "Removing prices in [{}], keeping [{}].",
        remove.join(", "),
        keep,
    );

    // Price removal is irreversible without a backup; a dry run is the only
    // way around the prompt.
    if !args.dry_run && !confirm("Proceed with removing prices? This cannot be undone.") {
        println!("{}", "Cancelled.".if_supports_color(Stdout, |t| t.dimmed()));
        return;
    }

    run_catalog_sync(args, Vec::new(), move |product| {
        let variants = product.all_variants();
        plan_price_removal(product.label(), &variants, &remove, &keep)
    });
}

/// Shared driver setup for the live sync commands: load config (fatal when
/// incomplete), build the client and pacer, run, print the summary.
fn run_catalog_sync<F>(args: SyncArgs, expand: Vec<String>, plan: F)
where
    F: FnMut(&meeple_commerce::Product) -> Vec<meeple_commerce::UpdateAction>,
{
    let config = match CommerceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "{} {e}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            );
            eprintln!();
            eprintln!("Set credentials via environment variables:");
            eprintln!("  CTP_PROJECT_KEY, CTP_CLIENT_ID, CTP_CLIENT_SECRET");
            eprintln!("  CTP_API_URL, CTP_AUTH_URL, CTP_SCOPES (optional)");
            if let Some(path) = meeple_commerce::config_path() {
                eprintln!();
                eprintln!("Or create {}", path.display());
            }
            std::process::exit(1);
        }
    };

    let client = match CommerceClient::new(config) {
        Ok(client) => client,
        Err(e) => return fail(&format!("Failed to create API client: {e}")),
    };

    let options = SyncOptions {
        page_size: args.page_size,
        dry_run: args.dry_run,
        limit: args.limit,
        expand,
    };
    let mut pacer = Pacer::new(std::time::Duration::from_millis(args.delay_ms));

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    rt.block_on(async {
        let result = run_sync(&client, &mut pacer, &options, plan, print_sync_event).await;

        match result {
            Ok(stats) => print_sync_summary(&stats, args.dry_run),
            Err(e) => fail(&format!("Batch aborted: {e}")),
        }
    });
}

fn print_sync_event(event: &SyncEvent<'_>) {
    match event {
        SyncEvent::PageFetched {
            fetched,
            total_so_far,
        } => {
            println!(
                "{}",
                format!("Fetched {fetched} products ({total_so_far} total)")
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        SyncEvent::ProductStarted {
            index,
            total,
            label,
            name,
        } => {
            println!(
                "[{}/{}] {} {}",
                index + 1,
                total,
                label.if_supports_color(Stdout, |t| t.cyan()),
                name.unwrap_or("").if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        SyncEvent::ProductUnchanged { .. } => {
            println!(
                "  {}",
                "no changes needed".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        SyncEvent::ProductUpdated { actions, .. } => {
            println!(
                "  {} applied {} action(s)",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                actions,
            );
        }
        SyncEvent::ProductWouldUpdate { actions, .. } => {
            println!(
                "  {}",
                format!("would apply {actions} action(s)")
                    .if_supports_color(Stdout, |t| t.yellow()),
            );
        }
        SyncEvent::ProductFailed { error, .. } => {
            println!(
                "  {} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                error,
            );
        }
    }
}

fn print_sync_summary(stats: &SyncStats, dry_run: bool) {
    println!();
    println!("Processed: {}", stats.processed);
    let updated_label = if dry_run { "Would update" } else { "Updated" };
    println!(
        "{}",
        format!("{updated_label}: {}", stats.updated).if_supports_color(Stdout, |t| t.green()),
    );
    println!("Unchanged: {}", stats.unchanged);
    if stats.failed > 0 {
        println!(
            "{}",
            format!("Failed: {}", stats.failed).if_supports_color(Stdout, |t| t.red()),
        );
    }
}

/// Ask a yes/no question on stdin; only a literal "yes" proceeds.
fn confirm(question: &str) -> bool {
    print!("{question} Type 'yes' to continue: ");
    std::io::stdout().flush().unwrap();

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    input.trim().eq_ignore_ascii_case("yes")
}

fn fail(message: &str) {
    eprintln!(
        "{} {message}",
        "\u{2718}".if_supports_color(Stdout, |t| t.red()),
    );
    std::process::exit(1);
}
