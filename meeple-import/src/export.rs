//! JSON and CSV writers for pipeline handoff and catalog import files.
//!
//! JSON is the stage-to-stage format (scrape → enrich → postprocess); the
//! CSV files feed the commerce platform's bulk importer. CSV quoting is
//! handled by the `csv` crate; embedded newlines are escaped to a literal
//! `\n` beforehand because the importer does not accept multi-line cells.

use std::fs;
use std::path::Path;

use meeple_catalog::{AttributeValue, ProductRecord, RawProduct, taxonomy};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ── JSON handoff ────────────────────────────────────────────────────────────

pub fn read_raw_products(path: &Path) -> Result<Vec<RawProduct>, ExportError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn write_raw_products(path: &Path, products: &[RawProduct]) -> Result<(), ExportError> {
    fs::write(path, serde_json::to_string_pretty(products)?)?;
    Ok(())
}

pub fn write_product_records(path: &Path, records: &[ProductRecord]) -> Result<(), ExportError> {
    fs::write(path, serde_json::to_string_pretty(records)?)?;
    Ok(())
}

// ── Products CSV ────────────────────────────────────────────────────────────

const BASE_HEADERS: &[&str] = &[
    "key",
    "productType.key",
    "productType.typeId",
    "name.ru",
    "name.en",
    "slug.ru",
    "slug.en",
    "description.ru",
    "description.en",
    "variants.key",
    "variants.sku",
    "taxCategory.key",
    "taxCategory.typeId",
    "categories",
];

const PRICE_HEADERS: &[&str] = &[
    "variants.prices.key",
    "variants.prices.value.currencyCode",
    "variants.prices.value.centAmount",
    "variants.prices.value.type",
    "variants.prices.value.fractionDigits",
];

const IMAGE_HEADERS: &[&str] = &[
    "variants.images.url",
    "variants.images.label",
    "variants.images.dimensions.w",
    "variants.images.dimensions.h",
];

/// Default dimensions reported for storefront images.
const IMAGE_SIZE: &str = "266";

struct AttrColumn {
    name: String,
    localized: bool,
}

/// The attribute-column layout is the union of attribute names across all
/// exported records: one column per (attribute, language) for localized
/// attributes, one column for scalars.
fn attribute_columns(records: &[ProductRecord]) -> Vec<AttrColumn> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        for name in record.attributes.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names.sort();

    names
        .into_iter()
        .map(|name| {
            let localized = records.iter().any(|r| {
                matches!(r.attributes.get(&name), Some(AttributeValue::Localized(_)))
            });
            AttrColumn { name, localized }
        })
        .collect()
}

/// Write the product import CSV.
///
/// One row per product; additional images beyond the first become extra
/// rows carrying only the product key and the image columns, which the
/// importer merges into the same variant.
pub fn write_products_csv(path: &Path, records: &[ProductRecord]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    let columns = attribute_columns(records);

    let mut headers: Vec<String> = BASE_HEADERS.iter().map(|h| h.to_string()).collect();
    for col in &columns {
        if col.localized {
            headers.push(format!("attributes.{}.ru", col.name));
            headers.push(format!("attributes.{}.en", col.name));
        } else {
            headers.push(format!("attributes.{}", col.name));
        }
    }
    headers.extend(PRICE_HEADERS.iter().map(|h| h.to_string()));
    headers.extend(IMAGE_HEADERS.iter().map(|h| h.to_string()));
    writer.write_record(&headers)?;

    let attr_cell_count: usize = columns.iter().map(|c| if c.localized { 2 } else { 1 }).sum();
    let image_url_index = BASE_HEADERS.len() + attr_cell_count + PRICE_HEADERS.len();
    let row_width = headers.len();

    for record in records {
        let mut row: Vec<String> = Vec::with_capacity(row_width);
        row.push(record.key.clone());
        row.push(record.product_type_key.clone());
        row.push("product-type".to_string());
        row.push(record.name.get_or_empty("ru").to_string());
        row.push(record.name.get_or_empty("en").to_string());
        row.push(record.slug.get_or_empty("ru").to_string());
        row.push(record.slug.get_or_empty("en").to_string());
        row.push(escape_newlines(record.description.get_or_empty("ru")));
        row.push(escape_newlines(record.description.get_or_empty("en")));
        row.push(record.key.clone());
        row.push(record.sku.clone().unwrap_or_default());
        row.push("zero-tax".to_string());
        row.push("tax-category".to_string());
        row.push(record.category_keys.join(";"));

        for col in &columns {
            let value = record.attributes.get(&col.name);
            if col.localized {
                match value.and_then(AttributeValue::as_localized) {
                    Some(l) => {
                        row.push(escape_newlines(l.get_or_empty("ru")));
                        row.push(escape_newlines(l.get_or_empty("en")));
                    }
                    None => {
                        row.push(value.map(render_scalar).unwrap_or_default());
                        row.push(String::new());
                    }
                }
            } else {
                row.push(value.map(render_scalar).unwrap_or_default());
            }
        }

        match record.price_rub_minor {
            Some(minor) => {
                row.push(format!("{}-price-rub", record.key));
                row.push("RUB".to_string());
                row.push(minor.to_string());
                row.push("centPrecision".to_string());
                row.push("2".to_string());
            }
            None => row.extend(std::iter::repeat_n(String::new(), PRICE_HEADERS.len())),
        }

        match &record.main_image_url {
            Some(url) => {
                row.push(url.clone());
                let label = record.name.first_of(&["ru", "en"]).unwrap_or("Image");
                row.push(label.to_string());
                row.push(IMAGE_SIZE.to_string());
                row.push(IMAGE_SIZE.to_string());
            }
            None => row.extend(std::iter::repeat_n(String::new(), IMAGE_HEADERS.len())),
        }

        writer.write_record(&row)?;

        // Extra image rows: key + image columns only, everything else blank.
        for url in &record.additional_images {
            let mut extra: Vec<String> = vec![String::new(); row_width];
            extra[0] = record.key.clone();
            extra[image_url_index] = url.clone();
            extra[image_url_index + 2] = IMAGE_SIZE.to_string();
            extra[image_url_index + 3] = IMAGE_SIZE.to_string();
            writer.write_record(&extra)?;
        }
    }

    writer.flush()?;
    Ok(())
}

// ── Categories CSV ──────────────────────────────────────────────────────────

/// Write the category import CSV from the static taxonomy registry.
pub fn write_categories_csv(path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([
        "key",
        "name.ru",
        "name.en",
        "slug.en",
        "parent.key",
        "parent.typeId",
        "orderHint",
        "description.ru",
        "description.en",
        "externalId",
    ])?;

    for cat in taxonomy::all_categories() {
        let description_ru = escape_newlines(cat.description.get_or_empty("ru"));
        let description_en = escape_newlines(cat.description.get_or_empty("en"));
        writer.write_record([
            cat.key.as_str(),
            cat.name.get_or_empty("ru"),
            cat.name.get_or_empty("en"),
            cat.slug.as_str(),
            cat.parent_key.as_deref().unwrap_or(""),
            if cat.parent_key.is_some() { "category" } else { "" },
            cat.order_hint.as_str(),
            description_ru.as_str(),
            description_en.as_str(),
            cat.external_id.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Escape embedded newlines to a literal `\n` (the importer rejects
/// multi-line cells).
fn escape_newlines(text: &str) -> String {
    text.replace('\r', "").replace('\n', "\\n")
}

fn render_scalar(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Integer(i) => i.to_string(),
        AttributeValue::Number(n) => n.to_string(),
        AttributeValue::Bool(b) => b.to_string(),
        AttributeValue::Text(s) => escape_newlines(s),
        AttributeValue::Localized(l) => escape_newlines(l.first_of(&["ru", "en"]).unwrap_or("")),
        AttributeValue::Other(v) => match v.as_str() {
            Some(s) => escape_newlines(s),
            None => escape_newlines(&v.to_string()),
        },
    }
}
