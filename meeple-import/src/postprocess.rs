//! Normalization of raw scraped products into canonical records.
//!
//! Free-text storefront cells become the fixed attribute schema the
//! destination catalog's product type defines, and source category keys are
//! resolved through the taxonomy registry.

use std::collections::BTreeMap;

use meeple_catalog::{
    AttributeValue, PRODUCT_TYPE_KEY, ProductRecord, RawProduct, first_list_item, normalize,
};

use crate::reconcile::resolve_category_keys;

/// Statistics from a post-processing run.
#[derive(Debug, Default, Clone)]
pub struct PostprocessStats {
    pub products: usize,
    pub unmapped_categories: usize,
    pub without_price: usize,
}

/// Normalize every raw product into a canonical record.
pub fn process_products(raw: &[RawProduct]) -> (Vec<ProductRecord>, PostprocessStats) {
    let mut stats = PostprocessStats::default();
    let records = raw
        .iter()
        .map(|p| process_product(p, &mut stats))
        .collect();
    (records, stats)
}

/// Normalize one raw product. Never fails: unparseable cells simply leave
/// their attribute unset.
pub fn process_product(raw: &RawProduct, stats: &mut PostprocessStats) -> ProductRecord {
    stats.products += 1;
    let label = raw
        .name
        .first_of(&["ru", "en"])
        .unwrap_or(raw.key.as_str())
        .to_string();

    let attributes = build_attributes(raw);

    // Main category first, then the rest; duplicates collapse, unmapped
    // keys are dropped with a warning.
    let mut source_keys: Vec<&str> = Vec::new();
    if let Some(mc) = &raw.main_category {
        source_keys.push(&mc.key);
    }
    for cat in &raw.categories {
        source_keys.push(&cat.key);
    }
    let category_keys = resolve_category_keys(&label, source_keys.iter().copied());
    // resolve_category_keys dedupes, so count misses directly.
    let resolved = source_keys
        .iter()
        .filter(|k| meeple_catalog::taxonomy::resolve(k).is_some())
        .count();
    stats.unmapped_categories += source_keys.len() - resolved;

    let main_category_key = raw
        .main_category
        .as_ref()
        .and_then(|mc| meeple_catalog::taxonomy::resolve(&mc.key))
        .map(|cat| cat.key);

    let price_rub_minor = raw
        .price_raw
        .as_deref()
        .and_then(normalize::parse_price_rub)
        .map(|rubles| rubles * 100);
    if price_rub_minor.is_none() {
        stats.without_price += 1;
    }

    ProductRecord {
        key: raw.key.clone(),
        product_type_key: PRODUCT_TYPE_KEY.to_string(),
        name: raw.name.clone(),
        slug: raw.slug.clone(),
        description: raw.description.clone(),
        sku: raw.sku.clone(),
        main_category_key,
        category_keys,
        price_rub_minor,
        main_image_url: raw.main_image_url.clone(),
        additional_images: raw.additional_images.clone(),
        attributes,
        meta: raw.meta.clone(),
    }
}

fn build_attributes(raw: &RawProduct) -> BTreeMap<String, AttributeValue> {
    let mut attributes = BTreeMap::new();

    if let Some(text) = &raw.players_raw {
        let range = normalize::parse_player_count(text);
        if let Some(min) = range.min {
            attributes.insert("players-min".to_string(), AttributeValue::Integer(min as i64));
        }
        if let Some(max) = range.max {
            attributes.insert("players-max".to_string(), AttributeValue::Integer(max as i64));
        }
    }

    if let Some(text) = &raw.playtime_raw {
        let range = normalize::parse_playtime(text);
        if let Some(min) = range.min {
            attributes.insert(
                "playing-time-min".to_string(),
                AttributeValue::Integer(min as i64),
            );
        }
        if let Some(max) = range.max {
            attributes.insert(
                "playing-time-max".to_string(),
                AttributeValue::Integer(max as i64),
            );
        }
    }

    if let Some(age) = raw.age_raw.as_deref().and_then(normalize::parse_age) {
        attributes.insert(
            "age-recommended".to_string(),
            AttributeValue::Integer(age as i64),
        );
    }

    if let Some(brand) = &raw.brand {
        if !brand.is_empty() {
            attributes.insert(
                "publisher".to_string(),
                AttributeValue::Localized(brand.clone()),
            );
        }
    }

    if let Some(country) = &raw.country_of_origin {
        // Cells sometimes list several countries; only the first is kept.
        let pair = meeple_catalog::LocalizedString::of(&[
            ("ru", first_list_item(country.get_or_empty("ru"))),
            ("en", first_list_item(country.get_or_empty("en"))),
        ]);
        if !pair.is_empty() {
            attributes.insert(
                "country-of-origin".to_string(),
                AttributeValue::Localized(pair),
            );
        }
    }

    if let Some(weight) = raw.weight_raw.as_deref().and_then(normalize::parse_weight_kg) {
        attributes.insert("weight".to_string(), AttributeValue::Number(weight));
    }

    attributes
}
