use std::collections::BTreeMap;

use meeple_catalog::{AttributeValue, LocalizedString, ProductRecord};
use meeple_import::export::{write_categories_csv, write_products_csv};

fn record(key: &str) -> ProductRecord {
    let mut attributes = BTreeMap::new();
    attributes.insert("players-min".to_string(), AttributeValue::Integer(2));
    attributes.insert(
        "publisher".to_string(),
        AttributeValue::Localized(LocalizedString::of(&[("ru", "Магеллан"), ("en", "Magellan")])),
    );

    ProductRecord {
        key: key.to_string(),
        product_type_key: "board-game".to_string(),
        name: LocalizedString::of(&[("ru", "Игра"), ("en", "Game")]),
        slug: LocalizedString::of(&[("ru", "igra"), ("en", "game")]),
        description: LocalizedString::of(&[("ru", "Первая строка.\nВторая строка.")]),
        sku: Some("SKU-1".to_string()),
        main_category_key: Some("strategy-games".to_string()),
        category_keys: vec!["strategy-games".to_string(), "board-games".to_string()],
        price_rub_minor: Some(299_000),
        main_image_url: Some("https://example.com/main.jpg".to_string()),
        additional_images: vec![
            "https://example.com/extra1.jpg".to_string(),
            "https://example.com/extra2.jpg".to_string(),
        ],
        attributes,
        meta: None,
    }
}

#[test]
fn products_csv_has_union_attribute_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.csv");

    write_products_csv(&path, &[record("100")]).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let header = content.lines().next().unwrap();

    assert!(header.contains("attributes.players-min"));
    // Localized attributes get one column per language.
    assert!(header.contains("attributes.publisher.ru"));
    assert!(header.contains("attributes.publisher.en"));
    assert!(header.contains("variants.prices.value.centAmount"));
}

#[test]
fn additional_images_become_extra_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.csv");

    write_products_csv(&path, &[record("100")]).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    // Header + main row + two extra image rows.
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("100,"));
    assert!(lines[2].contains("https://example.com/extra1.jpg"));
    // Non-image columns of extra rows are blank.
    assert!(!lines[2].contains("board-game"));
    assert!(lines[3].contains("https://example.com/extra2.jpg"));
}

#[test]
fn embedded_newlines_are_escaped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.csv");

    write_products_csv(&path, &[record("100")]).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();

    assert!(content.contains("Первая строка.\\nВторая строка."));
}

#[test]
fn price_columns_are_populated_from_minor_units() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.csv");

    write_products_csv(&path, &[record("100")]).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let main_row = content.lines().nth(1).unwrap();

    assert!(main_row.contains("100-price-rub"));
    assert!(main_row.contains("RUB"));
    assert!(main_row.contains("299000"));
    assert!(main_row.contains("centPrecision"));
    // Categories are semicolon-joined in one cell.
    assert!(main_row.contains("strategy-games;board-games"));
}

#[test]
fn categories_csv_lists_whole_taxonomy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("categories.csv");

    write_categories_csv(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert!(lines[0].starts_with("key,name.ru,name.en,slug.en,parent.key,parent.typeId"));
    // First data rows are the roots, with no parent.
    assert!(lines[1].starts_with("board-games,"));
    assert!(lines[1].contains(",,"));
    // Subcategories reference their root with the category type id.
    assert!(content.contains("party-games"));
    assert!(content.contains("board-games,category"));
    // 4 roots + 23 subcategories + header.
    assert_eq!(lines.len(), 28);
}
