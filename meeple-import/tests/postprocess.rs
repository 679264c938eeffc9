use meeple_catalog::{AttributeValue, LocalizedString, ProductMeta, RawProduct, SourceCategory};
use meeple_import::postprocess::process_products;

fn raw_product() -> RawProduct {
    RawProduct {
        key: "12345".to_string(),
        sku: Some("MSG-12345".to_string()),
        name: LocalizedString::of(&[("ru", "Тестовая Игра")]),
        slug: LocalizedString::of(&[("ru", "testovaya-igra")]),
        description: LocalizedString::of(&[("ru", "Отличная игра.\nДля всех.")]),
        main_image_url: Some("https://example.com/box.jpg".to_string()),
        additional_images: vec![
            "https://example.com/1.jpg".to_string(),
            "https://example.com/2.jpg".to_string(),
        ],
        price_raw: Some("2 990 ₽".to_string()),
        main_category: Some(SourceCategory {
            key: "strategicheskie".to_string(),
            name: LocalizedString::of(&[("ru", "Стратегические")]),
        }),
        categories: vec![
            SourceCategory {
                key: "strategicheskie".to_string(),
                name: LocalizedString::default(),
            },
            SourceCategory {
                key: "kooperativnie".to_string(),
                name: LocalizedString::default(),
            },
            SourceCategory {
                key: "sale-shelf".to_string(),
                name: LocalizedString::default(),
            },
        ],
        brand: Some(LocalizedString::of(&[("ru", "Магеллан")])),
        players_raw: Some("2-4".to_string()),
        age_raw: Some("12+".to_string()),
        playtime_raw: Some("60+".to_string()),
        country_of_origin: Some(LocalizedString::of(&[("ru", "Россия, Китай")])),
        weight_raw: Some("1,2 кг".to_string()),
        year_published: None,
        meta: Some(ProductMeta {
            source_url: Some("https://example.com/p/testovaya-igra/".to_string()),
            source_product_id: Some("12345".to_string()),
            source_complectation: vec!["правила".to_string()],
        }),
    }
}

#[test]
fn normalizes_attributes_into_fixed_schema() {
    let (records, stats) = process_products(&[raw_product()]);
    let record = &records[0];

    assert_eq!(stats.products, 1);
    assert_eq!(record.product_type_key, "board-game");

    assert_eq!(
        record.attributes.get("players-min"),
        Some(&AttributeValue::Integer(2))
    );
    assert_eq!(
        record.attributes.get("players-max"),
        Some(&AttributeValue::Integer(4))
    );
    // Open-ended playtime keeps min only.
    assert_eq!(
        record.attributes.get("playing-time-min"),
        Some(&AttributeValue::Integer(60))
    );
    assert!(record.attributes.get("playing-time-max").is_none());
    assert_eq!(
        record.attributes.get("age-recommended"),
        Some(&AttributeValue::Integer(12))
    );
    assert_eq!(
        record.attributes.get("weight"),
        Some(&AttributeValue::Number(1.2))
    );

    // Only the first country of a comma-separated list survives.
    let country = record
        .attributes
        .get("country-of-origin")
        .and_then(AttributeValue::as_localized)
        .unwrap();
    assert_eq!(country.get("ru"), Some("Россия"));

    let publisher = record
        .attributes
        .get("publisher")
        .and_then(AttributeValue::as_localized)
        .unwrap();
    assert_eq!(publisher.get("ru"), Some("Магеллан"));
}

#[test]
fn resolves_and_dedupes_categories() {
    let (records, stats) = process_products(&[raw_product()]);
    let record = &records[0];

    assert_eq!(record.main_category_key.as_deref(), Some("strategy-games"));
    // Main category + list, duplicates collapsed, unmapped "sale-shelf" dropped.
    assert_eq!(
        record.category_keys,
        vec!["strategy-games", "cooperative-games"]
    );
    assert_eq!(stats.unmapped_categories, 1);
}

#[test]
fn converts_price_to_minor_units() {
    let (records, _) = process_products(&[raw_product()]);
    assert_eq!(records[0].price_rub_minor, Some(299_000));
}

#[test]
fn missing_fields_leave_attributes_unset() {
    let raw = RawProduct {
        key: "777".to_string(),
        sku: None,
        name: LocalizedString::of(&[("ru", "Безатрибутная")]),
        slug: LocalizedString::default(),
        description: LocalizedString::default(),
        main_image_url: None,
        additional_images: Vec::new(),
        price_raw: Some("цена по запросу".to_string()),
        main_category: None,
        categories: Vec::new(),
        brand: None,
        players_raw: Some("компания".to_string()),
        age_raw: None,
        playtime_raw: None,
        country_of_origin: None,
        weight_raw: None,
        year_published: None,
        meta: None,
    };

    let (records, stats) = process_products(&[raw]);
    let record = &records[0];

    assert!(record.attributes.is_empty());
    assert!(record.category_keys.is_empty());
    assert_eq!(record.price_rub_minor, None);
    assert_eq!(stats.without_price, 1);
    assert_eq!(stats.unmapped_categories, 0);
}
