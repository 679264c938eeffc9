use meeple_catalog::{AttributeValue, LocalizedString};
use meeple_commerce::{Attribute, Money, PriceEntry, ProductVariant, Reference, UpdateAction};
use meeple_import::{
    CountryTranslations, CurrencyTable, plan_country_update, plan_price_removal,
    plan_price_updates, resolve_category_keys,
};

fn variant(prices: Vec<PriceEntry>, attributes: Vec<Attribute>) -> ProductVariant {
    ProductVariant {
        id: 1,
        sku: None,
        prices,
        attributes,
        images: Vec::new(),
    }
}

fn price(currency: &str, cents: i64, id: Option<&str>) -> PriceEntry {
    PriceEntry {
        id: id.map(str::to_string),
        value: Money {
            currency_code: currency.to_string(),
            cent_amount: cents,
        },
        country: None,
        channel: None,
        customer_group: None,
    }
}

fn localized(pairs: &[(&str, &str)]) -> AttributeValue {
    AttributeValue::Localized(LocalizedString::of(pairs))
}

fn country_attr(pairs: &[(&str, &str)]) -> Attribute {
    Attribute {
        name: "country-of-origin".to_string(),
        value: localized(pairs),
    }
}

/// Apply planned actions to a variant the way the platform would, so that
/// idempotence (reconcile → apply → reconcile = no-op) can be asserted.
fn apply(variant: &mut ProductVariant, actions: &[UpdateAction]) {
    for (i, action) in actions.iter().enumerate() {
        match action {
            UpdateAction::AddPrice { price, .. } => variant.prices.push(PriceEntry {
                id: Some(format!("assigned-{i}")),
                value: price.value.clone(),
                country: price.country.clone(),
                channel: price.channel.clone(),
                customer_group: price.customer_group.clone(),
            }),
            UpdateAction::ChangePrice {
                price_id, price, ..
            } => {
                let entry = variant
                    .prices
                    .iter_mut()
                    .find(|p| p.id.as_deref() == Some(price_id.as_str()))
                    .expect("changed price must exist");
                entry.value = price.value.clone();
            }
            UpdateAction::RemovePrice { price_id, .. } => {
                variant
                    .prices
                    .retain(|p| p.id.as_deref() != Some(price_id.as_str()));
            }
            UpdateAction::SetAttribute { name, value, .. } => {
                match variant.attributes.iter_mut().find(|a| &a.name == name) {
                    Some(attr) => attr.value = value.clone(),
                    None => variant.attributes.push(Attribute {
                        name: name.clone(),
                        value: value.clone(),
                    }),
                }
            }
        }
    }
}

// ── Prices ──────────────────────────────────────────────────────────────────

#[test]
fn adds_missing_target_price_then_converges() {
    // 100.00 RUB, rate 0.011 → 1.10 EUR, as a single addPrice.
    let rates = CurrencyTable::new("RUB").with_target("EUR", 0.011);
    let mut v = variant(vec![price("RUB", 10_000, Some("p-rub"))], Vec::new());

    let actions = plan_price_updates("test", &v, &rates);
    assert_eq!(actions.len(), 1);
    match &actions[0] {
        UpdateAction::AddPrice {
            variant_id, price, ..
        } => {
            assert_eq!(*variant_id, 1);
            assert_eq!(price.value.currency_code, "EUR");
            assert_eq!(price.value.cent_amount, 110);
        }
        other => panic!("expected addPrice, got {other:?}"),
    }

    // Re-reconciling against the updated state is a no-op.
    apply(&mut v, &actions);
    assert!(plan_price_updates("test", &v, &rates).is_empty());
}

#[test]
fn changes_differing_price_then_converges() {
    let rates = CurrencyTable::new("RUB").with_target("EUR", 0.011);
    let mut v = variant(
        vec![
            price("RUB", 10_000, Some("p-rub")),
            price("EUR", 95, Some("p-eur")),
        ],
        Vec::new(),
    );

    let actions = plan_price_updates("test", &v, &rates);
    assert_eq!(actions.len(), 1);
    match &actions[0] {
        UpdateAction::ChangePrice {
            price_id, price, ..
        } => {
            assert_eq!(price_id, "p-eur");
            assert_eq!(price.value.cent_amount, 110);
        }
        other => panic!("expected changePrice, got {other:?}"),
    }

    apply(&mut v, &actions);
    assert!(plan_price_updates("test", &v, &rates).is_empty());
}

#[test]
fn equal_price_is_a_noop() {
    let rates = CurrencyTable::new("RUB").with_target("EUR", 0.011);
    let v = variant(
        vec![
            price("RUB", 10_000, Some("p-rub")),
            price("EUR", 110, Some("p-eur")),
        ],
        Vec::new(),
    );
    assert!(plan_price_updates("test", &v, &rates).is_empty());
}

#[test]
fn multiple_targets_converge_together() {
    let rates = CurrencyTable::default(); // RUB → USD, EUR
    let mut v = variant(vec![price("RUB", 250_000, Some("p-rub"))], Vec::new());

    let actions = plan_price_updates("test", &v, &rates);
    assert_eq!(actions.len(), 2);

    apply(&mut v, &actions);
    assert!(plan_price_updates("test", &v, &rates).is_empty());
}

#[test]
fn no_source_price_plans_nothing() {
    let rates = CurrencyTable::default();
    let v = variant(vec![price("EUR", 110, Some("p-eur"))], Vec::new());
    assert!(plan_price_updates("test", &v, &rates).is_empty());
}

#[test]
fn non_positive_amount_is_rejected() {
    let v = variant(vec![price("RUB", 10_000, Some("p-rub"))], Vec::new());

    let zero_rate = CurrencyTable::new("RUB").with_target("EUR", 0.0);
    assert!(plan_price_updates("test", &v, &zero_rate).is_empty());

    let garbage_rate = CurrencyTable::new("RUB").with_target("EUR", -0.5);
    assert!(plan_price_updates("test", &v, &garbage_rate).is_empty());
}

#[test]
fn scoping_tuple_is_part_of_price_identity() {
    // The existing EUR price is scoped to a country; the source RUB entry
    // is unscoped, so that EUR price is a different entry and a new
    // unscoped one must be added.
    let rates = CurrencyTable::new("RUB").with_target("EUR", 0.011);
    let mut scoped_eur = price("EUR", 110, Some("p-eur-de"));
    scoped_eur.country = Some("DE".to_string());
    let v = variant(
        vec![price("RUB", 10_000, Some("p-rub")), scoped_eur],
        Vec::new(),
    );

    let actions = plan_price_updates("test", &v, &rates);
    assert_eq!(actions.len(), 1);
    assert!(matches!(actions[0], UpdateAction::AddPrice { .. }));
}

#[test]
fn derived_price_inherits_source_scope() {
    let rates = CurrencyTable::new("RUB").with_target("EUR", 0.011);
    let mut rub = price("RUB", 10_000, Some("p-rub"));
    rub.country = Some("RU".to_string());
    rub.channel = Some(Reference {
        type_id: Some("channel".to_string()),
        id: "web".to_string(),
    });
    let mut v = variant(vec![rub], Vec::new());

    let actions = plan_price_updates("test", &v, &rates);
    match &actions[0] {
        UpdateAction::AddPrice { price, .. } => {
            assert_eq!(price.country.as_deref(), Some("RU"));
            assert_eq!(price.channel.as_ref().map(|r| r.id.as_str()), Some("web"));
        }
        other => panic!("expected addPrice, got {other:?}"),
    }

    apply(&mut v, &actions);
    assert!(plan_price_updates("test", &v, &rates).is_empty());
}

// ── Price removal ───────────────────────────────────────────────────────────

#[test]
fn removes_only_listed_currencies() {
    let v = variant(
        vec![
            price("RUB", 10_000, Some("p-rub")),
            price("USD", 126, Some("p-usd")),
            price("EUR", 110, Some("p-eur")),
        ],
        Vec::new(),
    );

    let actions = plan_price_removal(
        "test",
        &[&v],
        &["RUB".to_string(), "USD".to_string()],
        "EUR",
    );
    assert_eq!(actions.len(), 2);
    let removed: Vec<&str> = actions
        .iter()
        .map(|a| match a {
            UpdateAction::RemovePrice { price_id, .. } => price_id.as_str(),
            other => panic!("expected removePrice, got {other:?}"),
        })
        .collect();
    assert!(removed.contains(&"p-rub"));
    assert!(removed.contains(&"p-usd"));
}

#[test]
fn never_strips_a_variant_of_all_prices() {
    // No EUR price to keep → nothing is removed from this variant.
    let v = variant(
        vec![
            price("RUB", 10_000, Some("p-rub")),
            price("USD", 126, Some("p-usd")),
        ],
        Vec::new(),
    );

    let actions = plan_price_removal(
        "test",
        &[&v],
        &["RUB".to_string(), "USD".to_string()],
        "EUR",
    );
    assert!(actions.is_empty());
}

// ── Localized attributes ────────────────────────────────────────────────────

#[test]
fn hong_kong_is_rewritten_then_converges() {
    let table = CountryTranslations::default();
    let mut v = variant(
        Vec::new(),
        vec![country_attr(&[("ru", "Гонконг"), ("en", "Hong Kong")])],
    );

    let action = plan_country_update("test", &v, &table).expect("rewrite expected");
    match &action {
        UpdateAction::SetAttribute { name, value, .. } => {
            assert_eq!(name, "country-of-origin");
            let l = value.as_localized().unwrap();
            assert_eq!(l.get("ru"), Some("Китай"));
            assert_eq!(l.get("en"), Some("China"));
        }
        other => panic!("expected setAttribute, got {other:?}"),
    }

    apply(&mut v, std::slice::from_ref(&action));
    assert!(plan_country_update("test", &v, &table).is_none());
}

#[test]
fn dictionary_translation_fills_missing_english() {
    let table = CountryTranslations::default();
    let mut v = variant(Vec::new(), vec![country_attr(&[("ru", "Россия")])]);

    let action = plan_country_update("test", &v, &table).expect("translation expected");
    match &action {
        UpdateAction::SetAttribute { value, .. } => {
            let l = value.as_localized().unwrap();
            assert_eq!(l.get("ru"), Some("Россия"));
            assert_eq!(l.get("en"), Some("Russia"));
        }
        other => panic!("expected setAttribute, got {other:?}"),
    }

    apply(&mut v, std::slice::from_ref(&action));
    assert!(plan_country_update("test", &v, &table).is_none());
}

#[test]
fn correct_translation_is_a_noop() {
    let table = CountryTranslations::default();
    let v = variant(
        Vec::new(),
        vec![country_attr(&[("ru", "Германия"), ("en", "Germany")])],
    );
    assert!(plan_country_update("test", &v, &table).is_none());
}

#[test]
fn unknown_country_without_english_is_left_alone() {
    // No dictionary entry; the pipeline must not guess.
    let table = CountryTranslations::default();
    let v = variant(Vec::new(), vec![country_attr(&[("ru", "Уругвай")])]);
    assert!(plan_country_update("test", &v, &table).is_none());
}

#[test]
fn missing_or_non_localized_attribute_is_ignored() {
    let table = CountryTranslations::default();

    let without = variant(Vec::new(), Vec::new());
    assert!(plan_country_update("test", &without, &table).is_none());

    let scalar = variant(
        Vec::new(),
        vec![Attribute {
            name: "country-of-origin".to_string(),
            value: AttributeValue::Text("Россия".to_string()),
        }],
    );
    assert!(plan_country_update("test", &scalar, &table).is_none());
}

// ── Categories ──────────────────────────────────────────────────────────────

#[test]
fn category_keys_resolve_and_dedupe() {
    let keys = resolve_category_keys(
        "test",
        ["strategicheskie", "board-games", "STRATEGICHESKIE", "kooperativnie"],
    );
    assert_eq!(keys, vec!["strategy-games", "board-games", "cooperative-games"]);
}

#[test]
fn unresolved_keys_are_dropped_not_fatal() {
    let keys = resolve_category_keys("test", ["miniatures", "family", "unknown-key"]);
    assert_eq!(keys, vec!["family-games"]);
}
