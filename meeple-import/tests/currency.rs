use meeple_import::currency::{CurrencyTable, convert_minor};

#[test]
fn converts_through_major_units() {
    // 100.00 RUB at 0.011 → 1.10 EUR.
    assert_eq!(convert_minor(10_000, 0.011), 110);
    // 2500.00 RUB at 0.01256 → 31.40 USD.
    assert_eq!(convert_minor(250_000, 0.01256), 3140);
}

#[test]
fn rounds_halves_away_from_zero() {
    // 0.50 RUB at 0.01 → 0.005 units → 0.5 minor → rounds up to 1.
    assert_eq!(convert_minor(50, 0.01), 1);
    // Just below the tie rounds down.
    assert_eq!(convert_minor(49, 0.01), 0);
}

#[test]
fn zero_and_negative_results_pass_through_for_caller_rejection() {
    // The converter itself is a pure function; rejection of non-positive
    // amounts is the reconciler's job.
    assert_eq!(convert_minor(0, 0.011), 0);
    assert_eq!(convert_minor(10_000, 0.0), 0);
    assert!(convert_minor(10_000, -0.01) < 0);
}

#[test]
fn determinism() {
    for _ in 0..3 {
        assert_eq!(convert_minor(123_456, 0.011001), convert_minor(123_456, 0.011001));
    }
}

#[test]
fn default_table_targets_usd_and_eur_from_rub() {
    let table = CurrencyTable::default();
    assert_eq!(table.source, "RUB");
    let codes: Vec<&str> = table.targets.iter().map(|t| t.code.as_str()).collect();
    assert_eq!(codes, vec!["USD", "EUR"]);
}
