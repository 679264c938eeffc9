use meeple_catalog::normalize::{
    NumericRange, first_list_item, normalize_ws, parse_age, parse_player_count, parse_playtime,
    parse_price_rub, parse_weight_kg,
};

#[test]
fn players_explicit_range() {
    let r = parse_player_count("2-4");
    assert_eq!(r, NumericRange { min: Some(2), max: Some(4) });
}

#[test]
fn players_range_with_spaces() {
    let r = parse_player_count("2 - 4 человека");
    assert_eq!(r, NumericRange { min: Some(2), max: Some(4) });
}

#[test]
fn players_ot_do_range() {
    let r = parse_player_count("от 2 до 4");
    assert_eq!(r, NumericRange { min: Some(2), max: Some(4) });
}

#[test]
fn players_open_ended_plus() {
    let r = parse_player_count("3+");
    assert_eq!(r, NumericRange { min: Some(3), max: Some(99) });
}

#[test]
fn players_lower_bound_only() {
    let r = parse_player_count("от 5");
    assert_eq!(r, NumericRange { min: Some(5), max: None });
}

#[test]
fn players_single_value() {
    let r = parse_player_count("4");
    assert_eq!(r, NumericRange { min: Some(4), max: Some(4) });
}

#[test]
fn players_junk() {
    let r = parse_player_count("junk");
    assert_eq!(r, NumericRange { min: None, max: None });
}

#[test]
fn players_empty() {
    assert_eq!(parse_player_count(""), NumericRange::default());
}

#[test]
fn playtime_plus_has_no_sentinel() {
    let r = parse_playtime("60+");
    assert_eq!(r, NumericRange { min: Some(60), max: None });
}

#[test]
fn playtime_range() {
    let r = parse_playtime("30-60 минут");
    assert_eq!(r, NumericRange { min: Some(30), max: Some(60) });
}

#[test]
fn playtime_ot() {
    let r = parse_playtime("от 90");
    assert_eq!(r, NumericRange { min: Some(90), max: None });
}

#[test]
fn age_plus() {
    assert_eq!(parse_age("12+"), Some(12));
}

#[test]
fn age_ot() {
    assert_eq!(parse_age("от 6 лет"), Some(6));
}

#[test]
fn age_unparseable() {
    assert_eq!(parse_age("для взрослых"), None);
}

#[test]
fn price_with_currency_sign_and_spaces() {
    assert_eq!(parse_price_rub("2 990 ₽"), Some(2990));
}

#[test]
fn price_plain_number() {
    assert_eq!(parse_price_rub("1499"), Some(1499));
}

#[test]
fn price_non_numeric() {
    assert_eq!(parse_price_rub("по запросу"), None);
}

#[test]
fn price_empty() {
    assert_eq!(parse_price_rub(""), None);
}

#[test]
fn weight_with_decimal_comma() {
    assert_eq!(parse_weight_kg("1,2 кг"), Some(1.2));
}

#[test]
fn weight_plain() {
    assert_eq!(parse_weight_kg("0.5"), Some(0.5));
}

#[test]
fn weight_unparseable() {
    assert_eq!(parse_weight_kg("тяжелая"), None);
}

#[test]
fn first_item_of_country_list() {
    assert_eq!(first_list_item("Россия, Китай"), "Россия");
    assert_eq!(first_list_item("Германия"), "Германия");
    assert_eq!(first_list_item(""), "");
}

#[test]
fn whitespace_normalization() {
    assert_eq!(normalize_ws("  от   2  до 4 "), "от 2 до 4");
}

#[test]
fn huge_number_does_not_panic() {
    // Digit runs that overflow u32 are skipped, not crashed on.
    let r = parse_player_count("99999999999999");
    assert_eq!(r, NumericRange::default());
}
