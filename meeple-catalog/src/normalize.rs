//! Parsers for free-text product fields scraped from the storefront.
//!
//! Storefront attribute cells mix formats: `"2-4"`, `"от 2 до 4"`, `"3+"`,
//! `"от 5"`, plain numbers, and arbitrary prose. Every parser here is total:
//! unparseable input yields `None`/empty rather than an error, so a bad cell
//! never aborts a batch.

/// Upper bound substituted for open-ended player counts ("3+" → 3..=99).
pub const OPEN_RANGE_MAX: u32 = 99;

/// A parsed numeric range with independently-optional bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumericRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a player-count cell.
///
/// Open-ended counts (`"3+"`) get the [`OPEN_RANGE_MAX`] sentinel as their
/// upper bound; `"от 5"` leaves the upper bound unset.
///
/// # Examples
///
/// ```
/// use meeple_catalog::normalize::parse_player_count;
///
/// assert_eq!(parse_player_count("2-4").min, Some(2));
/// assert_eq!(parse_player_count("3+").max, Some(99));
/// assert_eq!(parse_player_count("от 5").max, None);
/// assert_eq!(parse_player_count("компания").min, None);
/// ```
pub fn parse_player_count(text: &str) -> NumericRange {
    parse_range(text, Some(OPEN_RANGE_MAX))
}

/// Parse a playtime cell. Same grammar as [`parse_player_count`], but an
/// open-ended `"60+"` leaves the upper bound unset instead of substituting
/// a sentinel.
pub fn parse_playtime(text: &str) -> NumericRange {
    parse_range(text, None)
}

/// Parse a recommended-age cell: `"12+"` or `"от 12"`; anything else is `None`.
pub fn parse_age(text: &str) -> Option<u32> {
    let t = normalize_ws(text).to_lowercase();
    find_plus(&t).or_else(|| find_ot(&t))
}

/// Parse a displayed price like `"2 990 ₽"` into whole rubles.
///
/// Strips the currency sign and whitespace, then reads the leading digits;
/// a non-numeric remainder after stripping yields `None`.
pub fn parse_price_rub(text: &str) -> Option<i64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '₽')
        .collect();
    let end = cleaned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(cleaned.len());
    if end == 0 {
        return None;
    }
    cleaned[..end].parse().ok()
}

/// Parse a weight cell like `"1,2 кг"` into kilograms.
pub fn parse_weight_kg(text: &str) -> Option<f64> {
    let t = normalize_ws(text).replace(',', ".");
    let end = t
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(t.len());
    if end == 0 {
        return None;
    }
    t[..end].parse().ok()
}

/// First segment of a comma-separated list, trimmed.
///
/// Country-of-origin cells sometimes list several countries; only the first
/// is kept.
pub fn first_list_item(text: &str) -> &str {
    text.split(',').next().unwrap_or("").trim()
}

// ── Internal scanning ───────────────────────────────────────────────────────

fn parse_range(text: &str, plus_max: Option<u32>) -> NumericRange {
    let t = normalize_ws(text).to_lowercase();
    if t.is_empty() {
        return NumericRange::default();
    }

    if let Some((min, max)) = find_hyphen_range(&t).or_else(|| find_ot_do(&t)) {
        return NumericRange {
            min: Some(min),
            max: Some(max),
        };
    }
    if let Some(n) = find_plus(&t) {
        return NumericRange {
            min: Some(n),
            max: plus_max,
        };
    }
    if let Some(n) = find_ot(&t) {
        return NumericRange {
            min: Some(n),
            max: None,
        };
    }
    if t.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = t.parse() {
            return NumericRange {
                min: Some(n),
                max: Some(n),
            };
        }
    }

    NumericRange::default()
}

/// Read a leading ASCII digit run; returns the value and the remainder.
fn parse_digits(s: &str) -> Option<(u32, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

/// End index of the digit run starting at `start`.
fn digit_run_end(t: &str, start: usize) -> usize {
    t[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|e| start + e)
        .unwrap_or(t.len())
}

/// Find `N - M` anywhere in the text, with optional spaces around the hyphen.
fn find_hyphen_range(t: &str) -> Option<(u32, u32)> {
    let mut idx = 0;
    while let Some(pos) = t[idx..].find(|c: char| c.is_ascii_digit()) {
        let start = idx + pos;
        let end = digit_run_end(t, start);
        if let Ok(min) = t[start..end].parse::<u32>() {
            if let Some(after_hyphen) = t[end..].trim_start().strip_prefix('-') {
                if let Some((max, _)) = parse_digits(after_hyphen.trim_start()) {
                    return Some((min, max));
                }
            }
        }
        idx = end;
    }
    None
}

/// Find `от N до M` anywhere in the text.
fn find_ot_do(t: &str) -> Option<(u32, u32)> {
    for (pos, pat) in t.match_indices("от") {
        let rest = t[pos + pat.len()..].trim_start();
        let Some((min, rest)) = parse_digits(rest) else {
            continue;
        };
        let Some(rest) = rest.trim_start().strip_prefix("до") else {
            continue;
        };
        if let Some((max, _)) = parse_digits(rest.trim_start()) {
            return Some((min, max));
        }
    }
    None
}

/// Find `N+` (digits immediately followed by a plus) anywhere in the text.
fn find_plus(t: &str) -> Option<u32> {
    let mut idx = 0;
    while let Some(pos) = t[idx..].find(|c: char| c.is_ascii_digit()) {
        let start = idx + pos;
        let end = digit_run_end(t, start);
        if t[end..].starts_with('+') {
            if let Ok(n) = t[start..end].parse::<u32>() {
                return Some(n);
            }
        }
        idx = end;
    }
    None
}

/// Find `от N` anywhere in the text.
fn find_ot(t: &str) -> Option<u32> {
    for (pos, pat) in t.match_indices("от") {
        if let Some((n, _)) = parse_digits(t[pos + pat.len()..].trim_start()) {
            return Some(n);
        }
    }
    None
}
