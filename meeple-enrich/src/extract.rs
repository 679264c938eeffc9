//! Heuristics for pulling English-language data out of a game's details.
//!
//! The database's primary name is often bilingual ("Колонизаторы (CATAN)"),
//! so the extractor prefers a non-Cyrillic parenthetical, then a primary
//! name that is itself non-Cyrillic, then any non-Cyrillic alternate name.

use crate::types::{EnrichedData, GameDetails};

/// True when the text contains any Cyrillic character.
pub fn has_cyrillic(s: &str) -> bool {
    s.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c))
}

/// Extract English name, description, and publication year.
///
/// `original_ru` is the Russian name the search was made with; it is used to
/// reject primary names that merely echo the query.
pub fn extract_english(details: &GameDetails, original_ru: &str) -> EnrichedData {
    let mut out = EnrichedData {
        year_published: details.year_published,
        ..EnrichedData::default()
    };

    if let Some(primary) = details.names.iter().find(|n| n.primary) {
        let paren = parenthetical(&primary.text);
        if let Some(p) = paren {
            if !has_cyrillic(p) {
                out.name_en = p.trim().to_string();
            }
        }
        if out.name_en.is_empty()
            && !primary.text.contains(original_ru)
            && !has_cyrillic(&primary.text)
        {
            out.name_en = primary.text.trim().to_string();
        }
        if out.name_en.is_empty() {
            // Last resort: take the parenthetical even if imperfect.
            if let Some(p) = paren {
                out.name_en = p.trim().to_string();
            }
        }
    }

    if out.name_en.is_empty() {
        if let Some(alt) = details.names.iter().find(|n| {
            !has_cyrillic(&n.text) && !n.text.eq_ignore_ascii_case(original_ru)
        }) {
            out.name_en = alt.text.trim().to_string();
        }
    }

    if let Some(desc) = &details.description {
        out.description_en = clean_description(desc);
    }

    out
}

/// Text inside the first parenthesized group, if any.
fn parenthetical(s: &str) -> Option<&str> {
    let start = s.find('(')?;
    let rest = &s[start + 1..];
    let end = rest.find(')')?;
    let inner = &rest[..end];
    if inner.is_empty() { None } else { Some(inner) }
}

/// Turn the database's entity-encoded description into plain text:
/// `<br>` variants become newlines, character entities are decoded, and the
/// result is trimmed.
fn clean_description(raw: &str) -> String {
    let mut text = raw.to_string();
    for br in ["<br/>", "<br />", "<br>", "<BR/>", "<BR />", "<BR>"] {
        text = text.replace(br, "\n");
    }
    decode_entities(&text).trim().to_string()
}

/// Decode numeric character references and common named entities. The XML
/// layer already decoded one level; descriptions arrive double-encoded.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';') {
            // Entities are short; anything longer is literal text.
            Some(semi) if semi <= 10 => {
                let entity = &tail[1..semi];
                match decode_one(entity) {
                    Some(decoded) => out.push_str(&decoded),
                    None => out.push_str(&tail[..=semi]),
                }
                rest = &tail[semi + 1..];
            }
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_one(entity: &str) -> Option<String> {
    if let Some(num) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        let code = u32::from_str_radix(num, 16).ok()?;
        return char::from_u32(code).map(String::from);
    }
    if let Some(num) = entity.strip_prefix('#') {
        let code: u32 = num.parse().ok()?;
        return char::from_u32(code).map(String::from);
    }
    let decoded = match entity {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "ndash" => "–",
        "mdash" => "—",
        "hellip" => "…",
        "rsquo" => "’",
        "lsquo" => "‘",
        "rdquo" => "”",
        "ldquo" => "“",
        _ => return None,
    };
    Some(decoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameName;

    fn details(names: &[(&str, bool)], desc: Option<&str>, year: Option<i64>) -> GameDetails {
        GameDetails {
            object_id: "13".to_string(),
            names: names
                .iter()
                .map(|(t, p)| GameName {
                    text: (*t).to_string(),
                    primary: *p,
                })
                .collect(),
            description: desc.map(str::to_string),
            year_published: year,
        }
    }

    #[test]
    fn bilingual_primary_name_yields_parenthetical() {
        let d = details(&[("Колонизаторы (CATAN)", true)], None, Some(1995));
        let e = extract_english(&d, "Колонизаторы");
        assert_eq!(e.name_en, "CATAN");
        assert_eq!(e.year_published, Some(1995));
    }

    #[test]
    fn plain_english_primary_name() {
        let d = details(&[("Ticket to Ride", true)], None, None);
        let e = extract_english(&d, "Билет на поезд");
        assert_eq!(e.name_en, "Ticket to Ride");
    }

    #[test]
    fn falls_back_to_non_cyrillic_alternate() {
        let d = details(
            &[("Колонизаторы", true), ("CATAN", false)],
            None,
            None,
        );
        let e = extract_english(&d, "Колонизаторы");
        assert_eq!(e.name_en, "CATAN");
    }

    #[test]
    fn all_cyrillic_names_yield_empty() {
        let d = details(&[("Шакал", true), ("Шакал: Архипелаг", false)], None, None);
        let e = extract_english(&d, "Шакал");
        assert_eq!(e.name_en, "");
    }

    #[test]
    fn description_is_cleaned() {
        let d = details(
            &[],
            Some("Trade &amp; build.<br/>A classic.&#10;Fun&hellip;"),
            None,
        );
        let e = extract_english(&d, "х");
        assert_eq!(e.description_en, "Trade & build.\nA classic.\nFun…");
    }

    #[test]
    fn cyrillic_detection() {
        assert!(has_cyrillic("Игра"));
        assert!(!has_cyrillic("Game 42!"));
    }
}
