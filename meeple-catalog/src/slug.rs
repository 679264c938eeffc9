//! URL slug generation with Cyrillic transliteration.
//!
//! Slugs double as stable identifiers for derived image filenames, so this
//! function must stay pure and deterministic: identical input always yields
//! identical output.

/// Transliterate one lowercase Cyrillic letter to its Latin digraph.
///
/// Returns `None` for non-Cyrillic characters; the hard and soft signs map
/// to the empty string.
fn translit(c: char) -> Option<&'static str> {
    let s = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(s)
}

/// Generate a URL slug from arbitrary text.
///
/// Lower-cases, transliterates Cyrillic, turns whitespace runs into single
/// hyphens, drops every character outside `[a-z0-9-]`, collapses repeated
/// hyphens, and trims leading/trailing hyphens.
///
/// # Examples
///
/// ```
/// use meeple_catalog::slug::slugify;
///
/// assert_eq!(slugify("Тестовая Игра"), "testovaya-igra");
/// assert_eq!(slugify("Колонизаторы: Цветущая империя"), "kolonizatory-tsvetushchaya-imperiya");
/// assert_eq!(slugify("  Ticket to Ride!  "), "ticket-to-ride");
/// ```
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.to_lowercase().chars() {
        if let Some(lat) = translit(c) {
            out.push_str(lat);
        } else if c.is_whitespace() {
            out.push('-');
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            out.push(c);
        }
        // Everything else is dropped.
    }

    // Collapse hyphen runs and trim.
    let mut slug = String::with_capacity(out.len());
    let mut prev_hyphen = false;
    for c in out.chars() {
        if c == '-' {
            if !prev_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            prev_hyphen = true;
        } else {
            slug.push(c);
            prev_hyphen = false;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}
