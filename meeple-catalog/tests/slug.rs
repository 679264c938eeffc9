use meeple_catalog::slug::slugify;

#[test]
fn cyrillic_transliteration() {
    assert_eq!(slugify("Тестовая Игра"), "testovaya-igra");
    assert_eq!(slugify("Эволюция"), "evolyutsiya");
    assert_eq!(slugify("Шакал"), "shakal");
    assert_eq!(slugify("Ёжики"), "yozhiki");
}

#[test]
fn digraph_table() {
    assert_eq!(slugify("ж х ц ч ш щ ю я"), "zh-h-ts-ch-sh-shch-yu-ya");
}

#[test]
fn hard_and_soft_signs_vanish() {
    assert_eq!(slugify("объезд"), "obezd");
    assert_eq!(slugify("мышь"), "mysh");
}

#[test]
fn output_alphabet_is_constrained() {
    let slug = slugify("Тестовая Игра");
    assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    assert!(!slug.starts_with('-'));
    assert!(!slug.ends_with('-'));
}

#[test]
fn punctuation_is_dropped_and_hyphens_collapse() {
    assert_eq!(slugify("Каркассон: Королевский подарок!"), "karkasson-korolevskij-podarok");
    assert_eq!(slugify("a  --  b"), "a-b");
}

#[test]
fn latin_passes_through() {
    assert_eq!(slugify("Ticket to Ride: Europe"), "ticket-to-ride-europe");
    assert_eq!(slugify("7 Wonders"), "7-wonders");
}

#[test]
fn deterministic() {
    let input = "Подземелья и Пёсики 2: Щедрость";
    assert_eq!(slugify(input), slugify(input));
}

#[test]
fn empty_and_unmappable() {
    assert_eq!(slugify(""), "");
    assert_eq!(slugify("!!!"), "");
    assert_eq!(slugify("   "), "");
}
