use std::collections::HashSet;

use meeple_catalog::taxonomy::{all_categories, resolve};

#[test]
fn resolves_subcategory_by_source_slug() {
    let cat = resolve("strategicheskie").expect("known source slug");
    assert_eq!(cat.key, "strategy-games");
    assert_eq!(cat.parent_key.as_deref(), Some("board-games"));
    assert_eq!(cat.name.get("ru"), Some("Стратегические"));
    assert_eq!(cat.name.get("en"), Some("Strategy Games"));
}

#[test]
fn resolves_root_by_canonical_key() {
    let cat = resolve("board-games").expect("root key");
    assert_eq!(cat.key, "board-games");
    assert!(cat.parent_key.is_none());
}

#[test]
fn resolution_is_case_insensitive() {
    assert_eq!(resolve("STRATEGICHESKIE").unwrap().key, "strategy-games");
    assert_eq!(resolve("Board-Games").unwrap().key, "board-games");
}

#[test]
fn unknown_key_is_not_found() {
    assert!(resolve("").is_none());
    assert!(resolve("no-such-category").is_none());
    assert!(resolve("warhammer-minis").is_none());
}

#[test]
fn subcategory_map_wins_over_root_list() {
    // "2players" exists only in the subcategory map; make sure numeric-ish
    // keys go through the same path as everything else.
    let cat = resolve("2players").unwrap();
    assert_eq!(cat.key, "duel-games");
}

#[test]
fn keys_are_unique() {
    let cats = all_categories();
    let keys: HashSet<_> = cats.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys.len(), cats.len());
}

#[test]
fn two_level_forest_invariant() {
    let cats = all_categories();
    let root_keys: HashSet<_> = cats
        .iter()
        .filter(|c| c.parent_key.is_none())
        .map(|c| c.key.clone())
        .collect();

    for cat in &cats {
        if let Some(parent) = &cat.parent_key {
            assert!(
                root_keys.contains(parent),
                "category '{}' has non-root parent '{}'",
                cat.key,
                parent
            );
        }
    }
}

#[test]
fn export_order_is_roots_then_children_grouped() {
    let cats = all_categories();

    // Roots come first, in declaration order.
    assert_eq!(cats[0].key, "board-games");
    assert_eq!(cats[1].key, "game-accessories");
    assert_eq!(cats[2].key, "game-expansions");
    assert_eq!(cats[3].key, "game-sets-bundles");

    // After the roots, children appear grouped by parent, and each group's
    // parent appears in root declaration order.
    let child_parents: Vec<_> = cats[4..]
        .iter()
        .map(|c| c.parent_key.clone().expect("children only after roots"))
        .collect();
    let mut deduped = child_parents.clone();
    deduped.dedup();
    let unique: HashSet<_> = deduped.iter().collect();
    assert_eq!(unique.len(), deduped.len(), "children of one parent must be contiguous");
}

#[test]
fn every_resolved_category_round_trips_through_export() {
    // Every subcategory reachable through resolve() must appear in the bulk
    // export exactly once.
    let cats = all_categories();
    let party = resolve("igry-dlya-vecherinok").unwrap();
    assert_eq!(cats.iter().filter(|c| c.key == party.key).count(), 1);
}
