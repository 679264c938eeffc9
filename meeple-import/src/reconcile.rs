//! Reconciliation: compute the minimal update-action set that converges a
//! stored product with its desired state.
//!
//! Every function here is a pure mapping from (current state, configuration)
//! to actions. Nothing is mutated and nothing is fetched: the batch driver
//! supplies the freshly-read state and applies the returned actions in one
//! atomic call. The critical property is idempotence: reconciling a product
//! that is already converged yields an empty action list, so re-running a
//! migration is always safe.

use std::collections::BTreeMap;

use meeple_catalog::{AttributeValue, taxonomy};
use meeple_commerce::{Money, PriceDraft, ProductVariant, UpdateAction};

use crate::currency::{CurrencyTable, convert_minor};

/// Attribute holding the localized country-of-origin pair.
pub const COUNTRY_ATTRIBUTE: &str = "country-of-origin";

// ── Prices ──────────────────────────────────────────────────────────────────

/// Plan price updates for one variant: derive each target currency's amount
/// from the variant's source-currency price and emit only the actions needed
/// to converge.
///
/// The designated source entry is the variant's first price in the source
/// currency; its scoping dimensions (country, channel, customer group) are
/// inherited by every derived price, and an existing target price counts as
/// "the same entry" only when its scoping tuple matches exactly.
///
/// Missing source price: nothing to derive, warn and return empty. Derived
/// amounts ≤ 0 are rejected with a warning, never emitted.
pub fn plan_price_updates(
    label: &str,
    variant: &ProductVariant,
    rates: &CurrencyTable,
) -> Vec<UpdateAction> {
    let Some(source_price) = variant.price_in(&rates.source) else {
        log::warn!("{label}: no {} price to convert from", rates.source);
        return Vec::new();
    };
    let source_scope = source_price.scope();

    let mut actions = Vec::new();
    for target in &rates.targets {
        let desired = convert_minor(source_price.value.cent_amount, target.rate);
        if desired <= 0 {
            log::warn!(
                "{label}: computed {} amount {desired} is not positive, skipping",
                target.code
            );
            continue;
        }

        let existing = variant
            .prices
            .iter()
            .find(|p| p.value.currency_code == target.code && p.scope() == source_scope);

        let money = Money {
            currency_code: target.code.clone(),
            cent_amount: desired,
        };

        match existing {
            Some(p) if p.value.cent_amount == desired => {
                log::debug!("{label}: {} price already correct", target.code);
            }
            Some(p) => match &p.id {
                Some(id) => actions.push(UpdateAction::change_price(
                    id.clone(),
                    PriceDraft::inheriting_scope(money, source_price),
                )),
                None => log::warn!(
                    "{label}: existing {} price has no id, cannot change it",
                    target.code
                ),
            },
            None => actions.push(UpdateAction::add_price(
                variant.id,
                PriceDraft::inheriting_scope(money, source_price),
            )),
        }
    }

    actions
}

/// Plan removal of prices in `remove` currencies across `variants`, keeping
/// prices in `keep`.
///
/// A variant with no price in the keep currency is skipped entirely rather
/// than stripped of every price. Entries without a platform-assigned id
/// cannot be removed and are warned about.
pub fn plan_price_removal(
    label: &str,
    variants: &[&ProductVariant],
    remove: &[String],
    keep: &str,
) -> Vec<UpdateAction> {
    let mut actions = Vec::new();

    for variant in variants {
        if variant.prices.is_empty() {
            continue;
        }
        if !variant.prices.iter().any(|p| p.value.currency_code == keep) {
            log::warn!(
                "{label}, variant {}: no {keep} price found; skipping removal so the variant keeps at least one price",
                variant.id
            );
            continue;
        }

        for price in &variant.prices {
            if !remove.contains(&price.value.currency_code) {
                continue;
            }
            match &price.id {
                Some(id) => actions.push(UpdateAction::remove_price(id.clone())),
                None => log::warn!(
                    "{label}, variant {}: {} price has no id, cannot remove it",
                    variant.id,
                    price.value.currency_code
                ),
            }
        }
    }

    actions
}

// ── Localized attributes ────────────────────────────────────────────────────

/// Translation table for the country-of-origin attribute, including the
/// unconditional rewrite pair for a deprecated source value.
#[derive(Debug, Clone)]
pub struct CountryTranslations {
    /// ru → en dictionary.
    translations: BTreeMap<String, String>,
    rewrite_from_ru: String,
    rewrite_to_ru: String,
    rewrite_to_en: String,
}

impl Default for CountryTranslations {
    fn default() -> Self {
        let mut translations = BTreeMap::new();
        for (ru, en) in [
            ("Россия", "Russia"),
            ("Китай", "China"),
            ("Бельгия", "Belgium"),
            ("Украина", "Ukraine"),
            ("Германия", "Germany"),
        ] {
            translations.insert(ru.to_string(), en.to_string());
        }
        Self {
            translations,
            // Hong Kong listings are re-labeled as China in both languages.
            rewrite_from_ru: "Гонконг".to_string(),
            rewrite_to_ru: "Китай".to_string(),
            rewrite_to_en: "China".to_string(),
        }
    }
}

impl CountryTranslations {
    pub fn translation(&self, ru: &str) -> Option<&str> {
        self.translations.get(ru).map(String::as_str)
    }
}

/// Plan the country-of-origin update for one variant, or `None` when the
/// attribute is absent, non-localized, or already converged.
///
/// The rewrite source value is replaced with the rewrite pair in both
/// languages whenever the current pair does not already match. Otherwise a
/// dictionary hit updates the `en` slot when it differs; a miss with an
/// empty `en` slot is warned about and left alone; the pipeline never
/// guesses translations.
pub fn plan_country_update(
    label: &str,
    variant: &ProductVariant,
    table: &CountryTranslations,
) -> Option<UpdateAction> {
    let attr = variant.attribute(COUNTRY_ATTRIBUTE)?;
    let current = attr.value.as_localized()?;

    let ru = current.get_or_empty("ru");
    let en = current.get_or_empty("en");

    if ru == table.rewrite_from_ru {
        if ru != table.rewrite_to_ru || en != table.rewrite_to_en {
            let mut updated = current.clone();
            updated.set("ru", table.rewrite_to_ru.clone());
            updated.set("en", table.rewrite_to_en.clone());
            return Some(UpdateAction::set_attribute(
                variant.id,
                COUNTRY_ATTRIBUTE,
                AttributeValue::Localized(updated),
            ));
        }
        return None;
    }

    if let Some(translated) = table.translation(ru) {
        if en != translated {
            let mut updated = current.clone();
            updated.set("en", translated);
            return Some(UpdateAction::set_attribute(
                variant.id,
                COUNTRY_ATTRIBUTE,
                AttributeValue::Localized(updated),
            ));
        }
        return None;
    }

    if !ru.is_empty() && en.is_empty() {
        log::warn!("{label}: no translation for country '{ru}', skipping");
    }
    None
}

// ── Categories ──────────────────────────────────────────────────────────────

/// Resolve source category keys into a deduplicated set of canonical keys.
///
/// Unresolved keys are dropped with a warning and never block the rest. The
/// returned set REPLACES any previous assignment wholesale: category
/// membership is cheap to recompute each run, and stale memberships must
/// not survive a taxonomy change.
pub fn resolve_category_keys<'a>(
    label: &str,
    source_keys: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for source_key in source_keys {
        match taxonomy::resolve(source_key) {
            Some(cat) => {
                if !keys.contains(&cat.key) {
                    keys.push(cat.key);
                }
            }
            None => log::warn!("{label}: no category mapping for source key '{source_key}'"),
        }
    }
    keys
}
