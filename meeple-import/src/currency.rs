//! Deterministic price derivation from fixed per-run exchange rates.
//!
//! Rates are static configuration passed in at startup, never fetched
//! live. This keeps every run reproducible and makes the converter a pure
//! function of its inputs.

/// A target currency with its source→target exchange rate.
#[derive(Debug, Clone)]
pub struct TargetCurrency {
    pub code: String,
    pub rate: f64,
}

/// Source currency plus the ordered list of currencies to derive from it.
///
/// An explicit immutable value handed to the reconciler; pure components
/// never read rates from ambient state.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    pub source: String,
    pub targets: Vec<TargetCurrency>,
}

impl CurrencyTable {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            targets: Vec::new(),
        }
    }

    pub fn with_target(mut self, code: impl Into<String>, rate: f64) -> Self {
        self.targets.push(TargetCurrency {
            code: code.into(),
            rate,
        });
        self
    }
}

impl Default for CurrencyTable {
    /// The rates the catalog migration ran with.
    fn default() -> Self {
        Self::new("RUB")
            .with_target("USD", 0.01256)
            .with_target("EUR", 0.011001)
    }
}

/// Convert a minor-unit amount into a target currency's minor units.
///
/// Computes `round(source_minor / 100 × rate × 100)`, rounding halves away
/// from zero (`f64::round` semantics). Callers must reject results ≤ 0:
/// a garbage rate must never produce a zero-value listing.
///
/// # Examples
///
/// ```
/// use meeple_import::currency::convert_minor;
///
/// // 100.00 RUB at 0.011 → 1.10 EUR
/// assert_eq!(convert_minor(10_000, 0.011), 110);
/// ```
pub fn convert_minor(source_minor: i64, rate: f64) -> i64 {
    let major = source_minor as f64 / 100.0;
    (major * rate * 100.0).round() as i64
}
