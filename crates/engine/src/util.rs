//! Internal helpers for validation, rounding and name normalization.
//!
//! These utilities are **not** part of the public API.

use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

/// `round(a * b / div)` with half-up rounding, for non-negative inputs.
///
/// Used for line totals (`quantity_milli * price_minor / 1000`) and
/// salary pro-ration.
pub(crate) fn mul_div_round(a: i64, b: i64, div: i64) -> i64 {
    debug_assert!(div > 0);
    (a * b + div / 2) / div
}

/// Normalized key used for per-owner unique names: NFKC, lowercased,
/// inner whitespace collapsed to single spaces.
pub(crate) fn name_key(value: &str) -> String {
    let folded: String = value.nfkc().collect::<String>().to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_rounds_half_up() {
        // 1500 milli * 201 minor / 1000 = 301.5 -> 302
        assert_eq!(mul_div_round(1500, 201, 1000), 302);
        assert_eq!(mul_div_round(1500, 200, 1000), 300);
        assert_eq!(mul_div_round(1, 1, 3), 0);
        assert_eq!(mul_div_round(2, 1, 3), 1);
    }

    #[test]
    fn name_key_collapses_case_and_whitespace() {
        assert_eq!(name_key("  Kesar   Pedha "), "kesar pedha");
        assert_eq!(name_key("KESAR PEDHA"), "kesar pedha");
    }
}
