//! Currency pair ordering.
//!
//! Finage lists some crosses only against USD as the base (`USDJPY`, never
//! `JPYUSD`). Requests for the reverse direction are sent as the listed pair
//! and the result is inverted on the way back.

/// Requested `(base, quote)` pairs that must be queried as `(quote, base)`.
const INVERTED_PAIRS: &[(&str, &str)] = &[
    ("JPY", "USD"),
    ("CAD", "USD"),
    ("CHF", "USD"),
    ("CNY", "USD"),
    ("HKD", "USD"),
    ("SGD", "USD"),
    ("SEK", "USD"),
    ("NOK", "USD"),
    ("DKK", "USD"),
    ("MXN", "USD"),
    ("ZAR", "USD"),
    ("TRY", "USD"),
    ("INR", "USD"),
    ("KRW", "USD"),
    ("BRL", "USD"),
];

/// The pair as sent upstream, and whether it was flipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairOrdering {
    pub from: String,
    pub to: String,
    pub inverted: bool,
}

impl PairOrdering {
    /// Decide the upstream ordering for uppercase `base`/`quote` symbols.
    pub fn resolve(base: &str, quote: &str) -> Self {
        if is_inverted(base, quote) {
            Self {
                from: quote.to_string(),
                to: base.to_string(),
                inverted: true,
            }
        } else {
            Self {
                from: base.to_string(),
                to: quote.to_string(),
                inverted: false,
            }
        }
    }

    /// Map an upstream price back into the requested direction.
    pub fn apply(&self, price: f64) -> f64 {
        if self.inverted {
            1.0 / price
        } else {
            price
        }
    }
}

pub fn is_inverted(base: &str, quote: &str) -> bool {
    INVERTED_PAIRS
        .iter()
        .any(|(b, q)| *b == base && *q == quote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_pair() {
        let pair = PairOrdering::resolve("EUR", "USD");
        assert_eq!(pair.from, "EUR");
        assert_eq!(pair.to, "USD");
        assert!(!pair.inverted);
        assert_eq!(pair.apply(1.25), 1.25);
    }

    #[test]
    fn test_inverted_pair() {
        let pair = PairOrdering::resolve("JPY", "USD");
        assert_eq!(pair.from, "USD");
        assert_eq!(pair.to, "JPY");
        assert!(pair.inverted);
        assert_eq!(pair.apply(150.0), 1.0 / 150.0);
    }

    #[test]
    fn test_listed_direction_is_not_inverted() {
        // USDJPY is listed as-is
        assert!(!is_inverted("USD", "JPY"));
        assert!(is_inverted("JPY", "USD"));
    }

    #[test]
    fn test_both_directions_query_the_same_listing() {
        let requested = PairOrdering::resolve("CAD", "USD");
        let listed = PairOrdering::resolve("USD", "CAD");
        assert_eq!(
            (requested.from.as_str(), requested.to.as_str()),
            (listed.from.as_str(), listed.to.as_str())
        );

        let upstream_mid = 1.36;
        let product = requested.apply(upstream_mid) * listed.apply(upstream_mid);
        assert!((product - 1.0).abs() < 1e-12);
    }
}
