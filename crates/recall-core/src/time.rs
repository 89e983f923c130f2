use serde::Deserialize;
use serde::Serialize;

/// Signed 64-bit epoch-millisecond timestamp (valid time or transaction time).
///
/// Bitemporal fields (`vt_start`/`vt_end`/`tt_start`/`tt_end`) and the
/// `snapshot_at`/`vt_start` fields on every entity are all this type.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The open-ended interval sentinel: 253 402 300 799 000 ms (~9999-12-31).
    pub const MAX_DATE: Timestamp = Timestamp(253_402_300_799_000);

    #[must_use]
    pub fn from_millis(ms: i64) -> Self {
        Timestamp(ms)
    }

    #[must_use]
    pub fn millis(self) -> i64 {
        self.0
    }

    /// One millisecond before `self`, saturating at `i64::MIN`.
    ///
    /// Used for the replay pre-state query: rehydrate to `vt_start - 1` so
    /// the diff produced by the call under replay, if any, is not yet
    /// applied. Saturating rather than a checked/panicking subtraction
    /// keeps this a total function; it assumes no two causally distinct
    /// events share a timestamp, which is the caller's assumption to
    /// uphold, not this type's.
    #[must_use]
    pub fn saturating_pred(self) -> Self {
        Timestamp(self.0.saturating_sub(1))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp(0)
    }
}

/// Free-standing alias for [`Timestamp::MAX_DATE`], so callers can write
/// `recall_core::MAX_DATE` instead of naming the inherent const through
/// the type.
pub const MAX_DATE: Timestamp = Timestamp::MAX_DATE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_date_matches_spec_constant() {
        assert_eq!(Timestamp::MAX_DATE.millis(), 253_402_300_799_000);
    }

    #[test]
    fn saturating_pred_decrements() {
        assert_eq!(Timestamp::from_millis(1000).saturating_pred().millis(), 999);
    }

    #[test]
    fn saturating_pred_does_not_panic_at_min() {
        let t = Timestamp::from_millis(i64::MIN);
        assert_eq!(t.saturating_pred(), t);
    }
}
