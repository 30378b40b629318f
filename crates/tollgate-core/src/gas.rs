//! Gas metering primitives
//!
//! Every transaction carries one `GasMeter`. Authenticators charge their
//! declared static gas before they run, and delegated operations (signature
//! verification, balance reads) charge their own cost when they execute.
//! Running out of gas aborts the whole transaction.

use crate::errors::{Result, TollgateError};
use serde::{Deserialize, Serialize};

/// Unit of metered execution cost.
pub type Gas = u64;

/// Transaction-scoped gas meter.
///
/// `consumed` only grows. A rejected charge saturates the meter at `limit`,
/// mirroring how the host aborts the transaction on exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasMeter {
    /// Maximum gas permitted for the transaction.
    limit: Gas,
    /// Gas already consumed.
    consumed: Gas,
}

impl GasMeter {
    /// Create a new meter with zero consumption.
    pub fn new(limit: Gas) -> Self {
        Self { limit, consumed: 0 }
    }

    /// Meter that never runs out, for genesis and simulation paths.
    pub fn infinite() -> Self {
        Self::new(Gas::MAX)
    }

    pub fn limit(&self) -> Gas {
        self.limit
    }

    pub fn consumed(&self) -> Gas {
        self.consumed
    }

    /// Remaining headroom before the meter is exhausted.
    pub fn remaining(&self) -> Gas {
        self.limit.saturating_sub(self.consumed)
    }

    /// Returns true if charging `amount` would still be within the limit.
    pub fn can_consume(&self, amount: Gas) -> bool {
        self.consumed.saturating_add(amount) <= self.limit
    }

    /// Charge `amount`, failing with `OutOfGas` when the limit is exceeded.
    pub fn consume(&mut self, amount: Gas, descriptor: &str) -> Result<()> {
        let attempted = self.consumed.saturating_add(amount);
        if attempted > self.limit {
            self.consumed = self.limit;
            tracing::debug!(
                descriptor,
                amount,
                limit = self.limit,
                "Gas meter exhausted"
            );
            return Err(TollgateError::OutOfGas {
                descriptor: descriptor.to_string(),
                limit: self.limit,
                consumed: attempted,
            });
        }

        self.consumed = attempted;
        tracing::trace!(descriptor, amount, consumed = self.consumed, "Gas consumed");
        Ok(())
    }
}

impl Default for GasMeter {
    fn default() -> Self {
        Self::infinite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_within_limit() {
        let mut meter = GasMeter::new(1_000);
        meter.consume(400, "first").unwrap();
        meter.consume(600, "second").unwrap();
        assert_eq!(meter.consumed(), 1_000);
        assert_eq!(meter.remaining(), 0);
    }

    #[test]
    fn test_consume_past_limit_saturates() {
        let mut meter = GasMeter::new(500);
        meter.consume(300, "first").unwrap();

        let err = meter.consume(300, "static gas").unwrap_err();
        assert_eq!(
            err,
            TollgateError::OutOfGas {
                descriptor: "static gas".to_string(),
                limit: 500,
                consumed: 600,
            }
        );
        assert_eq!(meter.consumed(), 500);
        assert!(!meter.can_consume(1));
    }

    #[test]
    fn test_infinite_meter() {
        let mut meter = GasMeter::infinite();
        meter.consume(u64::MAX - 1, "huge").unwrap();
        assert!(meter.can_consume(1));
    }

    proptest::proptest! {
        #[test]
        fn prop_consumed_never_exceeds_limit(
            limit in 0u64..10_000,
            charges in proptest::collection::vec(0u64..2_000, 0..16),
        ) {
            let mut meter = GasMeter::new(limit);
            let mut expected: u64 = 0;
            for charge in charges {
                let ok = meter.consume(charge, "charge").is_ok();
                proptest::prop_assert_eq!(ok, expected + charge <= limit);
                expected = if ok { expected + charge } else { limit };
                proptest::prop_assert_eq!(meter.consumed(), expected);
            }
            proptest::prop_assert!(meter.consumed() <= limit);
        }
    }
}
