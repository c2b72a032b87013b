use std::{fmt, str::FromStr};

use crate::EngineError;

/// Signed money amount represented as **integer cents**.
///
/// Stored amounts are positive and bounded by [`Money::MAX`]; totals and
/// balances are built with checked arithmetic.
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10.5".parse::<Money>().unwrap().cents(), 1050);
/// assert_eq!(Money::new(-1234).to_string(), "-$12.34");
/// assert!("10,5".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount a single transaction may carry: $1,000,000,000.00.
    pub const MAX: Money = Money(100_000_000_000);

    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses `<digits>[.<1-2 digits>]` into cents, up to [`Money::MAX`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidAmount(format!("invalid amount {s:?}"));
        let too_large = || EngineError::InvalidAmount(format!("amount above {}", Money::MAX));

        let (units, frac) = match s.split_once('.') {
            Some((units, frac)) => (units, Some(frac)),
            None => (s, None),
        };
        if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let cents: i64 = match frac {
            None => 0,
            Some(frac) if frac.is_empty() || frac.len() > 2 => return Err(invalid()),
            Some(frac) if !frac.bytes().all(|b| b.is_ascii_digit()) => return Err(invalid()),
            Some(frac) if frac.len() == 1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            Some(frac) => frac.parse().map_err(|_| invalid())?,
        };

        let total = units
            .parse::<i64>()
            .ok()
            .and_then(|units| units.checked_mul(100))
            .and_then(|units| units.checked_add(cents))
            .map(Money)
            .ok_or_else(too_large)?;
        if total > Money::MAX {
            return Err(too_large());
        }
        Ok(total)
    }
}
