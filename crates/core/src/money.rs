//! Currency amounts.

use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

use crate::quantity::Quantity;
use crate::value_object::ValueObject;

/// Non-negative currency amount in the smallest unit (centavos).
///
/// Integer arithmetic keeps totals exact: adding and removing the same items
/// any number of times always lands on the same total.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    pub fn times(self, quantity: Quantity) -> Money {
        Money(self.0.saturating_mul(u64::from(quantity.get())))
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl ValueObject for Money {}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Two-decimal display, e.g. `R$ 9.50`.
impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "R$ {}.{:02}", self.0 / 100, self.0 % 100)
    }
}
