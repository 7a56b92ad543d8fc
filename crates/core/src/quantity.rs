//! Cart quantities.

use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A quantity of at least one unit.
///
/// Zero is unrepresentable: decrementing `1` yields `None`, which the cart
/// treats as "remove the entry".
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const ONE: Quantity = Quantity(NonZeroU32::MIN);

    pub fn new(value: u32) -> Result<Self, DomainError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or_else(|| DomainError::validation("quantity must be at least 1"))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// One more unit (saturates at `u32::MAX`).
    pub fn incremented(self) -> Quantity {
        Quantity(self.0.saturating_add(1))
    }

    /// One fewer unit, or `None` when the quantity would reach zero.
    pub fn decremented(self) -> Option<Quantity> {
        NonZeroU32::new(self.0.get() - 1).map(Quantity)
    }
}

impl ValueObject for Quantity {}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
