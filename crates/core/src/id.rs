//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a product within one catalog load (1-based listing position).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ProductId(u32);

/// Identifier of a banner within one banner load (1-based listing position).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BannerId(u32);

/// Identifier of a signed-up user, as issued by the identity provider.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

macro_rules! impl_ordinal_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create an identifier; ordinals start at 1.
            pub fn new(value: u32) -> Result<Self, DomainError> {
                if value == 0 {
                    return Err(DomainError::invalid_id(format!("{}: must be positive", $name)));
                }
                Ok(Self(value))
            }

            /// Identifier for the item at 0-based listing position `index`.
            pub fn from_index(index: usize) -> Result<Self, DomainError> {
                let ordinal = u32::try_from(index)
                    .ok()
                    .and_then(|i| i.checked_add(1))
                    .ok_or_else(|| {
                        DomainError::invalid_id(format!("{}: position {} out of range", $name, index))
                    })?;
                Ok(Self(ordinal))
            }

            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl TryFrom<u32> for $t {
            type Error = DomainError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for u32 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = u32::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Self::new(value)
            }
        }
    };
}

impl_ordinal_newtype!(ProductId, "ProductId");
impl_ordinal_newtype!(BannerId, "BannerId");

impl UserId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for UserId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("UserId: {e}")))?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_rejects_zero() {
        assert!(matches!(ProductId::new(0), Err(DomainError::InvalidId(_))));
        assert_eq!(ProductId::new(7).unwrap().get(), 7);
    }

    #[test]
    fn from_index_is_one_based() {
        assert_eq!(ProductId::from_index(0).unwrap().get(), 1);
        assert_eq!(BannerId::from_index(4).unwrap().get(), 5);
    }

    #[test]
    fn parse_product_id() {
        assert_eq!("12".parse::<ProductId>().unwrap().get(), 12);
        assert!("0".parse::<ProductId>().is_err());
        assert!("abc".parse::<ProductId>().is_err());
    }

    #[test]
    fn product_id_serde_rejects_zero() {
        let id: ProductId = serde_json::from_str("3").unwrap();
        assert_eq!(id.get(), 3);
        assert!(serde_json::from_str::<ProductId>("0").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");
    }

    #[test]
    fn user_id_round_trips_through_display() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
