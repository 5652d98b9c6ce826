//! Strongly-typed identifiers and identifier generation.

use core::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

/// Identifier of a catalog product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl_uuid_newtype!(ProductId, "ProductId");

/// Source of fresh identifiers.
///
/// Entity construction takes a generator instead of calling a random routine
/// directly so tests can pin identifiers. Implementations must return values
/// that are unique with overwhelming probability.
pub trait IdGenerator: Send + Sync {
    fn next_uuid(&self) -> Uuid;
}

impl<G> IdGenerator for Arc<G>
where
    G: IdGenerator + ?Sized,
{
    fn next_uuid(&self) -> Uuid {
        (**self).next_uuid()
    }
}

/// Default generator: UUIDv7 (128-bit, time-ordered, random tail).
#[derive(Debug, Default, Copy, Clone)]
pub struct TimeOrderedIds;

impl IdGenerator for TimeOrderedIds {
    fn next_uuid(&self) -> Uuid {
        Uuid::now_v7()
    }
}
