// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The severity bit of an [`HResult`](crate::HResult).

#[allow(unused_imports)] // conditional re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

/// Outcome class encoded in bit 31 of an [`HResult`](crate::HResult).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Severity {
    /// Top bit clear.
    #[default]
    Success = 0,
    /// Top bit set.
    Failure = 1,
}

impl Severity {
    /// Map the value of the severity bit to a [`Severity`].
    #[must_use]
    pub const fn from_bit(set: bool) -> Severity {
        if set {
            Severity::Failure
        } else {
            Severity::Success
        }
    }

    /// The value of the severity bit (0 or 1).
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Failure => write!(f, "failure"),
        }
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use super::Severity;
    use bolero::{Driver, TypeGenerator};

    impl TypeGenerator for Severity {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(Severity::from_bit(driver.produce::<bool>()?))
        }
    }
}
