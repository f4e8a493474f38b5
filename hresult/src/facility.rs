// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The facility field of an [`HResult`](crate::HResult).

#[allow(unused_imports)] // conditional re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

/// The subsystem which produced an [`HResult`](crate::HResult).
///
/// This is an 11-bit value (bits 16 through 26 of the status code).
/// Values outside of that range can not be represented.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Facility(u16);

/// Error returned when a `u16` does not fit in the 11-bit facility field.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{0:#x} is too large to be a facility ({max:#x} is max legal value)", max = Facility::MAX_BINARY)]
pub struct InvalidFacility(u16);

impl InvalidFacility {
    /// The rejected value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Facility {
    const MAX_BINARY: u16 = 0x7FF;

    /// The largest representable [`Facility`].
    pub const MAX: Facility = Facility(Facility::MAX_BINARY);

    /// Default facility for codes which name no particular subsystem.
    pub const NULL: Facility = Facility(0);
    /// Remote procedure calls.
    pub const RPC: Facility = Facility(1);
    /// COM dispatch (`IDispatch`).
    pub const DISPATCH: Facility = Facility(2);
    /// OLE structured storage.
    pub const STORAGE: Facility = Facility(3);
    /// Interface specific codes.
    pub const ITF: Facility = Facility(4);
    /// Win32 error codes wrapped as status codes.
    pub const WIN32: Facility = Facility(7);
    /// Windows subsystem.
    pub const WINDOWS: Facility = Facility(8);
    /// Security / SSPI.
    pub const SECURITY: Facility = Facility(9);
    /// Control.
    pub const CONTROL: Facility = Facility(10);
    /// Certificate services.
    pub const CERT: Facility = Facility(11);
    /// `WinInet`.
    pub const INTERNET: Facility = Facility(12);
    /// Media server.
    pub const MEDIASERVER: Facility = Facility(13);
    /// Message queueing.
    pub const MSMQ: Facility = Facility(14);
    /// Setup API.
    pub const SETUPAPI: Facility = Facility(15);
    /// Smart card subsystem.
    pub const SCARD: Facility = Facility(16);
    /// COM+.
    pub const COMPLUS: Facility = Facility(17);

    const KNOWN: [Facility; 16] = [
        Facility::NULL,
        Facility::RPC,
        Facility::DISPATCH,
        Facility::STORAGE,
        Facility::ITF,
        Facility::WIN32,
        Facility::WINDOWS,
        Facility::SECURITY,
        Facility::CONTROL,
        Facility::CERT,
        Facility::INTERNET,
        Facility::MEDIASERVER,
        Facility::MSMQ,
        Facility::SETUPAPI,
        Facility::SCARD,
        Facility::COMPLUS,
    ];

    /// Map a `u16` to a [`Facility`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not fit in 11 bits.
    pub const fn new(raw: u16) -> Result<Facility, InvalidFacility> {
        if raw > Facility::MAX_BINARY {
            Err(InvalidFacility(raw))
        } else {
            Ok(Facility(raw))
        }
    }

    /// Keep only the low 11 bits of `raw`.
    pub(crate) const fn truncating(raw: u32) -> Facility {
        #[allow(clippy::cast_possible_truncation)] // masked to 11 bits
        Facility((raw & Facility::MAX_BINARY as u32) as u16)
    }

    /// The raw value of the facility.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true if this is one of the named facilities.
    #[must_use]
    pub fn is_known(self) -> bool {
        Facility::KNOWN.contains(&self)
    }
}

impl From<Facility> for u16 {
    fn from(value: Facility) -> u16 {
        value.as_u16()
    }
}

impl TryFrom<u16> for Facility {
    type Error = InvalidFacility;

    fn try_from(value: u16) -> Result<Facility, Self::Error> {
        Facility::new(value)
    }
}

impl core::fmt::Display for Facility {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use super::Facility;
    use bolero::{Driver, TypeGenerator};

    impl TypeGenerator for Facility {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(Facility::truncating(u32::from(driver.produce::<u16>()?)))
        }
    }
}
