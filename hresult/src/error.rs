// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The error produced when a native call reports failure.

use crate::hresult::HResult;

/// A failed native call, identified by the exact [`HResult`] it returned.
///
/// Obtained from [`HResult::ok`] or [`HResult::err`].
/// The code is never altered, so nothing is lost by converting back into an [`HResult`].
///
/// With the `std` feature this converts into a [`std::io::Error`], which asks the platform to
/// describe the code.
/// Only Windows knows these codes; elsewhere the code is read as an errno and the message is
/// generic (e.g. "Unknown error -2147467259"), though [`std::io::Error::raw_os_error`] still
/// returns the exact code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("native call failed with status {:#010x}", .0.as_u32())]
pub struct ComError(HResult);

impl ComError {
    pub(crate) const fn new(hresult: HResult) -> ComError {
        ComError(hresult)
    }

    /// The status code which produced this error.
    pub const fn hresult(self) -> HResult {
        self.0
    }

    /// The raw (signed) status code which produced this error.
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0.as_i32()
    }
}

impl From<ComError> for HResult {
    fn from(value: ComError) -> HResult {
        value.hresult()
    }
}

impl TryFrom<HResult> for ComError {
    type Error = HResult;

    /// Fails with the original value if it is a success code.
    fn try_from(value: HResult) -> Result<ComError, Self::Error> {
        value.err().ok_or(value)
    }
}

/// The message is only meaningful on Windows; see [`ComError`].
#[cfg(feature = "std")]
impl From<ComError> for std::io::Error {
    fn from(value: ComError) -> Self {
        std::io::Error::from_raw_os_error(value.code())
    }
}
