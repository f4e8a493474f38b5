// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Status codes returned by native operating system interfaces.
//!
//! An [`HResult`] is a thin wrapper over the 32-bit code a native call returns.
//! It decodes the [`Severity`], [`Facility`] and facility code packed into that value and turns
//! failures into a [`ComError`] on request.
//!
//! ```
//! # use interop_hresult::{ComError, Facility, HResult, Severity};
//! fn open() -> Result<(), ComError> {
//!     let hr = HResult::from_win32(5);
//!     assert_eq!(hr.severity(), Severity::Failure);
//!     assert_eq!(hr.facility(), Facility::WIN32);
//!     assert_eq!(hr.facility_code(), 5);
//!     hr.ok()
//! }
//! assert_eq!(open(), Err(HResult::E_ACCESSDENIED.err().unwrap()));
//! ```
//!
//! This crate works in `no_std` environments; the `std` feature (on by default) only adds
//! the conversion from [`ComError`] to `std::io::Error`.

pub mod error;
pub mod facility;
pub mod hresult;
pub mod severity;

pub use error::ComError;
pub use facility::{Facility, InvalidFacility};
pub use hresult::HResult;
pub use severity::Severity;
