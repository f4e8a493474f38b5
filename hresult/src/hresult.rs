// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The [`HResult`] status code type.

use crate::error::ComError;
use crate::facility::Facility;
use crate::severity::Severity;
use core::fmt::{Binary, Debug, Display, Formatter, LowerHex, Octal, UpperHex, Write};
use tracing::debug;

#[allow(unused_imports)] // conditional re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

/// A status code returned by a native operating system interface.
///
/// The code is a 32-bit value laid out as
///
/// ```text
///  31 30   27 26               16 15                             0
/// +--+-------+-------------------+--------------------------------+
/// |S | (res) |     facility      |          facility code         |
/// +--+-------+-------------------+--------------------------------+
/// ```
///
/// Only the raw bits are stored; [`severity`](HResult::severity),
/// [`facility`](HResult::facility) and [`facility_code`](HResult::facility_code) are computed from
/// them on every call.
///
/// Signed and unsigned 32-bit integers convert into (and out of) this type without loss: both
/// denote the same bit pattern.
///
/// ```
/// # use interop_hresult::HResult;
/// let hr = HResult::from(0x8000_4005_u32);
/// assert_eq!(hr, HResult::E_FAIL);
/// assert_eq!(i32::from(hr), -2_147_467_259);
/// assert!(hr.failed());
/// assert_eq!(hr.to_string(), "0x80004005");
/// ```
///
/// This type is marked `#[repr(transparent)]` so it may stand in for the `i32` returned by
/// native calls.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[must_use]
pub struct HResult(i32);

impl HResult {
    const SEVERITY_SHIFT: u32 = 31;
    const FACILITY_SHIFT: u32 = 16;
    const FACILITY_CODE_MASK: u32 = 0xFFFF;

    /// Operation successful.
    pub const S_OK: HResult = HResult(0);
    /// Operation successful, but returned a "false" or no-op result.
    pub const S_FALSE: HResult = HResult(1);
    /// Not implemented.
    pub const E_NOTIMPL: HResult = HResult::from_u32(0x8000_4001);
    /// No such interface supported.
    pub const E_NOINTERFACE: HResult = HResult::from_u32(0x8000_4002);
    /// Pointer that is not valid.
    pub const E_POINTER: HResult = HResult::from_u32(0x8000_4003);
    /// Operation aborted.
    pub const E_ABORT: HResult = HResult::from_u32(0x8000_4004);
    /// Unspecified failure.
    pub const E_FAIL: HResult = HResult::from_u32(0x8000_4005);
    /// Unexpected failure.
    pub const E_UNEXPECTED: HResult = HResult::from_u32(0x8000_FFFF);
    /// General access denied error.
    pub const E_ACCESSDENIED: HResult = HResult::from_u32(0x8007_0005);
    /// Handle that is not valid.
    pub const E_HANDLE: HResult = HResult::from_u32(0x8007_0006);
    /// Failed to allocate necessary memory.
    pub const E_OUTOFMEMORY: HResult = HResult::from_u32(0x8007_000E);
    /// One or more arguments are not valid.
    pub const E_INVALIDARG: HResult = HResult::from_u32(0x8007_0057);

    /// Wrap a signed status code.
    pub const fn new(raw: i32) -> HResult {
        HResult(raw)
    }

    /// Wrap an unsigned status code.
    ///
    /// Values of 2^31 and above are not an error; they are failure codes.
    #[allow(clippy::cast_possible_wrap)] // bit reinterpretation is the point
    pub const fn from_u32(raw: u32) -> HResult {
        HResult(raw as i32)
    }

    /// Compose a status code from its fields.
    ///
    /// The reserved bits (27 through 30) of the result are zero.
    pub const fn make(severity: Severity, facility: Facility, code: u16) -> HResult {
        HResult::from_u32(
            (severity.as_u32() << HResult::SEVERITY_SHIFT)
                | ((facility.as_u16() as u32) << HResult::FACILITY_SHIFT)
                | code as u32,
        )
    }

    /// Map a Win32 error code to a status code.
    ///
    /// Zero maps to [`HResult::S_OK`].
    /// Values which already read as a status code (zero or negative when signed) pass through
    /// unchanged.
    /// Anything else keeps its low 16 bits and is tagged with [`Facility::WIN32`] and
    /// [`Severity::Failure`].
    pub const fn from_win32(code: u32) -> HResult {
        let hr = HResult::from_u32(code);
        if hr.0 <= 0 {
            return hr;
        }
        #[allow(clippy::cast_possible_truncation)] // masked to 16 bits
        let code = (code & HResult::FACILITY_CODE_MASK) as u16;
        HResult::make(Severity::Failure, Facility::WIN32, code)
    }

    /// The raw code, read as signed.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// The raw code, read as unsigned.
    #[allow(clippy::cast_sign_loss)] // bit reinterpretation is the point
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0 as u32
    }

    /// The hash code of this status: the raw signed value.
    #[must_use]
    pub const fn hash_code(self) -> i32 {
        self.0
    }

    /// Returns true if the severity bit is clear.
    ///
    /// Note that [`HResult::S_FALSE`] is a success.
    #[must_use]
    pub const fn succeeded(self) -> bool {
        self.0 >= 0
    }

    /// Returns true if the severity bit is set.
    #[must_use]
    pub const fn failed(self) -> bool {
        !self.succeeded()
    }

    /// The severity bit (bit 31).
    #[must_use]
    pub const fn severity(self) -> Severity {
        Severity::from_bit((self.as_u32() >> HResult::SEVERITY_SHIFT) == 1)
    }

    /// The facility (bits 16 through 26).
    #[must_use]
    pub const fn facility(self) -> Facility {
        Facility::truncating(self.as_u32() >> HResult::FACILITY_SHIFT)
    }

    /// The facility specific code (bits 0 through 15).
    #[allow(clippy::cast_possible_truncation)] // masked to 16 bits
    #[must_use]
    pub const fn facility_code(self) -> u16 {
        (self.as_u32() & HResult::FACILITY_CODE_MASK) as u16
    }

    /// Convert a failure into an error.
    ///
    /// Success codes (including [`HResult::S_FALSE`]) return `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns a [`ComError`] carrying this exact code if it denotes failure.
    ///
    /// ```
    /// # use interop_hresult::{ComError, HResult};
    /// fn release() -> Result<(), ComError> {
    ///     HResult::S_FALSE.ok()?;
    ///     HResult::E_ABORT.ok()?;
    ///     unreachable!()
    /// }
    /// assert_eq!(release().unwrap_err().hresult(), HResult::E_ABORT);
    /// ```
    pub fn ok(self) -> Result<(), ComError> {
        match self.err() {
            None => Ok(()),
            Some(err) => {
                debug!(hresult = %self, "native call reported failure");
                Err(err)
            }
        }
    }

    /// The error this code would produce, without raising it.
    ///
    /// Returns `None` for success codes.
    #[must_use]
    pub const fn err(self) -> Option<ComError> {
        if self.failed() {
            Some(ComError::new(self))
        } else {
            None
        }
    }

    /// Fixed-width rendering for diagnostics: `0x` and 8 lowercase hex digits.
    pub(crate) fn debugger_display(self) -> impl Display {
        struct Padded(u32);
        impl Display for Padded {
            fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
                write!(f, "{:#010x}", self.0)
            }
        }
        Padded(self.as_u32())
    }
}

impl From<i32> for HResult {
    fn from(value: i32) -> HResult {
        HResult::new(value)
    }
}

impl From<u32> for HResult {
    fn from(value: u32) -> HResult {
        HResult::from_u32(value)
    }
}

impl From<HResult> for i32 {
    fn from(value: HResult) -> i32 {
        value.as_i32()
    }
}

impl From<HResult> for u32 {
    fn from(value: HResult) -> u32 {
        value.as_u32()
    }
}

/// Stack buffer big enough for `0x` and 8 hex digits.
struct HexBuf {
    bytes: [u8; 10],
    len: usize,
}

impl Write for HexBuf {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let end = self.len + s.len();
        let dst = self.bytes.get_mut(self.len..end).ok_or(core::fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// `0x` followed by the unsigned value in lowercase hex, without leading zeros.
///
/// Width, fill and alignment apply to the whole string, prefix included.
impl Display for HResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut buf = HexBuf {
            bytes: [0; 10],
            len: 0,
        };
        write!(buf, "0x{:x}", self.as_u32())?;
        let text = buf
            .bytes
            .get(..buf.len)
            .and_then(|bytes| core::str::from_utf8(bytes).ok())
            .ok_or(core::fmt::Error)?;
        f.pad(text)
    }
}

impl Debug for HResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.debugger_display(), f)
    }
}

// Radix formatting uses the unsigned reading and honors width, fill and `#` exactly like `u32`.

impl LowerHex for HResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        LowerHex::fmt(&self.as_u32(), f)
    }
}

impl UpperHex for HResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        UpperHex::fmt(&self.as_u32(), f)
    }
}

impl Octal for HResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Octal::fmt(&self.as_u32(), f)
    }
}

impl Binary for HResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Binary::fmt(&self.as_u32(), f)
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use super::HResult;
    use bolero::{Driver, TypeGenerator};

    impl TypeGenerator for HResult {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(HResult::new(driver.produce()?))
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)] // valid in tests
#[cfg(test)]
mod test {
    use super::*;
    use core::hash::{BuildHasher, Hash};
    use std::collections::hash_map::RandomState;
    use tracing_test::traced_test;

    fn hash_of<T: Hash>(state: &RandomState, value: T) -> u64 {
        state.hash_one(value)
    }

    #[test]
    fn construct_from_signed_and_unsigned() {
        assert_eq!(HResult::new(3).as_i32(), 3);
        assert_eq!(HResult::from_u32(3).as_i32(), 3);
        assert_eq!(HResult::from(3_u32), HResult::from(3_i32));
    }

    #[test]
    fn unsigned_values_wrap_to_negative() {
        let hr = HResult::from(0xFFFF_FFFF_u32);
        assert_eq!(hr.as_i32(), -1);
        assert_eq!(hr, HResult::new(-1));
    }

    #[test]
    fn default_is_success() {
        let hr = HResult::default();
        assert_eq!(hr.as_i32(), 0);
        assert_eq!(hr, HResult::S_OK);
        assert!(hr.succeeded());
    }

    #[test]
    fn well_known_values() {
        assert_eq!(HResult::S_OK.as_i32(), 0);
        assert_eq!(HResult::S_FALSE.as_i32(), 1);
        assert_eq!(HResult::E_FAIL.as_u32(), 0x8000_4005);
        assert!(HResult::E_FAIL.failed());
        assert!(HResult::S_FALSE.succeeded());
        assert_eq!(HResult::E_INVALIDARG.facility(), Facility::WIN32);
        assert_eq!(HResult::E_INVALIDARG.facility_code(), 87);
    }

    #[test]
    fn conversions_out() {
        let hr = HResult::from(5_i32);
        let back: i32 = hr.into();
        assert_eq!(back, 5);
        let back: u32 = hr.into();
        assert_eq!(back, 5);
    }

    #[test]
    fn display_is_minimal_lowercase_hex() {
        assert_eq!(HResult::from(0x8000_0000_u32).to_string(), "0x80000000");
        assert_eq!(HResult::from(0x10_i32).to_string(), "0x10");
        assert_eq!(HResult::S_OK.to_string(), "0x0");
        assert_eq!(HResult::E_UNEXPECTED.to_string(), "0x8000ffff");
    }

    #[test]
    fn display_honors_width_and_alignment() {
        assert_eq!(format!("{:>12}", HResult::E_FAIL), "  0x80004005");
        assert_eq!(format!("{:<6}|", HResult::from(0x10_i32)), "0x10  |");
        assert_eq!(format!("{:*^8}", HResult::S_OK), "**0x0***");
        assert_eq!(format!("{:4}", HResult::E_FAIL), "0x80004005");
    }

    #[test]
    fn format_specifiers_forward_to_unsigned() {
        let hr = HResult::from(0x10_i32);
        assert_eq!(format!("{hr:04x}"), "0010");
        assert_eq!(format!("{hr:08x}"), "00000010");
        assert_eq!(format!("{hr:x}"), "10");
        assert_eq!(format!("{:X}", HResult::E_UNEXPECTED), "8000FFFF");
        assert_eq!(format!("{:o}", HResult::from(8_i32)), "10");
        assert_eq!(format!("{:b}", HResult::from(5_i32)), "101");
        assert_eq!(format!("{:x}", HResult::new(-1)), "ffffffff");
    }

    #[test]
    fn debugger_display_is_padded() {
        assert_eq!(HResult::from(0x10_i32).debugger_display().to_string(), "0x00000010");
        assert_eq!(HResult::E_FAIL.debugger_display().to_string(), "0x80004005");
        assert_eq!(format!("{:?}", HResult::S_FALSE), "0x00000001");
    }

    #[test]
    fn hash_code_is_raw_value() {
        assert_eq!(HResult::new(3).hash_code(), 3);
        assert_eq!(HResult::new(4).hash_code(), 4);
        let state = RandomState::new();
        assert_eq!(hash_of(&state, HResult::new(3)), hash_of(&state, 3_i32));
    }

    #[test]
    fn equality() {
        let hr3 = HResult::from(3_i32);
        let hr3b = HResult::from(3_u32);
        let hr5 = HResult::from(5_i32);
        assert_eq!(hr3, hr3);
        assert_eq!(hr3, hr3b);
        assert_ne!(hr3, hr5);
        assert!(hr3 != hr5);
        assert!(!(hr3 != hr3b));
    }

    #[test]
    fn equality_is_symmetric_and_bitwise() {
        bolero::check!()
            .with_type()
            .for_each(|(a, b): &(HResult, HResult)| {
                assert_eq!(a == b, b == a);
                assert_eq!(a == b, a.as_u32() == b.as_u32());
                assert_eq!(a != b, !(a == b));
            });
    }

    #[test]
    fn succeeded_and_failed() {
        assert!(HResult::S_OK.succeeded());
        assert!(HResult::S_FALSE.succeeded());
        assert!(!HResult::new(-1).succeeded());
        assert!(!HResult::S_OK.failed());
        assert!(!HResult::S_FALSE.failed());
        assert!(HResult::new(-1).failed());
    }

    #[test]
    fn severity() {
        assert_eq!(HResult::from(0x8000_0000_u32).severity(), Severity::Failure);
        assert_eq!(HResult::from(0x7FFF_FFFF_i32).severity(), Severity::Success);
    }

    #[test]
    fn facility() {
        assert_eq!(HResult::from(0x07FF_0000_i32).facility(), Facility::MAX);
        assert_eq!(HResult::from(0xF800_FFFF_u32).facility(), Facility::NULL);
    }

    #[test]
    fn facility_code() {
        assert_eq!(HResult::from(0xFFFF_FFFF_u32).facility_code(), 0xFFFF);
    }

    #[test]
    fn make_composes_fields() {
        let hr = HResult::make(Severity::Failure, Facility::ITF, 0x0200);
        assert_eq!(hr.as_u32(), 0x8004_0200);
        let hr = HResult::make(Severity::Success, Facility::MAX, 0xFFFF);
        assert_eq!(hr.as_u32(), 0x07FF_FFFF);
    }

    #[test]
    fn from_win32() {
        assert_eq!(HResult::from_win32(0), HResult::S_OK);
        assert_eq!(HResult::from_win32(5), HResult::E_ACCESSDENIED);
        assert_eq!(HResult::from_win32(87), HResult::E_INVALIDARG);
        assert_eq!(HResult::from_win32(0x8000_4005), HResult::E_FAIL);
        assert_eq!(HResult::from_win32(0x0001_0006).as_u32(), 0x8007_0006);
    }

    #[test]
    #[traced_test]
    fn ok_on_failure_is_error() {
        let err = HResult::E_FAIL.ok().unwrap_err();
        assert_eq!(err.hresult(), HResult::E_FAIL);
        assert_eq!(err.code(), HResult::E_FAIL.as_i32());
        assert!(logs_contain("native call reported failure"));
        assert!(logs_contain("hresult=0x80004005"));
    }

    #[test]
    #[traced_test]
    fn ok_on_success_is_noop() {
        assert_eq!(HResult::S_OK.ok(), Ok(()));
        assert_eq!(HResult::S_FALSE.ok(), Ok(()));
        assert!(!logs_contain("native call reported failure"));
    }

    #[test]
    fn err_mirrors_ok() {
        assert_eq!(HResult::S_OK.err(), None);
        assert_eq!(HResult::S_FALSE.err(), None);
        assert_eq!(HResult::E_ABORT.err().map(ComError::hresult), Some(HResult::E_ABORT));
    }

    #[test]
    fn round_trip_both_readings() {
        bolero::check!().with_type().for_each(|v: &i32| {
            assert_eq!(HResult::from(*v).as_i32(), *v);
            assert_eq!(i32::from(HResult::from(*v)), *v);
        });
        bolero::check!().with_type().for_each(|v: &u32| {
            assert_eq!(HResult::from(*v).as_u32(), *v);
            assert_eq!(u32::from(HResult::from(*v)), *v);
        });
    }

    #[test]
    fn signed_and_unsigned_inputs_agree() {
        bolero::check!().with_type().for_each(|v: &u32| {
            #[allow(clippy::cast_possible_wrap)]
            let signed = *v as i32;
            assert_eq!(HResult::from(*v), HResult::from(signed));
        });
    }

    #[test]
    fn severity_follows_sign() {
        bolero::check!().with_type().for_each(|hr: &HResult| {
            let negative = hr.as_i32() < 0;
            assert_eq!(hr.severity().as_u32() == 1, negative);
            assert_eq!(hr.failed(), negative);
            assert_eq!(hr.succeeded(), !hr.failed());
            assert_eq!(hr.failed(), hr.severity() == Severity::Failure);
        });
    }

    #[test]
    fn fields_match_masks() {
        bolero::check!().with_type().for_each(|hr: &HResult| {
            let raw = hr.as_u32();
            assert_eq!(u32::from(hr.facility().as_u16()), (raw >> 16) & 0x7FF);
            assert_eq!(u32::from(hr.facility_code()), raw & 0xFFFF);
        });
    }

    #[test]
    fn make_decomposes() {
        bolero::check!()
            .with_type()
            .for_each(|(severity, facility, code): &(Severity, Facility, u16)| {
                let hr = HResult::make(*severity, *facility, *code);
                assert_eq!(hr.severity(), *severity);
                assert_eq!(hr.facility(), *facility);
                assert_eq!(hr.facility_code(), *code);
                assert_eq!(hr.as_u32() & 0x7800_0000, 0);
            });
    }

    #[test]
    fn equal_values_hash_equally() {
        let state = RandomState::new();
        bolero::check!().with_type().for_each(|hr: &HResult| {
            let copy = HResult::from(hr.as_u32());
            assert_eq!(*hr, copy);
            assert_eq!(hash_of(&state, hr), hash_of(&state, copy));
            assert_eq!(hr.hash_code(), hr.as_i32());
        });
    }

    #[test]
    fn ok_matches_classification() {
        bolero::check!().with_type().for_each(|hr: &HResult| {
            match hr.ok() {
                Ok(()) => assert!(hr.succeeded()),
                Err(err) => {
                    assert!(hr.failed());
                    assert_eq!(err.hresult(), *hr);
                }
            }
        });
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_is_transparent_i32() {
        assert_eq!(serde_yaml_ng::to_string(&HResult::E_FAIL).unwrap().trim(), "-2147467259");
        let hr: HResult = serde_yaml_ng::from_str("1").unwrap();
        assert_eq!(hr, HResult::S_FALSE);
    }
}
