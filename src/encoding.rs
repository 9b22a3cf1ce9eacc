//! UTF-8 to UTF-16 conversion
//!
//! Native Windows file APIs take zero-terminated UTF-16 paths. The
//! conversion buffer is a [`WideString`]: inline storage for paths up to
//! `MAX_PATH` code units, spilling to the heap beyond that, and released
//! by drop on every exit path.

use smallvec::{smallvec, SmallVec};

use crate::error::{BaseError, Result};

/// Code units kept inline before spilling to the heap (Win32 `MAX_PATH`)
pub const INLINE_UNITS: usize = 260;

/// Zero-terminated UTF-16 buffer
#[derive(Clone, PartialEq, Eq)]
pub struct WideString {
    units: SmallVec<[u16; INLINE_UNITS]>,
}

impl WideString {
    /// All code units including the trailing zero
    pub fn as_slice(&self) -> &[u16] {
        &self.units
    }

    /// Code units without the trailing zero
    pub fn units(&self) -> &[u16] {
        &self.units[..self.units.len() - 1]
    }

    /// Number of code units, terminator excluded
    pub fn len_units(&self) -> usize {
        self.units.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len_units() == 0
    }

    /// Whether the buffer outgrew its inline storage
    pub fn spilled(&self) -> bool {
        self.units.spilled()
    }
}

impl std::fmt::Debug for WideString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WideString({:?})", String::from_utf16_lossy(self.units()))
    }
}

/// Convert a UTF-8 byte span to zero-terminated UTF-16.
///
/// Empty input yields a lone terminator. Input that is not valid UTF-8
/// fails with `BaseError::Encoding`.
pub fn utf8_to_utf16(utf8: &[u8]) -> Result<WideString> {
    if utf8.is_empty() {
        return Ok(WideString { units: smallvec![0] });
    }

    let text = std::str::from_utf8(utf8).map_err(|e| {
        BaseError::Encoding(format!(
            "invalid UTF-8 after {} valid bytes",
            e.valid_up_to()
        ))
    })?;

    // Size first, then fill exactly len + 1 units
    let required = text.encode_utf16().count();
    let mut units: SmallVec<[u16; INLINE_UNITS]> = SmallVec::with_capacity(required + 1);
    units.extend(text.encode_utf16());
    units.push(0);

    Ok(WideString { units })
}
