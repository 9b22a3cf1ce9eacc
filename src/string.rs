//! Arena-backed byte strings
//!
//! [`Str`] is a non-owning view: a byte slice plus its length, with no
//! terminator implied. Storage comes from an [`Arena`], and the `'a`
//! lifetime ties every view to the arena borrow it was allocated under.
//!
//! ## Invariants
//! - `size()` is the only authority on content; embedded zero bytes are data
//! - Operations never mutate a view in place; `string_trim` copies
//! - Nothing here frees memory; resetting or dropping the arena does

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::arena::Arena;
use crate::error::{BaseError, Result};

/// Immutable byte string view
#[derive(Clone, Copy, Default, Eq)]
pub struct Str<'a> {
    data: &'a [u8],
}

impl Str<'static> {
    /// The null string: no data, zero size
    pub const EMPTY: Self = Self { data: &[] };
}

impl<'a> Str<'a> {
    /// Wrap an existing byte span as-is
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Wrap a C-style byte buffer.
    ///
    /// The size is found by scanning for the first zero byte. A buffer with
    /// no terminator is taken whole; the scan never leaves the slice.
    /// Linear in length, so keep it out of hot paths over long buffers.
    pub fn from_cstr(bytes: &'a [u8]) -> Self {
        let size = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Self {
            data: &bytes[..size],
        }
    }

    /// Number of valid bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The underlying bytes, valid for the arena borrow
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// UTF-8 view of the bytes, if they are valid UTF-8
    pub fn to_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.data).ok()
    }
}

impl<'a> From<&'a str> for Str<'a> {
    fn from(s: &'a str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Str<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl Deref for Str<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.data
    }
}

impl PartialEq for Str<'_> {
    fn eq(&self, other: &Self) -> bool {
        string_compare(*self, *other)
    }
}

impl fmt::Debug for Str<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Str({:?})", String::from_utf8_lossy(self.data))
    }
}

impl fmt::Display for Str<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.data))
    }
}

/// Writable arena buffer, produced by [`string_alloc`]
pub struct StrMut<'a> {
    data: &'a mut [u8],
}

impl<'a> StrMut<'a> {
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Give up write access and keep the bytes as a view
    pub fn freeze(self) -> Str<'a> {
        Str { data: self.data }
    }
}

impl Deref for StrMut<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.data
    }
}

impl DerefMut for StrMut<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.data
    }
}

impl fmt::Debug for StrMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StrMut({:?})", String::from_utf8_lossy(self.data))
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Allocate a zero-filled string of `size` bytes from `arena`
pub fn try_string_alloc(arena: &Arena, size: usize) -> Result<StrMut<'_>> {
    Ok(StrMut {
        data: arena.try_alloc(size)?,
    })
}

/// Allocate a zero-filled string of `size` bytes, panicking on exhaustion
pub fn string_alloc(arena: &Arena, size: usize) -> StrMut<'_> {
    StrMut {
        data: arena.alloc(size),
    }
}

/// Copy `source[start..=end]` into a new arena string.
///
/// Requires `start <= end < source.size()`.
pub fn try_string_trim<'a>(
    arena: &'a Arena,
    source: Str<'_>,
    start: usize,
    end: usize,
) -> Result<Str<'a>> {
    if start > end || end >= source.size() {
        return Err(BaseError::BoundsViolation {
            start,
            end,
            size: source.size(),
        });
    }

    let mut result = try_string_alloc(arena, end - start + 1)?;
    result.copy_from_slice(&source[start..=end]);
    Ok(result.freeze())
}

/// Copy `source[start..=end]` into a new arena string, panicking on an
/// invalid range or exhaustion.
pub fn string_trim<'a>(arena: &'a Arena, source: Str<'_>, start: usize, end: usize) -> Str<'a> {
    match try_string_trim(arena, source, start, end) {
        Ok(s) => s,
        Err(e) => panic!("{}", e),
    }
}

/// True iff both strings have the same size and identical bytes.
///
/// Compares all `size` bytes, zero bytes included, stopping at the first
/// mismatch.
pub fn string_compare(a: Str<'_>, b: Str<'_>) -> bool {
    if a.size() != b.size() {
        return false;
    }
    a.as_bytes().iter().zip(b.as_bytes()).all(|(x, y)| x == y)
}

/// Format into a new arena string.
///
/// The text is formatted into a temporary heap `String` first and then
/// copied into the arena, so each call makes two allocations.
pub fn string_format<'a>(arena: &'a Arena, args: fmt::Arguments<'_>) -> Str<'a> {
    let formatted = fmt::format(args);
    let mut result = string_alloc(arena, formatted.len());
    result.copy_from_slice(formatted.as_bytes());
    result.freeze()
}

/// `format!` into an arena: `arena_format!(&arena, "{}-{}", a, b)`
#[macro_export]
macro_rules! arena_format {
    ($arena:expr, $($arg:tt)*) => {
        $crate::string::string_format($arena, format_args!($($arg)*))
    };
}
