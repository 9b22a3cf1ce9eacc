//! Tests for arena strings
//!
//! These tests verify:
//! - Terminator scanning in from_cstr
//! - Trim copies exactly start..=end into fresh arena memory
//! - Compare uses size as the single source of truth

use basekit::string::{string_format, try_string_alloc, try_string_trim};
use basekit::{arena_format, string_alloc, string_compare, string_trim, Arena, BaseError, Config, Str};
use proptest::prelude::*;

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_from_cstr_literal() {
    let s = Str::from_cstr(b"hello\0");
    assert_eq!(s.size(), 5);
    assert_eq!(s.to_str(), Some("hello"));
}

#[test]
fn test_alloc_then_fill() {
    let arena = Arena::new();
    let mut buf = string_alloc(&arena, 4);
    buf.copy_from_slice(b"abcd");
    let s = buf.freeze();

    assert_eq!(s, Str::from("abcd"));
    assert_eq!(arena.used(), 4);
}

#[test]
fn test_alloc_exhaustion_is_reported() {
    let config = Config::builder()
        .arena_chunk_size(8)
        .arena_capacity(8)
        .build()
        .unwrap();
    let arena = Arena::with_config(&config);

    let err = try_string_alloc(&arena, 9).unwrap_err();
    assert!(matches!(err, BaseError::AllocationExhausted { requested: 9, remaining: 8 }));
}

#[test]
fn test_format_into_arena() {
    let arena = Arena::new();
    let a = string_format(&arena, format_args!("{}:{}", "x", 1));
    let b = arena_format!(&arena, "x:{}", 1);
    assert!(string_compare(a, b));
}

// =============================================================================
// Trim Tests
// =============================================================================

#[test]
fn test_trim_middle() {
    let arena = Arena::new();
    let source = Str::from("hello world");

    let word = string_trim(&arena, source, 6, 10);
    assert_eq!(word.to_str(), Some("world"));
}

#[test]
fn test_trim_single_byte() {
    let arena = Arena::new();
    let s = string_trim(&arena, Str::from("abc"), 1, 1);
    assert_eq!(s.as_bytes(), b"b");
}

#[test]
fn test_trim_copies_out_of_source() {
    let arena = Arena::new();
    let mut source = string_alloc(&arena, 3);
    source.copy_from_slice(b"xyz");
    let source = source.freeze();

    let copy = string_trim(&arena, source, 0, 2);
    assert_ne!(copy.as_bytes().as_ptr(), source.as_bytes().as_ptr());
    assert_eq!(copy, source);
}

#[test]
fn test_trim_end_past_size_rejected() {
    let arena = Arena::new();
    let err = try_string_trim(&arena, Str::from("abc"), 0, 3).unwrap_err();
    assert!(matches!(err, BaseError::BoundsViolation { .. }));
    assert_eq!(arena.used(), 0);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_trim_panics_on_bad_range() {
    let arena = Arena::new();
    string_trim(&arena, Str::EMPTY, 0, 0);
}

// =============================================================================
// Compare Tests
// =============================================================================

#[test]
fn test_compare_different_sizes() {
    assert!(!string_compare(Str::from("abc"), Str::from("abcd")));
    assert!(!string_compare(Str::from("abc\0"), Str::from("abc")));
}

#[test]
fn test_compare_embedded_zeros() {
    let a = Str::new(b"\0\0\0x");
    let b = Str::new(b"\0\0\0y");
    assert!(!string_compare(a, b));
    assert!(string_compare(a, Str::new(b"\0\0\0x")));
}

#[test]
fn test_compare_empty() {
    assert!(string_compare(Str::EMPTY, Str::from("")));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn compare_is_reflexive(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let s = Str::new(&bytes);
        prop_assert!(string_compare(s, s));
    }

    #[test]
    fn compare_detects_single_byte_change(
        bytes in proptest::collection::vec(any::<u8>(), 1..256),
        index in any::<prop::sample::Index>(),
        delta in 1u8..=255,
    ) {
        let i = index.index(bytes.len());
        let mut other = bytes.clone();
        other[i] = other[i].wrapping_add(delta);
        prop_assert!(!string_compare(Str::new(&bytes), Str::new(&other)));
    }

    #[test]
    fn compare_rejects_length_mismatch(
        a in proptest::collection::vec(any::<u8>(), 0..64),
        b in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(a.len() != b.len());
        prop_assert!(!string_compare(Str::new(&a), Str::new(&b)));
    }

    #[test]
    fn trim_matches_inclusive_slice(
        bytes in proptest::collection::vec(any::<u8>(), 1..256),
        i in any::<prop::sample::Index>(),
        j in any::<prop::sample::Index>(),
    ) {
        let (mut start, mut end) = (i.index(bytes.len()), j.index(bytes.len()));
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }

        let arena = Arena::new();
        let trimmed = string_trim(&arena, Str::new(&bytes), start, end);
        prop_assert_eq!(trimmed.size(), end - start + 1);
        prop_assert_eq!(trimmed.as_bytes(), &bytes[start..=end]);
    }
}
