//! Tests for the arena
//!
//! These tests verify:
//! - Many live strings from one arena stay intact
//! - Reset releases everything and keeps one chunk
//! - Capacity limits

use basekit::string::try_string_alloc;
use basekit::{string_alloc, Arena, Config, Str};

fn arena(chunk: usize, capacity: usize) -> Arena {
    let config = Config::builder()
        .arena_chunk_size(chunk)
        .arena_capacity(capacity)
        .build()
        .unwrap();
    Arena::with_config(&config)
}

#[test]
fn test_many_live_strings_across_chunks() {
    let arena = arena(64, 1 << 20);

    let strings: Vec<Str<'_>> = (0..100)
        .map(|i| {
            let text = format!("string-{:03}", i);
            let mut buf = string_alloc(&arena, text.len());
            buf.copy_from_slice(text.as_bytes());
            buf.freeze()
        })
        .collect();

    assert!(arena.chunk_count() > 1);
    for (i, s) in strings.iter().enumerate() {
        assert_eq!(s.to_str(), Some(format!("string-{:03}", i).as_str()));
    }
}

#[test]
fn test_reset_reuses_largest_chunk() {
    let mut arena = arena(64, 1 << 20);
    string_alloc(&arena, 32);
    string_alloc(&arena, 1000);
    string_alloc(&arena, 48);
    assert_eq!(arena.chunk_count(), 3);

    arena.reset();
    assert_eq!(arena.used(), 0);
    assert_eq!(arena.chunk_count(), 1);

    // Fits in the kept 1000-byte chunk
    string_alloc(&arena, 900);
    assert_eq!(arena.chunk_count(), 1);
}

#[test]
fn test_capacity_is_per_reset() {
    let mut arena = arena(16, 32);
    string_alloc(&arena, 32);
    assert_eq!(arena.remaining(), 0);
    assert!(try_string_alloc(&arena, 1).is_err());

    arena.reset();
    assert_eq!(arena.remaining(), 32);
    assert!(try_string_alloc(&arena, 1).is_ok());
}

#[test]
fn test_arena_moves_across_threads() {
    let arena = Arena::new();
    let handle = std::thread::spawn(move || {
        let s = string_alloc(&arena, 8);
        s.size()
    });
    assert_eq!(handle.join().unwrap(), 8);
}
