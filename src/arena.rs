//! Arena Allocator
//!
//! Bump allocator that backs every arena string.
//!
//! ## Lifetime Model
//! - `try_alloc`/`alloc` take `&self` and hand out `&mut [u8]` borrowed
//!   from the arena, so many buffers can be live at once
//! - `reset` takes `&mut self`: the borrow checker refuses to reset while
//!   any buffer (or any `Str` view over one) is still alive
//! - Dropping the arena is the destroy operation
//!
//! The arena is `Send` but not `Sync`. Allocation is single-threaded and
//! sequential; sharing one arena between threads needs an external lock.

use std::cell::{Cell, RefCell};
use std::ptr::NonNull;

use crate::config::Config;
use crate::error::{BaseError, Result};

/// One heap block owned by the arena.
///
/// Stored as a raw pointer so that handing out sub-slices never creates a
/// reference to the whole block while earlier sub-slices are still live.
struct Chunk {
    ptr: NonNull<[u8]>,
    len: usize,
}

impl Chunk {
    fn new(len: usize) -> Self {
        let block: Box<[u8]> = vec![0u8; len].into_boxed_slice();
        Self {
            ptr: NonNull::from(Box::leak(block)),
            len,
        }
    }

    fn base(&self) -> *mut u8 {
        self.ptr.as_ptr() as *mut u8
    }
}

impl Drop for Chunk {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from `Box::leak` in `Chunk::new` and is freed
        // exactly once, here.
        unsafe { drop(Box::from_raw(self.ptr.as_ptr())) }
    }
}

// SAFETY: a chunk uniquely owns its heap block; nothing about it is tied
// to the thread that allocated it.
unsafe impl Send for Chunk {}

/// Bump allocator for byte buffers
pub struct Arena {
    /// Backing blocks; only the last one is bumped into
    chunks: RefCell<Vec<Chunk>>,
    /// Bump offset inside the last chunk
    offset: Cell<usize>,
    /// Bytes handed out since creation or the last reset
    used: Cell<usize>,
    chunk_size: usize,
    capacity: usize,
}

impl Arena {
    /// Create an arena with the default configuration
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create an arena sized by `config`
    pub fn with_config(config: &Config) -> Self {
        Self {
            chunks: RefCell::new(Vec::new()),
            offset: Cell::new(0),
            used: Cell::new(0),
            chunk_size: config.arena_chunk_size.max(1),
            capacity: config.arena_capacity,
        }
    }

    /// Allocate `size` zero-filled bytes.
    ///
    /// Returns `AllocationExhausted` if the request would take the arena
    /// past its configured capacity.
    #[allow(clippy::mut_from_ref)]
    pub fn try_alloc(&self, size: usize) -> Result<&mut [u8]> {
        if size == 0 {
            return Ok(&mut []);
        }

        let remaining = self.remaining();
        if size > remaining {
            tracing::warn!(
                "Arena exhausted: requested {} bytes, {} remaining",
                size,
                remaining
            );
            return Err(BaseError::AllocationExhausted {
                requested: size,
                remaining,
            });
        }

        let mut chunks = self.chunks.borrow_mut();
        let offset = self.offset.get();

        let current = chunks
            .last()
            .filter(|chunk| chunk.len - offset >= size)
            .map(Chunk::base);

        let (base, start) = match current {
            Some(base) => (base, offset),
            None => {
                // Oversized requests get a dedicated chunk
                let len = self.chunk_size.max(size);
                tracing::debug!("Arena growing: new chunk of {} bytes", len);
                let chunk = Chunk::new(len);
                let base = chunk.base();
                chunks.push(chunk);
                (base, 0)
            }
        };

        self.offset.set(start + size);
        self.used.set(self.used.get() + size);

        // SAFETY: `start + size <= chunk.len`, and the range
        // `[start, start + size)` has never been handed out since the last
        // reset (the bump offset only moves forward). The chunk outlives
        // `&self` because chunks are only freed by `reset(&mut self)` or drop.
        let buffer = unsafe { std::slice::from_raw_parts_mut(base.add(start), size) };

        // Reused chunks may still hold bytes from before a reset
        buffer.fill(0);
        Ok(buffer)
    }

    /// Allocate `size` zero-filled bytes, panicking on exhaustion.
    ///
    /// Exhaustion is a contract violation by the caller (the arena was
    /// sized too small), so this fails fast instead of returning an error.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc(&self, size: usize) -> &mut [u8] {
        match self.try_alloc(size) {
            Ok(buffer) => buffer,
            Err(e) => panic!("{}", e),
        }
    }

    /// Release every allocation at once.
    ///
    /// The largest chunk is kept for reuse; the rest go back to the heap.
    pub fn reset(&mut self) {
        let chunks = self.chunks.get_mut();
        if chunks.len() > 1 {
            let largest = chunks
                .iter()
                .enumerate()
                .max_by_key(|(_, chunk)| chunk.len)
                .map(|(index, _)| index);
            if let Some(index) = largest {
                let keep = chunks.swap_remove(index);
                chunks.clear();
                chunks.push(keep);
            }
        }

        tracing::debug!("Arena reset: {} bytes released", self.used.get());
        self.offset.set(0);
        self.used.set(0);
    }

    /// Bytes handed out since creation or the last reset
    pub fn used(&self) -> usize {
        self.used.get()
    }

    /// Maximum bytes this arena will hand out between resets
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes still available before exhaustion
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.used.get())
    }

    /// Number of backing chunks currently held
    pub fn chunk_count(&self) -> usize {
        self.chunks.borrow().len()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("used", &self.used.get())
            .field("capacity", &self.capacity)
            .field("chunks", &self.chunk_count())
            .finish()
    }
}
