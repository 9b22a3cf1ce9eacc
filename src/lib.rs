//! # basekit
//!
//! Base layer for native applications:
//! - Portable file handle with a `READ | WRITE | CREATE` mode set
//! - UTF-8 to UTF-16 path conversion for Windows file APIs
//! - Arena-backed byte strings (pointer + length, no terminator)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────┐      ┌──────────────────────────┐
//! │        File<B>           │      │          Str<'a>         │
//! │ open/read/write/size/    │─────►│ alloc / trim / compare   │
//! │ close/read_to_string     │      │ (views into the arena)   │
//! └────────────┬─────────────┘      └────────────┬─────────────┘
//!              │                                 │
//!       ┌──────┴───────┐                  ┌──────▼──────┐
//!       ▼              ▼                  │    Arena    │
//! ┌───────────┐  ┌─────────────┐          │   (bump)    │
//! │ PosixFile │  │ WindowsFile │          └─────────────┘
//! └───────────┘  └──────┬──────┘
//!                       ▼
//!                ┌─────────────┐
//!                │ utf8→utf16  │
//!                └─────────────┘
//! ```
//!
//! ## Typical flow
//!
//! ```no_run
//! use basekit::{Arena, File, FileMode};
//!
//! # fn main() -> basekit::Result<()> {
//! let arena = Arena::new();
//! let mut file = File::open("a.txt", FileMode::READ)?;
//! let content = file.read_to_string(&arena)?;
//! file.close();
//! println!("{} bytes", content.size() - 1);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod arena;
pub mod encoding;
pub mod file;
pub mod string;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BaseError, Result};
pub use config::{Config, WritePolicy};
pub use arena::Arena;
pub use file::{read_file, save_file, File, FileMode};
pub use string::{string_alloc, string_compare, string_trim, Str, StrMut};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of basekit
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
