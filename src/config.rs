//! Configuration for basekit
//!
//! Centralized configuration with sensible defaults.

use crate::error::{BaseError, Result};

/// Main configuration shared by arenas and file handles
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Arena Configuration
    // -------------------------------------------------------------------------
    /// Size of each backing chunk the arena requests from the heap (in bytes).
    /// Requests larger than this get a dedicated chunk.
    pub arena_chunk_size: usize,

    /// Upper bound on bytes handed out by one arena between resets
    pub arena_capacity: usize,

    // -------------------------------------------------------------------------
    // File Configuration
    // -------------------------------------------------------------------------
    /// What `File::write` does when the OS accepts fewer bytes than asked
    pub write_policy: WritePolicy,
}

/// Behaviour of `File::write` on a partial write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// One write call; anything short of the full span is an error
    #[default]
    FailOnShort,

    /// Keep issuing write calls until the whole span is written
    Retry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_chunk_size: 64 * 1024,       // 64 KB
            arena_capacity: 1024 * 1024 * 1024, // 1 GB
            write_policy: WritePolicy::FailOnShort,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the arena chunk size (in bytes)
    pub fn arena_chunk_size(mut self, size: usize) -> Self {
        self.config.arena_chunk_size = size;
        self
    }

    /// Set the arena capacity (in bytes)
    pub fn arena_capacity(mut self, size: usize) -> Self {
        self.config.arena_capacity = size;
        self
    }

    /// Set the partial write policy
    pub fn write_policy(mut self, policy: WritePolicy) -> Self {
        self.config.write_policy = policy;
        self
    }

    /// Validate and return the config
    pub fn build(self) -> Result<Config> {
        let config = self.config;
        if config.arena_chunk_size == 0 {
            return Err(BaseError::Config(
                "arena_chunk_size must be non-zero".to_string(),
            ));
        }
        if config.arena_capacity < config.arena_chunk_size {
            return Err(BaseError::Config(format!(
                "arena_capacity ({}) is smaller than arena_chunk_size ({})",
                config.arena_capacity, config.arena_chunk_size
            )));
        }
        Ok(config)
    }
}
