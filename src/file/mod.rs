//! File Module
//!
//! Portable file handle over a native backend.
//!
//! ## Responsibilities
//! - Translate `FileMode` into native access/creation flags
//! - Reject every operation on a closed handle
//! - Report size-query failures separately from empty files
//! - Read whole files into arena strings
//!
//! ## Lifecycle
//! ```text
//! open ──► { read | write | size }* ──► close
//!                                        │
//!             (any op after close) ──► Err(Closed)
//! ```
//!
//! Every operation is one blocking system call (except `WritePolicy::Retry`
//! writes). A handle is not meant to be shared between threads without
//! external synchronisation.

#[cfg(unix)]
mod posix;
#[cfg(windows)]
mod windows;

#[cfg(not(any(unix, windows)))]
compile_error!("file I/O is not implemented for this target");

#[cfg(unix)]
pub use posix::PosixFile;
#[cfg(windows)]
pub use windows::WindowsFile;

/// Backend for the host platform
#[cfg(unix)]
pub type NativeFile = PosixFile;
/// Backend for the host platform
#[cfg(windows)]
pub type NativeFile = WindowsFile;

use std::io;
use std::path::{Path, PathBuf};

use bitflags::bitflags;

use crate::arena::Arena;
use crate::config::{Config, WritePolicy};
use crate::error::{BaseError, Result};
use crate::string::{try_string_alloc, Str};

bitflags! {
    /// How a file is opened.
    ///
    /// Read access is always requested from the OS, so `WRITE` alone still
    /// yields a readable handle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FileMode: u32 {
        /// Open for reading
        const READ = 1 << 0;
        /// Open for writing
        const WRITE = 1 << 1;
        /// Create the file, truncating it if it exists. Without this flag
        /// the file must already exist.
        const CREATE = 1 << 2;
    }
}

/// Native file primitives for one platform.
///
/// `File` owns the portable contract (closed-state checks, short-write
/// policy, logging); a backend only maps single calls onto the OS.
pub trait Backend: Sized {
    /// Open `path`. `CREATE` means create-or-truncate, otherwise the file
    /// must exist. Read access is always requested.
    fn open(path: &Path, mode: FileMode) -> io::Result<Self>;

    /// One read call into `dest`
    fn read(&mut self, dest: &mut [u8]) -> io::Result<usize>;

    /// One write call from `data`
    fn write(&mut self, data: &[u8]) -> io::Result<usize>;

    /// Current byte length of the file
    fn size(&self) -> io::Result<u64>;

    /// Release the native handle
    fn close(self) -> io::Result<()>;
}

/// Open file handle
pub struct File<B: Backend = NativeFile> {
    /// `None` once closed
    handle: Option<B>,
    mode: FileMode,
    path: PathBuf,
    write_policy: WritePolicy,
}

impl File {
    /// Open a file with the default configuration
    pub fn open(path: impl AsRef<Path>, mode: FileMode) -> Result<Self> {
        Self::open_with(path, mode, &Config::default())
    }

    /// Open a file, taking the write policy from `config`
    pub fn open_with(path: impl AsRef<Path>, mode: FileMode, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        match NativeFile::open(path, mode) {
            Ok(handle) => {
                tracing::debug!("Opened {} ({:?})", path.display(), mode);
                Ok(Self::from_backend(handle, path, mode, config))
            }
            Err(source) => {
                tracing::warn!("Failed to open {}: {}", path.display(), source);
                Err(BaseError::Open {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
}

impl<B: Backend> File<B> {
    /// Wrap an already-open backend handle
    pub fn from_backend(handle: B, path: impl AsRef<Path>, mode: FileMode, config: &Config) -> Self {
        Self {
            handle: Some(handle),
            mode,
            path: path.as_ref().to_path_buf(),
            write_policy: config.write_policy,
        }
    }

    /// Release the handle.
    ///
    /// Errors from the OS are logged and dropped. Calling this on a closed
    /// handle does nothing.
    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            match handle.close() {
                Ok(()) => tracing::debug!("Closed {}", self.path.display()),
                Err(e) => tracing::warn!("Close of {} failed: {}", self.path.display(), e),
            }
        }
    }

    /// Current byte length of the file.
    ///
    /// `Ok(0)` means empty; a failed query is `Err(SizeQuery)`.
    pub fn size(&self) -> Result<u64> {
        let handle = self.handle.as_ref().ok_or(BaseError::Closed)?;
        handle.size().map_err(|e| {
            tracing::warn!("Size query on {} failed: {}", self.path.display(), e);
            BaseError::SizeQuery(e)
        })
    }

    /// Read up to `bytes_to_read` bytes into `dest` with a single call.
    ///
    /// Returns the number of bytes actually read; a short read (end of
    /// file) is not an error.
    ///
    /// # Panics
    /// If `dest` is smaller than `bytes_to_read`.
    pub fn read(&mut self, dest: &mut [u8], bytes_to_read: usize) -> Result<usize> {
        assert!(
            dest.len() >= bytes_to_read,
            "read destination holds {} bytes, {} requested",
            dest.len(),
            bytes_to_read
        );

        let handle = self.handle.as_mut().ok_or(BaseError::Closed)?;
        let read = handle.read(&mut dest[..bytes_to_read])?;
        tracing::trace!("Read {}/{} bytes from {}", read, bytes_to_read, self.path.display());
        Ok(read)
    }

    /// Write all of `data`.
    ///
    /// Under `WritePolicy::FailOnShort` this is one write call and a short
    /// write is `Err(ShortWrite)`. Under `WritePolicy::Retry` the call is
    /// repeated until the span is written or the OS stops accepting bytes.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        let handle = self.handle.as_mut().ok_or(BaseError::Closed)?;
        let expected = data.len();

        let written = match self.write_policy {
            WritePolicy::FailOnShort => handle.write(data)?,
            WritePolicy::Retry => {
                let mut written = 0;
                while written < expected {
                    match handle.write(&data[written..]) {
                        Ok(0) => break,
                        Ok(n) => written += n,
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e.into()),
                    }
                }
                written
            }
        };

        if written != expected {
            tracing::warn!(
                "Short write to {}: {} of {} bytes",
                self.path.display(),
                written,
                expected
            );
            return Err(BaseError::ShortWrite { written, expected });
        }

        tracing::trace!("Wrote {} bytes to {}", written, self.path.display());
        Ok(())
    }

    /// Read the whole file into a new arena string.
    ///
    /// The string is one byte longer than the content and that last byte
    /// is always `0`, for consumers that want a C-style terminator.
    /// Reads continue until the queried size is filled or end of file.
    pub fn read_to_string<'a>(&mut self, arena: &'a Arena) -> Result<Str<'a>> {
        let size = self.size()?;
        let len = usize::try_from(size)
            .ok()
            .filter(|&len| len < usize::MAX)
            .ok_or(BaseError::AllocationExhausted {
                requested: usize::MAX,
                remaining: arena.remaining(),
            })?;

        let mut buffer = try_string_alloc(arena, len + 1)?;

        let mut filled = 0;
        while filled < len {
            let read = self.read(&mut buffer[filled..len], len - filled)?;
            if read == 0 {
                break;
            }
            filled += read;
        }
        if filled < len {
            tracing::warn!(
                "{} shrank while reading: {} of {} bytes",
                self.path.display(),
                filled,
                len
            );
        }

        buffer[filled] = 0;
        let bytes = buffer.freeze().as_bytes();
        Ok(Str::new(&bytes[..=filled]))
    }

    /// Whether the handle is still open
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Mode the file was opened with
    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Path the file was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<B: Backend> Drop for File<B> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<B: Backend> std::fmt::Debug for File<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("File")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("open", &self.is_open())
            .finish()
    }
}

// =============================================================================
// Whole-file helpers
// =============================================================================

/// Read a whole file into `arena`.
///
/// Unlike `File::read_to_string`, the result holds exactly the file content
/// with no trailing terminator.
pub fn read_file<'a>(arena: &'a Arena, path: impl AsRef<Path>) -> Result<Str<'a>> {
    let mut file = File::open(path, FileMode::READ)?;
    let content = file.read_to_string(arena)?;
    file.close();

    let bytes = content.as_bytes();
    Ok(Str::new(&bytes[..bytes.len() - 1]))
}

/// Create (or truncate) `path` and write `content` to it
pub fn save_file(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let mut file = File::open(path, FileMode::CREATE | FileMode::WRITE)?;
    file.write(content)?;
    file.close();
    Ok(())
}
