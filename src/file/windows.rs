//! Windows backend
//!
//! Paths are converted with `utf8_to_utf16` and that buffer is passed
//! straight to `CreateFileW`; a path that cannot be converted is reported
//! as an open failure.

use std::fs;
use std::io::{self, Read, Write};
use std::os::windows::io::FromRawHandle;
use std::path::Path;
use std::ptr;

use windows_sys::Win32::Foundation::{GENERIC_READ, GENERIC_WRITE, INVALID_HANDLE_VALUE};
use windows_sys::Win32::Storage::FileSystem::{
    CreateFileW, CREATE_ALWAYS, FILE_ATTRIBUTE_NORMAL, FILE_SHARE_READ, OPEN_EXISTING,
};

use super::{Backend, FileMode};
use crate::encoding::utf8_to_utf16;

/// Native file on Windows
#[derive(Debug)]
pub struct WindowsFile {
    file: fs::File,
}

impl Backend for WindowsFile {
    fn open(path: &Path, mode: FileMode) -> io::Result<Self> {
        let utf8 = path.to_str().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "path is not valid UTF-8")
        })?;
        let wide = utf8_to_utf16(utf8.as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

        let mut access = GENERIC_READ;
        if mode.contains(FileMode::WRITE) {
            access |= GENERIC_WRITE;
        }
        let disposition = if mode.contains(FileMode::CREATE) {
            CREATE_ALWAYS
        } else {
            OPEN_EXISTING
        };

        // SAFETY: `wide` is zero-terminated and outlives the call; the
        // security attributes and template handle are optional and null.
        let handle = unsafe {
            CreateFileW(
                wide.as_slice().as_ptr(),
                access,
                FILE_SHARE_READ,
                ptr::null(),
                disposition,
                FILE_ATTRIBUTE_NORMAL,
                ptr::null_mut(),
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err(io::Error::last_os_error());
        }

        // SAFETY: `handle` is a freshly opened file handle owned by nobody
        // else; `fs::File` takes over closing it.
        let file = unsafe { fs::File::from_raw_handle(handle) };
        Ok(Self { file })
    }

    fn read(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        self.file.read(dest)
    }

    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.file.write(data)
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    fn close(self) -> io::Result<()> {
        drop(self.file);
        Ok(())
    }
}
