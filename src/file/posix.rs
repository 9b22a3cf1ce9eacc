//! POSIX backend
//!
//! Paths are handed to the OS as raw bytes; no re-encoding happens here.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use super::{Backend, FileMode};

/// Native file on Unix-like systems
#[derive(Debug)]
pub struct PosixFile {
    file: fs::File,
}

impl Backend for PosixFile {
    fn open(path: &Path, mode: FileMode) -> io::Result<Self> {
        let writable = mode.contains(FileMode::WRITE);

        if mode.contains(FileMode::CREATE) && !writable {
            // O_TRUNC needs a writable descriptor, so create/truncate first
            // and then reopen read-only.
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)?;
        }

        let mut options = OpenOptions::new();
        options.read(true).write(writable);
        if mode.contains(FileMode::CREATE) && writable {
            options.create(true).truncate(true);
        }

        Ok(Self {
            file: options.open(path)?,
        })
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
        // close(2) errors are not observable through std; dropping releases
        // the descriptor.
        drop(self.file);
        Ok(())
    }
}
