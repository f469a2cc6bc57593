//! Exclusive-access memory-mapped files
//!
//! [`MappedFile`] opens a file and exposes its bytes as a fixed-size region,
//! read-only or read/write. The OS-specific parts (open flags and caching
//! advice) live in one backend per platform family, selected at compile time:
//! - `unix` - `madvise` through memmap2's [`memmap2::Advice`]
//! - `windows` - `FILE_FLAG_*` access hints passed when the file is opened
//!
//! The mapping is released, and for writable mappings flushed, when the value
//! is dropped. A `MappedFile` can be moved but never copied.

use crate::{Error, Result};
use memmap2::{Mmap, MmapMut, MmapOptions};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[cfg(unix)]
mod unix;
#[cfg(unix)]
use unix as platform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
use windows as platform;

/// Expected access pattern; only affects OS caching, never correctness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessHint {
    /// No special treatment
    #[default]
    Normal,
    /// Expect sequential access
    Sequential,
    /// Expect random access
    Random,
}

enum Mapping {
    ReadOnly(Mmap),
    ReadWrite(MmapMut),
}

/// A memory-mapped file with exclusive ownership of its mapping and handle
pub struct MappedFile {
    path: PathBuf,
    // Dropped before the handle
    mapping: Mapping,
    _file: File,
}

impl MappedFile {
    /// Open or create a memory-mapped file
    ///
    /// - read-only: the file must exist and `size_hint` is ignored
    /// - writable, file missing: the file is created with `size_hint` bytes
    ///   (which must be non-zero)
    /// - writable, file present: `size_hint == 0` keeps the current size,
    ///   anything else resizes the file
    pub fn open(
        path: impl AsRef<Path>,
        hint: AccessHint,
        writable: bool,
        size_hint: u64,
    ) -> Result<Self> {
        let path = path.as_ref();
        let exists = path.is_file();

        if writable && !exists && size_hint == 0 {
            return Err(Error::mapping_failure(
                path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "a new memory mapped file needs a non-zero size",
                ),
            ));
        }

        let mut options = OpenOptions::new();
        options.read(true);
        if writable {
            options.write(true).create(true);
        }
        platform::configure_open(&mut options, hint);

        let file = options
            .open(path)
            .map_err(|e| Error::mapping_failure(path, e))?;

        if writable && size_hint != 0 {
            file.set_len(size_hint)
                .map_err(|e| Error::mapping_failure(path, e))?;
        }

        let mapping = if writable {
            // SAFETY: the handle is held open for the lifetime of the mapping
            // and callers only reach the bytes through borrows of `self`.
            let map = unsafe { MmapOptions::new().map_mut(&file) }
                .map_err(|e| Error::mapping_failure(path, e))?;
            Mapping::ReadWrite(map)
        } else {
            // SAFETY: read-only mapping; the handle outlives it (see field order).
            let map = unsafe { MmapOptions::new().map(&file) }
                .map_err(|e| Error::mapping_failure(path, e))?;
            Mapping::ReadOnly(map)
        };

        let mapped = Self {
            path: path.to_path_buf(),
            mapping,
            _file: file,
        };

        if let Err(e) = mapped.advise(hint) {
            warn!(
                "Access hint {:?} refused for {}: {}",
                hint,
                mapped.path.display(),
                e
            );
        }

        debug!(
            "Mapped {} ({} bytes, {})",
            mapped.path.display(),
            mapped.size(),
            if writable { "read/write" } else { "read only" }
        );
        Ok(mapped)
    }

    /// Open an existing file read-only
    pub fn open_read_only(path: impl AsRef<Path>, hint: AccessHint) -> Result<Self> {
        Self::open(path, hint, false, 0)
    }

    /// Size of the mapped region in bytes
    pub fn size(&self) -> u64 {
        self.data().len() as u64
    }

    /// Read-only view of the mapped bytes
    pub fn data(&self) -> &[u8] {
        match &self.mapping {
            Mapping::ReadOnly(map) => &map[..],
            Mapping::ReadWrite(map) => &map[..],
        }
    }

    /// Mutable view of the mapped bytes; only available for writable mappings
    pub fn data_mut(&mut self) -> Result<&mut [u8]> {
        match &mut self.mapping {
            Mapping::ReadOnly(_) => Err(Error::WriteToReadOnlyMapping),
            Mapping::ReadWrite(map) => Ok(&mut map[..]),
        }
    }

    /// Whether the mapping was opened with write access
    pub fn is_writable(&self) -> bool {
        matches!(self.mapping, Mapping::ReadWrite(_))
    }

    /// Path the mapping was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write outstanding changes back to the file; a no-op when read-only
    pub fn flush(&self) -> Result<()> {
        match &self.mapping {
            Mapping::ReadOnly(_) => Ok(()),
            Mapping::ReadWrite(map) => map
                .flush()
                .map_err(|e| Error::mapping_failure(&self.path, e)),
        }
    }

    fn advise(&self, hint: AccessHint) -> std::io::Result<()> {
        if self.data().is_empty() {
            return Ok(());
        }
        match &self.mapping {
            Mapping::ReadOnly(map) => platform::advise(map, hint),
            Mapping::ReadWrite(map) => platform::advise_mut(map, hint),
        }
    }
}

impl Drop for MappedFile {
    fn drop(&mut self) {
        if let Mapping::ReadWrite(map) = &self.mapping {
            if let Err(e) = map.flush() {
                warn!(
                    "Failed to flush memory map for {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

impl std::fmt::Debug for MappedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedFile")
            .field("path", &self.path)
            .field("size", &self.size())
            .field("writable", &self.is_writable())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Write `content` to a closed file in a fresh temporary directory
    fn create_temp_file(content: &[u8]) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.bin");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_read_only_mapping_exposes_file_bytes() {
        let (_dir, path) = create_temp_file(b"# header\n1 2 3\n");
        let mapped = MappedFile::open_read_only(&path, AccessHint::Sequential).unwrap();

        assert_eq!(mapped.size(), 15);
        assert_eq!(mapped.data(), b"# header\n1 2 3\n");
        assert!(!mapped.is_writable());
        assert_eq!(mapped.path(), path.as_path());
    }

    #[test]
    fn test_read_only_mapping_rejects_writes() {
        let (_dir, path) = create_temp_file(b"abc");
        let mut mapped = MappedFile::open(&path, AccessHint::Normal, false, 0).unwrap();

        assert!(matches!(
            mapped.data_mut(),
            Err(Error::WriteToReadOnlyMapping)
        ));
        assert!(mapped.flush().is_ok());
    }

    #[test]
    fn test_read_only_ignores_size_hint() {
        let (_dir, path) = create_temp_file(b"abcdef");
        let mapped = MappedFile::open(&path, AccessHint::Random, false, 4096).unwrap();
        assert_eq!(mapped.size(), 6);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 6);
    }

    #[test]
    fn test_missing_file_is_mapping_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.ang");

        let error = MappedFile::open_read_only(&path, AccessHint::Normal).unwrap_err();
        match &error {
            Error::MappingFailure { path: failed, .. } => assert_eq!(failed, &path),
            other => panic!("expected MappingFailure, got {:?}", other),
        }
        assert!(error.to_string().contains("couldn't be memory mapped"));
    }

    #[test]
    fn test_writable_creates_and_sizes_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.bin");

        {
            let mut mapped = MappedFile::open(&path, AccessHint::Normal, true, 8).unwrap();
            assert!(mapped.is_writable());
            assert_eq!(mapped.size(), 8);
            mapped.data_mut().unwrap().copy_from_slice(b"ABCDEFGH");
        }

        assert_eq!(std::fs::read(&path).unwrap(), b"ABCDEFGH");
    }

    #[test]
    fn test_writable_new_file_needs_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.bin");

        let error = MappedFile::open(&path, AccessHint::Normal, true, 0).unwrap_err();
        assert!(matches!(error, Error::MappingFailure { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_writable_existing_keeps_size_with_zero_hint() {
        let (_dir, path) = create_temp_file(b"0123456789");

        {
            let mut mapped = MappedFile::open(&path, AccessHint::Normal, true, 0).unwrap();
            assert_eq!(mapped.size(), 10);
            mapped.data_mut().unwrap()[0] = b'X';
            mapped.flush().unwrap();
        }

        assert_eq!(std::fs::read(&path).unwrap(), b"X123456789");
    }

    #[test]
    fn test_writable_existing_resized_by_hint() {
        let (_dir, path) = create_temp_file(b"0123456789");

        let mapped = MappedFile::open(&path, AccessHint::Sequential, true, 4).unwrap();
        assert_eq!(mapped.size(), 4);
        assert_eq!(mapped.data(), b"0123");
        drop(mapped);

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 4);
    }

    #[test]
    fn test_mapping_can_be_moved() {
        let (_dir, path) = create_temp_file(b"moved");
        let mapped = MappedFile::open_read_only(&path, AccessHint::Normal).unwrap();
        let holder = vec![mapped];
        assert_eq!(holder[0].data(), b"moved");
    }

    #[cfg(windows)]
    #[test]
    fn test_mapping_holds_file_exclusively() {
        let (_dir, path) = create_temp_file(b"locked");
        let mapped = MappedFile::open_read_only(&path, AccessHint::Normal).unwrap();
        assert!(std::fs::File::open(&path).is_err());
        drop(mapped);
        assert!(std::fs::File::open(&path).is_ok());
    }
}
