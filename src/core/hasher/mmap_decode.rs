//! Reading image files from disk for the CLI.
//!
//! Files of at least [`MMAP_THRESHOLD`] bytes are memory-mapped; smaller
//! ones are read into a buffer.

use crate::error::HashError;
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

/// Files this large or larger are mapped instead of read (1 MiB)
pub const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Contents of an image file, owned or mapped.
pub enum FileBytes {
    Vec(Vec<u8>),
    Mmap(Mmap),
}

impl Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileBytes::Vec(bytes) => bytes,
            FileBytes::Mmap(map) => map,
        }
    }
}

impl AsRef<[u8]> for FileBytes {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

/// Attach `path` to an I/O failure.
fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> HashError + '_ {
    move |source| HashError::IoError {
        path: path.to_path_buf(),
        source,
    }
}

/// Read the bytes of the file at `path`.
pub fn read_file_bytes(path: &Path) -> Result<FileBytes, HashError> {
    let mut file = File::open(path).map_err(io_error(path))?;
    let len = file.metadata().map_err(io_error(path))?.len();

    if len < MMAP_THRESHOLD {
        let mut bytes = Vec::with_capacity(len as usize);
        file.read_to_end(&mut bytes).map_err(io_error(path))?;
        return Ok(FileBytes::Vec(bytes));
    }

    // SAFETY: the map is read-only and owns its view of the file; the
    // caller must not truncate the file while the bytes are in use.
    unsafe { Mmap::map(&file) }
        .map(FileBytes::Mmap)
        .map_err(io_error(path))
}

/// Check the magic bytes of a file's contents.
///
/// Used when walking directories to skip files that are obviously not
/// images without paying for a decode attempt.
pub fn looks_like_image(bytes: &[u8]) -> bool {
    if bytes.len() < 8 {
        return false;
    }

    // JPEG, PNG, GIF, BMP
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF])
        || bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
        || bytes.starts_with(b"GIF8")
        || bytes.starts_with(b"BM")
    {
        return true;
    }

    // WebP: RIFF....WEBP
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return true;
    }

    // TIFF, little and big endian
    bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
}
