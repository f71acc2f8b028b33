//! Getting database bytes off disk.

use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

/// Database contents, either mapped or read into memory.
pub enum DatabaseBytes {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for DatabaseBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            DatabaseBytes::Mapped(map) => map,
            DatabaseBytes::Owned(buf) => buf,
        }
    }
}

/// Open `path` read-only. Empty files are always read, since a zero-length
/// mapping fails on some platforms.
pub fn open_database(path: &Path, use_mmap: bool) -> io::Result<DatabaseBytes> {
    let mut file = File::open(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Failed to open database '{}': {}", path.display(), e),
        )
    })?;
    let len = file.metadata()?.len();

    if use_mmap && len > 0 {
        // The map is dropped as soon as loading has copied out what it needs.
        let map = unsafe { Mmap::map(&file)? };
        log::debug!("mapped {} ({} bytes)", path.display(), len);
        return Ok(DatabaseBytes::Mapped(map));
    }

    let mut buf = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
    file.read_to_end(&mut buf)?;
    log::debug!("read {} ({} bytes)", path.display(), buf.len());
    Ok(DatabaseBytes::Owned(buf))
}
