//! Opens an image and reads contiguous sectors into a caller-supplied buffer
//! (spec §4.1). Generic over [`ReadAt`] so tests can swap in an in-memory
//! image instead of a real file, the same shape as the teacher's
//! `Fs<S: ReadAt>`.

use crate::error::{Error, Result};
use io_at::ReadAt;
use log::debug;
use std::fs::File;
use std::path::Path;

/// The sector size a freshly-opened device assumes until the boot sector is
/// parsed and `set_sector_size` is called.
pub const DEFAULT_SECTOR_SIZE: usize = 512;

/// A handle over a FAT12 image, addressed by logical sector index.
pub struct BlockDevice<S> {
    store: S,
    sector_size: usize,
}

impl BlockDevice<File> {
    /// Acquires a read handle on the image at `path`. Sector size starts at
    /// [`DEFAULT_SECTOR_SIZE`] until `set_sector_size` is called.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = File::open(path).map_err(Error::FailedToOpen)?;
        Ok(Self::from_store(store))
    }
}

impl<S: ReadAt> BlockDevice<S> {
    /// Wraps an already-open store. Used directly by tests with in-memory
    /// stores; `open` is the path-based entry point for real images.
    pub fn from_store(store: S) -> Self {
        Self {
            store,
            sector_size: DEFAULT_SECTOR_SIZE,
        }
    }

    pub fn sector_size(&self) -> usize {
        self.sector_size
    }

    /// Called once by the facade after the boot sector is parsed. Accepts
    /// only `n > 0` that is a multiple of 512; otherwise retains the current
    /// size. Returns the size in effect afterward either way.
    pub fn set_sector_size(&mut self, n: usize) -> usize {
        if n > 0 && n % DEFAULT_SECTOR_SIZE == 0 {
            debug!("sector size set to {n}");
            self.sector_size = n;
        }
        self.sector_size
    }

    /// Reads exactly one sector at `index` into `out`. Returns the number of
    /// bytes actually read; 0 on failure, a partial count on a short read.
    pub fn read_sector(&self, index: u64, out: &mut [u8]) -> usize {
        self.read_sectors(index, 1, out)
    }

    /// Reads `count` contiguous sectors starting at `index` into `out`.
    pub fn read_sectors(&self, index: u64, count: usize, out: &mut [u8]) -> usize {
        let offset = index * self.sector_size as u64;
        let want = (count * self.sector_size).min(out.len());
        match self.store.read_at(&mut out[..want], offset) {
            Ok(n) => n,
            Err(_) => 0,
        }
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
