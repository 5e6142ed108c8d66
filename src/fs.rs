//! Lifetime owner of [`BlockDevice`] + [`BootSectorInfo`] + [`FatTable`];
//! the entry point a shell drives (spec §4.6).
//!
//! The `Uninitialized`/`Ready` state machine of spec §4.6 is modeled with
//! ownership rather than an internal enum: there is no `Filesystem` value
//! until [`Filesystem::init`] succeeds, and [`Filesystem::deinit`] consumes
//! `self`, ending its lifetime. This is the same "collect module-level
//! statics into one owned value" redesign spec §9 item 2 calls for, carried
//! one step further with Rust's ownership model instead of a runtime tag.

use crate::block_device::BlockDevice;
use crate::boot_sector::BootSectorInfo;
use crate::directory::{self, DirectoryEntry};
use crate::error::{Error, Result};
use crate::fat_table::FatTable;
use log::{debug, error};
use std::fs::File;
use std::path::Path;

/// An opened, validated FAT12 image, ready for `read_dir`/`read_file`.
pub struct Filesystem {
    device: BlockDevice<File>,
    boot: BootSectorInfo,
    fat: FatTable,
}

impl Filesystem {
    /// Opens the image, reads sector 0, parses and validates the boot
    /// sector, finalizes the device's sector size, then loads the FAT.
    /// Any failure is reported without leaving a partially-built value
    /// around (spec §4.6: "on any failure, the facade returns to
    /// Uninitialized").
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("opening {}", path.display());
        let mut device = BlockDevice::open(path)?;

        let mut raw = [0u8; 512];
        let read = device.read_sector(0, &mut raw);
        if read != raw.len() {
            error!("short read on boot sector: expected 512, got {read}");
            return Err(Error::ShortRead {
                expected: raw.len(),
                actual: read,
            });
        }

        let boot = BootSectorInfo::parse(&raw)?;
        device.set_sector_size(boot.bytes_per_sector as usize);
        let fat = FatTable::load(&device, &boot)?;

        debug!("filesystem ready: {:?} label={}", boot, boot.fat_type_label_ascii());
        Ok(Self { device, boot, fat })
    }

    /// Reads the directory at `first_cluster` (the root sentinel `0`, or a
    /// subdirectory's first cluster).
    pub fn read_dir(&self, first_cluster: u16) -> Result<Vec<DirectoryEntry>> {
        directory::read_dir(&self.device, &self.boot, &self.fat, first_cluster)
    }

    /// Streams a file's content cluster-by-cluster to `sink`.
    pub fn read_file(&self, first_cluster: u16, sink: impl FnMut(&[u8])) -> Result<()> {
        directory::read_file(&self.device, &self.boot, &self.fat, first_cluster, sink)
    }

    /// Releases a directory listing. Listings here are plain owned
    /// `Vec<DirectoryEntry>`s with no parallel arrays to free (unlike the
    /// four parallel C arrays this replaces), so this is a documented
    /// no-op kept for interface parity with spec §5's required operation.
    pub fn clear_listing(&self, listing: Vec<DirectoryEntry>) {
        drop(listing);
    }

    /// Releases the FAT buffer and closes the device. Idempotent in the
    /// sense that `self` is consumed; there is no value left to call this
    /// on twice.
    pub fn deinit(self) {
        drop(self);
    }

    pub fn boot_sector(&self) -> &BootSectorInfo {
        &self.boot
    }
}
