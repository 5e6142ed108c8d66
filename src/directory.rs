//! Reads the fixed-location root directory or a subdirectory cluster
//! chain, parses 32-byte directory entries, and streams file contents
//! (spec §4.5).

use crate::block_device::BlockDevice;
use crate::boot_sector::{BootSectorInfo, DIR_ENTRY_SIZE};
use crate::chain;
use crate::error::{Error, Result};
use crate::fat_table::FatTable;
use io_at::ReadAt;
use log::warn;

/// Logical cluster sentinel naming the root directory, as opposed to a
/// real first-cluster pointer into the data region.
pub const ROOT_DIR_SENTINEL: u16 = 0;

/// Attribute bit marking a directory entry.
pub const ATTR_DIRECTORY: u8 = 0x10;
/// Attribute value marking a long-name (VFAT) fragment, skipped entirely.
pub const ATTR_LONG_NAME: u8 = 0x0F;

const UNUSED_ENTRY: u8 = 0x00;
const DELETED_ENTRY: u8 = 0xE5;

/// A single parsed 32-byte directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Raw 8.3 name: 8 base bytes then 3 extension bytes, space-padded,
    /// uppercase. Kept raw so callers needing exact on-disk fidelity (e.g.
    /// the dot entries `.`/`..`) aren't forced through a lossy re-encoding.
    pub name: [u8; 11],
    pub attribute: u8,
    pub first_cluster: u16,
    pub size: u32,
}

impl DirectoryEntry {
    fn parse(bytes: &[u8]) -> Self {
        let mut name = [0u8; 11];
        name.copy_from_slice(&bytes[0..11]);
        let attribute = bytes[11];
        let first_cluster = u16::from_le_bytes([bytes[26], bytes[27]]);
        let size = u32::from_le_bytes([bytes[28], bytes[29], bytes[30], bytes[31]]);
        Self {
            name,
            attribute,
            first_cluster,
            size,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.attribute & ATTR_DIRECTORY != 0
    }

    pub fn is_file(&self) -> bool {
        !self.is_directory()
    }

    /// Renders the raw 8.3 name as `NAME.EXT`, trimming trailing pad spaces
    /// and omitting the dot when there's no extension. For display only;
    /// the core never compares against this, only against `name`.
    pub fn display_name(&self) -> String {
        let base = trim_pad(&self.name[0..8]);
        let ext = trim_pad(&self.name[8..11]);
        if ext.is_empty() {
            base
        } else {
            format!("{base}.{ext}")
        }
    }
}

fn trim_pad(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != b' ')
        .map(|i| i + 1)
        .unwrap_or(0);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

fn should_skip(bytes: &[u8]) -> Option<bool> {
    match bytes[0] {
        UNUSED_ENTRY => None, // end-of-directory sentinel, stop scanning
        DELETED_ENTRY => Some(true),
        _ if bytes[11] == ATTR_LONG_NAME => Some(true),
        _ => Some(false),
    }
}

/// Parses a directory region buffer into the ordered, filtered entry list
/// (spec §3 `DirectoryListing`, §4.5 entry parsing).
fn parse_entries(buffer: &[u8]) -> Vec<DirectoryEntry> {
    let mut out = Vec::new();
    for chunk in buffer.chunks_exact(DIR_ENTRY_SIZE as usize) {
        match should_skip(chunk) {
            None => break,
            Some(true) => continue,
            Some(false) => out.push(DirectoryEntry::parse(chunk)),
        }
    }
    out
}

/// Reads the root directory (fixed location, not cluster-addressed).
pub fn read_root<S: ReadAt>(
    device: &BlockDevice<S>,
    boot: &BootSectorInfo,
) -> Result<Vec<DirectoryEntry>> {
    let buffer_size = boot.root_dir_sectors() as usize * device.sector_size();
    let mut buffer = vec![0u8; buffer_size];
    let read = device.read_sectors(boot.root_dir_sector() as u64, boot.root_dir_sectors() as usize, &mut buffer);
    if read != buffer_size {
        return Err(Error::ShortRead {
            expected: buffer_size,
            actual: read,
        });
    }
    Ok(parse_entries(&buffer))
}

/// Reads a subdirectory by walking its cluster chain and concatenating a
/// full cluster's worth of sectors per chain node (spec §9 item 2: the
/// original read one sector per node but advanced by a full sector-size
/// stride, which is wrong whenever `sectors_per_cluster > 1`).
pub fn read_subdirectory<S: ReadAt>(
    device: &BlockDevice<S>,
    boot: &BootSectorInfo,
    fat: &FatTable,
    first_cluster: u16,
) -> Result<Vec<DirectoryEntry>> {
    let clusters = chain::walk(fat, first_cluster, boot.total_data_clusters() + 1)?;
    let cluster_bytes = boot.sectors_per_cluster as usize * device.sector_size();
    let mut buffer = vec![0u8; clusters.len() * cluster_bytes];

    for (i, &cluster) in clusters.iter().enumerate() {
        let sector = boot.cluster_to_sector(cluster as u32) as u64;
        let out = &mut buffer[i * cluster_bytes..(i + 1) * cluster_bytes];
        let read = device.read_sectors(sector, boot.sectors_per_cluster as usize, out);
        if read != cluster_bytes {
            return Err(Error::ShortRead {
                expected: cluster_bytes,
                actual: read,
            });
        }
    }

    Ok(parse_entries(&buffer))
}

/// Reads either the root directory or a subdirectory, depending on whether
/// `first_cluster` is the root sentinel (spec §4.5).
pub fn read_dir<S: ReadAt>(
    device: &BlockDevice<S>,
    boot: &BootSectorInfo,
    fat: &FatTable,
    first_cluster: u16,
) -> Result<Vec<DirectoryEntry>> {
    if first_cluster == ROOT_DIR_SENTINEL {
        read_root(device, boot)
    } else {
        read_subdirectory(device, boot, fat, first_cluster)
    }
}

/// Streams a file's content cluster-by-cluster to `sink`. The sink is not
/// told the file's logical size (spec §4.5); trimming trailing bytes is the
/// caller's job if it cares.
pub fn read_file<S: ReadAt>(
    device: &BlockDevice<S>,
    boot: &BootSectorInfo,
    fat: &FatTable,
    first_cluster: u16,
    mut sink: impl FnMut(&[u8]),
) -> Result<()> {
    let clusters = chain::walk(fat, first_cluster, boot.total_data_clusters() + 1)?;
    let cluster_bytes = boot.sectors_per_cluster as usize * device.sector_size();
    let mut buffer = vec![0u8; cluster_bytes];

    for &cluster in &clusters {
        let sector = boot.cluster_to_sector(cluster as u32) as u64;
        let read = device.read_sectors(sector, boot.sectors_per_cluster as usize, &mut buffer);
        if read != cluster_bytes {
            warn!("short read streaming cluster {cluster}: expected {cluster_bytes}, got {read}");
            return Err(Error::ShortRead {
                expected: cluster_bytes,
                actual: read,
            });
        }
        sink(&buffer);
    }

    Ok(())
}
