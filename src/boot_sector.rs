//! Parses the 512-byte BIOS Parameter Block and exposes derived geometry
//! (spec §3, §4.2).

use crate::error::{Error, Result};
use fmt_extra::AsciiStr;
use index_fixed::index_fixed;
use log::{debug, warn};

/// Size in bytes of a FAT12 directory entry.
pub const DIR_ENTRY_SIZE: u32 = 32;

fn le16(raw: &[u8; 512], offset: usize) -> u16 {
    u16::from_le_bytes([raw[offset], raw[offset + 1]])
}

/// Immutable, validated BIOS Parameter Block fields plus the geometry
/// derived from them once at parse time.
#[derive(Debug, Clone)]
pub struct BootSectorInfo {
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sector_count: u16,
    pub fat_count: u8,
    pub root_entry_count: u16,
    pub total_sectors_16: u16,
    pub sectors_per_fat: u16,
    pub media_signature: u8,
    pub fat_type_label: [u8; 8],

    root_dir_sector: u32,
    root_dir_sectors: u32,
    data_region_sector: u32,
    total_data_clusters: u32,
}

impl BootSectorInfo {
    /// Parses and validates a 512-byte boot sector. See spec §4.2 for field
    /// offsets and §9 item 1 for the corrected validation conjunction.
    pub fn parse(raw: &[u8; 512]) -> Result<Self> {
        let bytes_per_sector = le16(raw, 11);
        let sectors_per_cluster = raw[13];
        let reserved_sector_count = le16(raw, 14);
        let fat_count = raw[16];
        let root_entry_count = le16(raw, 17);
        let total_sectors_16 = le16(raw, 19);
        let sectors_per_fat = le16(raw, 22);
        let media_signature = raw[38];
        let fat_type_label: [u8; 8] = *index_fixed!(raw; 54, ..62);

        let valid = bytes_per_sector > 0
            && bytes_per_sector % 512 == 0
            && reserved_sector_count >= 1
            && fat_count >= 2
            && root_entry_count % 16 == 0;

        if !valid {
            warn!(
                "bad boot sector: bytes_per_sector={bytes_per_sector} \
                 reserved_sector_count={reserved_sector_count} fat_count={fat_count} \
                 root_entry_count={root_entry_count}"
            );
            return Err(Error::BadBootSector);
        }

        let root_dir_sector =
            reserved_sector_count as u32 + fat_count as u32 * sectors_per_fat as u32;
        let root_dir_sectors = (root_entry_count as u32 * DIR_ENTRY_SIZE)
            .div_ceil(bytes_per_sector as u32);
        let data_region_sector = root_dir_sector + root_dir_sectors;

        let data_sectors = (total_sectors_16 as u32).saturating_sub(data_region_sector);
        let total_data_clusters = if sectors_per_cluster == 0 {
            0
        } else {
            data_sectors / sectors_per_cluster as u32
        };

        debug!(
            "geometry: root_dir_sector={root_dir_sector} root_dir_sectors={root_dir_sectors} \
             data_region_sector={data_region_sector} total_data_clusters={total_data_clusters}"
        );

        Ok(Self {
            bytes_per_sector,
            sectors_per_cluster,
            reserved_sector_count,
            fat_count,
            root_entry_count,
            total_sectors_16,
            sectors_per_fat,
            media_signature,
            fat_type_label,
            root_dir_sector,
            root_dir_sectors,
            data_region_sector,
            total_data_clusters,
        })
    }

    /// Logical sector index of the root directory region.
    pub fn root_dir_sector(&self) -> u32 {
        self.root_dir_sector
    }

    /// Number of sectors occupied by the fixed-size root directory.
    pub fn root_dir_sectors(&self) -> u32 {
        self.root_dir_sectors
    }

    /// Logical sector index where the cluster-addressed data region begins.
    pub fn data_region_sector(&self) -> u32 {
        self.data_region_sector
    }

    /// Count of data clusters on this volume. The highest valid logical
    /// cluster number is `2 + total_data_clusters() - 1`, since numbering
    /// starts at 2; callers needing an inclusive upper bound (e.g.
    /// `chain::walk`) add that offset themselves.
    pub fn total_data_clusters(&self) -> u32 {
        self.total_data_clusters
    }

    /// Translates a logical cluster number to a physical sector index.
    /// `c` must be `>= 2`; callers are expected to have already validated
    /// range via [`BootSectorInfo::total_data_clusters`].
    pub fn cluster_to_sector(&self, c: u32) -> u32 {
        self.data_region_sector + (c - 2) * self.sectors_per_cluster as u32
    }

    /// The 8-byte informational FAT type label (e.g. `"FAT12   "`), rendered
    /// as ASCII for logging/debugging without risking a UTF-8 panic on the
    /// space-padded bytes.
    pub fn fat_type_label_ascii(&self) -> AsciiStr<[u8; 8]> {
        AsciiStr(self.fat_type_label)
    }
}
