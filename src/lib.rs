//! A read-only navigator for FAT12 disk images.
//!
//! General layout of the volumes this crate understands:
//!
//! ```text
//! .                       | sector  | size (sectors)
//! boot sector (BPB)       | 0       | 1
//! FAT #1                  | 1       | sectors_per_fat
//! FAT #2 (if fat_count=2) | 1+spf   | sectors_per_fat
//! root directory          | ...     | ceil(root_entry_count*32 / bytes_per_sector)
//! data region (clusters)  | ...     | remainder, numbered from cluster 2
//! ```
//!
//! The FAT is an array of 12-bit values packed two-to-three-bytes, with
//! each entry corresponding to a cluster in the data region. Using FAT
//! entries as "next" pointers, clusters are formed into chains; directory
//! and file data live in those chains (except the root directory, which
//! has a fixed location outside the cluster-addressed region).
//!
//! [`Filesystem`] is the entry point: [`Filesystem::init`] opens an image
//! and validates its boot sector, [`Filesystem::read_dir`] lists a
//! directory, and [`Filesystem::read_file`] streams a file's bytes to a
//! caller-supplied sink.

mod block_device;
mod boot_sector;
mod chain;
mod directory;
mod error;
mod fat_table;
mod fs;

pub use block_device::{BlockDevice, DEFAULT_SECTOR_SIZE};
pub use boot_sector::{BootSectorInfo, DIR_ENTRY_SIZE};
pub use directory::{DirectoryEntry, ATTR_DIRECTORY, ATTR_LONG_NAME, ROOT_DIR_SENTINEL};
pub use error::{Error, Result};
pub use fat_table::{FatTable, BAD_CLUSTER, END_OF_CHAIN_MIN, FREE, RESERVED};
pub use fs::Filesystem;
