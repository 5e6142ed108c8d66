//! Error kinds exposed by the facade (spec §7).

use std::io;

/// Everything that can go wrong while opening or navigating a FAT12 image.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The image file could not be opened.
    #[error("failed to open disk image")]
    FailedToOpen(#[source] io::Error),

    /// Boot sector validation failed.
    #[error("disk has bad boot sector")]
    BadBootSector,

    /// A cluster chain cycles, exceeds the data-cluster bound, or names a
    /// cluster outside `[2, max_data_cluster]`.
    #[error("corrupt cluster chain")]
    CorruptChain,

    /// An I/O read returned fewer bytes than requested.
    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    /// Any other I/O failure that isn't better described by the above.
    #[error("I/O error")]
    Io(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
