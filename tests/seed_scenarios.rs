//! Builds the seed-scenario images directly (stock 1.44MB geometry:
//! bytes_per_sector=512, sectors_per_cluster=1, reserved=1, fats=2,
//! root_entries=224, sectors_per_fat=9 -> root_dir_sector=19,
//! data_region_sector=33) and exercises scenarios involving subdirectories.

use fatnav::{Error, Filesystem};
use std::io::Write;

const ROOT_OFF: usize = 19 * 512;
const DATA_OFF: usize = 33 * 512;

fn base_image() -> Vec<u8> {
    let mut image = vec![0u8; 512 * 2880];
    image[11..13].copy_from_slice(&512u16.to_le_bytes());
    image[13] = 1;
    image[14..16].copy_from_slice(&1u16.to_le_bytes());
    image[16] = 2;
    image[17..19].copy_from_slice(&224u16.to_le_bytes());
    image[19..21].copy_from_slice(&2880u16.to_le_bytes());
    image[22..24].copy_from_slice(&9u16.to_le_bytes());
    image[38] = 0x29;
    image[54..62].copy_from_slice(b"FAT12   ");
    image
}

fn write_entry(buf: &mut [u8], offset: usize, name: &[u8; 11], attribute: u8, first_cluster: u16, size: u32) {
    buf[offset..offset + 11].copy_from_slice(name);
    buf[offset + 11] = attribute;
    buf[offset + 26..offset + 28].copy_from_slice(&first_cluster.to_le_bytes());
    buf[offset + 28..offset + 32].copy_from_slice(&size.to_le_bytes());
}

fn set_fat_entry(image: &mut [u8], cluster: u16, value: u16) {
    let fat_off = 512 + (3 * cluster as usize) / 2;
    if cluster & 1 == 0 {
        image[fat_off] = (value & 0xFF) as u8;
        image[fat_off + 1] = (image[fat_off + 1] & 0xF0) | ((value >> 8) as u8 & 0x0F);
    } else {
        image[fat_off] = (image[fat_off] & 0x0F) | (((value & 0x0F) as u8) << 4);
        image[fat_off + 1] = (value >> 4) as u8;
    }
}

fn write_temp(image: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(image).unwrap();
    f.flush().unwrap();
    f
}

/// Seed scenario 4: a subdirectory containing `.`, `..`, and `INNER   TXT`.
#[test]
fn subdirectory_lists_dot_entries_and_child_file() {
    let mut image = base_image();

    write_entry(&mut image, ROOT_OFF, b"SUB        ", 0x10, 3, 0);
    set_fat_entry(&mut image, 3, 0x0FFF);
    set_fat_entry(&mut image, 4, 0x0FFF);

    let sub_off = DATA_OFF + (3 - 2) * 512;
    write_entry(&mut image, sub_off, b".          ", 0x10, 3, 0);
    write_entry(&mut image, sub_off + 32, b"..         ", 0x10, 0, 0);
    write_entry(&mut image, sub_off + 64, b"INNER   TXT", 0x20, 4, 5);

    let inner_off = DATA_OFF + (4 - 2) * 512;
    image[inner_off..inner_off + 5].copy_from_slice(b"hello");

    let file = write_temp(&image);
    let fs = Filesystem::init(file.path()).unwrap();

    let root = fs.read_dir(0).unwrap();
    assert_eq!(root.len(), 1);
    assert_eq!(root[0].display_name(), "SUB");
    assert!(root[0].is_directory());

    let sub = fs.read_dir(3).unwrap();
    assert_eq!(sub.len(), 3);
    assert_eq!(sub[0].display_name(), ".");
    assert_eq!(sub[1].display_name(), "..");
    assert_eq!(sub[2].display_name(), "INNER.TXT");
    assert_eq!(sub[2].size, 5);

    let mut content = Vec::new();
    fs.read_file(sub[2].first_cluster, |bytes| content.extend_from_slice(bytes))
        .unwrap();
    assert_eq!(&content[0..5], b"hello");
}

/// Seed scenario 6: a FAT entry pointing at itself is a corrupt chain, not
/// an infinite loop.
#[test]
fn self_referencing_fat_entry_is_corrupt_chain() {
    let mut image = base_image();
    write_entry(&mut image, ROOT_OFF, b"LOOP    TXT", 0x20, 2, 10);
    set_fat_entry(&mut image, 2, 2);

    let file = write_temp(&image);
    let fs = Filesystem::init(file.path()).unwrap();
    let err = fs.read_file(2, |_| {}).unwrap_err();
    assert!(matches!(err, Error::CorruptChain));
}

/// A directory that exactly fills its allocated space (no 0x00 sentinel
/// entry) must be read completely without over-reading into adjacent data.
#[test]
fn directory_filling_its_space_has_no_sentinel_needed() {
    let mut image = base_image();

    write_entry(&mut image, ROOT_OFF, b"SUB        ", 0x10, 3, 0);
    set_fat_entry(&mut image, 3, 0x0FFF);

    let sub_off = DATA_OFF + (3 - 2) * 512;
    // Fill the entire 512-byte cluster (16 entries of 32 bytes) with valid
    // entries, leaving no unused/free slot.
    for i in 0..16u16 {
        let mut name = [b' '; 11];
        let digits = format!("F{i:<7}");
        name[0..8].copy_from_slice(digits.as_bytes());
        write_entry(&mut image, sub_off + i as usize * 32, &name, 0x20, 0, 0);
    }

    let file = write_temp(&image);
    let fs = Filesystem::init(file.path()).unwrap();
    let sub = fs.read_dir(3).unwrap();
    assert_eq!(sub.len(), 16);
}

/// A deleted entry followed immediately by a valid one: the valid entry is
/// still listed.
#[test]
fn deleted_entry_does_not_hide_following_valid_entry() {
    let mut image = base_image();
    write_entry(&mut image, ROOT_OFF, b"DEAD    TXT", 0x20, 0, 0);
    image[ROOT_OFF] = 0xE5;
    write_entry(&mut image, ROOT_OFF + 32, b"ALIVE   TXT", 0x20, 2, 4);
    set_fat_entry(&mut image, 2, 0x0FFF);

    let file = write_temp(&image);
    let fs = Filesystem::init(file.path()).unwrap();
    let listing = fs.read_dir(0).unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].display_name(), "ALIVE.TXT");
}

/// bytes_per_sector = 1024 parses and computes geometry correctly, not just
/// the 512-byte default.
#[test]
fn boot_sector_with_1024_byte_sectors_computes_geometry() {
    let mut raw = [0u8; 512];
    raw[11..13].copy_from_slice(&1024u16.to_le_bytes());
    raw[13] = 1;
    raw[14..16].copy_from_slice(&1u16.to_le_bytes());
    raw[16] = 2;
    raw[17..19].copy_from_slice(&224u16.to_le_bytes());
    raw[19..21].copy_from_slice(&1440u16.to_le_bytes());
    raw[22..24].copy_from_slice(&5u16.to_le_bytes());

    let info = fatnav::BootSectorInfo::parse(&raw).unwrap();
    assert_eq!(info.root_dir_sector(), 11);
    // root_entry_count * 32 bytes / 1024 bytes-per-sector = 7 sectors.
    assert_eq!(info.root_dir_sectors(), 7);
    assert_eq!(info.data_region_sector(), 18);
}
