//! Interactive shell for browsing a FAT12 disk image (spec §6), grounded on
//! the original reader's numbered-menu loop: list the current directory,
//! take a numeric choice, descend into folders or dump files, `0` exits.

use clap::Parser;
use fatnav::{DirectoryEntry, Error, Filesystem, ROOT_DIR_SENTINEL};
use std::io::{self, Write};

#[derive(Parser)]
#[command(about = "Read-only browser for FAT12 disk images")]
struct Args {
    /// Path to the disk image to open.
    #[arg(default_value = "floppy.img")]
    image: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let fs = match Filesystem::init(&args.image) {
        Ok(fs) => fs,
        Err(Error::FailedToOpen(_)) => {
            println!("\n\n\t\tFAILED TO OPEN DISK!");
            std::process::exit(1);
        }
        Err(Error::BadBootSector) => {
            println!("\n\n\t\tDISK HAS BAD BOOT SECTOR!");
            std::process::exit(1);
        }
        Err(e) => {
            println!("\n\n\t\tFAILED TO READ DISK: {e}");
            std::process::exit(1);
        }
    };

    let mut cluster = ROOT_DIR_SENTINEL;
    let mut listing = match fs.read_dir(cluster) {
        Ok(listing) => listing,
        Err(e) => {
            println!("\n\n\t\tFAILED TO READ ROOT DIRECTORY: {e}");
            std::process::exit(1);
        }
    };
    print_entry_list(&listing);

    loop {
        let choice = match prompt_choice() {
            Some(c) => c,
            None => {
                println!("\n\n\tPlease re-enter your option or press 0 to exit!");
                continue;
            }
        };

        if choice == 0 {
            fs.clear_listing(listing);
            fs.deinit();
            break;
        }

        let index = (choice - 1) as usize;
        let Some(entry) = listing.get(index) else {
            continue;
        };

        if entry.is_directory() {
            cluster = entry.first_cluster;
            fs.clear_listing(listing);
            listing = match fs.read_dir(cluster) {
                Ok(listing) => listing,
                Err(e) => {
                    println!("\n\n\t\tFAILED TO READ DIRECTORY: {e}");
                    break;
                }
            };
            print_entry_list(&listing);
        } else {
            println!("\n\n=>> [Read file ... ]\n\nFile: \n");
            let result = fs.read_file(entry.first_cluster, |bytes| {
                print!("{}", String::from_utf8_lossy(bytes));
            });
            if let Err(e) = result {
                println!("\n\n\t\tFAILED TO READ FILE: {e}");
            }
            println!("\n");
            print_entry_list(&listing);
        }
    }
}

fn print_entry_list(entries: &[DirectoryEntry]) {
    println!("\n+-----------+-------------------------------------------------------+");
    println!("\n|  MY DISK  | Select the options below to access or press 0 to exit |");
    println!("\n+-----------+-------------------------------------------------------+");
    println!("\n|  Option   |         Name          |    Type     |       size      |");
    println!("\n+-----------+-------------------------------------------------------+");
    for (i, entry) in entries.iter().enumerate() {
        if entry.is_directory() {
            println!("\n|  {:4}     |{:12}           |{:6}       |         #       |", i + 1, entry.display_name(), "Folder");
        } else {
            println!("\n|  {:4}     |{:12}           |{:6}       | {:8} Bytes  |", i + 1, entry.display_name(), "File", entry.size);
        }
    }
    println!("\n+-----------+-------------------------------------------------------+");
}

fn prompt_choice() -> Option<i32> {
    print!("\n\n[OPTION] >> ");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line).ok()? == 0 {
        return Some(0);
    }
    let choice: i32 = line.trim().parse().ok()?;
    if choice < 0 {
        None
    } else {
        Some(choice)
    }
}
