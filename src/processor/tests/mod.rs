//! Batch processing tests
//!
//! Exercise the processor against temporary directories of MRZ files.


use std::fs;
use std::path::{Path, PathBuf};

pub const TD3_BLOCK: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
                             L898902C36UTO7408122F1204159ZE184226B<<<<<10";

pub const TD1_BLOCK: &str = "I<UTOD231458907<<<<<<<<<<<<<<<\n\
                             7408122F1204159UTO<<<<<<<<<<<6\n\
                             ERIKSSON<<ANNA<MARIA<<<<<<<<<<";

/// TD3 specimen with a corrupted composite check digit
pub const TD3_BAD_COMPOSITE: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
                                     L898902C36UTO7408122F1204159ZE184226B<<<<<11";

/// Write `content` to `dir/name`, creating parents
pub fn write_scan(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
