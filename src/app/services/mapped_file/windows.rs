//! Windows backend: access hints are file flags given to `CreateFile`.

use super::AccessHint;
use memmap2::{Mmap, MmapMut};
use std::fs::OpenOptions;
use std::os::windows::fs::OpenOptionsExt;

const FILE_FLAG_RANDOM_ACCESS: u32 = 0x1000_0000;
const FILE_FLAG_SEQUENTIAL_SCAN: u32 = 0x0800_0000;

pub(super) fn configure_open(options: &mut OpenOptions, hint: AccessHint) {
    // No sharing while the file is mapped
    options.share_mode(0);
    match hint {
        AccessHint::Normal => {}
        AccessHint::Sequential => {
            options.custom_flags(FILE_FLAG_SEQUENTIAL_SCAN);
        }
        AccessHint::Random => {
            options.custom_flags(FILE_FLAG_RANDOM_ACCESS);
        }
    }
}

/// The hint was already applied when the file was opened
pub(super) fn advise(_map: &Mmap, _hint: AccessHint) -> std::io::Result<()> {
    Ok(())
}

pub(super) fn advise_mut(_map: &MmapMut, _hint: AccessHint) -> std::io::Result<()> {
    Ok(())
}
