//! Unix backend: access hints are applied to the mapping with `madvise`.

use super::AccessHint;
use memmap2::{Advice, Mmap, MmapMut};
use std::fs::OpenOptions;

/// Unix takes no hint at open time
pub(super) fn configure_open(_options: &mut OpenOptions, _hint: AccessHint) {}

fn to_advice(hint: AccessHint) -> Advice {
    match hint {
        AccessHint::Normal => Advice::Normal,
        AccessHint::Sequential => Advice::Sequential,
        AccessHint::Random => Advice::Random,
    }
}

pub(super) fn advise(map: &Mmap, hint: AccessHint) -> std::io::Result<()> {
    map.advise(to_advice(hint))
}

pub(super) fn advise_mut(map: &MmapMut, hint: AccessHint) -> std::io::Result<()> {
    map.advise(to_advice(hint))
}
