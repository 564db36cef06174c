// src/geometry.rs
use crate::disk_formats;
use crate::store::Backing;

pub const HEADS_PER_CYLINDER_DEFAULT: u16 = 2;

/// Offset of the sectors-per-track field in a DOS volume boot record.
pub const VBR_SECTORS_PER_TRACK_OFFSET: u64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub sectors_per_track: u16,
    pub heads_per_cylinder: u16,
}

impl Geometry {
    /// Geometry of a slot with nothing inserted. Addresses still translate,
    /// they just never reach a store.
    pub fn absent(heads_per_cylinder: u16) -> Self {
        Geometry { sectors_per_track: 0, heads_per_cylinder }
    }
}

/// Reads sectors-per-track from the boot sector, accepting only values a
/// recognised floppy format uses.
pub fn probe_sectors_per_track(backing: &mut Backing) -> Option<u16> {
    backing
        .probe_u16(VBR_SECTORS_PER_TRACK_OFFSET)
        .filter(|&spt| disk_formats::is_known_spt(spt))
}

/// An override is taken as-is, without range checks. Without one the boot
/// sector decides, and `None` means the image is unusable.
pub fn resolve_sectors_per_track(
    backing: &mut Backing,
    sectors_override: Option<u16>,
) -> Option<u16> {
    match sectors_override {
        Some(spt) => Some(spt),
        None => probe_sectors_per_track(backing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn boot_sector(spt: [u8; 2]) -> Backing {
        let mut data = vec![0u8; 512];
        data[24..26].copy_from_slice(&spt);
        Backing::from_store(Cursor::new(data))
    }

    #[test]
    fn probes_1_44m() {
        assert_eq!(probe_sectors_per_track(&mut boot_sector([0x12, 0x00])), Some(18));
    }

    #[test]
    fn probes_720k() {
        assert_eq!(probe_sectors_per_track(&mut boot_sector([0x09, 0x00])), Some(9));
    }

    #[test]
    fn rejects_other_values() {
        assert_eq!(probe_sectors_per_track(&mut boot_sector([0x0F, 0x00])), None);
        assert_eq!(probe_sectors_per_track(&mut boot_sector([0x00, 0x12])), None);
        assert_eq!(probe_sectors_per_track(&mut boot_sector([0x00, 0x00])), None);
    }

    #[test]
    fn short_image_is_unresolved() {
        let mut tiny = Backing::from_store(Cursor::new(vec![0u8; 10]));
        assert_eq!(probe_sectors_per_track(&mut tiny), None);
    }

    #[test]
    fn override_skips_probe_and_validation() {
        let mut garbage = boot_sector([0x0F, 0x00]);
        assert_eq!(resolve_sectors_per_track(&mut garbage, Some(15)), Some(15));
        assert_eq!(resolve_sectors_per_track(&mut garbage, Some(63)), Some(63));
        assert_eq!(resolve_sectors_per_track(&mut garbage, None), None);

        let mut tiny = Backing::from_store(Cursor::new(Vec::new()));
        assert_eq!(resolve_sectors_per_track(&mut tiny, Some(36)), Some(36));
    }
}
