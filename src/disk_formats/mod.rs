// src/disk_formats/mod.rs

pub mod floppy_3_5inch_ibm;
pub mod floppy_5_25inch_ibm;

pub use floppy_3_5inch_ibm::{IBM_720K, IBM_1_44M};
pub use floppy_5_25inch_ibm::IBM_360K;

/// Physical layout of a floppy format that can be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskFormat {
    pub cylinders: u16,
    pub heads: u16,
    pub sectors_per_track: u16,
    pub sector_size: u16,
    pub name: &'static str,
}

impl DiskFormat {
    pub fn total_size(&self) -> usize {
        self.cylinders as usize
            * self.heads as usize
            * self.sectors_per_track as usize
            * self.sector_size as usize
    }
}

/// Every format a boot sector probe may resolve to.
pub const KNOWN_FORMATS: [&DiskFormat; 3] = [&IBM_360K, &IBM_720K, &IBM_1_44M];

/// Formats sharing the given sectors-per-track value. 360K and 720K both use
/// 9, so this can return more than one.
pub fn formats_with_spt(sectors_per_track: u16) -> impl Iterator<Item = &'static DiskFormat> {
    KNOWN_FORMATS
        .into_iter()
        .filter(move |f| f.sectors_per_track == sectors_per_track)
}

pub fn is_known_spt(sectors_per_track: u16) -> bool {
    formats_with_spt(sectors_per_track).next().is_some()
}

impl std::fmt::Display for DiskFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}x{}x{}, {} bytes)",
            self.name, self.cylinders, self.heads, self.sectors_per_track, self.total_size()
        )
    }
}

/// Human readable family for log lines. 9 sectors per track names both the
/// 360K and the 720K format.
pub fn describe_spt(sectors_per_track: u16) -> String {
    let names: Vec<String> = formats_with_spt(sectors_per_track).map(|f| f.to_string()).collect();
    if names.is_empty() {
        "custom geometry".to_string()
    } else {
        names.join(" or ")
    }
}
