// src/disk_formats/floppy_5_25inch_ibm.rs

use super::DiskFormat;

pub const IBM_360K: DiskFormat = DiskFormat {
    cylinders: 40,
    heads: 2,
    sectors_per_track: 9,
    sector_size: 512,
    name: "360K 5.25\" DD",
};
