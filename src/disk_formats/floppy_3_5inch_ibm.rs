// src/disk_formats/floppy_3_5inch_ibm.rs

use super::DiskFormat;

/// 720K Double Density 3.5-inch IBM/PC floppy.
pub const IBM_720K: DiskFormat = DiskFormat {
    cylinders: 80,
    heads: 2,
    sectors_per_track: 9,
    sector_size: 512,
    name: "720K 3.5\" DD",
};

/// 1.44M High Density 3.5-inch IBM/PC floppy.
pub const IBM_1_44M: DiskFormat = DiskFormat {
    cylinders: 80,
    heads: 2,
    sectors_per_track: 18,
    sector_size: 512,
    name: "1.44M 3.5\" HD",
};
