// src/chs.rs
//! Cylinder/head/sector to LBA translation for INT 13h register values.
//!
//! ```text
//! CX =       ---CH--- ---CL---
//! cylinder : 76543210 98
//! sector   :            543210
//! ```

use crate::frame::CommandFrame;
use crate::SECTOR_SIZE;

/// The physical address named by CL/CH/DH.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chs {
    pub cylinder: u16,
    pub head: u8,
    /// 1-based; 0 is representable and translates to LBA -1.
    pub sector: u8,
}

impl Chs {
    pub fn from_registers(cl: u8, ch: u8, dh: u8) -> Self {
        Chs {
            cylinder: ((cl as u16 & 0xC0) << 2) | ch as u16,
            head: dh,
            sector: cl & 0x3F,
        }
    }

    pub fn from_frame(frame: &CommandFrame) -> Self {
        Self::from_registers(frame.cl, frame.ch, frame.dh)
    }

    /// `(cylinder * hpc + head) * spt + sector - 1`, with no bounds checking
    /// against the geometry or the media size.
    pub fn to_address(&self, sectors_per_track: u16, heads_per_cylinder: u16) -> DiskAddress {
        let lba = (self.cylinder as i64 * heads_per_cylinder as i64 + self.head as i64)
            * sectors_per_track as i64
            + self.sector as i64
            - 1;
        DiskAddress { lba, byte_offset: lba * SECTOR_SIZE as i64 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskAddress {
    pub lba: i64,
    pub byte_offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lba(cl: u8, ch: u8, dh: u8, spt: u16, hpc: u16) -> i64 {
        Chs::from_registers(cl, ch, dh).to_address(spt, hpc).lba
    }

    #[test]
    fn first_sector_is_lba_zero() {
        let addr = Chs::from_registers(0x01, 0x00, 0x00).to_address(18, 2);
        assert_eq!(addr, DiskAddress { lba: 0, byte_offset: 0 });
    }

    #[test]
    fn next_cylinder_on_1_44m() {
        // Cylinder 1, head 0, sector 1 with only one head counted.
        assert_eq!(lba(0x01, 0x01, 0x00, 18, 1), 18);
        assert_eq!(lba(0x01, 0x01, 0x00, 18, 2), 36);
    }

    #[test]
    fn hand_computed_fixtures() {
        // Second head of cylinder 0.
        assert_eq!(lba(0x01, 0x00, 0x01, 18, 2), 18);
        // Last sector of a 720K disk: cylinder 79, head 1, sector 9.
        assert_eq!(lba(0x09, 79, 1, 9, 2), 1439);
        // Last sector of a 1.44M disk.
        assert_eq!(lba(18, 79, 1, 18, 2), 2879);
        let addr = Chs::from_registers(18, 79, 1).to_address(18, 2);
        assert_eq!(addr.byte_offset, 2879 * 512);
    }

    #[test]
    fn cylinder_high_bits_come_from_cl() {
        let chs = Chs::from_registers(0b1100_0001, 0xFF, 0);
        assert_eq!(chs.cylinder, 1023);
        assert_eq!(chs.sector, 1);

        let chs = Chs::from_registers(0b0100_0101, 0x02, 0);
        assert_eq!(chs.cylinder, 0x102);
        assert_eq!(chs.sector, 5);
        assert_eq!(chs.to_address(18, 2).lba, (0x102 * 2) * 18 + 4);
    }

    #[test]
    fn sector_zero_underflows_to_minus_one() {
        let addr = Chs::from_registers(0x00, 0x00, 0x00).to_address(18, 2);
        assert_eq!(addr.lba, -1);
        assert_eq!(addr.byte_offset, -512);
    }

    #[test]
    fn out_of_range_heads_are_not_clamped() {
        // Head 5 on a two-headed drive still translates linearly.
        assert_eq!(lba(0x01, 0x00, 0x05, 9, 2), 45);
    }
}
