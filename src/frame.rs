// src/frame.rs
use std::fmt;
use std::io::Read;

use crate::error::{Error, Result};

/// Bytes on the wire per command frame.
pub const FRAME_LEN: usize = 6;

pub const OPERATION_READ_DISK_SECTORS: u8 = 0x02;
pub const OPERATION_WRITE_DISK_SECTORS: u8 = 0x03;

/// One INT 13h request as sent by the remote host, in wire order
/// `AL AH CL CH DL DH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame {
    /// Sector count.
    pub al: u8,
    /// Operation.
    pub ah: u8,
    /// Sector in bits 0-5, cylinder bits 8-9 in bits 6-7.
    pub cl: u8,
    /// Cylinder bits 0-7.
    pub ch: u8,
    /// Drive number.
    pub dl: u8,
    /// Head.
    pub dh: u8,
}

impl CommandFrame {
    /// Reads one frame, blocking on every byte. Any short read is fatal; there
    /// is no way to resynchronise with the host mid-stream.
    pub fn read_from<R: Read + ?Sized>(link: &mut R) -> Result<Self> {
        let mut bytes = [0u8; FRAME_LEN];
        link.read_exact(&mut bytes).map_err(Error::LinkRead)?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        let [al, ah, cl, ch, dl, dh] = bytes;
        CommandFrame { al, ah, cl, ch, dl, dh }
    }

    pub fn operation(&self) -> Result<Operation> {
        Operation::try_from(self.ah)
    }

    /// Number of data bytes following (or answering) this frame.
    pub fn byte_count(&self) -> usize {
        self.al as usize * crate::SECTOR_SIZE
    }

    pub fn registers(&self) -> [(&'static str, u8); FRAME_LEN] {
        [
            ("AL", self.al),
            ("AH", self.ah),
            ("CL", self.cl),
            ("CH", self.ch),
            ("DL", self.dl),
            ("DH", self.dh),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

impl TryFrom<u8> for Operation {
    type Error = Error;

    fn try_from(ah: u8) -> Result<Self> {
        match ah {
            OPERATION_READ_DISK_SECTORS => Ok(Operation::Read),
            OPERATION_WRITE_DISK_SECTORS => Ok(Operation::Write),
            other => Err(Error::UnsupportedOperation(other)),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Read => "Read",
            Operation::Write => "Write",
        })
    }
}
