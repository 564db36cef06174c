// src/store.rs
use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};

/// What an absent drive, or a read past the end of an image, returns.
pub const FILLER: u8 = 0xFF;

/// Anything an image can live in. Files in production, cursors in tests.
pub trait RandomAccess: Read + Write + Seek {}

impl<T: Read + Write + Seek> RandomAccess for T {}

/// The medium behind a drive slot.
///
/// An absent drive is still a drive: seeks succeed, reads return [`FILLER`]
/// and writes vanish.
pub enum Backing {
    Present(Box<dyn RandomAccess>),
    Absent,
}

impl Backing {
    /// Opens an existing image read-write. The file is never created or
    /// truncated.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Backing::Present(Box::new(file)))
    }

    pub fn seek(&mut self, byte_offset: i64) -> Result<()> {
        let Backing::Present(store) = self else {
            return Ok(());
        };
        u64::try_from(byte_offset)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "negative offset"))
            .and_then(|pos| store.seek(SeekFrom::Start(pos)))
            .map(|_| ())
            .map_err(|source| Error::Seek { offset: byte_offset, source })
    }

    /// Next byte at the current position. End of image and read errors both
    /// come back as filler, the same as an empty drive.
    pub fn read_byte(&mut self) -> u8 {
        match self {
            Backing::Present(store) => store.read_u8().unwrap_or(FILLER),
            Backing::Absent => FILLER,
        }
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        match self {
            Backing::Present(store) => store.write_u8(byte).map_err(Error::StoreWrite),
            Backing::Absent => Ok(()),
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        match self {
            Backing::Present(store) => store.flush().map_err(Error::StoreWrite),
            Backing::Absent => Ok(()),
        }
    }

    /// Reads a little-endian `u16` at `offset`, or `None` on a short read or
    /// an absent drive.
    pub fn probe_u16(&mut self, offset: u64) -> Option<u16> {
        let Backing::Present(store) = self else {
            return None;
        };
        store.seek(SeekFrom::Start(offset)).ok()?;
        store.read_u16::<LittleEndian>().ok()
    }
}

#[cfg(test)]
impl Backing {
    pub fn from_store<S: RandomAccess + 'static>(store: S) -> Self {
        Backing::Present(Box::new(store))
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Backing::Present(_))
    }
}

impl std::fmt::Debug for Backing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backing::Present(_) => f.write_str("Present"),
            Backing::Absent => f.write_str("Absent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn image(len: usize) -> Backing {
        let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        Backing::from_store(Cursor::new(data))
    }

    #[test]
    fn absent_drive_policy() {
        let mut absent = Backing::Absent;
        assert!(!absent.is_present());
        absent.seek(123_456_789).unwrap();
        absent.seek(-512).unwrap();
        assert_eq!(absent.read_byte(), FILLER);
        absent.write_byte(0x42).unwrap();
        absent.flush().unwrap();
        assert_eq!(absent.read_byte(), FILLER);
        assert_eq!(absent.probe_u16(24), None);
    }

    #[test]
    fn present_drive_reads_real_bytes() {
        let mut store = image(2048);
        store.seek(512).unwrap();
        assert_eq!(store.read_byte(), (512 % 251) as u8);
        assert_eq!(store.read_byte(), (513 % 251) as u8);
    }

    #[test]
    fn read_past_end_is_filler() {
        let mut store = image(512);
        store.seek(511).unwrap();
        assert_eq!(store.read_byte(), (511 % 251) as u8);
        assert_eq!(store.read_byte(), FILLER);
        store.seek(100_000).unwrap();
        assert_eq!(store.read_byte(), FILLER);
    }

    #[test]
    fn write_then_read_back() {
        let mut store = image(1024);
        store.seek(512).unwrap();
        for b in [0xDE, 0xAD, 0xBE, 0xEF] {
            store.write_byte(b).unwrap();
        }
        store.flush().unwrap();
        store.seek(512).unwrap();
        let back: Vec<u8> = (0..4).map(|_| store.read_byte()).collect();
        assert_eq!(back, [0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn negative_offset_fails_on_present_drive() {
        let mut store = image(512);
        let err = store.seek(-512).unwrap_err();
        assert!(matches!(err, Error::Seek { offset: -512, .. }));
    }

    #[test]
    fn probe_reads_little_endian() {
        let mut boot = vec![0u8; 512];
        boot[24] = 0x12;
        boot[25] = 0x00;
        let mut store = Backing::from_store(Cursor::new(boot));
        assert_eq!(store.probe_u16(24), Some(18));

        let mut short = Backing::from_store(Cursor::new(vec![0u8; 25]));
        assert_eq!(short.probe_u16(24), None);
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Backing::open(&dir.path().join("nope.img")).is_err());
        assert!(!dir.path().join("nope.img").exists());
    }
}
