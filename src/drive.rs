// src/drive.rs
use std::fmt;
use std::path::Path;

use tracing::info;

use crate::disk_formats;
use crate::error::{Error, Result};
use crate::geometry::{self, Geometry};
use crate::store::Backing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveId {
    A,
    B,
}

impl DriveId {
    pub fn index(self) -> usize {
        match self {
            DriveId::A => 0,
            DriveId::B => 1,
        }
    }

    pub fn letter(self) -> char {
        match self {
            DriveId::A => 'A',
            DriveId::B => 'B',
        }
    }
}

impl TryFrom<u8> for DriveId {
    type Error = Error;

    fn try_from(dl: u8) -> Result<Self> {
        match dl {
            0x00 => Ok(DriveId::A),
            0x01 => Ok(DriveId::B),
            other => Err(Error::InvalidDrive(other)),
        }
    }
}

impl fmt::Display for DriveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug)]
pub struct DriveSlot {
    pub backing: Backing,
    pub geometry: Geometry,
}

impl DriveSlot {
    pub fn absent(heads_per_cylinder: u16) -> Self {
        DriveSlot { backing: Backing::Absent, geometry: Geometry::absent(heads_per_cylinder) }
    }

    /// Wraps an already opened store and settles its geometry.
    pub fn insert(
        drive: DriveId,
        mut backing: Backing,
        sectors_override: Option<u16>,
        heads_per_cylinder: u16,
    ) -> Result<Self> {
        let sectors_per_track = geometry::resolve_sectors_per_track(&mut backing, sectors_override)
            .ok_or(Error::InvalidGeometry(drive))?;
        Ok(DriveSlot {
            backing,
            geometry: Geometry { sectors_per_track, heads_per_cylinder },
        })
    }

    /// Opens the image for `drive`, or leaves the slot empty when no image
    /// was configured.
    pub fn open(
        drive: DriveId,
        image: Option<&Path>,
        sectors_override: Option<u16>,
        heads_per_cylinder: u16,
    ) -> Result<Self> {
        let Some(path) = image else {
            info!(drive = %drive, "no image, drive reads as empty");
            return Ok(Self::absent(heads_per_cylinder));
        };
        let backing = Backing::open(path).map_err(|source| Error::ImageOpen {
            drive,
            path: path.to_owned(),
            source,
        })?;
        let slot = Self::insert(drive, backing, sectors_override, heads_per_cylinder)?;
        let source = if sectors_override.is_some() { "forced" } else { "boot sector" };
        info!(
            drive = %drive,
            image = %path.display(),
            sectors_per_track = slot.geometry.sectors_per_track,
            heads_per_cylinder,
            source,
            "mounted {}",
            disk_formats::describe_spt(slot.geometry.sectors_per_track)
        );
        Ok(slot)
    }
}
