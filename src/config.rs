// src/config.rs
use std::path::PathBuf;

use crate::drive::DriveId;
use crate::error::{Error, Result};

/// Validated startup settings. Nothing here has touched the filesystem yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub device: PathBuf,
    pub images: [Option<PathBuf>; 2],
    pub heads_per_cylinder: u16,
    /// Forced sectors per track for both drives; `None` probes each boot sector.
    pub sectors_per_track: Option<u16>,
    pub baud: u32,
    pub verbose: bool,
}

impl Config {
    pub fn image(&self, drive: DriveId) -> Option<&PathBuf> {
        self.images[drive.index()].as_ref()
    }

    pub fn validate(self) -> Result<Self> {
        if self.images.iter().all(Option::is_none) {
            return Err(Error::Config("please specify at least one floppy image".into()));
        }
        if self.heads_per_cylinder == 0 {
            return Err(Error::Config("invalid heads per cylinder".into()));
        }
        Ok(self)
    }
}
