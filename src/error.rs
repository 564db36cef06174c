// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::drive::DriveId;

/// Every way a session can end. None of these are recoverable; the remote
/// host has no channel to receive an error, so the process just stops.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("invalid sectors per track for floppy {0}:")]
    InvalidGeometry(DriveId),

    #[error("open of floppy {drive}: image {} failed", .path.display())]
    ImageOpen {
        drive: DriveId,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("open of TTY device {} failed", .device.display())]
    LinkOpen {
        device: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuring TTY device failed: {step}")]
    LinkConfig {
        step: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("read from TTY failed")]
    LinkRead(#[source] io::Error),

    #[error("write to TTY failed")]
    LinkWrite(#[source] io::Error),

    #[error("invalid drive number: {0:02x}")]
    InvalidDrive(u8),

    #[error("unhandled operation: {0:02x}")]
    UnsupportedOperation(u8),

    #[error("seek to offset {offset:#x} failed")]
    Seek {
        offset: i64,
        #[source]
        source: io::Error,
    },

    #[error("write to image failed")]
    StoreWrite(#[source] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
