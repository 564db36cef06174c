// src/session.rs
use std::io::{Read, Write};

use tracing::debug;

use crate::chs::{Chs, DiskAddress};
use crate::config::Config;
use crate::drive::{DriveId, DriveSlot};
use crate::error::{Error, Result};
use crate::frame::CommandFrame;
use crate::geometry::Geometry;
use crate::trace::Diagnostics;
use crate::transfer::transfer;

/// Where the dispatch loop is within one command.
#[derive(Debug)]
enum State {
    AwaitFrame,
    ResolveDrive(CommandFrame),
    Translate(CommandFrame, DriveId),
    PositionStore(Command),
    Transfer(Command),
}

#[derive(Debug, Clone, Copy)]
struct Command {
    frame: CommandFrame,
    drive: DriveId,
    address: DiskAddress,
}

/// Everything one serial session needs. Dropping it closes the link and both
/// images.
pub struct Session<L> {
    link: L,
    drives: [DriveSlot; 2],
    heads_per_cylinder: u16,
    diag: Diagnostics,
    served: u64,
}

impl<L: Read + Write> Session<L> {
    pub fn new(
        link: L,
        drives: [DriveSlot; 2],
        heads_per_cylinder: u16,
        diag: Diagnostics,
    ) -> Self {
        Session { link, drives, heads_per_cylinder, diag, served: 0 }
    }

    /// Opens and probes the configured images. Any failure here ends startup
    /// before the first frame is read.
    pub fn open(config: &Config, link: L, diag: Diagnostics) -> Result<Self> {
        let open = |drive| {
            DriveSlot::open(
                drive,
                config.image(drive).map(|p| p.as_path()),
                config.sectors_per_track,
                config.heads_per_cylinder,
            )
        };
        let a = open(DriveId::A)?;
        let b = open(DriveId::B)?;
        Ok(Self::new(link, [a, b], config.heads_per_cylinder, diag))
    }

    /// Serves commands until one fails, and returns that failure.
    pub fn run(&mut self) -> Error {
        loop {
            if let Err(err) = self.serve_command() {
                debug!(served = self.served, error = %err, "session ended");
                return err;
            }
        }
    }

    /// Takes one command from frame to completed transfer.
    pub fn serve_command(&mut self) -> Result<()> {
        let mut state = self.step(State::AwaitFrame)?;
        while !matches!(state, State::AwaitFrame) {
            state = self.step(state)?;
        }
        Ok(())
    }

    fn step(&mut self, state: State) -> Result<State> {
        Ok(match state {
            State::AwaitFrame => {
                let frame = CommandFrame::read_from(&mut self.link)?;
                self.diag.registers(&frame);
                State::ResolveDrive(frame)
            }
            State::ResolveDrive(frame) => State::Translate(frame, DriveId::try_from(frame.dl)?),
            State::Translate(frame, drive) => {
                // Heads per cylinder is controller-wide; only SPT is per drive.
                let geometry = Geometry {
                    sectors_per_track: self.drives[drive.index()].geometry.sectors_per_track,
                    heads_per_cylinder: self.heads_per_cylinder,
                };
                let chs = Chs::from_frame(&frame);
                let address =
                    chs.to_address(geometry.sectors_per_track, geometry.heads_per_cylinder);
                self.diag.command(&frame, drive, &chs, &geometry, &address);
                State::PositionStore(Command { frame, drive, address })
            }
            State::PositionStore(command) => {
                self.drives[command.drive.index()].backing.seek(command.address.byte_offset)?;
                State::Transfer(command)
            }
            State::Transfer(command) => {
                let operation = command.frame.operation()?;
                transfer(
                    operation,
                    command.frame.byte_count(),
                    &mut self.link,
                    &mut self.drives[command.drive.index()].backing,
                    &mut self.diag,
                )?;
                self.served += 1;
                State::AwaitFrame
            }
        })
    }
}

#[cfg(test)]
impl<L> Session<L> {
    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn drive(&self, drive: DriveId) -> &DriveSlot {
        &self.drives[drive.index()]
    }

    pub fn served(&self) -> u64 {
        self.served
    }
}
