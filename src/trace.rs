// src/trace.rs
//! Operator-facing output for each command: a one-line summary normally, or
//! register/address decodes plus a hex dump of the sector data with `-v`.
//!
//! Write errors on this stream are ignored.

use std::io::{self, LineWriter, Write};

use crate::chs::{Chs, DiskAddress};
use crate::drive::DriveId;
use crate::frame::{CommandFrame, Operation};
use crate::geometry::Geometry;

const BYTES_PER_LINE: usize = 16;

pub struct Diagnostics {
    out: Box<dyn Write>,
    verbose: bool,
    dumped: usize,
}

impl Diagnostics {
    pub fn new(out: Box<dyn Write>, verbose: bool) -> Self {
        Diagnostics { out, verbose, dumped: 0 }
    }

    pub fn stderr(verbose: bool) -> Self {
        Self::new(Box::new(LineWriter::new(io::stderr())), verbose)
    }

    pub fn registers(&mut self, frame: &CommandFrame) {
        if !self.verbose {
            return;
        }
        for (name, value) in frame.registers() {
            let _ = writeln!(self.out, "{}: 0x{:02x}", name, value);
        }
    }

    /// Either the full address decode (verbose) or the one-line summary.
    pub fn command(
        &mut self,
        frame: &CommandFrame,
        drive: DriveId,
        chs: &Chs,
        geometry: &Geometry,
        address: &DiskAddress,
    ) {
        let _ = if self.verbose {
            self.address(chs, geometry, address)
        } else {
            let operation = frame
                .operation()
                .map(|op| op.to_string())
                .unwrap_or_else(|_| "Unknown".to_string());
            writeln!(
                self.out,
                "{} {}: sector={}, cylinder={} count={}",
                operation, drive, chs.sector, chs.cylinder, frame.al
            )
        };
    }

    fn address(&mut self, chs: &Chs, geometry: &Geometry, address: &DiskAddress) -> io::Result<()> {
        writeln!(self.out, "Cylinder: {}", chs.cylinder)?;
        writeln!(self.out, "Sector  : {}", chs.sector)?;
        writeln!(self.out, "SPT     : {}", geometry.sectors_per_track)?;
        writeln!(self.out, "HPC     : {}", geometry.heads_per_cylinder)?;
        writeln!(self.out, "LBA     : {}", address.lba)?;
        writeln!(self.out, "Offset  : {:#x}", address.byte_offset)
    }

    /// Starts a new hex dump.
    pub fn data_header(&mut self, operation: Operation) {
        self.dumped = 0;
        if !self.verbose {
            return;
        }
        let label = match operation {
            Operation::Read => "READ SECTOR DATA:",
            Operation::Write => "WRITE SECTOR DATA:",
        };
        let _ = writeln!(self.out, "{}", label);
    }

    pub fn data_byte(&mut self, byte: u8) {
        if !self.verbose {
            return;
        }
        let _ = write!(self.out, "{:02x} ", byte);
        self.dumped += 1;
        if self.dumped % BYTES_PER_LINE == 0 {
            let _ = writeln!(self.out);
        }
    }

    pub fn flush(&mut self) {
        let _ = self.out.flush();
    }
}
