// src/transfer.rs
use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};
use crate::frame::Operation;
use crate::store::Backing;
use crate::trace::Diagnostics;

/// Streams `count` bytes between the link and an already positioned store.
///
/// Any link failure aborts mid-transfer. The host gets no indication beyond
/// the line going quiet.
pub fn transfer<L: Read + Write + ?Sized>(
    operation: Operation,
    count: usize,
    link: &mut L,
    backing: &mut Backing,
    diag: &mut Diagnostics,
) -> Result<()> {
    diag.data_header(operation);
    let result = match operation {
        Operation::Read => send_sectors(count, link, backing, diag),
        Operation::Write => receive_sectors(count, link, backing, diag),
    };
    diag.flush();
    result
}

fn send_sectors<L: Write + ?Sized>(
    count: usize,
    link: &mut L,
    backing: &mut Backing,
    diag: &mut Diagnostics,
) -> Result<()> {
    for _ in 0..count {
        let byte = backing.read_byte();
        diag.data_byte(byte);
        link.write_u8(byte).map_err(Error::LinkWrite)?;
    }
    link.flush().map_err(Error::LinkWrite)
}

fn receive_sectors<L: Read + ?Sized>(
    count: usize,
    link: &mut L,
    backing: &mut Backing,
    diag: &mut Diagnostics,
) -> Result<()> {
    for _ in 0..count {
        let byte = link.read_u8().map_err(Error::LinkRead)?;
        backing.write_byte(byte)?;
        diag.data_byte(byte);
    }
    backing.flush()
}
