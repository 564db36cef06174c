// src/link.rs
//! The serial TTY the remote host talks through.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

pub const DEFAULT_BAUD: u32 = 9600;

pub struct SerialLink {
    tty: File,
}

impl SerialLink {
    /// Opens `device` and puts it into raw 8N1 mode at `baud`, with CTS raised.
    pub fn open(device: &Path, baud: u32) -> Result<Self> {
        let tty = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY)
            .open(device)
            .map_err(|source| Error::LinkOpen { device: device.to_owned(), source })?;

        set_raw_mode(&tty, baud)?;
        raise_cts(&tty)?;

        info!(device = %device.display(), baud, "serial link ready");
        Ok(SerialLink { tty })
    }
}

impl Read for SerialLink {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.tty.read(buf)
    }
}

impl Write for SerialLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tty.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.tty.flush()
    }
}

pub fn baud_constant(baud: u32) -> Option<libc::speed_t> {
    Some(match baud {
        1200 => libc::B1200,
        2400 => libc::B2400,
        4800 => libc::B4800,
        9600 => libc::B9600,
        19200 => libc::B19200,
        38400 => libc::B38400,
        57600 => libc::B57600,
        115200 => libc::B115200,
        _ => return None,
    })
}

fn set_raw_mode(tty: &File, baud: u32) -> Result<()> {
    let speed = baud_constant(baud).ok_or_else(|| Error::LinkConfig {
        step: "baud rate",
        source: io::Error::new(io::ErrorKind::InvalidInput, format!("unsupported rate {}", baud)),
    })?;

    // SAFETY: termios is a plain C struct; all zeroes is a valid (fully raw) value.
    let mut attr: libc::termios = unsafe { std::mem::zeroed() };
    attr.c_cflag = libc::CS8 | libc::CLOCAL | libc::CREAD;
    attr.c_cc[libc::VMIN] = 1;

    // SAFETY: `attr` is a valid termios and outlives the calls; the fd is open.
    let ret = unsafe {
        if libc::cfsetispeed(&mut attr, speed) == -1 || libc::cfsetospeed(&mut attr, speed) == -1 {
            -1
        } else {
            libc::tcsetattr(tty.as_raw_fd(), libc::TCSANOW, &attr)
        }
    };
    if ret == -1 {
        return Err(Error::LinkConfig { step: "tcsetattr", source: io::Error::last_os_error() });
    }
    Ok(())
}

fn raise_cts(tty: &File) -> Result<()> {
    let bits: libc::c_int = libc::TIOCM_CTS;
    // SAFETY: TIOCMBIS reads a single c_int through the pointer, which is valid for the call.
    let ret =
        unsafe { libc::ioctl(tty.as_raw_fd(), libc::TIOCMBIS, &bits as *const libc::c_int) };
    if ret == -1 {
        return Err(Error::LinkConfig {
            step: "ioctl(TIOCMBIS)",
            source: io::Error::last_os_error(),
        });
    }
    Ok(())
}
