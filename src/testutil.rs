// src/testutil.rs
use std::cell::RefCell;
use std::io::{self, Cursor, Read, Write};
use std::rc::Rc;

/// A writer tests can keep a handle to after boxing it.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Host side of the wire: what the host will send, and what it got back.
/// Reads hit end-of-file once the scripted input runs out.
pub struct Wire {
    pub from_host: Cursor<Vec<u8>>,
    pub to_host: Vec<u8>,
}

impl Wire {
    pub fn new(from_host: Vec<u8>) -> Self {
        Wire { from_host: Cursor::new(from_host), to_host: Vec::new() }
    }
}

impl Read for Wire {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.from_host.read(buf)
    }
}

impl Write for Wire {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.to_host.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
