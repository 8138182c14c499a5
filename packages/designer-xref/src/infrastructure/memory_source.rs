//! In-memory element source
//!
//! Backs the persisted document with a byte buffer and counts stream
//! acquisitions, which makes it the source of choice for tests and for
//! documents that are never written to disk.

use std::cell::{Cell, RefCell, RefMut};
use std::io::{Cursor, Read, Write};

use crate::domain::ElementSource;

#[derive(Debug, Default)]
pub struct MemorySource {
    name: String,
    buffer: RefCell<Vec<u8>>,
    reads_opened: Cell<usize>,
    writes_opened: Cell<usize>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Source whose read stream yields `bytes`
    pub fn with_contents(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let source = Self::new(name);
        source.buffer.replace(bytes.into());
        source
    }

    /// Current persisted bytes
    pub fn contents(&self) -> Vec<u8> {
        self.buffer.borrow().clone()
    }

    pub fn set_contents(&self, bytes: impl Into<Vec<u8>>) {
        self.buffer.replace(bytes.into());
    }

    pub fn reads_opened(&self) -> usize {
        self.reads_opened.get()
    }

    pub fn writes_opened(&self) -> usize {
        self.writes_opened.get()
    }
}

/// Write stream replacing the buffer contents
struct MemoryWriter<'s> {
    buffer: RefMut<'s, Vec<u8>>,
}

impl Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl ElementSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open_read_stream(&self) -> std::io::Result<Box<dyn Read + '_>> {
        let buffer = self
            .buffer
            .try_borrow()
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::WouldBlock, "write stream still open"))?;
        self.reads_opened.set(self.reads_opened.get() + 1);
        Ok(Box::new(Cursor::new(buffer.clone())))
    }

    fn open_write_stream(&self) -> std::io::Result<Box<dyn Write + '_>> {
        let mut buffer = self
            .buffer
            .try_borrow_mut()
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::WouldBlock, "write stream already open"))?;
        buffer.clear();
        self.writes_opened.set(self.writes_opened.get() + 1);
        Ok(Box::new(MemoryWriter { buffer }))
    }
}
