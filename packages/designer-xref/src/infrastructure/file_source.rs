//! File-backed element source

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::domain::ElementSource;

/// Element source persisting its reference document at `path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ElementSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open_read_stream(&self) -> std::io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(BufReader::new(File::open(&self.path)?)))
    }

    fn open_write_stream(&self) -> std::io::Result<Box<dyn Write + '_>> {
        Ok(Box::new(BufWriter::new(File::create(&self.path)?)))
    }
}
