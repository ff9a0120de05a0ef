//! # Image Buffer Module
//!
//! An `ImageFile` is the storage owned by a file system object.  It loads the
//! entire image into memory up front and writes the entire buffer back on
//! `flush`.  Interpretation of the bytes is left to the `fs` layer.

use std::io::Read;
use std::path::PathBuf;

/// Enumerates image file errors.  The `Display` trait will print the
/// equivalent long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("file open error")]
    Open(#[source] std::io::Error),
    #[error("file read error")]
    Read(#[source] std::io::Error),
    #[error("file write error")]
    Write(#[source] std::io::Error)
}

#[derive(PartialEq,Eq,Clone,Copy)]
pub enum OpenMode {
    ReadOnly,
    ReadWrite,
    Create
}

/// Fixed-size byte blob backing a disk image.
/// In the writable modes `flush` rewrites the whole file from the buffer.
pub struct ImageFile {
    path: PathBuf,
    mode: OpenMode,
    buf: Vec<u8>
}

impl ImageFile {
    /// Load an existing image into memory.
    pub fn open(img_path: &str,mode: OpenMode) -> Result<Self,Error> {
        let mut file = std::fs::File::open(img_path).map_err(Error::Open)?;
        let mut buf: Vec<u8> = Vec::new();
        file.read_to_end(&mut buf).map_err(Error::Read)?;
        Ok(Self {
            path: PathBuf::from(img_path),
            mode,
            buf
        })
    }
    /// Set up a zero-filled image of the given size.  Nothing touches the
    /// host file system until `flush`.
    pub fn create(img_path: &str,size: usize) -> Self {
        Self {
            path: PathBuf::from(img_path),
            mode: OpenMode::Create,
            buf: vec![0;size]
        }
    }
    pub fn size(&self) -> usize {
        self.buf.len()
    }
    pub fn data(&self) -> &[u8] {
        &self.buf
    }
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
    /// Write the buffer back to the host file.  No-op in read-only mode.
    pub fn flush(&mut self) -> Result<(),Error> {
        if self.mode == OpenMode::ReadOnly {
            return Ok(());
        }
        std::fs::write(&self.path,&self.buf).map_err(Error::Write)
    }
}
