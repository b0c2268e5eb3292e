//! File-backed field sources.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use nspack_core::FieldSource;

use crate::Error;

/// Seek-and-read field source over an open file.
///
/// Field reads are sparse relative to file size, so nothing is
/// buffered; each read seeks to its absolute position.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: File,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<FileSource, Error> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| Error::SourceFile {
            path: path.clone(),
            source,
        })?;
        Ok(FileSource { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FieldSource for FileSource {
    type Err = Error;

    fn len(&mut self) -> Result<u64, Error> {
        let metadata = self.file.metadata().map_err(|source| Error::SourceFile {
            path: self.path.clone(),
            source,
        })?;
        Ok(metadata.len())
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Error> {
        self.file
            .seek(SeekFrom::Start(offset))
            .and_then(|_| self.file.read_exact(buf))
            .map_err(|source| Error::SourceFile {
                path: self.path.clone(),
                source,
            })
    }
}
