//! Directory-to-container packing.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use nspack_core::pfs0;
use tracing::debug;

use crate::Error;

const COPY_BUF_SIZE: usize = 4 * 1024 * 1024;

#[derive(Debug)]
struct PackFile {
    name: String,
    size: u64,
    path: PathBuf,
}

// The container format is flat, so only regular files directly in `dir`
// are packed. The listing is sorted by name; entry order fixes the data
// offsets, so it has to match between header and body pass.
fn dir_entries(dir: &Path) -> Result<Vec<PackFile>, Error> {
    let wrap = |source| Error::Dir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(wrap)? {
        let entry = entry.map_err(wrap)?;
        let metadata = entry.metadata().map_err(wrap)?;
        if !metadata.is_file() {
            continue;
        }
        files.push(PackFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            size: metadata.len(),
            path: entry.path(),
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Pack every file in `dir` into a fresh container at `out`.
///
/// The whole header region is written first, then each body is streamed
/// in listing order. Any failure is fatal; no partially packed archive
/// is ever reported as success.
pub fn pack_directory(dir: impl AsRef<Path>, out: impl AsRef<Path>) -> Result<(), Error> {
    let dir = dir.as_ref();
    let files = dir_entries(dir)?;
    debug!(
        count = files.len(),
        "packing {} into {}",
        dir.display(),
        out.as_ref().display()
    );

    let mut sink =
        File::create(out.as_ref()).map_err(|source| Error::SinkWrite { source })?;
    write_archive(&files, &mut sink)
}

fn write_archive(files: &[PackFile], sink: &mut impl Write) -> Result<(), Error> {
    let listing: Vec<(&str, u64)> = files
        .iter()
        .map(|file| (file.name.as_str(), file.size))
        .collect();
    sink.write_all(&pfs0::build_header(&listing))
        .map_err(|source| Error::SinkWrite { source })?;

    let mut buf = vec![0; COPY_BUF_SIZE];
    for file in files {
        let mut body = File::open(&file.path).map_err(|source| Error::SourceFile {
            path: file.path.clone(),
            source,
        })?;
        loop {
            let count = body.read(&mut buf).map_err(|source| Error::SourceFile {
                path: file.path.clone(),
                source,
            })?;
            if count == 0 {
                break;
            }
            sink.write_all(&buf[..count])
                .map_err(|source| Error::SinkWrite { source })?;
        }
    }
    Ok(())
}
