//! Loading content-metadata records from disk.

use std::path::Path;

use nspack_core::ContentMeta;
use tracing::debug;

use crate::source::FileSource;
use crate::Error;

/// Decode a record file together with the header blob the decryption
/// tool wrote next to it.
pub fn load_meta(
    record_path: impl AsRef<Path>,
    header_path: impl AsRef<Path>,
) -> Result<ContentMeta, Error> {
    let record_path = record_path.as_ref();
    let mut record = FileSource::open(record_path)?;
    let mut header = FileSource::open(header_path.as_ref())?;

    let mut meta = ContentMeta::decode(&mut record, &mut header)?;
    meta.path = record_path.to_path_buf();
    debug!(
        title_id = meta.title_id.as_str(),
        entries = meta.entries.len(),
        "decoded {}",
        record_path.display()
    );
    Ok(meta)
}
