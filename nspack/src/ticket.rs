//! Ticket files: template patching and title-key extraction.

use std::fs;
use std::path::Path;

use nspack_core::ticket::{TITLE_KEY_LEN, TITLE_KEY_OFFSET};
use nspack_core::{read_hex, Error as CoreError, FieldOrder};
use tracing::debug;

use crate::source::FileSource;
use crate::Error;

/// Extract the hex-encoded title key stored in a downloaded common
/// ticket blob.
pub fn title_key_from_cetk(path: impl AsRef<Path>) -> Result<String, Error> {
    let mut cetk = FileSource::open(path)?;
    read_hex(
        &mut cetk,
        TITLE_KEY_OFFSET as i64,
        TITLE_KEY_LEN,
        FieldOrder::Preserve,
    )
}

/// Patch the ticket template at `template` with hex-encoded key
/// material and write the finished ticket to `out`.
pub fn generate_ticket(
    template: impl AsRef<Path>,
    out: impl AsRef<Path>,
    title_key: &str,
    master_key_revision: &str,
    rights_id: &str,
) -> Result<(), Error> {
    let template = template.as_ref();
    let data = fs::read(template).map_err(|source| Error::SourceFile {
        path: template.to_path_buf(),
        source,
    })?;

    let title_key = hex::decode(title_key).map_err(CoreError::Hex)?;
    let revision = hex::decode(master_key_revision).map_err(CoreError::Hex)?;
    let rights_id = hex::decode(rights_id).map_err(CoreError::Hex)?;
    let revision = *revision.first().ok_or(CoreError::InvalidKeyLength {
        expected: 1,
        actual: 0,
    })?;

    let ticket = nspack_core::ticket::patch(&data, &title_key, revision, &rights_id)?;

    debug!(out = %out.as_ref().display(), "writing ticket");
    fs::write(out.as_ref(), ticket).map_err(|source| Error::SinkWrite { source })
}
