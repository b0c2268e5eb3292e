//! Metadata XML generation.
//!
//! The XML mirrors a decoded record for installer tooling, with one
//! synthetic `Meta` entry describing the record file itself. Values are
//! passed through exactly as decoded; this module adds no schema of its
//! own.

use std::fs;
use std::path::Path;

use nspack_core::{ContentKind, ContentMeta};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::Error;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ContentXml {
    #[serde(rename = "Type")]
    kind: String,
    id: String,
    size: String,
    hash: String,
    key_generation: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ContentMetaXml {
    #[serde(rename = "Type")]
    kind: String,
    id: String,
    version: String,
    required_download_system_version: String,
    #[serde(rename = "Content")]
    contents: Vec<ContentXml>,
    digest: String,
    key_generation_min: String,
    required_system_version: String,
    patch_id: String,
}

// A title and its patch share an id up to the last three digits.
fn companion_id(title_id: &str) -> String {
    if let Some(base) = title_id.strip_suffix("800") {
        format!("0x{base}000")
    } else if let Some(base) = title_id.strip_suffix("000") {
        format!("0x{base}800")
    } else {
        String::new()
    }
}

/// Serialize `meta` to the installer XML at `out`.
///
/// `meta_nca_name` is the file name of the metadata content archive the
/// record was extracted from; its stem becomes the id of the synthetic
/// `Meta` entry.
pub fn write_meta_xml(
    meta: &ContentMeta,
    meta_nca_name: &str,
    out: impl AsRef<Path>,
) -> Result<(), Error> {
    let mut contents: Vec<ContentXml> = meta
        .entries
        .iter()
        .map(|entry| ContentXml {
            kind: entry.kind.to_string(),
            id: entry.id.clone(),
            size: entry.size.clone(),
            hash: entry.hash.clone(),
            key_generation: meta.master_key_revision.clone(),
        })
        .collect();

    // The record file describes every entry but itself; append it as a
    // content-addressed Meta entry.
    let record = fs::read(&meta.path).map_err(|source| Error::SourceFile {
        path: meta.path.clone(),
        source,
    })?;
    contents.push(ContentXml {
        kind: ContentKind::Meta.to_string(),
        id: meta_nca_name
            .split('.')
            .next()
            .unwrap_or(meta_nca_name)
            .to_string(),
        size: record.len().to_string(),
        hash: hex::encode(Sha256::digest(&record)),
        key_generation: meta.master_key_revision.clone(),
    });

    let xml = ContentMetaXml {
        kind: meta.kind.to_string(),
        id: meta.title_id.clone(),
        version: meta.version.clone(),
        required_download_system_version: meta.required_download_system_version.clone(),
        contents,
        digest: meta.digest.clone(),
        key_generation_min: meta.master_key_revision.clone(),
        required_system_version: meta.required_system_version.clone(),
        patch_id: companion_id(&meta.title_id),
    };

    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some("ContentMeta"))?;
    serializer.indent(' ', 2);
    xml.serialize(serializer)?;

    debug!(out = %out.as_ref().display(), "writing metadata xml");
    fs::write(out.as_ref(), body).map_err(|source| Error::SinkWrite { source })
}
