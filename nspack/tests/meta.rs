use std::error::Error;
use std::fs;

use nspack_core::{ContentKind, MetaKind};

// Synthetic record: 0x20 header, 0x10 extended header, one entry,
// 0x20 trailer digest.
fn record() -> Vec<u8> {
    let mut data = vec![0; 0x20 + 0x10 + 0x38 + 0x20];
    data[0x0..0x8].copy_from_slice(&[0x00, 0x30, 0x0c, 0x00, 0x00, 0x00, 0x00, 0x01]);
    data[0xC] = 0x81; // Patch
    data[0xE] = 0x10;
    data[0x10] = 1;

    let base = 0x30;
    data[base..base + 0x20].fill(0x42);
    data[base + 0x20..base + 0x30].fill(0xcd);
    data[base + 0x30] = 0x10; // 0x10-byte entry
    data[base + 0x36] = 0x03; // Control

    let digest_at = data.len() - 0x20;
    data[digest_at..].fill(0xee);
    data
}

#[test]
fn load_meta_from_files() -> Result<(), Box<dyn Error>> {
    let tmp = tempfile::tempdir()?;
    let record_path = tmp.path().join("title.cnmt");
    let header_path = tmp.path().join("header.bin");
    fs::write(&record_path, record())?;

    let mut header = vec![0; 0x230];
    header[0x220] = 0x03;
    fs::write(&header_path, &header)?;

    let meta = nspack::load_meta(&record_path, &header_path)?;

    assert_eq!(meta.path, record_path);
    assert_eq!(meta.kind, MetaKind::Patch);
    assert_eq!(meta.title_id, "01000000000c3000");
    assert_eq!(meta.master_key_revision, "03");
    assert_eq!(meta.entries.len(), 1);
    assert_eq!(meta.entries[0].kind, ContentKind::Control);
    assert_eq!(meta.entries[0].id, "cd".repeat(16));
    assert_eq!(meta.entries[0].size, "000000000010");
    Ok(())
}

#[test]
fn truncated_record_file_fails() -> Result<(), Box<dyn Error>> {
    let tmp = tempfile::tempdir()?;
    let record_path = tmp.path().join("title.cnmt");
    let header_path = tmp.path().join("header.bin");
    // Too short for even the fixed header fields
    fs::write(&record_path, [0u8; 0x10])?;
    fs::write(&header_path, [0u8; 0x230])?;

    assert!(nspack::load_meta(&record_path, &header_path).is_err());
    Ok(())
}

#[test]
fn xml_lists_entries_and_the_record_itself() -> Result<(), Box<dyn Error>> {
    let tmp = tempfile::tempdir()?;
    let record_path = tmp.path().join("title.cnmt");
    let header_path = tmp.path().join("header.bin");
    fs::write(&record_path, record())?;

    let mut header = vec![0; 0x230];
    header[0x220] = 0x03;
    fs::write(&header_path, &header)?;

    let meta = nspack::load_meta(&record_path, &header_path)?;
    let xml_path = tmp.path().join("title.cnmt.xml");
    nspack::write_meta_xml(&meta, "0011223344556677.cnmt.nca", &xml_path)?;

    let xml = fs::read_to_string(&xml_path)?;
    assert!(xml.starts_with("<ContentMeta>"));
    assert!(xml.contains("<Type>Patch</Type>"));
    assert!(xml.contains("<Id>01000000000c3000</Id>"));
    assert!(xml.contains("<Type>Control</Type>"));
    // Synthetic Meta entry for the record file, content-addressed
    assert!(xml.contains("<Type>Meta</Type>"));
    assert!(xml.contains("<Id>0011223344556677</Id>"));
    assert!(xml.contains(&format!("<Size>{}</Size>", record().len())));
    assert!(xml.contains("<KeyGenerationMin>03</KeyGenerationMin>"));
    // A patch's companion id swaps the 000 suffix for 800
    assert!(xml.contains("<PatchId>0x01000000000c3800</PatchId>"));
    Ok(())
}
