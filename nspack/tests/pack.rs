use std::error::Error;
use std::fs;

use nspack::pack_directory;

#[test]
fn pack_two_files() -> Result<(), Box<dyn Error>> {
    let tmp = tempfile::tempdir()?;
    let content = tmp.path().join("content");
    fs::create_dir(&content)?;
    fs::write(content.join("a"), b"abc")?;
    fs::write(content.join("bb"), b"z")?;

    let out = tmp.path().join("out.nsp");
    pack_directory(&content, &out)?;

    let archive = fs::read(&out)?;

    // Header region: 0x10 + 2 * 0x18 + len("a\0bb") = 68, padded to 80
    assert_eq!(archive.len(), 80 + 3 + 1);
    assert_eq!(&archive[..4], b"PFS0");
    assert_eq!(u32::from_le_bytes(archive[4..8].try_into()?), 2);

    // Entries are name-sorted: "a" at data offset 0, "bb" at 3
    assert_eq!(u64::from_le_bytes(archive[16..24].try_into()?), 0);
    assert_eq!(u64::from_le_bytes(archive[24..32].try_into()?), 3);
    assert_eq!(u64::from_le_bytes(archive[40..48].try_into()?), 3);
    assert_eq!(u64::from_le_bytes(archive[48..56].try_into()?), 1);

    assert_eq!(&archive[64..68], b"a\0bb");
    assert_eq!(&archive[80..], b"abcz");
    Ok(())
}

#[test]
fn pack_skips_nested_directories() -> Result<(), Box<dyn Error>> {
    let tmp = tempfile::tempdir()?;
    let content = tmp.path().join("content");
    fs::create_dir_all(content.join("nested"))?;
    fs::write(content.join("only"), b"data")?;
    fs::write(content.join("nested/ignored"), b"xxxx")?;

    let out = tmp.path().join("out.nsp");
    pack_directory(&content, &out)?;

    let archive = fs::read(&out)?;
    assert_eq!(u32::from_le_bytes(archive[4..8].try_into()?), 1);
    assert!(archive.ends_with(b"data"));
    Ok(())
}

#[test]
fn pack_missing_directory_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("out.nsp");
    match pack_directory(tmp.path().join("does-not-exist"), &out) {
        Err(nspack::Error::Dir { .. }) => {}
        other => panic!("expected Dir error, got {:?}", other),
    }
}
