use std::error::Error;
use std::fs;

use nspack::{generate_ticket, title_key_from_cetk};

#[test]
fn generate_ticket_patches_template_on_disk() -> Result<(), Box<dyn Error>> {
    let tmp = tempfile::tempdir()?;
    let template_path = tmp.path().join("template.tik");
    let out_path = tmp.path().join("title.tik");

    let template: Vec<u8> = (0..0x2c0).map(|i| i as u8).collect();
    fs::write(&template_path, &template)?;

    let rights_id = nspack_core::ticket::rights_id("0100000000010000", "5");
    generate_ticket(
        &template_path,
        &out_path,
        "000102030405060708090a0b0c0d0e0f",
        "05",
        &rights_id,
    )?;

    let ticket = fs::read(&out_path)?;
    assert_eq!(ticket.len(), template.len());
    assert_eq!(
        &ticket[0x180..0x190],
        &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
    );
    assert_eq!(ticket[0x285], 0x05);
    assert_eq!(&ticket[0x2a0..0x2b0], &hex::decode(&rights_id)?[..]);

    // Template itself is untouched
    assert_eq!(fs::read(&template_path)?, template);
    Ok(())
}

#[test]
fn title_key_comes_from_the_cetk_key_field() -> Result<(), Box<dyn Error>> {
    let tmp = tempfile::tempdir()?;
    let cetk_path = tmp.path().join("title.cetk");

    let mut cetk = vec![0u8; 0x2c0];
    cetk[0x180..0x190].copy_from_slice(&[0xab; 16]);
    fs::write(&cetk_path, &cetk)?;

    assert_eq!(title_key_from_cetk(&cetk_path)?, "ab".repeat(16));
    Ok(())
}

#[test]
fn bad_hex_key_material_is_rejected() -> Result<(), Box<dyn Error>> {
    let tmp = tempfile::tempdir()?;
    let template_path = tmp.path().join("template.tik");
    fs::write(&template_path, vec![0u8; 0x2c0])?;

    let result = generate_ticket(
        &template_path,
        tmp.path().join("title.tik"),
        "not hex at all",
        "05",
        &"00".repeat(16),
    );
    assert!(result.is_err());
    Ok(())
}
