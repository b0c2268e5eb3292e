//! License-ticket template patching.
//!
//! A ticket is a fixed-layout binary credential. Generating one for a
//! title means overwriting three ranges of a common template with the
//! title's key material and leaving every other byte alone.

use crate::Error;

pub const TITLE_KEY_OFFSET: usize = 0x180;
pub const TITLE_KEY_LEN: usize = 16;
pub const MASTER_KEY_REVISION_OFFSET: usize = 0x285;
pub const RIGHTS_ID_OFFSET: usize = 0x2a0;
pub const RIGHTS_ID_LEN: usize = 16;

/// Patch a copy of `template` with the given key material.
///
/// Exactly three ranges are overwritten: the title key at 0x180, the
/// master-key revision byte at 0x285, and the rights id at 0x2a0.
/// Sources longer than their range are truncated to it; shorter ones
/// fail with [`Error::InvalidKeyLength`]. The template itself is never
/// modified.
pub fn patch(
    template: &[u8],
    title_key: &[u8],
    master_key_revision: u8,
    rights_id: &[u8],
) -> Result<Vec<u8>, Error> {
    let revision = [master_key_revision];
    let patches: [(usize, usize, &[u8]); 3] = [
        (TITLE_KEY_OFFSET, TITLE_KEY_LEN, title_key),
        (MASTER_KEY_REVISION_OFFSET, 1, &revision),
        (RIGHTS_ID_OFFSET, RIGHTS_ID_LEN, rights_id),
    ];

    let mut ticket = template.to_vec();
    for (offset, len, source) in patches {
        if source.len() < len {
            return Err(Error::InvalidKeyLength {
                expected: len,
                actual: source.len(),
            });
        }
        let end = offset + len;
        if ticket.len() < end {
            return Err(Error::Truncated {
                offset: offset as u64,
                need: len,
                have: ticket.len() as u64,
            });
        }
        ticket[offset..end].copy_from_slice(&source[..len]);
    }
    Ok(ticket)
}

/// Derive the 32-hex-digit rights id for a title: the title id, zero
/// padding, and the master-key revision.
pub fn rights_id(title_id: &str, master_key_revision: &str) -> String {
    format!(
        "{}{}{}",
        title_id,
        "0".repeat(16usize.saturating_sub(master_key_revision.len())),
        master_key_revision
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Vec<u8> {
        (0..0x2c0).map(|i| i as u8).collect()
    }

    #[test]
    fn patch_is_localized_to_the_three_ranges() {
        let template = template();
        let ticket = patch(&template, &[0xaa; 16], 0x05, &[0xbb; 16]).unwrap();

        assert_eq!(ticket.len(), template.len());
        assert_eq!(&ticket[0x180..0x190], &[0xaa; 16]);
        assert_eq!(ticket[0x285], 0x05);
        assert_eq!(&ticket[0x2a0..0x2b0], &[0xbb; 16]);

        for (i, (patched, original)) in ticket.iter().zip(template.iter()).enumerate() {
            let in_patched_range = (0x180..0x190).contains(&i)
                || i == 0x285
                || (0x2a0..0x2b0).contains(&i);
            if !in_patched_range {
                assert_eq!(patched, original, "byte {:#x} changed", i);
            }
        }
    }

    #[test]
    fn short_key_material_is_rejected() {
        match patch(&template(), &[0xaa; 15], 0x05, &[0xbb; 16]) {
            Err(Error::InvalidKeyLength { expected: 16, actual: 15 }) => {}
            other => panic!("expected InvalidKeyLength, got {:?}", other),
        }
        match patch(&template(), &[0xaa; 16], 0x05, &[0xbb; 3]) {
            Err(Error::InvalidKeyLength { expected: 16, actual: 3 }) => {}
            other => panic!("expected InvalidKeyLength, got {:?}", other),
        }
    }

    #[test]
    fn short_template_is_rejected() {
        let template = vec![0; 0x200];
        match patch(&template, &[0xaa; 16], 0x05, &[0xbb; 16]) {
            Err(Error::Truncated { .. }) => {}
            other => panic!("expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn rights_id_pads_between_title_id_and_revision() {
        assert_eq!(
            rights_id("0100000000010000", "5"),
            "01000000000100000000000000000005"
        );
        assert_eq!(rights_id("0100000000010000", "5").len(), 32);
        assert_eq!(
            rights_id("01000000000c3000", "0a"),
            "01000000000c3000000000000000000a"
        );
    }
}
