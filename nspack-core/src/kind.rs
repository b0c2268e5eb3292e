//! Classification of the 1-byte kind codes carried by metadata records.

use core::fmt;

use crate::Error;

/// What a content-metadata record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKind {
    SystemProgram,
    SystemData,
    SystemUpdate,
    BootImagePackage,
    BootImagePackageSafe,
    Application,
    Patch,
    AddOnContent,
    Delta,
}

impl MetaKind {
    pub fn from_code(code: u8) -> Result<MetaKind, Error> {
        Ok(match code {
            0x01 => MetaKind::SystemProgram,
            0x02 => MetaKind::SystemData,
            0x03 => MetaKind::SystemUpdate,
            0x04 => MetaKind::BootImagePackage,
            0x05 => MetaKind::BootImagePackageSafe,
            0x80 => MetaKind::Application,
            0x81 => MetaKind::Patch,
            0x82 => MetaKind::AddOnContent,
            0x83 => MetaKind::Delta,
            _ => {
                return Err(Error::UnknownTypeCode {
                    what: "content meta kind",
                    code,
                })
            }
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetaKind::SystemProgram => "SystemProgram",
            MetaKind::SystemData => "SystemData",
            MetaKind::SystemUpdate => "SystemUpdate",
            MetaKind::BootImagePackage => "BootImagePackage",
            MetaKind::BootImagePackageSafe => "BootImagePackageSafe",
            MetaKind::Application => "Application",
            MetaKind::Patch => "Patch",
            MetaKind::AddOnContent => "AddOnContent",
            MetaKind::Delta => "Delta",
        }
    }
}

impl fmt::Display for MetaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single content entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Meta,
    Program,
    Data,
    Control,
    HtmlDocument,
    LegalInformation,
    DeltaFragment,
}

impl ContentKind {
    pub fn from_code(code: u8) -> Result<ContentKind, Error> {
        Ok(match code {
            0x00 => ContentKind::Meta,
            0x01 => ContentKind::Program,
            0x02 => ContentKind::Data,
            0x03 => ContentKind::Control,
            0x04 => ContentKind::HtmlDocument,
            0x05 => ContentKind::LegalInformation,
            0x06 => ContentKind::DeltaFragment,
            _ => {
                return Err(Error::UnknownTypeCode {
                    what: "content entry kind",
                    code,
                })
            }
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Meta => "Meta",
            ContentKind::Program => "Program",
            ContentKind::Data => "Data",
            ContentKind::Control => "Control",
            ContentKind::HtmlDocument => "HtmlDocument",
            ContentKind::LegalInformation => "LegalInformation",
            ContentKind::DeltaFragment => "DeltaFragment",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        assert_eq!(MetaKind::from_code(0x80).unwrap(), MetaKind::Application);
        assert_eq!(MetaKind::from_code(0x03).unwrap(), MetaKind::SystemUpdate);
        assert_eq!(ContentKind::from_code(0x01).unwrap(), ContentKind::Program);
        assert_eq!(
            ContentKind::from_code(0x05).unwrap(),
            ContentKind::LegalInformation
        );
    }

    #[test]
    fn unknown_code_is_an_error_not_a_default() {
        match MetaKind::from_code(0x7f) {
            Err(Error::UnknownTypeCode { code: 0x7f, .. }) => {}
            other => panic!("expected UnknownTypeCode, got {:?}", other),
        }
        match ContentKind::from_code(0xff) {
            Err(Error::UnknownTypeCode { code: 0xff, .. }) => {}
            other => panic!("expected UnknownTypeCode, got {:?}", other),
        }
    }
}
