//! Device credential files.
//!
//! The session holds no global state; everything it needs comes from
//! one TOML file the operator keeps alongside their device dump.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Credentials identifying one device to the content server.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// PEM file holding the device's client certificate.
    pub certificate: PathBuf,
    /// PEM file holding the matching private key.
    pub private_key: PathBuf,
    /// Token presented to the content server's edge on every request.
    pub edge_token: String,
}

impl DeviceConfig {
    /// Helper function to deserialize.
    pub fn open(path: impl AsRef<Path>) -> Result<DeviceConfig, Error> {
        let path = path.as_ref();
        let mut s = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut s))
            .map_err(|source| Error::Io {
                path: path.to_path_buf(),
                context: "read device config",
                source,
            })?;
        Ok(toml::from_str(&s)?)
    }

    /// Helper function to serialize and save.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let s = toml::to_string(self)?;
        let path = path.as_ref();
        File::create(path)
            .and_then(|mut file| file.write_all(s.as_bytes()))
            .map_err(|source| Error::Io {
                path: path.to_path_buf(),
                context: "write device config",
                source,
            })
    }
}
