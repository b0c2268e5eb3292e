pub use crate::client::CdnClient;
pub use crate::config::DeviceConfig;
pub use crate::decrypt::{Decryptor, HactoolDecryptor, HEADER_BLOB_NAME};

mod client;
mod config;
mod decrypt;

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{context}: {}", path.display())]
    Io {
        path: PathBuf,
        context: &'static str,
        source: io::Error,
    },

    #[error(transparent)]
    Ser(#[from] toml::ser::Error),

    #[error(transparent)]
    Deser(#[from] toml::de::Error),

    #[error("title {title_id} v{version} is not available on the content server")]
    TitleNotAvailable { title_id: String, version: u32 },

    #[error("edge token rejected by the content server")]
    TokenRejected,

    #[error("decryption tool {} exited with {status}", tool.display())]
    Decrypt { tool: PathBuf, status: ExitStatus },
}
