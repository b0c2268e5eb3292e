//! Blocking content-server session over a device client certificate.

use std::fs::{self, File};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::DeviceConfig;
use crate::Error;

const CONTENT_SERVER: &str = "https://atum.hac.lp1.d4c.nintendo.net";
const EDGE_TOKEN_HEADER: &str = "X-Nintendo-DenebEdgeToken";
const CONTENT_ID_HEADER: &str = "X-Nintendo-Content-ID";

/// A system title every device can resolve; used to probe the token.
const TOKEN_PROBE_TITLE: &str = "0100000000010000";

/// An authenticated session with the content server.
///
/// The server chain is not publicly rooted, so chain verification is
/// disabled; the device certificate is what authenticates the session.
pub struct CdnClient {
    client: Client,
    edge_token: String,
}

impl CdnClient {
    pub fn new(config: &DeviceConfig) -> Result<CdnClient, Error> {
        let mut pem = fs::read(&config.certificate).map_err(|source| Error::Io {
            path: config.certificate.clone(),
            context: "read device certificate",
            source,
        })?;
        let key = fs::read(&config.private_key).map_err(|source| Error::Io {
            path: config.private_key.clone(),
            context: "read device private key",
            source,
        })?;
        pem.extend_from_slice(&key);
        let identity = reqwest::Identity::from_pem(&pem)?;

        let client = Client::builder()
            .identity(identity)
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(CdnClient {
            client,
            edge_token: config.edge_token.clone(),
        })
    }

    /// Resolve the metadata content id for a title at a version.
    ///
    /// The server answers a HEAD request with the id in a response
    /// header; a missing header means the title is not published for
    /// this device.
    pub fn meta_content_id(&self, title_id: &str, version: u32) -> Result<String, Error> {
        let url = format!("{CONTENT_SERVER}/t/a/{title_id}/{version}");
        debug!(title_id, version, "resolving metadata content id");

        let response = self
            .client
            .head(&url)
            .header(EDGE_TOKEN_HEADER, &self.edge_token)
            .send()?;

        match response
            .headers()
            .get(CONTENT_ID_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            Some(id) if !id.is_empty() => Ok(id.to_string()),
            _ => {
                warn!(title_id, version, "no content id in response");
                Err(Error::TitleNotAvailable {
                    title_id: title_id.to_string(),
                    version,
                })
            }
        }
    }

    /// Download the metadata content archive for a resolved content id.
    pub fn download_meta(&self, content_id: &str, dest: impl AsRef<Path>) -> Result<(), Error> {
        self.download(&format!("{CONTENT_SERVER}/c/a/{content_id}"), dest.as_ref())
    }

    /// Download one content file referenced by a metadata record.
    pub fn download_content(&self, content_id: &str, dest: impl AsRef<Path>) -> Result<(), Error> {
        self.download(&format!("{CONTENT_SERVER}/c/c/{content_id}"), dest.as_ref())
    }

    /// Download the common ticket blob for a rights id.
    pub fn download_cetk(&self, rights_id: &str, dest: impl AsRef<Path>) -> Result<(), Error> {
        self.download(&format!("{CONTENT_SERVER}/r/t/{rights_id}"), dest.as_ref())
    }

    /// Probe a known system title to check the edge token before
    /// starting a long download chain.
    pub fn verify_token(&self) -> Result<(), Error> {
        self.meta_content_id(TOKEN_PROBE_TITLE, 0)
            .map(drop)
            .map_err(|_| Error::TokenRejected)
    }

    fn download(&self, url: &str, dest: &Path) -> Result<(), Error> {
        debug!(url, dest = %dest.display(), "downloading");

        let mut response = self
            .client
            .get(url)
            .header(EDGE_TOKEN_HEADER, &self.edge_token)
            .send()?
            .error_for_status()?;

        let mut out = File::create(dest).map_err(|source| Error::Io {
            path: dest.to_path_buf(),
            context: "create download target",
            source,
        })?;
        response.copy_to(&mut out)?;
        Ok(())
    }
}
