// API client module: contains a small blocking HTTP client that talks to
// the diff-checking service. Both operations are single attempts with the
// transport's default timeout; every failure is surfaced to the caller.

use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client};
use std::fs::File;
use std::path::Path;

/// Simple API client that holds a reqwest blocking client and the base
/// URL of the diff service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create an ApiClient for the given server address. A trailing slash
    /// on the address is tolerated and stripped.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(ApiClient { client, base_url })
    }

    /// Base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the given room by GETting its room endpoint. The server
    /// creates the room idempotently if it does not exist yet.
    pub fn join_room(&self, room_id: &str) -> Result<()> {
        let url = format!(
            "{}/diffchecker/{}",
            &self.base_url,
            urlencoding::encode(room_id)
        );
        let res = self
            .client
            .get(&url)
            .send()
            .context("Failed to send room join request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            if txt.is_empty() {
                anyhow::bail!("Join failed: {}", status);
            }
            anyhow::bail!("Join failed: {} - {}", status, txt);
        }
        Ok(())
    }

    /// Upload the file at `file_path` as this party's contribution to the
    /// room, using multipart/form-data under the field name `file`.
    ///
    /// The file handle is owned by the multipart part and streamed into
    /// the request body, so arbitrarily large files never sit in memory
    /// and the descriptor is released on every exit path.
    pub fn upload_file(&self, room_id: &str, file_path: &Path) -> Result<()> {
        let url = format!(
            "{}/diffchecker/upload/{}",
            &self.base_url,
            urlencoding::encode(room_id)
        );

        let file = File::open(file_path)
            .with_context(|| format!("Failed to open file {}", file_path.display()))?;
        let file_name = file_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("file")
            .to_string();

        let part = multipart::Part::reader(file).file_name(file_name);
        let form = multipart::Form::new().part("file", part);

        let res = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .context("Failed to send upload request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            if txt.is_empty() {
                anyhow::bail!("Upload failed: {}", status);
            }
            anyhow::bail!("Upload failed: {} - {}", status, txt);
        }
        Ok(())
    }
}
