//! HTTP client for the relay API.

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use drop_types::{ErrorBody, SessionCode, SessionCreated, SessionInfo, UploadResponse};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::path::Path;

/// A thin wrapper over the relay HTTP API.
pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
}

impl RelayClient {
    /// Create a client for the relay at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: generate_client_id(),
        }
    }

    /// The identifier this client attaches to uploads.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Create a session, minted or with a caller-chosen code.
    pub async fn create_session(&self, code: Option<&str>) -> Result<SessionCreated> {
        let url = format!("{}/api/session", self.base_url);
        let response = match code {
            Some(code) => {
                self.http
                    .post(&url)
                    .json(&serde_json::json!({ "sessionId": code }))
                    .send()
                    .await
            }
            None => self.http.get(&url).send().await,
        }
        .context("relay unreachable")?;

        Self::parse(response).await
    }

    /// Describe a session: code, file count, and file metadata.
    pub async fn describe(&self, code: &SessionCode) -> Result<SessionInfo> {
        let url = format!("{}/api/session/{}", self.base_url, code);
        let response = self.http.get(&url).send().await.context("relay unreachable")?;
        Self::parse(response).await
    }

    /// Upload a local file into a session.
    ///
    /// The content travels as a base64 data URL so binary files survive the
    /// JSON wire format.
    pub async fn upload(&self, code: &SessionCode, path: &Path) -> Result<UploadResponse> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        let mime = "application/octet-stream";
        let data_url = format!("data:{mime};base64,{}", STANDARD.encode(&bytes));

        let url = format!("{}/api/session/{}/upload", self.base_url, code);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "fileName": name,
                "fileType": mime,
                "fileSize": bytes.len() as u64,
                "fileData": data_url,
                "clientId": self.client_id,
            }))
            .send()
            .await
            .context("relay unreachable")?;

        Self::parse(response).await
    }

    /// Download a file's bytes.
    pub async fn fetch(&self, code: &SessionCode, file_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/api/session/{}/file/{}", self.base_url, code, file_id);
        let response = self.http.get(&url).send().await.context("relay unreachable")?;

        if !response.status().is_success() {
            bail!("{}", Self::error_message(response).await);
        }
        Ok(response.bytes().await.context("read body failed")?.to_vec())
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            bail!("{}", Self::error_message(response).await);
        }
        response.json().await.context("unexpected response body")
    }

    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("relay returned {status}"),
        }
    }
}

/// Generate a random identifier for this CLI invocation.
fn generate_client_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("cli-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_ids_are_distinct() {
        let a = generate_client_id();
        let b = generate_client_id();
        assert_ne!(a, b);
        assert!(a.starts_with("cli-"));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = RelayClient::new("http://localhost:3001/");
        assert_eq!(client.base_url, "http://localhost:3001");
    }
}
