//! Hugging Face dataset hub client
//!
//! Thin wrapper over the hub HTTP API: commit a file into a dataset
//! repository and read dataset metadata. Authentication is a bearer
//! token, taken explicitly or from the `HF_TOKEN` environment variable.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use super::{SyncError, SyncResult};

const HUB_BASE_URL: &str = "https://huggingface.co";

/// Environment variable consulted when no token is passed explicitly
pub const TOKEN_ENV_VAR: &str = "HF_TOKEN";

/// Remote path the portfolio CSV is committed to
pub const PORTFOLIO_REMOTE_PATH: &str = "data/propriedades.csv";

/// Metadata returned by the hub for a dataset repository
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetInfo {
    /// Repository id, `owner/name`
    pub id: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub downloads: u64,
    #[serde(rename = "lastModified", default)]
    pub last_modified: Option<String>,
}

/// Client for a single dataset repository on the hub
pub struct HfClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HfClient {
    /// Creates a client, resolving the token from the argument or from
    /// the `HF_TOKEN` environment variable.
    pub fn new(token: Option<String>) -> SyncResult<Self> {
        let token = match token {
            Some(t) if !t.trim().is_empty() => t,
            _ => std::env::var(TOKEN_ENV_VAR).map_err(|_| SyncError::MissingToken)?,
        };
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: HUB_BASE_URL.to_string(),
            token,
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches dataset metadata.
    pub async fn dataset_info(&self, dataset: &str) -> SyncResult<DatasetInfo> {
        let url = format!("{}/api/datasets/{}", self.base_url, dataset);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    /// Commits a local file into the dataset at `remote_path` on the
    /// `main` revision.
    pub async fn upload_file(
        &self,
        dataset: &str,
        local_path: &Path,
        remote_path: &str,
        message: &str,
    ) -> SyncResult<()> {
        let content = std::fs::read(local_path)?;
        let payload = build_commit_payload(message, remote_path, &content);

        let url = format!(
            "{}/api/datasets/{}/commit/main",
            self.base_url, dataset
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("content-type", "application/x-ndjson")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Commits the portfolio CSV to its canonical remote path.
    pub async fn sync_portfolio(&self, dataset: &str, csv_path: &Path) -> SyncResult<()> {
        let message = format!(
            "Portfolio update {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        self.upload_file(dataset, csv_path, PORTFOLIO_REMOTE_PATH, &message)
            .await
    }
}

/// Builds the NDJSON commit body: a header operation followed by one
/// base64-encoded file operation.
fn build_commit_payload(message: &str, remote_path: &str, content: &[u8]) -> String {
    let header = json!({
        "key": "header",
        "value": { "summary": message, "description": "" },
    });
    let file = json!({
        "key": "file",
        "value": {
            "path": remote_path,
            "content": BASE64.encode(content),
            "encoding": "base64",
        },
    });
    format!("{}\n{}", header, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_rejected() {
        std::env::remove_var(TOKEN_ENV_VAR);
        assert!(matches!(HfClient::new(None), Err(SyncError::MissingToken)));
        assert!(matches!(
            HfClient::new(Some("  ".to_string())),
            Err(SyncError::MissingToken)
        ));
    }

    #[test]
    fn test_explicit_token_accepted() {
        let client = HfClient::new(Some("hf_abc".to_string())).unwrap();
        assert_eq!(client.token, "hf_abc");
    }

    #[test]
    fn test_commit_payload_shape() {
        let payload = build_commit_payload("msg", "data/p.csv", b"a,b\n1,2\n");
        let mut lines = payload.lines();

        let header: serde_json::Value =
            serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(header["key"], "header");
        assert_eq!(header["value"]["summary"], "msg");

        let file: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(file["key"], "file");
        assert_eq!(file["value"]["path"], "data/p.csv");
        assert_eq!(file["value"]["encoding"], "base64");
        let decoded = BASE64
            .decode(file["value"]["content"].as_str().unwrap())
            .unwrap();
        assert_eq!(decoded, b"a,b\n1,2\n");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_base_url_override() {
        let client = HfClient::new(Some("hf_abc".to_string()))
            .unwrap()
            .with_base_url("http://127.0.0.1:9999");
        assert_eq!(client.base_url, "http://127.0.0.1:9999");
    }
}
