//! Media host collaborator
//!
//! Product images live on an external media host. Contract: given
//! local file paths, return one public URL per file in the same order,
//! or fail wholesale; a partial URL list is never returned.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::config::MediaConfig;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to read image file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("media host request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("media host returned an unusable response: {0}")]
    BadResponse(String),
}

/// Upload response of the media host
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

pub struct MediaClient {
    http: reqwest::Client,
    upload_url: String,
}

impl MediaClient {
    pub fn new(config: &MediaConfig) -> Result<Self, MediaError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            upload_url: config.upload_url.clone(),
        })
    }

    /// Upload each file and collect its public URL. Any failure aborts
    /// the whole batch.
    pub async fn upload_files(&self, paths: &[String]) -> Result<Vec<String>, MediaError> {
        let mut urls = Vec::with_capacity(paths.len());
        for path in paths {
            urls.push(self.upload_one(path).await?);
        }
        Ok(urls)
    }

    async fn upload_one(&self, path: &str) -> Result<String, MediaError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| MediaError::Io {
            path: path.to_string(),
            source,
        })?;

        let file_name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::BadResponse(e.to_string()))?;

        if body.url.is_empty() {
            return Err(MediaError::BadResponse("empty url".to_string()));
        }
        Ok(body.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_fails_wholesale() {
        let client = MediaClient::new(&MediaConfig::default()).unwrap();
        let result = client
            .upload_files(&["/no/such/file.jpg".to_string()])
            .await;
        assert!(matches!(result, Err(MediaError::Io { .. })));
    }

    #[tokio::test]
    async fn test_empty_batch_is_empty_ok() {
        let client = MediaClient::new(&MediaConfig::default()).unwrap();
        let urls = client.upload_files(&[]).await.unwrap();
        assert!(urls.is_empty());
    }
}
