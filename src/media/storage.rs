//! Object storage boundary: public URLs and existence probes.

use std::future::Future;
use std::time::Duration;

/// Why a probe did not confirm the object exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Non-2xx response
    Status(u16),
    Timeout,
    Network(String),
}

impl std::fmt::Display for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeError::Status(code) => write!(f, "Storage returned HTTP {}", code),
            ProbeError::Timeout => write!(f, "Storage probe timed out"),
            ProbeError::Network(e) => write!(f, "Storage probe failed: {}", e),
        }
    }
}

impl std::error::Error for ProbeError {}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProbeError::Timeout
        } else {
            ProbeError::Network(e.to_string())
        }
    }
}

pub trait ObjectStorage: Send + Sync {
    /// Public URL for an object. Pure; does not check existence.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Single existence check. Any error means absent.
    fn probe(&self, url: &str) -> impl Future<Output = Result<(), ProbeError>> + Send;
}

/// Percent-encode each path segment, keeping the separators.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Public-object storage reached over HTTP.
#[derive(Clone)]
pub struct HttpStorage {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStorage {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl ObjectStorage for HttpStorage {
    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            urlencoding::encode(bucket),
            encode_path(path)
        )
    }

    async fn probe(&self, url: &str) -> Result<(), ProbeError> {
        let response = self.client.head(url).send().await?;
        if !response.status().is_success() {
            return Err(ProbeError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> HttpStorage {
        HttpStorage::new("https://assets.example.com/", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_public_url_encodes_segments() {
        assert_eq!(
            storage().public_url("styledmyhome.images", "Kitchen Images/French Country.png"),
            "https://assets.example.com/storage/v1/object/public/styledmyhome.images/Kitchen%20Images/French%20Country.png"
        );
    }

    #[test]
    fn test_public_url_is_pure() {
        let s = storage();
        assert_eq!(
            s.public_url("b", "Japandi Style Guide.pdf"),
            s.public_url("b", "Japandi Style Guide.pdf")
        );
    }

    #[test]
    fn test_probe_error_display() {
        assert_eq!(ProbeError::Status(404).to_string(), "Storage returned HTTP 404");
    }

    #[tokio::test]
    async fn test_probe_unreachable_host_fails() {
        let s = HttpStorage::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let url = s.public_url("b", "missing.png");
        assert!(s.probe(&url).await.is_err());
    }
}
