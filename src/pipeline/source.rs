//! Image inputs: local files and remote URLs.

use crate::config::FetchConfig;
use crate::constants::fetch::CONNECT_TIMEOUT_SECS;
use crate::error::{Error, Result};
use futures_util::StreamExt;
use image::RgbImage;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file.
    File(PathBuf),
    /// HTTP or HTTPS URL.
    Url(String),
}

impl ImageSource {
    /// Recognize an `http://` or `https://` URL.
    pub fn url(input: &str) -> Option<Self> {
        let lower = input.to_ascii_lowercase();
        (lower.starts_with("http://") || lower.starts_with("https://"))
            .then(|| Self::Url(input.to_string()))
    }

    /// Parse a command-line input as a URL or a file path.
    pub fn parse(input: &str) -> Self {
        Self::url(input).unwrap_or_else(|| Self::File(PathBuf::from(input)))
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Decode encoded image bytes into 8-bit RGB. Alpha is dropped.
pub fn decode_image(bytes: &[u8], source_name: &str) -> Result<RgbImage> {
    let image = image::load_from_memory(bytes).map_err(|e| Error::ImageDecode {
        source_name: source_name.to_string(),
        source: e,
    })?;
    Ok(image.to_rgb8())
}

/// Loads images from files and URLs.
///
/// Owns a small tokio runtime so remote fetches can be driven from the
/// synchronous analysis loop.
#[derive(Debug)]
pub struct ImageLoader {
    runtime: tokio::runtime::Runtime,
    client: Client,
    max_bytes: u64,
}

impl ImageLoader {
    /// Create a loader with the configured timeouts and size limit.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Internal {
                message: format!("Failed to create async runtime: {e}"),
            })?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            runtime,
            client,
            max_bytes: config.max_bytes,
        })
    }

    /// Read and decode an image.
    pub fn load(&self, source: &ImageSource) -> Result<RgbImage> {
        let bytes = match source {
            ImageSource::File(path) => std::fs::read(path).map_err(|e| Error::ImageRead {
                path: path.clone(),
                source: e,
            })?,
            ImageSource::Url(url) => self.runtime.block_on(self.fetch(url))?,
        };
        debug!("Read {} bytes from {}", bytes.len(), source);
        decode_image(&bytes, &source.to_string())
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::FetchFailed {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        if !response.status().is_success() {
            return Err(Error::FetchFailed {
                url: url.to_string(),
                source: format!("HTTP {}", response.status()).into(),
            });
        }

        if response.content_length().is_some_and(|len| len > self.max_bytes) {
            return Err(Error::FetchTooLarge {
                url: url.to_string(),
                limit: self.max_bytes,
            });
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::FetchFailed {
                url: url.to_string(),
                source: Box::new(e),
            })?;

            if body.len() as u64 + chunk.len() as u64 > self.max_bytes {
                return Err(Error::FetchTooLarge {
                    url: url.to_string(),
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}
