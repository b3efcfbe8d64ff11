use std::io::Read;
use std::time::Duration;

use image::DynamicImage;
use reqwest::blocking::Client;

use crate::assets::decode::decode_image;
use crate::config::FetchConfig;
use crate::foundation::error::{PosterError, PosterResult};

/// Source of decoded logo and banner images.
///
/// Implementations must be shareable across worker threads.
pub trait ImageFetcher: Send + Sync {
    /// Download and decode the image at `url`.
    fn fetch_image(&self, url: &str) -> PosterResult<DynamicImage>;
}

/// Blocking HTTP(S) fetcher with a whole-request timeout and a body size cap.
pub struct HttpImageFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpImageFetcher {
    /// Build a fetcher from configuration.
    pub fn new(cfg: &FetchConfig) -> PosterResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| PosterError::fetch(format!("build http client: {e}")))?;
        Ok(Self {
            client,
            max_bytes: cfg.max_bytes,
        })
    }
}

impl ImageFetcher for HttpImageFetcher {
    #[tracing::instrument(skip(self))]
    fn fetch_image(&self, url: &str) -> PosterResult<DynamicImage> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| PosterError::fetch(format!("GET '{url}': {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PosterError::fetch(format!(
                "failed to download image from '{url}': HTTP {status}"
            )));
        }

        let mut body = Vec::new();
        response
            .take(self.max_bytes as u64 + 1)
            .read_to_end(&mut body)
            .map_err(|e| PosterError::fetch(format!("read body of '{url}': {e}")))?;
        if body.len() > self.max_bytes {
            return Err(PosterError::fetch(format!(
                "image at '{url}' exceeds {} bytes",
                self.max_bytes
            )));
        }

        tracing::debug!(bytes = body.len(), "downloaded image");
        decode_image(&body).map_err(|e| PosterError::fetch(format!("decode '{url}': {e}")))
    }
}
