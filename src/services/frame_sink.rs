//! Frame sinks: the single render target the navigator points at proxy addresses.

use crate::types::errors::{AppError, FrameError};

/// A render target that loads one address at a time and reports whether it loaded.
///
/// Each call replaces whatever the sink was showing before.
#[allow(async_fn_in_trait)]
pub trait FrameSink {
    async fn load(&mut self, address: &str) -> Result<(), FrameError>;
}

/// Page content captured by [`HttpFrameSink`] after a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPage {
    pub address: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// Renders by fetching the proxied address over HTTP.
///
/// A 2xx response counts as a load; transport errors and any other status
/// count as a load error.
pub struct HttpFrameSink {
    client: reqwest::Client,
    page: Option<LoadedPage>,
}

impl HttpFrameSink {
    pub fn new(user_agent: &str) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::HttpClient(e.to_string()))?;
        Ok(Self { client, page: None })
    }

    /// The page from the most recent successful load.
    pub fn page(&self) -> Option<&LoadedPage> {
        self.page.as_ref()
    }

    pub fn into_page(self) -> Option<LoadedPage> {
        self.page
    }
}

impl FrameSink for HttpFrameSink {
    async fn load(&mut self, address: &str) -> Result<(), FrameError> {
        self.page = None;

        let response = self
            .client
            .get(address)
            .send()
            .await
            .map_err(|e| FrameError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FrameError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| FrameError::Network(e.to_string()))?;

        self.page = Some(LoadedPage {
            address: address.to_string(),
            status: status.as_u16(),
            content_type,
            body,
        });
        Ok(())
    }
}
