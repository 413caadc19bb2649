//! Fallback Navigator: renders a target URL through the first proxy endpoint
//! that loads.
//!
//! Endpoints are tried strictly in order, one attempt in flight at a time.
//! A failed endpoint is never retried and there is no delay between attempts.
//! The chain ends in [`NavigationState::Success`] or, once every endpoint has
//! failed, [`NavigationState::Exhausted`].

use std::time::Duration;

use crate::services::frame_sink::FrameSink;
use crate::types::errors::{FrameError, NavigationError};
use crate::types::navigation::{Attempt, AttemptResult, NavigationState, ProxyEndpoint, RenderReport};
use crate::types::settings::NavigationSettings;

/// Drives a [`FrameSink`] through an ordered proxy chain.
#[derive(Debug, Clone)]
pub struct FallbackNavigator {
    endpoints: Vec<ProxyEndpoint>,
    attempt_timeout: Option<Duration>,
}

impl FallbackNavigator {
    /// Creates a navigator over `endpoints`, which must be non-empty and
    /// each carry a `{url}` placeholder.
    pub fn new(endpoints: Vec<ProxyEndpoint>) -> Result<Self, NavigationError> {
        if endpoints.is_empty() {
            return Err(NavigationError::NoEndpoints);
        }
        for endpoint in &endpoints {
            endpoint.validate()?;
        }
        Ok(Self {
            endpoints,
            attempt_timeout: None,
        })
    }

    pub fn from_settings(settings: &NavigationSettings) -> Result<Self, NavigationError> {
        Ok(Self::new(settings.proxies.clone())?
            .with_attempt_timeout(settings.attempt_timeout_ms.map(Duration::from_millis)))
    }

    /// Bounds each attempt; a sink silent for longer counts as failed.
    pub fn with_attempt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn endpoints(&self) -> &[ProxyEndpoint] {
        &self.endpoints
    }

    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout
    }

    /// Renders `url` into `sink`, returning the attempt sequence and terminal state.
    pub async fn render<S: FrameSink>(&self, url: &str, sink: &mut S) -> RenderReport {
        let mut state = NavigationState::start();
        let mut attempts = Vec::with_capacity(self.endpoints.len());

        while let NavigationState::Pending(i) = state {
            let endpoint = &self.endpoints[i];
            let address = endpoint.build_address(url);
            log::debug!("attempt {} via {}: {}", i + 1, endpoint.name, address);

            let result = self.attempt(sink, &address).await;
            match &result {
                Ok(()) => log::info!("{} rendered through {}", url, endpoint.name),
                Err(e) => log::warn!("{} failed through {}: {}", url, endpoint.name, e),
            }

            attempts.push(Attempt {
                endpoint: endpoint.name.clone(),
                address,
                result: AttemptResult::from(&result),
            });
            state = state.advance(result.is_ok(), self.endpoints.len());
        }

        if state == NavigationState::Exhausted {
            log::error!("all {} proxy endpoints failed for {}", attempts.len(), url);
        }

        RenderReport {
            target: url.to_string(),
            state,
            attempts,
        }
    }

    async fn attempt<S: FrameSink>(&self, sink: &mut S, address: &str) -> Result<(), FrameError> {
        match self.attempt_timeout {
            Some(limit) => tokio::time::timeout(limit, sink.load(address))
                .await
                .unwrap_or_else(|_| Err(FrameError::TimedOut(limit.as_millis() as u64))),
            None => sink.load(address).await,
        }
    }
}

/// One-shot form: renders `url` through `endpoints` with no attempt timeout.
pub async fn render<S: FrameSink>(
    url: &str,
    endpoints: &[ProxyEndpoint],
    sink: &mut S,
) -> Result<RenderReport, NavigationError> {
    let navigator = FallbackNavigator::new(endpoints.to_vec())?;
    Ok(navigator.render(url, sink).await)
}
