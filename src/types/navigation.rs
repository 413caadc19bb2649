use serde::{Deserialize, Serialize};

use super::errors::{FrameError, NavigationError};

/// Placeholder replaced by the percent-encoded target URL.
pub const URL_PLACEHOLDER: &str = "{url}";

/// An external CORS proxy that can front an arbitrary target URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyEndpoint {
    pub name: String,
    pub template: String,
}

impl ProxyEndpoint {
    pub fn new(name: &str, template: &str) -> Self {
        Self {
            name: name.to_string(),
            template: template.to_string(),
        }
    }

    /// The public proxies tried by default, in fallback order.
    pub fn default_chain() -> Vec<ProxyEndpoint> {
        vec![
            ProxyEndpoint::new("allorigins", "https://api.allorigins.win/raw?url={url}"),
            ProxyEndpoint::new("corsproxy", "https://corsproxy.io/?{url}"),
            ProxyEndpoint::new("codetabs", "https://api.codetabs.com/v1/proxy?quest={url}"),
        ]
    }

    /// Checks that the template carries exactly one `{url}` placeholder.
    pub fn validate(&self) -> Result<(), NavigationError> {
        match self.template.matches(URL_PLACEHOLDER).count() {
            1 => Ok(()),
            0 => Err(NavigationError::InvalidTemplate(format!(
                "{}: missing {} placeholder",
                self.name, URL_PLACEHOLDER
            ))),
            _ => Err(NavigationError::InvalidTemplate(format!(
                "{}: more than one {} placeholder",
                self.name, URL_PLACEHOLDER
            ))),
        }
    }

    /// Builds the fetchable address for `target`.
    pub fn build_address(&self, target: &str) -> String {
        self.template
            .replace(URL_PLACEHOLDER, &urlencoding::encode(target))
    }
}

/// Where the fallback chain currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "endpoint", rename_all = "snake_case")]
pub enum NavigationState {
    /// Waiting on the attempt against endpoint `i`.
    Pending(usize),
    /// Endpoint `i` rendered the page.
    Success(usize),
    /// Every endpoint failed.
    Exhausted,
}

impl NavigationState {
    pub fn start() -> Self {
        NavigationState::Pending(0)
    }

    /// Applies the result of the in-flight attempt.
    ///
    /// Terminal states absorb further results unchanged.
    pub fn advance(self, loaded: bool, endpoint_count: usize) -> Self {
        match self {
            NavigationState::Pending(i) if loaded => NavigationState::Success(i),
            NavigationState::Pending(i) if i + 1 < endpoint_count => NavigationState::Pending(i + 1),
            NavigationState::Pending(_) => NavigationState::Exhausted,
            terminal => terminal,
        }
    }
}

/// Result of a single endpoint attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum AttemptResult {
    Loaded,
    Failed(String),
}

impl From<&Result<(), FrameError>> for AttemptResult {
    fn from(result: &Result<(), FrameError>) -> Self {
        match result {
            Ok(()) => AttemptResult::Loaded,
            Err(e) => AttemptResult::Failed(e.to_string()),
        }
    }
}

/// One entry of the observable attempt sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub endpoint: String,
    pub address: String,
    pub result: AttemptResult,
}

/// What a finished navigation reports back to the adapter layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderReport {
    pub target: String,
    pub state: NavigationState,
    pub attempts: Vec<Attempt>,
}

impl RenderReport {
    pub fn is_success(&self) -> bool {
        matches!(self.state, NavigationState::Success(_))
    }

    /// The proxied address that rendered, if any.
    pub fn rendered_address(&self) -> Option<&str> {
        match self.state {
            NavigationState::Success(_) => self.attempts.last().map(|a| a.address.as_str()),
            _ => None,
        }
    }
}
