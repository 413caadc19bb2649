//! Unit tests for the FallbackNavigator.
//!
//! A scripted frame sink records every address it is pointed at and answers
//! with a pre-programmed sequence of load results.

use std::collections::VecDeque;
use std::time::Duration;

use darkproxy::services::frame_sink::FrameSink;
use darkproxy::services::navigator::{render, FallbackNavigator};
use darkproxy::types::errors::{FrameError, NavigationError};
use darkproxy::types::navigation::{AttemptResult, NavigationState, ProxyEndpoint};

/// Frame sink answering from a script; an empty script means "load ok".
struct ScriptedSink {
    script: VecDeque<Result<(), FrameError>>,
    loaded: Vec<String>,
}

impl ScriptedSink {
    fn new(script: Vec<Result<(), FrameError>>) -> Self {
        Self {
            script: script.into(),
            loaded: Vec::new(),
        }
    }
}

impl FrameSink for ScriptedSink {
    async fn load(&mut self, address: &str) -> Result<(), FrameError> {
        self.loaded.push(address.to_string());
        self.script.pop_front().unwrap_or(Ok(()))
    }
}

/// Frame sink that never signals load or error.
struct SilentSink {
    loaded: Vec<String>,
}

impl FrameSink for SilentSink {
    async fn load(&mut self, address: &str) -> Result<(), FrameError> {
        self.loaded.push(address.to_string());
        std::future::pending().await
    }
}

fn chain(names: &[&str]) -> Vec<ProxyEndpoint> {
    names
        .iter()
        .map(|n| ProxyEndpoint::new(n, &format!("https://{}.proxy.test/?u={{url}}", n)))
        .collect()
}

fn failed() -> Result<(), FrameError> {
    Err(FrameError::LoadError("blocked".to_string()))
}

#[tokio::test]
async fn test_falls_through_to_third_endpoint() {
    let navigator = FallbackNavigator::new(chain(&["a", "b", "c"])).unwrap();
    let mut sink = ScriptedSink::new(vec![failed(), Err(FrameError::Status(403)), Ok(())]);

    let report = navigator.render("https://example.com", &mut sink).await;

    assert_eq!(report.state, NavigationState::Success(2));
    assert!(report.is_success());
    let endpoints: Vec<&str> = report.attempts.iter().map(|a| a.endpoint.as_str()).collect();
    assert_eq!(endpoints, vec!["a", "b", "c"]);
    assert_eq!(
        sink.loaded,
        vec![
            "https://a.proxy.test/?u=https%3A%2F%2Fexample.com",
            "https://b.proxy.test/?u=https%3A%2F%2Fexample.com",
            "https://c.proxy.test/?u=https%3A%2F%2Fexample.com",
        ]
    );
    assert_eq!(
        report.rendered_address(),
        Some("https://c.proxy.test/?u=https%3A%2F%2Fexample.com")
    );
}

#[tokio::test]
async fn test_first_success_stops_the_chain() {
    let navigator = FallbackNavigator::new(chain(&["a", "b", "c"])).unwrap();
    let mut sink = ScriptedSink::new(vec![Ok(())]);

    let report = navigator.render("https://example.com", &mut sink).await;

    assert_eq!(report.state, NavigationState::Success(0));
    assert_eq!(sink.loaded.len(), 1);
    assert_eq!(report.attempts[0].result, AttemptResult::Loaded);
}

#[tokio::test]
async fn test_all_failures_exhaust_without_retry() {
    let navigator = FallbackNavigator::new(chain(&["a", "b"])).unwrap();
    let mut sink = ScriptedSink::new(vec![failed(), failed(), Ok(())]);

    let report = navigator.render("https://example.com", &mut sink).await;

    assert_eq!(report.state, NavigationState::Exhausted);
    assert!(!report.is_success());
    assert_eq!(report.rendered_address(), None);
    assert_eq!(sink.loaded.len(), 2, "endpoint a must not be retried");
    assert!(sink.loaded[0].starts_with("https://a."));
    assert!(sink.loaded[1].starts_with("https://b."));
    assert!(matches!(report.attempts[1].result, AttemptResult::Failed(_)));
}

#[tokio::test]
async fn test_timeout_turns_hang_into_failure() {
    let navigator = FallbackNavigator::new(chain(&["a", "b"]))
        .unwrap()
        .with_attempt_timeout(Some(Duration::from_millis(20)));
    let mut sink = SilentSink { loaded: Vec::new() };

    let report = navigator.render("https://example.com", &mut sink).await;

    assert_eq!(report.state, NavigationState::Exhausted);
    assert_eq!(sink.loaded.len(), 2);
    assert_eq!(
        report.attempts[0].result,
        AttemptResult::Failed("Frame load timed out after 20 ms".to_string())
    );
}

#[tokio::test]
async fn test_free_render_function_uses_given_chain() {
    let endpoints = chain(&["only"]);
    let mut sink = ScriptedSink::new(vec![Ok(())]);

    let report = render("https://example.com", &endpoints, &mut sink).await.unwrap();
    assert_eq!(report.state, NavigationState::Success(0));
    assert_eq!(report.target, "https://example.com");
}

#[tokio::test]
async fn test_free_render_function_rejects_empty_chain() {
    let mut sink = ScriptedSink::new(Vec::new());
    let result = render("https://example.com", &[], &mut sink).await;
    assert!(matches!(result, Err(NavigationError::NoEndpoints)));
    assert!(sink.loaded.is_empty());
}
