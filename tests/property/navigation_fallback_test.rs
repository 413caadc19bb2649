//! Property-based tests for the Fallback Navigator.
//!
//! For any chain length and any pattern of per-endpoint results, the sink is
//! driven through a strict prefix of the chain in order: up to and including
//! the first success, or the whole chain when every endpoint fails.

use std::collections::VecDeque;

use darkproxy::services::frame_sink::FrameSink;
use darkproxy::services::navigator::FallbackNavigator;
use darkproxy::types::errors::FrameError;
use darkproxy::types::navigation::{NavigationState, ProxyEndpoint};
use proptest::prelude::*;

struct ScriptedSink {
    script: VecDeque<bool>,
    loaded: Vec<String>,
}

impl FrameSink for ScriptedSink {
    async fn load(&mut self, address: &str) -> Result<(), FrameError> {
        self.loaded.push(address.to_string());
        match self.script.pop_front() {
            Some(true) => Ok(()),
            _ => Err(FrameError::LoadError("scripted failure".to_string())),
        }
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn attempts_follow_chain_order_until_first_success(
        results in prop::collection::vec(any::<bool>(), 1..8),
        host in "[a-z]{3,12}",
    ) {
        let endpoints: Vec<ProxyEndpoint> = (0..results.len())
            .map(|i| ProxyEndpoint::new(&format!("p{}", i), &format!("https://p{}.test/?u={{url}}", i)))
            .collect();
        let navigator = FallbackNavigator::new(endpoints.clone()).unwrap();
        let target = format!("https://{}.com", host);
        let mut sink = ScriptedSink { script: results.clone().into(), loaded: Vec::new() };

        let report = runtime().block_on(navigator.render(&target, &mut sink));

        let expected_attempts = match results.iter().position(|ok| *ok) {
            Some(i) => {
                prop_assert_eq!(report.state, NavigationState::Success(i));
                i + 1
            }
            None => {
                prop_assert_eq!(report.state, NavigationState::Exhausted);
                results.len()
            }
        };

        prop_assert_eq!(sink.loaded.len(), expected_attempts);
        prop_assert_eq!(report.attempts.len(), expected_attempts);
        for (i, address) in sink.loaded.iter().enumerate() {
            prop_assert_eq!(address, &endpoints[i].build_address(&target));
            prop_assert_eq!(&report.attempts[i].endpoint, &endpoints[i].name);
        }
    }
}
