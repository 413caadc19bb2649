//! Property-based tests for AppConfig serialization round-trip.
//!
//! Any valid config written through the SettingsEngine must load back unchanged.

use darkproxy::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use darkproxy::types::navigation::ProxyEndpoint;
use darkproxy::types::settings::{AppConfig, NavigationSettings, NetworkSettings};
use proptest::prelude::*;

fn arb_endpoint() -> impl Strategy<Value = ProxyEndpoint> {
    ("[a-z]{3,10}", "[a-z]{3,10}", "[a-z]{1,6}").prop_map(|(name, host, param)| {
        ProxyEndpoint::new(&name, &format!("https://{}.test/?{}={{url}}", host, param))
    })
}

fn arb_config() -> impl Strategy<Value = AppConfig> {
    (
        prop::collection::vec(arb_endpoint(), 1..6),
        proptest::option::of(1u64..120_000),
        "[a-zA-Z0-9/._ -]{1,40}",
        proptest::option::of("/[a-z]{1,10}/[a-z]{1,10}"),
    )
        .prop_map(|(proxies, attempt_timeout_ms, user_agent, data_dir)| AppConfig {
            navigation: NavigationSettings {
                proxies,
                attempt_timeout_ms,
            },
            network: NetworkSettings { user_agent },
            data_dir,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn config_json_roundtrip(config in arb_config()) {
        let json = serde_json::to_string(&config).expect("serialize");
        let back: AppConfig = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(back, config);
    }

    #[test]
    fn config_file_roundtrip(config in arb_config()) {
        let tmp = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("settings.json").to_string_lossy().to_string();

        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let mut engine = SettingsEngine::new(Some(path));
        prop_assert_eq!(engine.load().unwrap(), config);
    }
}
