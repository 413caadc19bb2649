//! Property-based tests for History Store persistence.
//!
//! Persisting and reloading (a simulated restart) must reproduce the exact
//! ordered list, whether the storage is in memory or a SQLite file.

use std::rc::Rc;

use darkproxy::database::{MemoryStorage, SqliteStorage};
use darkproxy::managers::history_store::{HistoryStore, HistoryStoreTrait};
use proptest::prelude::*;

fn arb_url() -> impl Strategy<Value = String> {
    prop_oneof![
        ("[a-z][a-z0-9]{2,12}", proptest::option::of("/[a-z0-9]{1,10}"))
            .prop_map(|(host, path)| format!("https://{}.com{}", host, path.unwrap_or_default())),
        // Unparseable strings still get a title (the raw input) and must round-trip.
        "[a-z ]{1,20}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn memory_reload_yields_identical_list(
        urls in prop::collection::vec(arb_url(), 0..70),
        clear_midway in any::<bool>(),
    ) {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = HistoryStore::load(storage.clone());
        for (i, url) in urls.iter().enumerate() {
            if clear_midway && i == urls.len() / 2 {
                store.clear().unwrap();
            }
            store.record_visit(url).unwrap();
        }

        let reloaded = HistoryStore::load(storage);
        prop_assert_eq!(reloaded.all(), store.all());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn sqlite_reload_yields_identical_list(urls in prop::collection::vec(arb_url(), 0..60)) {
        let tmp = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("history.db");

        let expected = {
            let storage = Rc::new(SqliteStorage::open(&path).unwrap());
            let mut store = HistoryStore::load(storage);
            for url in &urls {
                store.record_visit(url).unwrap();
            }
            store.all()
        };

        let storage = Rc::new(SqliteStorage::open(&path).unwrap());
        prop_assert_eq!(HistoryStore::load(storage).all(), expected);
    }
}
