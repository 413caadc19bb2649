//! App Core for DarkProxy.
//!
//! Composition root owning the storage, history store, theme engine and
//! config. Adapters (CLI, RPC) hold an `App` and call into it; nothing in the
//! core reaches for global state.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::database::{LocalStorage, MemoryStorage, SqliteStorage};
use crate::managers::history_store::{HistoryStore, HistoryStoreTrait};
use crate::platform;
use crate::services::frame_sink::{FrameSink, HttpFrameSink, LoadedPage};
use crate::services::navigator::FallbackNavigator;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::theme_engine::ThemeEngine;
use crate::services::url_input::normalize_input;
use crate::types::errors::{AppError, StorageError};
use crate::types::history::HistoryEntry;
use crate::types::navigation::RenderReport;
use crate::types::settings::AppConfig;

/// Everything a finished navigation hands back to the adapter.
#[derive(Debug, Clone)]
pub struct NavigationOutcome {
    /// History entry after this visit was recorded.
    pub entry: HistoryEntry,
    pub report: RenderReport,
    /// Rendered page, when the built-in HTTP sink was used and succeeded.
    pub page: Option<LoadedPage>,
}

/// Central application struct holding all state.
pub struct App {
    pub storage: Rc<dyn LocalStorage>,
    pub history: HistoryStore,
    pub theme_engine: ThemeEngine,
    pub settings_engine: SettingsEngine,
    navigator: FallbackNavigator,
}

impl App {
    /// Builds the app over an already opened storage and a settings engine.
    pub fn new(storage: Rc<dyn LocalStorage>, settings_engine: SettingsEngine) -> Result<Self, AppError> {
        let navigator = FallbackNavigator::from_settings(&settings_engine.get_settings().navigation)?;
        let history = HistoryStore::load(storage.clone());
        let theme_engine = ThemeEngine::load(storage.clone());

        Ok(Self {
            storage,
            history,
            theme_engine,
            settings_engine,
            navigator,
        })
    }

    /// Opens the SQLite storage at `db_path`.
    pub fn open<P: AsRef<Path>>(db_path: P, settings_engine: SettingsEngine) -> Result<Self, AppError> {
        let storage = SqliteStorage::open(db_path)?;
        Self::new(Rc::new(storage), settings_engine)
    }

    /// Loads the config from the platform config path and opens storage in
    /// the resolved data directory.
    pub fn open_default() -> Result<Self, AppError> {
        let mut settings_engine = SettingsEngine::new(None);
        let config = settings_engine.load()?;

        let data_dir = platform::resolve_data_dir(config.data_dir.as_deref());
        fs::create_dir_all(&data_dir).map_err(|e| {
            StorageError::OpenFailed(format!("{}: {}", data_dir.display(), e))
        })?;
        let db_path = platform::database_path(&data_dir);
        log::debug!("opening storage at {}", db_path.display());

        Self::open(db_path, settings_engine)
    }

    /// Non-durable app for tests and throwaway sessions.
    pub fn in_memory(settings_engine: SettingsEngine) -> Result<Self, AppError> {
        Self::new(Rc::new(MemoryStorage::new()), settings_engine)
    }

    pub fn config(&self) -> &AppConfig {
        self.settings_engine.get_settings()
    }

    pub fn navigator(&self) -> &FallbackNavigator {
        &self.navigator
    }

    /// Updates one config value and rebuilds the navigator from it.
    pub fn set_config_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), AppError> {
        self.settings_engine.set_value(key, value)?;
        self.navigator = FallbackNavigator::from_settings(&self.config().navigation)?;
        Ok(())
    }

    /// Navigates using the built-in HTTP frame sink.
    pub async fn navigate(&mut self, input: &str) -> Result<NavigationOutcome, AppError> {
        let mut sink = HttpFrameSink::new(&self.config().network.user_agent)?;
        let mut outcome = self.navigate_with(input, &mut sink).await?;
        outcome.page = sink.into_page();
        Ok(outcome)
    }

    /// Normalizes `input`, records the visit and renders it into `sink`.
    ///
    /// Invalid input is rejected before anything is recorded. An exhausted
    /// chain is not an error here: the report carries the `Exhausted` state.
    pub async fn navigate_with<S: FrameSink>(
        &mut self,
        input: &str,
        sink: &mut S,
    ) -> Result<NavigationOutcome, AppError> {
        let url = normalize_input(input)?;
        let entry = self.history.record_visit(&url)?;
        let report = self.navigator.render(&url, sink).await;

        Ok(NavigationOutcome {
            entry,
            report,
            page: None,
        })
    }
}
