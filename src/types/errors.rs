use thiserror::Error;

// === StorageError ===

/// Errors related to the local key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage backend failed to open.
    #[error("Storage open failed: {0}")]
    OpenFailed(String),
    /// A read from the storage backend failed.
    #[error("Storage read failed: {0}")]
    ReadFailed(String),
    /// A write to the storage backend failed.
    #[error("Storage write failed: {0}")]
    WriteFailed(String),
}

// === HistoryError ===

/// Errors related to browsing history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The history list could not be serialized.
    #[error("History serialization error: {0}")]
    SerializationError(String),
    /// Persisting the history list failed.
    #[error("History storage error: {0}")]
    Storage(#[from] StorageError),
}

// === NavigationError ===

/// Errors related to input normalization and fallback navigation.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The user submitted an empty address.
    #[error("Empty URL")]
    EmptyInput,
    /// The submitted text is not a valid absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The navigator was configured without any proxy endpoints.
    #[error("No proxy endpoints configured")]
    NoEndpoints,
    /// A proxy endpoint template is unusable.
    #[error("Invalid proxy template: {0}")]
    InvalidTemplate(String),
}

// === FrameError ===

/// A single load attempt failed inside the frame sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The request never produced a response.
    #[error("Frame network error: {0}")]
    Network(String),
    /// The endpoint answered with a non-success status.
    #[error("Frame load rejected with status {0}")]
    Status(u16),
    /// The sink signalled an explicit load error.
    #[error("Frame load error: {0}")]
    LoadError(String),
    /// Neither a load nor an error signal arrived in time.
    #[error("Frame load timed out after {0} ms")]
    TimedOut(u64),
}

// === SettingsError ===

/// Errors related to configuration management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === ThemeError ===

/// Errors related to theme and accent color preferences.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The provided color value is invalid.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    /// The provided theme name is unknown.
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
    /// Persisting the preference failed.
    #[error("Theme storage error: {0}")]
    Storage(#[from] StorageError),
}

// === AppError ===

/// Errors surfaced by the application composition root.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
