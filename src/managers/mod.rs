// DarkProxy state managers
// Managers handle persisted state that outlives a single navigation.

pub mod history_store;
