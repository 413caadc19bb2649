// DarkProxy services
// Services are stateless or single-purpose engines: input handling, rendering, preferences, config.

pub mod frame_sink;
pub mod navigator;
pub mod settings_engine;
pub mod theme_engine;
pub mod url_input;
