//! RPC method handler for the DarkProxy JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` translates host UI events into calls on the [`App`].

use std::time::{Duration, Instant};

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::history_store::{HistoryStoreTrait, RECENT_DISPLAY_COUNT};
use crate::services::theme_engine::ThemeEngineTrait;
use crate::types::errors::ThemeError;
use crate::types::history::HistoryEntry;
use crate::types::settings::ThemeMode;

/// Requests accepted per window by the RPC server.
pub const MAX_REQUESTS_PER_SECOND: u32 = 200;

const RATE_WINDOW: Duration = Duration::from_secs(1);

/// Fixed-window rate limiter over all methods.
pub struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_window: u32,
}

impl RateLimiter {
    pub fn new(max_per_window: u32) -> Self {
        Self::starting_at(max_per_window, Instant::now())
    }

    pub fn starting_at(max_per_window: u32, now: Instant) -> Self {
        Self {
            window_start: now,
            request_count: 0,
            max_per_window,
        }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    pub fn check(&mut self) -> bool {
        self.check_at(Instant::now())
    }

    /// Same as [`RateLimiter::check`] for a request arriving at `now`.
    pub fn check_at(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.window_start) >= RATE_WINDOW {
            self.window_start = now;
            self.request_count = 0;
        }
        self.request_count = self.request_count.saturating_add(1);
        self.request_count <= self.max_per_window
    }
}

fn entries_to_json(entries: &[HistoryEntry]) -> Value {
    json!(entries)
}

fn required_str<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Navigation ───
        "navigate" => {
            let input = required_str(params, "url")?;
            let outcome = app.navigate(input).await.map_err(|e| e.to_string())?;
            let report = &outcome.report;
            Ok(json!({
                "entry": outcome.entry,
                "success": report.is_success(),
                "state": report.state,
                "attempts": report.attempts,
                "rendered_address": report.rendered_address(),
                "content_type": outcome.page.as_ref().and_then(|p| p.content_type.clone()),
            }))
        }

        // ─── History ───
        "history.recent" => {
            let limit = params
                .get("limit")
                .and_then(|v| v.as_u64())
                .map(|n| n as usize)
                .unwrap_or(RECENT_DISPLAY_COUNT);
            Ok(entries_to_json(&app.history.recent(limit)))
        }
        "history.all" => Ok(entries_to_json(&app.history.all())),
        "history.remove" => {
            let url = required_str(params, "url")?;
            app.history.remove(url).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "history.clear" => {
            app.history.clear().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Appearance ───
        "theme.get" => {
            let engine = &app.theme_engine;
            Ok(json!({
                "theme": engine.get_theme(),
                "accent_color": engine.get_accent_color(),
                "hover_color": engine.hover_color(),
                "css": engine.get_css_variables(),
            }))
        }
        "theme.set" => {
            let mode: ThemeMode = required_str(params, "theme")?
                .parse()
                .map_err(|e: ThemeError| e.to_string())?;
            app.theme_engine.set_theme(mode).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "theme": mode}))
        }
        "accent.set" => {
            let color = required_str(params, "color")?;
            app.theme_engine
                .set_accent_color(color)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "hover_color": app.theme_engine.hover_color()}))
        }

        // ─── Config ───
        "config.get" => serde_json::to_value(app.config()).map_err(|e| e.to_string()),
        "config.set" => {
            let key = required_str(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.set_config_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
