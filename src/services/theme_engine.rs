//! Theme Engine: dark/light/auto theme and accent color preferences.
//!
//! Both values are persisted as plain strings under their own storage keys
//! and fall back to defaults when absent or unusable.

use std::collections::HashMap;
use std::rc::Rc;

use crate::database::local_storage::{LocalStorage, ACCENT_COLOR_KEY, THEME_KEY};
use crate::types::errors::ThemeError;
use crate::types::settings::ThemeMode;

pub const DEFAULT_ACCENT_COLOR: &str = "#58a6ff";

/// Per-channel shift applied to the accent color for hover states.
pub const HOVER_SHIFT: i16 = -20;

/// Trait defining the theme engine interface.
pub trait ThemeEngineTrait {
    fn set_theme(&mut self, mode: ThemeMode) -> Result<(), ThemeError>;
    fn get_theme(&self) -> ThemeMode;
    fn set_accent_color(&mut self, color: &str) -> Result<(), ThemeError>;
    fn get_accent_color(&self) -> &str;
    fn detect_system_theme(&self) -> ThemeMode;
    fn get_css_variables(&self) -> HashMap<String, String>;
}

/// Validates a hex color string (e.g. "#58a6ff" or "#fff").
pub fn is_valid_hex_color(color: &str) -> bool {
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Shifts every RGB channel of `color` by `amount`, clamping to `0..=255`.
///
/// Short `#rgb` colors are expanded first; the result is always `#rrggbb`.
pub fn adjust_color(color: &str, amount: i16) -> Result<String, ThemeError> {
    if !is_valid_hex_color(color) {
        return Err(ThemeError::InvalidColor(color.to_string()));
    }
    let hex = &color[1..];
    let full: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };

    let mut out = String::from("#");
    for i in (0..6).step_by(2) {
        let channel = i16::from_str_radix(&full[i..i + 2], 16)
            .map_err(|_| ThemeError::InvalidColor(color.to_string()))?;
        let shifted = (channel + amount).clamp(0, 255);
        out.push_str(&format!("{:02x}", shifted));
    }
    Ok(out)
}

/// The theme engine implementation.
pub struct ThemeEngine {
    storage: Rc<dyn LocalStorage>,
    current_theme: ThemeMode,
    accent_color: String,
}

impl ThemeEngine {
    /// Loads persisted preferences, defaulting anything missing or invalid.
    pub fn load(storage: Rc<dyn LocalStorage>) -> Self {
        let current_theme = match storage.get_item(THEME_KEY) {
            Ok(Some(raw)) => raw.parse::<ThemeMode>().unwrap_or_else(|e| {
                log::warn!("ignoring stored theme: {}", e);
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                log::warn!("theme unreadable, using default: {}", e);
                ThemeMode::default()
            }
        };

        let accent_color = match storage.get_item(ACCENT_COLOR_KEY) {
            Ok(Some(raw)) if is_valid_hex_color(&raw) => raw,
            Ok(Some(raw)) => {
                log::warn!("ignoring stored accent color: {}", raw);
                DEFAULT_ACCENT_COLOR.to_string()
            }
            Ok(None) => DEFAULT_ACCENT_COLOR.to_string(),
            Err(e) => {
                log::warn!("accent color unreadable, using default: {}", e);
                DEFAULT_ACCENT_COLOR.to_string()
            }
        };

        Self {
            storage,
            current_theme,
            accent_color,
        }
    }

    /// Resolves `Auto` against the given system preference.
    pub fn effective_theme(&self, system_prefers_dark: bool) -> ThemeMode {
        match self.current_theme {
            ThemeMode::Auto if system_prefers_dark => ThemeMode::Dark,
            ThemeMode::Auto => ThemeMode::Light,
            other => other,
        }
    }

    /// The accent color used for hovered controls.
    pub fn hover_color(&self) -> String {
        adjust_color(&self.accent_color, HOVER_SHIFT)
            .unwrap_or_else(|_| self.accent_color.clone())
    }
}

impl ThemeEngineTrait for ThemeEngine {
    fn set_theme(&mut self, mode: ThemeMode) -> Result<(), ThemeError> {
        self.storage.set_item(THEME_KEY, mode.as_str())?;
        self.current_theme = mode;
        log::info!("theme set to {}", mode);
        Ok(())
    }

    fn get_theme(&self) -> ThemeMode {
        self.current_theme
    }

    fn set_accent_color(&mut self, color: &str) -> Result<(), ThemeError> {
        if !is_valid_hex_color(color) {
            return Err(ThemeError::InvalidColor(color.to_string()));
        }
        self.storage.set_item(ACCENT_COLOR_KEY, color)?;
        self.accent_color = color.to_string();
        log::info!("accent color set to {}", color);
        Ok(())
    }

    fn get_accent_color(&self) -> &str {
        &self.accent_color
    }

    fn detect_system_theme(&self) -> ThemeMode {
        // Without a host color-scheme query, the GTK_THEME variable is the
        // only signal; default to dark.
        match std::env::var("GTK_THEME") {
            Ok(gtk_theme) if !gtk_theme.to_lowercase().contains("dark") => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }

    fn get_css_variables(&self) -> HashMap<String, String> {
        let system_dark = self.detect_system_theme() == ThemeMode::Dark;
        let mut vars = HashMap::new();
        vars.insert(
            "data-theme".to_string(),
            self.effective_theme(system_dark).as_str().to_string(),
        );
        vars.insert("--accent-color".to_string(), self.accent_color.clone());
        vars.insert("--accent-hover".to_string(), self.hover_color());
        vars
    }
}
