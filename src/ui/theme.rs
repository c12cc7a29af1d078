//! Light/dark theme state.
//!
//! Persisted under the `node-theme` localStorage key and applied as a
//! `data-theme` attribute on the document element. Anything other than the
//! two allowed literals is rejected, leaving prior state unchanged.

use derive_more::Display;
use leptos::prelude::*;

const STORAGE_KEY_THEME: &str = "node-theme";

/// Theme mode options
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    #[display("light")]
    Light,
    #[display("dark")]
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Strict parse; unknown literals are rejected rather than defaulted.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Theme context; single writer of the mode signal.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub mode: RwSignal<ThemeMode>,
}

impl ThemeContext {
    /// Set the theme and persist it. Invalid input never reaches this point;
    /// [`ThemeMode::from_str`] guards the string boundary.
    pub fn set_mode(&self, mode: ThemeMode) {
        self.mode.set(mode);
        persist_theme(mode);
        apply_theme_attribute(mode);
    }

    pub fn toggle(&self) {
        self.set_mode(self.mode.get_untracked().toggled());
    }
}

fn persist_theme(mode: ThemeMode) {
    #[cfg(not(feature = "ssr"))]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.set_item(STORAGE_KEY_THEME, mode.as_str());
            }
        }
    }
    #[cfg(feature = "ssr")]
    {
        let _ = mode;
    }
}

/// Set the `data-theme` attribute the stylesheet keys off.
fn apply_theme_attribute(mode: ThemeMode) {
    #[cfg(not(feature = "ssr"))]
    {
        if let Some(html) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = html.set_attribute("data-theme", mode.as_str());
        }
    }
    #[cfg(feature = "ssr")]
    {
        let _ = mode;
    }
}

fn load_persisted_theme() -> ThemeMode {
    #[cfg(not(feature = "ssr"))]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(Some(value)) = storage.get_item(STORAGE_KEY_THEME) {
                    if let Some(mode) = ThemeMode::from_str(&value) {
                        return mode;
                    }
                }
            }
        }
    }
    ThemeMode::default()
}

/// Provide theme context to the application.
pub fn provide_theme_context() -> ThemeContext {
    let ctx = ThemeContext {
        mode: RwSignal::new(ThemeMode::default()),
    };

    // Pick up the persisted value after hydration to avoid a server/client
    // markup mismatch.
    #[cfg(not(feature = "ssr"))]
    {
        Effect::new(move |_| {
            let mode = load_persisted_theme();
            ctx.mode.set(mode);
            apply_theme_attribute(mode);
        });
    }

    provide_context(ctx);
    ctx
}

pub fn use_theme_context() -> ThemeContext {
    expect_context::<ThemeContext>()
}
