//! UI locale state.
//!
//! German is the default, English the fallback for missing keys. Persisted
//! under the `node-locale` localStorage key; setters reject anything other
//! than the two supported literals.

use derive_more::Display;
use leptos::prelude::*;

use super::i18n;

const STORAGE_KEY_LOCALE: &str = "node-locale";

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    #[display("de")]
    De,
    #[display("en")]
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::De => "de",
            Locale::En => "en",
        }
    }

    /// Strict parse; unknown literals are rejected rather than defaulted.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "de" => Some(Locale::De),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}

/// Locale context; single writer of the locale signal.
#[derive(Clone, Copy)]
pub struct LocaleContext {
    pub locale: RwSignal<Locale>,
}

impl LocaleContext {
    pub fn set(&self, locale: Locale) {
        self.locale.set(locale);
        persist_locale(locale);
    }

    /// Reactive message lookup.
    pub fn t(&self, key: &'static str) -> String {
        i18n::lookup(self.locale.get(), key).to_string()
    }
}

fn persist_locale(locale: Locale) {
    #[cfg(not(feature = "ssr"))]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.set_item(STORAGE_KEY_LOCALE, locale.as_str());
            }
        }
    }
    #[cfg(feature = "ssr")]
    {
        let _ = locale;
    }
}

fn load_persisted_locale() -> Locale {
    #[cfg(not(feature = "ssr"))]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(Some(value)) = storage.get_item(STORAGE_KEY_LOCALE) {
                    if let Some(locale) = Locale::from_str(&value) {
                        return locale;
                    }
                }
            }
        }
    }
    Locale::default()
}

pub fn provide_locale_context() -> LocaleContext {
    let ctx = LocaleContext {
        locale: RwSignal::new(Locale::default()),
    };

    #[cfg(not(feature = "ssr"))]
    {
        Effect::new(move |_| {
            ctx.locale.set(load_persisted_locale());
        });
    }

    provide_context(ctx);
    ctx
}

pub fn use_locale_context() -> LocaleContext {
    expect_context::<LocaleContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_two_literals_parse() {
        assert_eq!(Locale::from_str("de"), Some(Locale::De));
        assert_eq!(Locale::from_str("en"), Some(Locale::En));
        assert_eq!(Locale::from_str("fr"), None);
        assert_eq!(Locale::from_str("DE"), None);
        assert_eq!(Locale::from_str(""), None);
    }

    #[test]
    fn default_is_german() {
        assert_eq!(Locale::default(), Locale::De);
    }

    #[test]
    fn invalid_literal_leaves_state_unchanged() {
        let _owner = Owner::new_root(None);
        let ctx = LocaleContext {
            locale: RwSignal::new(Locale::En),
        };
        if let Some(locale) = Locale::from_str("fr") {
            ctx.set(locale);
        }
        assert_eq!(ctx.locale.get_untracked(), Locale::En);
    }
}
