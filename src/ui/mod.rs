//! Component layer: contexts, guard wrapper, layout and pages.

pub mod auth;
pub mod enroll_form;
pub mod guard;
pub mod i18n;
pub mod layout;
pub mod locale;
pub mod pages;
pub mod theme;

pub use auth::{AuthContext, provide_auth_context, use_auth_context};
pub use guard::RequireCoach;
pub use layout::DashboardLayout;
pub use locale::{Locale, LocaleContext, provide_locale_context, use_locale_context};
pub use theme::{ThemeContext, ThemeMode, provide_theme_context, use_theme_context};
