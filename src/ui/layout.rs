//! Dashboard chrome: header with profile, locale switcher, theme toggle and
//! logout. Everything under it sits behind the coach guard.

use leptos::prelude::*;
use leptos_router::components::{A, Outlet};

use crate::ui::auth::use_auth_context;
use crate::ui::guard::RequireCoach;
use crate::ui::locale::{Locale, use_locale_context};
use crate::ui::theme::{ThemeMode, use_theme_context};

#[component]
pub fn DashboardLayout() -> impl IntoView {
    let auth = use_auth_context();
    let locale = use_locale_context();
    let theme = use_theme_context();

    let profile_auth = auth.clone();
    let logout_auth = auth.clone();

    view! {
        <RequireCoach>
            <div class="portal">
                <header class="portal-header">
                    <A href="/dashboard" attr:class="portal-brand">
                        {move || locale.t("nav.dashboard")}
                    </A>
                    <div class="portal-header-actions">
                        <span class="portal-profile">
                            {
                                let profile_auth = profile_auth.clone();
                                move || {
                                    profile_auth.profile().map(|p| p.name).unwrap_or_default()
                                }
                            }
                        </span>
                        <button
                            class="portal-locale"
                            class:active=move || locale.locale.get() == Locale::De
                            on:click=move |_| locale.set(Locale::De)
                        >
                            "DE"
                        </button>
                        <button
                            class="portal-locale"
                            class:active=move || locale.locale.get() == Locale::En
                            on:click=move |_| locale.set(Locale::En)
                        >
                            "EN"
                        </button>
                        <button class="portal-theme" on:click=move |_| theme.toggle()>
                            {move || match theme.mode.get() {
                                ThemeMode::Light => "🌙",
                                ThemeMode::Dark => "☀",
                            }}
                        </button>
                        <button
                            class="portal-logout"
                            on:click={
                                let logout_auth = logout_auth.clone();
                                move |_| logout_auth.logout()
                            }
                        >
                            {move || locale.t("nav.logout")}
                        </button>
                    </div>
                </header>
                <main class="portal-main">
                    <Outlet/>
                </main>
            </div>
        </RequireCoach>
    }
}
