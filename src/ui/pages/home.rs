//! Public landing page. Shows the forbidden notice when the guard bounced an
//! authenticated user without the coach role here.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

use crate::ui::auth::use_auth_context;
use crate::ui::locale::use_locale_context;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth_context();
    let locale = use_locale_context();
    let query = use_query_map();

    let forbidden = move || query.with(|q| q.get("forbidden").as_deref() == Some("1"));
    let authenticated = {
        let auth = auth.clone();
        move || auth.session_active()
    };
    let login_auth = auth.clone();

    view! {
        <Title text=move || locale.t("home.title")/>
        <main class="landing">
            <h1>{move || locale.t("home.title")}</h1>
            <p>{move || locale.t("home.intro")}</p>
            <Show when=forbidden>
                <p class="forbidden-note">{move || locale.t("home.forbidden")}</p>
            </Show>
            {move || {
                if authenticated() {
                    view! {
                        <A href="/dashboard" attr:class="btn-primary">
                            {locale.t("home.toDashboard")}
                        </A>
                    }
                        .into_any()
                } else {
                    let login_auth = login_auth.clone();
                    view! {
                        <button class="btn-primary" on:click=move |_| login_auth.login()>
                            {locale.t("nav.login")}
                        </button>
                    }
                        .into_any()
                }
            }}
        </main>
    }
}
