use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

use crate::ui::locale::use_locale_context;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let locale = use_locale_context();

    view! {
        <Title text=move || locale.t("nav.notFound")/>
        <main class="not-found">
            <h1>{move || locale.t("nav.notFound")}</h1>
            <A href="/">{move || locale.t("common.back")}</A>
        </main>
    }
}
