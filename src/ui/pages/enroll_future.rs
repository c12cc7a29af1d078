use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_query_map;

use crate::core::enrollment::EnrollmentKind;
use crate::ui::enroll_form::EnrollmentForm;
use crate::ui::locale::use_locale_context;

#[component]
pub fn EnrollFuturePage() -> impl IntoView {
    let locale = use_locale_context();
    let query = use_query_map();
    let group = query.with_untracked(|q| q.get("group")).unwrap_or_else(|| "5".to_string());

    view! {
        <Title text=move || locale.t("nav.enrollFuture")/>
        <h1>{move || locale.t("nav.enrollFuture")}</h1>
        <EnrollmentForm kind=EnrollmentKind::Future group=Some(group)/>
    }
}
