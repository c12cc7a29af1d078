use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_query_map;

use crate::core::enrollment::EnrollmentKind;
use crate::ui::enroll_form::EnrollmentForm;
use crate::ui::locale::use_locale_context;

#[component]
pub fn EnrollClassPage() -> impl IntoView {
    let locale = use_locale_context();
    let query = use_query_map();
    let program = query.with_untracked(|q| q.get("program").and_then(|v| v.parse::<i64>().ok()));

    view! {
        <Title text=move || locale.t("nav.enrollClass")/>
        <h1>{move || locale.t("nav.enrollClass")}</h1>
        <EnrollmentForm kind=EnrollmentKind::Class program=program/>
    }
}
