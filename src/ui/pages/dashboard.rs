//! Dashboard: the static enrollment catalog plus the coach's existing teams
//! and classes.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::components::A;

use crate::core::api::{Class, Team};
use crate::core::enrollment::{ENROLLMENT_OPTIONS, EnrollmentKind, EnrollmentOption};
use crate::ui::auth::use_auth_context;
use crate::ui::locale::use_locale_context;

fn option_href(option: &EnrollmentOption) -> String {
    match option.kind {
        EnrollmentKind::Team => format!(
            "/dashboard/enroll-team?program={}",
            option.program.unwrap_or_default()
        ),
        EnrollmentKind::Class => format!(
            "/dashboard/enroll-class?program={}",
            option.program.unwrap_or_default()
        ),
        EnrollmentKind::Future => format!(
            "/dashboard/enroll-future?group={}",
            option.group.unwrap_or_default()
        ),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth_context();
    let locale = use_locale_context();

    let teams = RwSignal::new(Vec::<Team>::new());
    let classes = RwSignal::new(Vec::<Class>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    {
        let api = auth.api.clone();
        Effect::new(move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.teams().await {
                    Ok(list) => teams.set(list),
                    Err(e) => error.set(Some(e.to_string())),
                }
                match api.classes().await {
                    Ok(list) => classes.set(list),
                    Err(e) => error.set(Some(e.to_string())),
                }
                loading.set(false);
            });
        });
    }

    view! {
        <Title text=move || locale.t("nav.dashboard")/>
        <section class="enroll-options">
            <h2>{move || locale.t("dashboard.enrollHeading")}</h2>
            <ul>
                {ENROLLMENT_OPTIONS
                    .iter()
                    .map(|option| {
                        let label_key = option.label_key;
                        view! {
                            <li>
                                <A href=option_href(option)>{move || locale.t(label_key)}</A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </section>

        <section class="team-list">
            <h2>{move || locale.t("dashboard.teamsHeading")}</h2>
            {move || {
                if loading.get() {
                    view! { <p>{locale.t("common.loading")}</p> }.into_any()
                } else if teams.with(Vec::is_empty) {
                    view! { <p>{locale.t("dashboard.emptyTeams")}</p> }.into_any()
                } else {
                    view! {
                        <ul>
                            {teams
                                .get()
                                .into_iter()
                                .map(|team| {
                                    view! {
                                        <li>
                                            <A href=format!(
                                                "/dashboard/team/{}",
                                                team.id,
                                            )>{team.name.clone()}</A>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }}
        </section>

        <section class="class-list">
            <h2>{move || locale.t("dashboard.classesHeading")}</h2>
            {move || {
                if loading.get() {
                    view! { <p>{locale.t("common.loading")}</p> }.into_any()
                } else if classes.with(Vec::is_empty) {
                    view! { <p>{locale.t("dashboard.emptyClasses")}</p> }.into_any()
                } else {
                    view! {
                        <ul>
                            {classes
                                .get()
                                .into_iter()
                                .map(|class| {
                                    view! {
                                        <li>
                                            <A href=format!(
                                                "/dashboard/class/{}",
                                                class.id,
                                            )>{class.name.clone()}</A>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }}
        </section>

        {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
    }
}
