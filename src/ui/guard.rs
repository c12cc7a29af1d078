//! Component wrapper around the navigation guard.
//!
//! Re-runs the check on every path change; while the decision is pending the
//! protected subtree is withheld.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};

use crate::core::auth::GuardOutcome;
use crate::core::routes;
use crate::ui::auth::use_auth_context;
use crate::ui::locale::use_locale_context;

#[component]
pub fn RequireCoach(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth_context();
    let locale = use_locale_context();
    let location = use_location();
    let outcome = RwSignal::new(None::<GuardOutcome>);

    let guard = auth.guard.clone();
    Effect::new(move |_| {
        let path = location.pathname.get();
        let guard = guard.clone();
        outcome.set(None);
        spawn_local(async move {
            let decision = guard.check(routes::meta_for(&path)).await;
            outcome.set(Some(decision));
        });
    });

    Effect::new(move |_| match outcome.get() {
        Some(GuardOutcome::Login(redirect)) => redirect.follow(),
        Some(GuardOutcome::Forbidden { redirect_to }) => {
            let navigate = use_navigate();
            navigate(&redirect_to, Default::default());
        }
        _ => {}
    });

    move || match outcome.get() {
        Some(GuardOutcome::Allow) => children().into_any(),
        Some(_) => view! {
            <p class="guard-note">{locale.t("common.redirecting")}</p>
        }
        .into_any(),
        None => view! {
            <p class="guard-note">{locale.t("common.checkingSession")}</p>
        }
        .into_any(),
    }
}
