//! Class detail: core data plus document downloads. Classes carry no player
//! roster and no shipment deferral.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;

use crate::core::api::Class;
use crate::ui::auth::use_auth_context;
use crate::ui::locale::use_locale_context;

use super::parse_id_param;

const CLASS_DOCUMENTS: [(&str, &str); 2] = [
    ("confirmation", "detail.docConfirmation"),
    ("invoice", "detail.docInvoice"),
];

#[component]
pub fn ClassDetailPage() -> impl IntoView {
    let auth = use_auth_context();
    let locale = use_locale_context();
    let class_id = parse_id_param();

    let class = RwSignal::new(None::<Class>);
    let error = RwSignal::new(None::<String>);

    {
        let api = auth.api.clone();
        Effect::new(move |_| {
            let Some(id) = class_id.get() else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                match api.class(id).await {
                    Ok(loaded) => class.set(Some(loaded)),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        });
    }

    let download = {
        let api = auth.api.clone();
        move |doc_type: &'static str| {
            let Some(id) = class_id.get_untracked() else {
                return;
            };
            let reference = class
                .with_untracked(|c| c.as_ref().map(|c| c.name.clone()))
                .unwrap_or_else(|| id.to_string());
            let api = api.clone();
            spawn_local(async move {
                match api.class_document(id, doc_type, &reference).await {
                    Ok(handle) => {
                        handle.trigger_download(&format!("{reference}-{doc_type}.pdf"));
                        handle.revoke();
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        }
    };

    view! {
        <Title text=move || locale.t("nav.classDetail")/>
        <h1>{move || {
            class.get().map(|c| c.name).unwrap_or_else(|| locale.t("common.loading"))
        }}</h1>

        {move || {
            class
                .get()
                .map(|c| {
                    view! {
                        <dl class="class-facts">
                            <dt>{locale.t("form.location")}</dt>
                            <dd>{c.location.unwrap_or_default()}</dd>
                            <dt>{locale.t("form.organization")}</dt>
                            <dd>{c.organization.unwrap_or_default()}</dd>
                        </dl>
                    }
                })
        }}

        <section class="documents">
            <h2>{move || locale.t("detail.documents")}</h2>
            {CLASS_DOCUMENTS
                .iter()
                .map(|&(doc_type, label_key)| {
                    let download = download.clone();
                    view! {
                        <button type="button" on:click=move |_| download(doc_type)>
                            {move || locale.t(label_key)}
                        </button>
                    }
                })
                .collect_view()}
        </section>

        {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
    }
}
