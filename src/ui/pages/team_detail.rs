//! Team detail: roster editing, shipment deferral and document downloads.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;

use crate::core::api::{Player, Team};
use crate::ui::auth::use_auth_context;
use crate::ui::locale::use_locale_context;

use super::parse_id_param;

/// Document types the backend renders for a team, with their label keys.
const TEAM_DOCUMENTS: [(&str, &str); 2] = [
    ("confirmation", "detail.docConfirmation"),
    ("invoice", "detail.docInvoice"),
];

#[component]
pub fn TeamDetailPage() -> impl IntoView {
    let auth = use_auth_context();
    let locale = use_locale_context();
    let team_id = parse_id_param();

    let team = RwSignal::new(None::<Team>);
    let players = RwSignal::new(Vec::<Player>::new());
    let deferral = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    {
        let api = auth.api.clone();
        Effect::new(move |_| {
            let Some(id) = team_id.get() else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                match api.team(id).await {
                    Ok(loaded) => {
                        players.set(loaded.players.clone());
                        deferral.set(
                            loaded
                                .versandaufschub
                                .map(|d| d.to_string())
                                .unwrap_or_default(),
                        );
                        team.set(Some(loaded));
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        });
    }

    let save_roster = {
        let api = auth.api.clone();
        move |_| {
            let Some(id) = team_id.get_untracked() else {
                return;
            };
            let api = api.clone();
            let roster = players.get_untracked();
            spawn_local(async move {
                if let Err(e) = api.update_players(id, &roster).await {
                    error.set(Some(e.to_string()));
                }
            });
        }
    };

    let save_deferral = {
        let api = auth.api.clone();
        move |_| {
            let Some(id) = team_id.get_untracked() else {
                return;
            };
            let raw = deferral.get_untracked();
            let date = if raw.is_empty() {
                None
            } else {
                match raw.parse::<NaiveDate>() {
                    Ok(date) => Some(date),
                    Err(_) => {
                        error.set(Some(locale.t("common.error")));
                        return;
                    }
                }
            };
            let api = api.clone();
            spawn_local(async move {
                if let Err(e) = api.update_shipment_deferral(id, date).await {
                    error.set(Some(e.to_string()));
                }
            });
        }
    };

    let download = {
        let api = auth.api.clone();
        move |doc_type: &'static str| {
            let Some(id) = team_id.get_untracked() else {
                return;
            };
            let reference = team
                .with_untracked(|t| t.as_ref().map(|t| t.name.clone()))
                .unwrap_or_else(|| id.to_string());
            let api = api.clone();
            spawn_local(async move {
                match api.team_document(id, doc_type, &reference).await {
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
        <Title text=move || locale.t("nav.teamDetail")/>
        <h1>{move || {
            team.get().map(|t| t.name).unwrap_or_else(|| locale.t("common.loading"))
        }}</h1>

        <section class="roster">
            <h2>{move || locale.t("team.players")}</h2>
            <table>
                <thead>
                    <tr>
                        <th>{move || locale.t("team.firstname")}</th>
                        <th>{move || locale.t("team.lastname")}</th>
                        <th>{move || locale.t("team.gender")}</th>
                        <th>{move || locale.t("team.birthday")}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        players
                            .get()
                            .into_iter()
                            .enumerate()
                            .map(|(i, player)| {
                                view! {
                                    <tr>
                                        <td>
                                            <input
                                                type="text"
                                                prop:value=player.firstname.clone()
                                                on:input=move |ev| {
                                                    players
                                                        .update(|list| {
                                                            if let Some(p) = list.get_mut(i) {
                                                                p.firstname = event_target_value(&ev);
                                                            }
                                                        })
                                                }
                                            />
                                        </td>
                                        <td>
                                            <input
                                                type="text"
                                                prop:value=player.name.clone()
                                                on:input=move |ev| {
                                                    players
                                                        .update(|list| {
                                                            if let Some(p) = list.get_mut(i) {
                                                                p.name = event_target_value(&ev);
                                                            }
                                                        })
                                                }
                                            />
                                        </td>
                                        <td>
                                            <input
                                                type="text"
                                                prop:value=player.gender.clone()
                                                on:input=move |ev| {
                                                    players
                                                        .update(|list| {
                                                            if let Some(p) = list.get_mut(i) {
                                                                p.gender = event_target_value(&ev);
                                                            }
                                                        })
                                                }
                                            />
                                        </td>
                                        <td>
                                            <input
                                                type="date"
                                                prop:value=player
                                                    .birthday
                                                    .map(|d| d.to_string())
                                                    .unwrap_or_default()
                                                on:input=move |ev| {
                                                    players
                                                        .update(|list| {
                                                            if let Some(p) = list.get_mut(i) {
                                                                p.birthday = event_target_value(&ev).parse().ok();
                                                            }
                                                        })
                                                }
                                            />
                                        </td>
                                        <td>
                                            <button
                                                type="button"
                                                on:click=move |_| {
                                                    players
                                                        .update(|list| {
                                                            if i < list.len() {
                                                                list.remove(i);
                                                            }
                                                        })
                                                }
                                            >
                                                {locale.t("team.remove")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <button
                type="button"
                on:click=move |_| {
                    players
                        .update(|list| {
                            list.push(Player {
                                firstname: String::new(),
                                name: String::new(),
                                gender: String::new(),
                                birthday: None,
                            })
                        })
                }
            >
                {move || locale.t("team.addPlayer")}
            </button>
            <button type="button" on:click=save_roster>
                {move || locale.t("team.saveRoster")}
            </button>
        </section>

        <section class="shipment">
            <h2>{move || locale.t("team.shipmentDeferral")}</h2>
            <input
                type="date"
                prop:value=move || deferral.get()
                on:input=move |ev| deferral.set(event_target_value(&ev))
            />
            <button type="button" on:click=save_deferral>
                {move || locale.t("team.saveShipmentDeferral")}
            </button>
        </section>

        <section class="documents">
            <h2>{move || locale.t("detail.documents")}</h2>
            {TEAM_DOCUMENTS
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
