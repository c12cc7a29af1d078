//! Shared enrollment form for all three enrollment paths.
//!
//! The founders paths differ only in the target endpoint; the future path
//! additionally carries the group code and a pupil count. A checked
//! address-bound voucher forces the invoice address and locks its select.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::api::{Address, EnrollmentRequest, FutureEnrollmentRequest, VoucherKind, VoucherValidation};
use crate::core::enrollment::{EnrollmentKind, FUTURE_PUPIL_OPTIONS};
use crate::ui::auth::use_auth_context;
use crate::ui::locale::use_locale_context;

#[component]
pub fn EnrollmentForm(
    kind: EnrollmentKind,
    #[prop(optional_no_strip)] program: Option<i64>,
    #[prop(optional_no_strip)] group: Option<String>,
) -> impl IntoView {
    let auth = use_auth_context();
    let locale = use_locale_context();

    let name = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let organization = RwSignal::new(String::new());
    let voucher_code = RwSignal::new(String::new());
    let voucher = RwSignal::new(None::<VoucherValidation>);
    let addresses = RwSignal::new(Vec::<Address>::new());
    let delivery = RwSignal::new(None::<i64>);
    let invoice = RwSignal::new(None::<i64>);
    let pupils = RwSignal::new(FUTURE_PUPIL_OPTIONS[0]);
    let submitting = RwSignal::new(false);
    let submitted = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    {
        let api = auth.api.clone();
        Effect::new(move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.addresses().await {
                    Ok(list) => addresses.set(list),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        });
    }

    // The forced address wins over any manual pick, now and on later checks.
    let invoice_locked = move || {
        voucher
            .get()
            .is_some_and(|v| v.voucher_type == Some(VoucherKind::InvoiceAddressBound))
    };

    let check_voucher = {
        let api = auth.api.clone();
        move |_| {
            let code = voucher_code.get_untracked().trim().to_string();
            if code.is_empty() {
                voucher.set(None);
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match api.validate_voucher(&code, program).await {
                    Ok(result) => {
                        if let Some(id) = result.invoice_address_id {
                            invoice.set(Some(id));
                        }
                        voucher.set(Some(result));
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        }
    };

    let submit = {
        let api = auth.api.clone();
        let group = group.clone();
        move |_| {
            if submitting.get_untracked() {
                return;
            }
            let (Some(delivery_address), Some(invoice_address)) =
                (delivery.get_untracked(), invoice.get_untracked())
            else {
                error.set(Some(locale.t("common.error")));
                return;
            };
            let code = voucher_code.get_untracked().trim().to_string();
            let request = EnrollmentRequest {
                name: name.get_untracked().trim().to_string(),
                location: location.get_untracked().trim().to_string(),
                organization: organization.get_untracked().trim().to_string(),
                voucher: (!code.is_empty()).then_some(code),
                delivery_address,
                invoice_address,
            };
            if request.name.is_empty() {
                error.set(Some(locale.t("common.error")));
                return;
            }

            submitting.set(true);
            error.set(None);
            let api = api.clone();
            let group = group.clone();
            spawn_local(async move {
                let result = match kind {
                    EnrollmentKind::Team => api.enroll_team(&request).await.map(|_| ()),
                    EnrollmentKind::Class => api.enroll_class(&request).await.map(|_| ()),
                    EnrollmentKind::Future => {
                        api.enroll_future(&FutureEnrollmentRequest {
                            enrollment: request,
                            group: group.unwrap_or_default(),
                            pupils: pupils.get_untracked(),
                        })
                        .await
                        .map(|_| ())
                    }
                };
                match result {
                    Ok(()) => submitted.set(true),
                    Err(e) => error.set(Some(e.to_string())),
                }
                submitting.set(false);
            });
        }
    };

    let address_options = move |selected: Option<i64>| {
        addresses
            .get()
            .into_iter()
            .map(|a| {
                view! {
                    <option value=a.id.to_string() selected=selected == Some(a.id)>
                        {a.name.clone()}
                    </option>
                }
            })
            .collect_view()
    };

    view! {
        <form class="enroll-form" on:submit=|ev| ev.prevent_default()>
            <label>
                {move || locale.t("form.name")}
                <input
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
            </label>
            <label>
                {move || locale.t("form.location")}
                <input
                    type="text"
                    prop:value=move || location.get()
                    on:input=move |ev| location.set(event_target_value(&ev))
                />
            </label>
            <label>
                {move || locale.t("form.organization")}
                <input
                    type="text"
                    prop:value=move || organization.get()
                    on:input=move |ev| organization.set(event_target_value(&ev))
                />
            </label>

            <label>
                {move || locale.t("form.voucher")}
                <input
                    type="text"
                    prop:value=move || voucher_code.get()
                    on:input=move |ev| voucher_code.set(event_target_value(&ev))
                />
            </label>
            <button type="button" on:click=check_voucher>
                {move || locale.t("form.checkVoucher")}
            </button>
            {move || {
                voucher
                    .get()
                    .map(|result| {
                        if !result.valid {
                            view! {
                                <p class="voucher-note invalid">
                                    {locale.t("form.voucherInvalid")} " " {result.message}
                                </p>
                            }
                                .into_any()
                        } else if let Some(name) = result.invoice_address_name {
                            view! {
                                <p class="voucher-note bound">
                                    {locale.t("form.voucherBoundAddress")} " " {name}
                                </p>
                            }
                                .into_any()
                        } else {
                            view! {
                                <p class="voucher-note valid">{locale.t("form.voucherValid")}</p>
                            }
                                .into_any()
                        }
                    })
            }}

            <label>
                {move || locale.t("form.deliveryAddress")}
                <select on:change=move |ev| delivery.set(event_target_value(&ev).parse().ok())>
                    <option value="">"—"</option>
                    {move || address_options(delivery.get())}
                </select>
            </label>
            <label>
                {move || locale.t("form.invoiceAddress")}
                <select
                    prop:disabled=invoice_locked
                    on:change=move |ev| invoice.set(event_target_value(&ev).parse().ok())
                >
                    <option value="">"—"</option>
                    {move || address_options(invoice.get())}
                </select>
            </label>

            {(kind == EnrollmentKind::Future)
                .then(|| {
                    view! {
                        <label>
                            {move || locale.t("form.pupils")}
                            <select on:change=move |ev| {
                                if let Ok(count) = event_target_value(&ev).parse() {
                                    pupils.set(count);
                                }
                            }>
                                {FUTURE_PUPIL_OPTIONS
                                    .iter()
                                    .map(|count| {
                                        view! {
                                            <option
                                                value=count.to_string()
                                                selected=*count == FUTURE_PUPIL_OPTIONS[0]
                                            >
                                                {count.to_string()}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </label>
                    }
                })}

            <button type="button" prop:disabled=move || submitting.get() on:click=submit>
                {move || locale.t("form.submit")}
            </button>

            {move || {
                submitted
                    .get()
                    .then(|| view! { <p class="form-success">{locale.t("form.success")}</p> })
            }}
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
        </form>
    }
}
