//! Subscriptions Page
//!
//! Request, approve and pay for subscriptions. The status column is derived from the
//! approval and payment markers the backend returns; nothing here sets it directly.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracker_domain::{
    distinct_values, format_date, ApprovalRequest, Frequency, MasterField, PaymentRequest,
    Subscription, SubscriptionDraft, SubscriptionStatus,
};

use super::forms::{date_value, input_date};
use crate::api;
use crate::components::{FilePicker, MasterAutocomplete, Modal};
use crate::context::{use_app_context, AppContext};
use crate::refresh;
use crate::store::{use_app_store, AppStateStoreFields, AppStore};
use crate::time;

#[derive(Debug, Clone, PartialEq)]
enum SubscriptionDialog {
    Add,
    Decide(Subscription),
    Pay(Subscription),
}

/// Refetch after a successful change so the derived status reflects the backend
async fn after_change(ctx: AppContext, store: AppStore, message: String) {
    ctx.success(message);
    if let Err(e) = refresh::refresh_subscriptions(store).await {
        ctx.report_api_error("SUBSCRIPTIONS", e);
    }
}

#[component]
pub fn SubscriptionsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let status_filter = RwSignal::new(String::new());
    let dialog = RwSignal::new(None::<SubscriptionDialog>);
    let close = Callback::new(move |_: ()| dialog.set(None));

    let visible = Memo::new(move |_| {
        let wanted = status_filter.get();
        store.subscriptions().with(|subs| {
            subs.iter()
                .filter(|s| wanted.is_empty() || s.status.as_str() == wanted)
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    view! {
        <section class="page subscriptions">
            <div class="page-header">
                <h2>"Subscriptions"</h2>
                <button class="btn primary" on:click=move |_| dialog.set(Some(SubscriptionDialog::Add))>"+ New request"</button>
            </div>

            <div class="filter-bar">
                <select on:change=move |ev| status_filter.set(event_target_value(&ev))>
                    <option value="">"All statuses"</option>
                    {SubscriptionStatus::ALL.into_iter().map(|s| view! {
                        <option value=s.as_str()>{s.as_str()}</option>
                    }).collect_view()}
                </select>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Serial"</th>
                        <th>"Subscription"</th>
                        <th>"Company"</th>
                        <th>"Subscriber"</th>
                        <th>"Price"</th>
                        <th>"Frequency"</th>
                        <th>"Period"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || visible.get()
                        key=|sub| sub.clone()
                        children=move |sub| {
                            let actions = sub.clone();
                            view! {
                                <tr>
                                    <td class="serial">{sub.serial.clone()}</td>
                                    <td>{sub.name.clone()}</td>
                                    <td>{sub.company.clone()}</td>
                                    <td>{sub.subscriber.clone()}</td>
                                    <td>{sub.price.clone()}</td>
                                    <td>{sub.frequency_label()}</td>
                                    <td>{format!("{} – {}", format_date(sub.start_date), format_date(sub.end_date))}</td>
                                    <td>
                                        <span class=sub.status.css_class() title=sub.remarks.clone().unwrap_or_default()>
                                            {sub.status.as_str()}
                                        </span>
                                    </td>
                                    <td class="row-actions">
                                        {match actions.status {
                                            SubscriptionStatus::Pending if ctx.is_admin() => view! {
                                                <button class="btn small" on:click=move |_| dialog.set(Some(SubscriptionDialog::Decide(actions.clone())))>
                                                    "Review"
                                                </button>
                                            }.into_any(),
                                            SubscriptionStatus::Approved => view! {
                                                <button class="btn small" on:click=move |_| dialog.set(Some(SubscriptionDialog::Pay(actions.clone())))>
                                                    "Record payment"
                                                </button>
                                            }.into_any(),
                                            _ => ().into_any(),
                                        }}
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Show when=move || visible.with(Vec::is_empty)>
                <p class="empty">"No subscriptions."</p>
            </Show>

            {move || dialog.get().map(|open| match open {
                SubscriptionDialog::Add => view! { <SubscriptionForm on_close=close /> }.into_any(),
                SubscriptionDialog::Decide(sub) => view! { <DecisionDialog sub=sub on_close=close /> }.into_any(),
                SubscriptionDialog::Pay(sub) => view! { <PaymentDialog sub=sub on_close=close /> }.into_any(),
            })}
        </section>
    }
}

#[component]
fn SubscriptionForm(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let company = RwSignal::new(String::new());
    let subscriber = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let frequency = RwSignal::new(Frequency::Yearly.as_str().to_string());
    let purpose = RwSignal::new(String::new());
    let start = RwSignal::new(date_value(Some(time::today())));
    let end = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let companies = Signal::derive(move || store.master().with(|m| distinct_values(m, MasterField::CompanyName)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = SubscriptionDraft {
            company_name: company.get().trim().to_string(),
            subscriber_name: subscriber.get().trim().to_string(),
            subscription_name: name.get().trim().to_string(),
            price: price.get().trim().to_string(),
            frequency: frequency.get(),
            purpose: purpose.get().trim().to_string(),
            start_date: input_date(&start.get()),
            end_date: input_date(&end.get()),
        };
        if let Err(e) = draft.validate() {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_error.set(None);
        spawn_local(async move {
            match api::create_subscription(&draft).await {
                Ok(()) => {
                    on_close.run(());
                    after_change(ctx, store, format!("Requested {}", draft.subscription_name)).await;
                }
                Err(e) => ctx.report_api_error("SUBSCRIPTIONS", e),
            }
        });
    };

    let text_input = move |signal: RwSignal<String>, placeholder: &'static str| view! {
        <input
            type="text"
            placeholder=placeholder
            prop:value=move || signal.get()
            on:input=move |ev| signal.set(event_target_value(&ev))
        />
    };

    view! {
        <Modal title="New subscription request" on_close=on_close>
            <form class="entity-form" on:submit=on_submit>
                <label>"Subscription" {text_input(name, "e.g. Tally Prime")}</label>
                <label>"Company" <MasterAutocomplete values=companies value=company /></label>
                <label>"Subscriber" {text_input(subscriber, "Person or team")}</label>
                <label>"Price" {text_input(price, "e.g. ₹18,000")}</label>
                <label>
                    "Frequency"
                    <select on:change=move |ev| frequency.set(event_target_value(&ev))>
                        {Frequency::ALL.into_iter().map(|f| view! {
                            <option value=f.as_str() selected=move || frequency.get() == f.as_str()>{f.as_str()}</option>
                        }).collect_view()}
                    </select>
                </label>
                <label>"Purpose" {text_input(purpose, "")}</label>
                <label>
                    "Start date"
                    <input type="date" prop:value=move || start.get() on:input=move |ev| start.set(event_target_value(&ev)) />
                </label>
                <label>
                    "End date"
                    <input type="date" prop:value=move || end.get() on:input=move |ev| end.set(event_target_value(&ev)) />
                </label>
                {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                <div class="form-actions">
                    <button type="submit" class="btn primary">"Submit request"</button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
fn DecisionDialog(sub: Subscription, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let remarks = RwSignal::new(String::new());
    let id = sub.id;
    let serial = sub.serial.clone();

    let decide = move |approved: bool| {
        let request = ApprovalRequest { approved, remarks: remarks.get().trim().to_string() };
        if !approved && request.remarks.is_empty() {
            ctx.report_error("APPROVAL", "Give a reason for the rejection");
            return;
        }
        let serial = serial.clone();
        spawn_local(async move {
            match api::decide_subscription(id, &request).await {
                Ok(()) => {
                    on_close.run(());
                    let verb = if approved { "Approved" } else { "Rejected" };
                    log::info!("[APPROVAL] {} {}", verb, serial);
                    after_change(ctx, store, format!("{} {}", verb, serial)).await;
                }
                Err(e) => ctx.report_api_error("APPROVAL", e),
            }
        });
    };
    let reject = decide.clone();

    view! {
        <Modal title=format!("Review {}", sub.serial) on_close=on_close>
            <div class="entity-form">
                <p>{format!("{} for {} at {} ({})", sub.name, sub.company, sub.price, sub.frequency_label())}</p>
                <p class="muted">{sub.purpose.clone()}</p>
                <label>
                    "Remarks"
                    <textarea
                        prop:value=move || remarks.get()
                        on:input=move |ev| remarks.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <div class="form-actions">
                    <button class="btn danger" on:click=move |_| reject(false)>"Reject"</button>
                    <button class="btn primary" on:click=move |_| decide(true)>"Approve"</button>
                </div>
            </div>
        </Modal>
    }
}

#[component]
fn PaymentDialog(sub: Subscription, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let paid_on = RwSignal::new(date_value(Some(time::today())));
    let amount = RwSignal::new(sub.price.clone());
    let reference = RwSignal::new(String::new());
    let invoice = RwSignal::new(None::<String>);
    let id = sub.id;
    let serial = sub.serial.clone();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(payment_date) = input_date(&paid_on.get()) else {
            ctx.report_error("PAYMENT", "Pick the payment date");
            return;
        };
        let request = PaymentRequest {
            payment_date,
            amount_paid: amount.get().trim().to_string(),
            reference: reference.get().trim().to_string(),
            invoice: invoice.get(),
        };
        let serial = serial.clone();
        spawn_local(async move {
            match api::pay_subscription(id, &request).await {
                Ok(()) => {
                    on_close.run(());
                    after_change(ctx, store, format!("Payment recorded for {}", serial)).await;
                }
                Err(e) => ctx.report_api_error("PAYMENT", e),
            }
        });
    };

    view! {
        <Modal title=format!("Payment for {}", sub.serial) on_close=on_close>
            <form class="entity-form" on:submit=on_submit>
                <label>
                    "Payment date"
                    <input type="date" prop:value=move || paid_on.get() on:input=move |ev| paid_on.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Amount paid"
                    <input type="text" prop:value=move || amount.get() on:input=move |ev| amount.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Transaction reference"
                    <input type="text" prop:value=move || reference.get() on:input=move |ev| reference.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Invoice"
                    <FilePicker on_change={move |url: Option<String>| invoice.set(url)} />
                </label>
                <div class="form-actions">
                    <button type="submit" class="btn primary">"Save payment"</button>
                </div>
            </form>
        </Modal>
    }
}
