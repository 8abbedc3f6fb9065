//! Renewals Page
//!
//! Subscriptions whose planned renewal falls within the renewal window, soonest first.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracker_domain::{days_until, format_date, renewal_candidates, RenewSubscriptionRequest, Subscription};

use super::forms::{date_value, input_date};
use crate::api;
use crate::components::Modal;
use crate::config;
use crate::context::use_app_context;
use crate::refresh;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::time;

fn due_label(days: i64) -> String {
    match days {
        d if d < 0 => format!("{} day(s) overdue", -d),
        0 => "due today".to_string(),
        d => format!("in {} day(s)", d),
    }
}

#[component]
pub fn RenewalsPage() -> impl IntoView {
    let store = use_app_store();
    let renewing = RwSignal::new(None::<Subscription>);
    let window = config::current().renewal_window_days;

    let due = Memo::new(move |_| store.subscriptions().with(|subs| renewal_candidates(subs, time::today(), window)));

    view! {
        <section class="page renewals">
            <h2>"Renewals due"</h2>
            <p class="muted">{format!("Subscriptions planned for renewal within {} days, including overdue ones.", window)}</p>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Serial"</th>
                        <th>"Subscription"</th>
                        <th>"Company"</th>
                        <th>"Planned renewal"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || due.get()
                        key=|sub| sub.clone()
                        children=move |sub| {
                            let days = sub.planned_renewal.map(|d| days_until(d, time::today())).unwrap_or(0);
                            let target = sub.clone();
                            view! {
                                <tr class=if days < 0 { "overdue" } else { "" }>
                                    <td class="serial">{sub.serial.clone()}</td>
                                    <td>{sub.name.clone()}</td>
                                    <td>{sub.company.clone()}</td>
                                    <td>{format_date(sub.planned_renewal)}" · "{due_label(days)}</td>
                                    <td><span class=sub.status.css_class()>{sub.status.as_str()}</span></td>
                                    <td>
                                        <button class="btn small" on:click=move |_| renewing.set(Some(target.clone()))>"Renew"</button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Show when=move || due.with(Vec::is_empty)>
                <p class="empty">"Nothing due for renewal."</p>
            </Show>
            {move || renewing.get().map(|sub| view! {
                <RenewSubscriptionDialog sub=sub on_close=move |_: ()| renewing.set(None) />
            })}
        </section>
    }
}

#[component]
fn RenewSubscriptionDialog(sub: Subscription, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let proposed = RenewSubscriptionRequest::next_period(&sub, time::today());

    let start = RwSignal::new(date_value(proposed.as_ref().map(|p| p.start_date)));
    let end = RwSignal::new(date_value(proposed.as_ref().map(|p| p.end_date)));
    let price = RwSignal::new(sub.price.clone());
    let id = sub.id;
    let serial = sub.serial.clone();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (Some(start_date), Some(end_date)) = (input_date(&start.get()), input_date(&end.get())) else {
            ctx.report_error("RENEWALS", "Pick the new start and end dates");
            return;
        };
        if end_date < start_date {
            ctx.report_error("RENEWALS", "End date is before start date");
            return;
        }
        let request = RenewSubscriptionRequest { start_date, end_date, price: price.get().trim().to_string() };
        let serial = serial.clone();
        spawn_local(async move {
            match api::renew_subscription(id, &request).await {
                Ok(()) => {
                    on_close.run(());
                    ctx.success(format!("Renewed {} until {}", serial, format_date(Some(end_date))));
                    if let Err(e) = refresh::refresh_subscriptions(store).await {
                        ctx.report_api_error("RENEWALS", e);
                    }
                }
                Err(e) => ctx.report_api_error("RENEWALS", e),
            }
        });
    };

    view! {
        <Modal title=format!("Renew {}", sub.serial) on_close=on_close>
            <form class="entity-form" on:submit=on_submit>
                <p>{format!("{} · {} · {}", sub.name, sub.company, sub.frequency_label())}</p>
                <label>
                    "New start date"
                    <input type="date" prop:value=move || start.get() on:input=move |ev| start.set(event_target_value(&ev)) />
                </label>
                <label>
                    "New end date"
                    <input type="date" prop:value=move || end.get() on:input=move |ev| end.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Price"
                    <input type="text" prop:value=move || price.get() on:input=move |ev| price.set(event_target_value(&ev)) />
                </label>
                <div class="form-actions">
                    <button type="submit" class="btn primary">"Renew"</button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_label() {
        assert_eq!(due_label(-3), "3 day(s) overdue");
        assert_eq!(due_label(0), "due today");
        assert_eq!(due_label(5), "in 5 day(s)");
    }
}
