//! Dashboard Page
//!
//! Totals and breakdowns over the cached collections. The collections themselves are
//! refreshed by the app shell whenever the reload trigger fires.

use leptos::prelude::*;
use tracker_domain::{
    format_amount, format_date, renewal_candidates, summarize, DashboardSummary, LoanStage,
    Page, SubscriptionStatus,
};

use crate::components::{Bar, BarChart};
use crate::config;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::time;

fn status_color(status: SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Pending => "#95a5a6",
        SubscriptionStatus::Approved => "#2980b9",
        SubscriptionStatus::Paid => "#27ae60",
        SubscriptionStatus::Rejected => "#e74c3c",
    }
}

fn stage_color(stage: LoanStage) -> &'static str {
    match stage {
        LoanStage::Active => "#2980b9",
        LoanStage::Settled => "#27ae60",
        _ => "#f39c12",
    }
}

#[component]
fn StatCard(#[prop(into)] label: String, #[prop(into)] value: Signal<String>, page: Page) -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <button class="stat-card" on:click=move |_| ctx.navigate(page)>
            <span class="stat-value">{move || value.get()}</span>
            <span class="stat-label">{label}</span>
        </button>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_app_store();

    let summary = Memo::new(move |_| {
        let cfg = config::current();
        store.documents().with(|docs| {
            store.subscriptions().with(|subs| {
                store.loans().with(|loans| {
                    summarize(docs, subs, loans, time::today(), cfg.renewal_window_days, cfg.expiry_window_days)
                })
            })
        })
    });

    let count = move |f: fn(&DashboardSummary) -> usize| Signal::derive(move || f(&summary.get()).to_string());

    let monthly_cost = move || {
        let cost = summary.get().monthly_cost;
        format!("₹ {}", format_amount(cost.total))
    };
    let unparsed_note = move || {
        let unparsed = summary.get().monthly_cost.unparsed;
        (unparsed > 0).then(|| format!("{} approved subscription(s) without a readable price", unparsed))
    };

    let status_bars = Signal::derive(move || {
        summary
            .get()
            .subscription_status
            .into_iter()
            .map(|(status, n)| Bar::new(status.as_str(), n, status_color(status)))
            .collect::<Vec<_>>()
    });
    let expiry_bars = Signal::derive(move || {
        summary
            .get()
            .expiry
            .into_iter()
            .map(|(bucket, n)| Bar::new(bucket.as_str(), n, bucket.color()))
            .collect::<Vec<_>>()
    });
    let loan_bars = Signal::derive(move || {
        summary
            .get()
            .loan_stages
            .into_iter()
            .map(|(stage, n)| Bar::new(stage.as_str(), n, stage_color(stage)))
            .collect::<Vec<_>>()
    });

    let upcoming = move || {
        let window = config::current().renewal_window_days;
        store.subscriptions().with(|subs| renewal_candidates(subs, time::today(), window))
    };

    view! {
        <section class="page dashboard">
            <h2>"Dashboard"</h2>
            <div class="stat-grid">
                <StatCard label="Documents" value=count(|s| s.document_count) page=Page::Documents />
                <StatCard label="Subscriptions" value=count(|s| s.subscription_count) page=Page::Subscriptions />
                <StatCard label="Renewals due" value=count(|s| s.renewals_due) page=Page::Renewals />
                <StatCard label="Loans" value=count(|s| s.loan_count) page=Page::Loans />
            </div>

            <div class="cost-row">
                <div class="cost-card">
                    <span class="stat-label">"Estimated monthly subscription cost"</span>
                    <span class="stat-value">{monthly_cost}</span>
                    <span class="cost-note">{unparsed_note}</span>
                </div>
                <div class="cost-card">
                    <span class="stat-label">"Outstanding loan amount"</span>
                    <span class="stat-value">
                        {move || format!("₹ {}", format_amount(summary.get().outstanding_loan_amount))}
                    </span>
                </div>
            </div>

            <div class="chart-grid">
                <BarChart title="Subscriptions by status" bars=status_bars />
                <BarChart title="Document expiry" bars=expiry_bars />
                <BarChart title="Loans by stage" bars=loan_bars />
            </div>

            <h3>"Upcoming renewals"</h3>
            <Show
                when=move || !upcoming().is_empty()
                fallback=|| view! { <p class="empty">"Nothing due in the renewal window."</p> }
            >
                <ul class="upcoming-list">
                    {move || upcoming().into_iter().map(|sub| view! {
                        <li>
                            <span class="serial">{sub.serial.clone()}</span>
                            " "{sub.name.clone()}" · "{sub.company.clone()}
                            <span class="due-date">{format_date(sub.planned_renewal)}</span>
                        </li>
                    }).collect_view()}
                </ul>
            </Show>
        </section>
    }
}
