//! History Page
//!
//! Shares and document renewals recorded in this browser, newest first.

use leptos::prelude::*;
use tracker_domain::format_date;

use crate::store::{use_app_store, AppStateStoreFields};

fn timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.with_timezone(&chrono::Local).format("%d %b %Y %H:%M").to_string()
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let store = use_app_store();

    let shares = move || {
        let mut list = store.share_history().get();
        list.reverse();
        list
    };
    let renewals = move || {
        let mut list = store.renewal_history().get();
        list.reverse();
        list
    };

    view! {
        <section class="page history">
            <h2>"History"</h2>

            <h3>"Shared"</h3>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"When"</th>
                        <th>"Record"</th>
                        <th>"Channel"</th>
                        <th>"Recipient"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || shares().into_iter().map(|record| view! {
                        <tr>
                            <td>{timestamp(record.shared_at)}</td>
                            <td class="serial">{format!("{} {}", record.kind.label(), record.serial)}</td>
                            <td>{record.channel.as_str()}</td>
                            <td>{record.recipient}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
            <Show when=move || store.share_history().with(Vec::is_empty)>
                <p class="empty">"Nothing shared yet."</p>
            </Show>

            <h3>"Renewed documents"</h3>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"When"</th>
                        <th>"Document"</th>
                        <th>"Renewal date"</th>
                        <th>"File"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || renewals().into_iter().map(|record| view! {
                        <tr>
                            <td>{timestamp(record.renewed_at)}</td>
                            <td class="serial">{record.serial}</td>
                            <td>{format!("{} → {}", format_date(record.old_date), format_date(Some(record.new_date)))}</td>
                            <td>
                                {match (record.old_file, record.new_file) {
                                    (old, Some(new)) => format!("{} → {}", old.unwrap_or_else(|| "-".into()), new),
                                    (Some(old), None) => format!("{} (kept)", old),
                                    (None, None) => "-".to_string(),
                                }}
                            </td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
            <Show when=move || store.renewal_history().with(Vec::is_empty)>
                <p class="empty">"No renewals recorded yet."</p>
            </Show>
        </section>
    }
}
