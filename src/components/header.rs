//! Header Component
//!
//! App title, signed-in user and sign-out.

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use tracker_domain::format_date;

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

/// Shown next to the title; only a backend fetch moves it
fn synced_label(synced_at: Option<DateTime<Utc>>) -> String {
    match synced_at {
        Some(at) => format!("Synced {}", format_date(Some(at.date_naive()))),
        None => "Not synced yet".to_string(),
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let sign_out = move |_| ctx.sign_out();

    let user_label = move || {
        ctx.user()
            .map(|u| format!("{} · {}", u.username, u.role.as_str()))
            .unwrap_or_default()
    };

    view! {
        <header class="app-header">
            <div class="app-title">
                <span class="app-logo">"▣"</span>
                <span>"Corporate Tracker"</span>
            </div>
            <span class="cache-note" title="Last fetched from the server">
                {move || synced_label(store.synced_at().get())}
            </span>
            <div class="header-user">
                <span class="user-label">{user_label}</span>
                <button class="btn small" on:click=move |_| ctx.reload() title="Reload from server">"⟳"</button>
                <button class="btn small" on:click=sign_out>"Sign out"</button>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_synced_label() {
        assert_eq!(synced_label(None), "Not synced yet");
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        assert_eq!(synced_label(Some(at)), "Synced 18 Oct 2026");
    }
}
