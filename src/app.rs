//! Corporate Tracker App
//!
//! Login gate, header and navigation, and the current page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use tracker_domain::Page;

use crate::api::ApiError;
use crate::components::{Header, NavBar, ToastList};
use crate::context::AppContext;
use crate::pages::{
    DashboardPage, DocumentsPage, HistoryPage, LoansPage, LoginPage, MasterPage, RenewalsPage,
    SettingsPage, SubscriptionsPage,
};
use crate::refresh;
use crate::session;
use crate::store::{self, AppState};

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(session::load());
    let store = Store::new(AppState::hydrate());

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    // Signing out, or an expired token, drops cached data
    Effect::new(move |was_signed_in: Option<bool>| {
        let signed_in = ctx.session.with(Option::is_some);
        if was_signed_in == Some(true) && !signed_in {
            log::info!("[APP] Signed out, clearing cache");
            store::clear(&store);
        }
        signed_in
    });

    // Reload every collection when signed in and the trigger fires
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        if ctx.session.with(Option::is_none) {
            return;
        }
        log::info!("[APP] Reloading collections, trigger={}", trigger);
        spawn_local(async move {
            let failures = refresh::reload_all(store).await;
            if failures.iter().any(|(_, e)| *e == ApiError::Unauthorized) {
                ctx.report_api_error("APP", ApiError::Unauthorized);
            } else if !failures.is_empty() {
                let names: Vec<&str> = failures.iter().map(|(name, _)| *name).collect();
                ctx.report_error("APP", format!("Could not refresh {}; showing saved data", names.join(", ")));
            }
        });
    });

    let current_page = move || {
        let page = ctx.page.get();
        let allowed = ctx.user().map(|u| u.can_access(page)).unwrap_or(false);
        let page = if allowed { page } else { Page::Dashboard };
        match page {
            Page::Dashboard => view! { <DashboardPage /> }.into_any(),
            Page::Documents => view! { <DocumentsPage /> }.into_any(),
            Page::Subscriptions => view! { <SubscriptionsPage /> }.into_any(),
            Page::Renewals => view! { <RenewalsPage /> }.into_any(),
            Page::Loans => view! { <LoansPage /> }.into_any(),
            Page::Master => view! { <MasterPage /> }.into_any(),
            Page::History => view! { <HistoryPage /> }.into_any(),
            Page::Settings => view! { <SettingsPage /> }.into_any(),
        }
    };

    view! {
        <Show
            when=move || ctx.session.with(Option::is_some)
            fallback=|| view! { <LoginPage /> }
        >
            <div class="app-layout">
                <Header />
                <NavBar />
                <main class="main-content">{current_page}</main>
            </div>
        </Show>
        <ToastList />
    }
}
