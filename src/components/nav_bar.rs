//! Navigation Bar Component
//!
//! One tab per page the signed-in user can open.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();

    let pages = Memo::new(move |_| ctx.user().map(|u| u.accessible_pages()).unwrap_or_default());

    view! {
        <nav class="nav-bar">
            <For
                each=move || pages.get()
                key=|page| page.key()
                children=move |page| {
                    let tab_class = move || {
                        if ctx.page.get() == page { "nav-tab active" } else { "nav-tab" }
                    };
                    view! {
                        <button class=tab_class on:click=move |_| ctx.navigate(page)>
                            {page.title()}
                        </button>
                    }
                }
            />
        </nav>
    }
}
