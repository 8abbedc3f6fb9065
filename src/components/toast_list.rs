//! Toast List Component

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ToastList() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toast-list">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class() on:click=move |_| ctx.dismiss(id)>
                            {toast.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
