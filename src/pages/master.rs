//! Master Data Page
//!
//! Company names, document types and categories offered by the typeahead fields.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracker_domain::{DocumentCategory, MasterEntry};

use crate::api;
use crate::context::use_app_context;
use crate::store::{self, use_app_store, AppStateStoreFields};

#[component]
pub fn MasterPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let company = RwSignal::new(String::new());
    let doc_type = RwSignal::new(String::new());
    let category = RwSignal::new(DocumentCategory::Company.as_str().to_string());
    let search = RwSignal::new(String::new());

    let visible = Memo::new(move |_| {
        let query = search.get().trim().to_lowercase();
        store.master().with(|entries| {
            entries
                .iter()
                .filter(|e| {
                    query.is_empty()
                        || e.company_name.to_lowercase().contains(&query)
                        || e.document_type.to_lowercase().contains(&query)
                })
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let entry = MasterEntry::new(&company.get(), &doc_type.get(), &category.get());
        if entry.company_name.is_empty() && entry.document_type.is_empty() {
            ctx.report_error("MASTER", "Enter a company name or a document type");
            return;
        }
        spawn_local(async move {
            match api::add_master(&entry).await {
                Ok(()) => {
                    let added = store::store_merge_master(&store, vec![entry]);
                    store::persist(&store);
                    if added > 0 {
                        ctx.success("Master entry added");
                    } else {
                        ctx.success("Entry already exists");
                    }
                    company.set(String::new());
                    doc_type.set(String::new());
                }
                Err(e) => ctx.report_api_error("MASTER", e),
            }
        });
    };

    view! {
        <section class="page master">
            <h2>"Master data"</h2>
            <form class="inline-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Company name"
                    prop:value=move || company.get()
                    on:input=move |ev| company.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Document type"
                    prop:value=move || doc_type.get()
                    on:input=move |ev| doc_type.set(event_target_value(&ev))
                />
                <select on:change=move |ev| category.set(event_target_value(&ev))>
                    {DocumentCategory::ALL.into_iter().map(|c| view! {
                        <option value=c.as_str() selected=move || category.get() == c.as_str()>{c.as_str()}</option>
                    }).collect_view()}
                </select>
                <button type="submit" class="btn primary">"Add"</button>
            </form>

            <div class="filter-bar">
                <input
                    type="search"
                    placeholder="Filter"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
            </div>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Company"</th>
                        <th>"Document type"</th>
                        <th>"Category"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || visible.get().into_iter().map(|entry| view! {
                        <tr>
                            <td>{entry.company_name}</td>
                            <td>{entry.document_type}</td>
                            <td>{entry.category}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </section>
    }
}
