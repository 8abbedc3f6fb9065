//! Document Form
//!
//! Add and edit dialog for documents. On success the document list is refetched, so
//! what the table shows is what the backend stored.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracker_domain::{distinct_values, Document, DocumentCategory, DocumentDraft, MasterField};

use super::forms::{date_value, input_date};
use crate::api;
use crate::components::{FilePicker, MasterAutocomplete, Modal};
use crate::context::use_app_context;
use crate::refresh;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn DocumentForm(
    /// Document being edited; `None` adds a new one
    editing: Option<Document>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let initial = editing.as_ref().map(DocumentDraft::from_document).unwrap_or_else(|| DocumentDraft {
        category: DocumentCategory::Company.as_str().to_string(),
        ..DocumentDraft::default()
    });
    let editing_id = editing.as_ref().map(|d| d.id);
    let current_file = editing.as_ref().and_then(|d| d.file_name().map(str::to_string));

    let name = RwSignal::new(initial.document_name);
    let doc_type = RwSignal::new(initial.document_type);
    let category = RwSignal::new(initial.category);
    let owner = RwSignal::new(initial.owner_name);
    let needs_renewal = RwSignal::new(initial.needs_renewal);
    let renewal_date = RwSignal::new(date_value(initial.renewal_date));
    let file = RwSignal::new(None::<String>);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let companies = Signal::derive(move || store.master().with(|m| distinct_values(m, MasterField::CompanyName)));
    let types = Signal::derive(move || store.master().with(|m| distinct_values(m, MasterField::DocumentType)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = DocumentDraft {
            document_name: name.get().trim().to_string(),
            document_type: doc_type.get().trim().to_string(),
            category: category.get(),
            owner_name: owner.get().trim().to_string(),
            needs_renewal: needs_renewal.get(),
            renewal_date: if needs_renewal.get() { input_date(&renewal_date.get()) } else { None },
            file: file.get(),
        };
        if let Err(e) = draft.validate() {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => api::update_document(id, &draft).await,
                None => api::create_document(&draft).await,
            };
            set_saving.set(false);
            match result {
                Ok(()) => {
                    log::info!("[DOCUMENTS] Saved '{}'", draft.document_name);
                    ctx.success(format!("Saved {}", draft.document_name));
                    on_close.run(());
                    if let Err(e) = refresh::refresh_documents(store).await {
                        ctx.report_api_error("DOCUMENTS", e);
                    }
                }
                Err(e) => ctx.report_api_error("DOCUMENTS", e),
            }
        });
    };

    let title = if editing_id.is_some() { "Edit document" } else { "Add document" };

    view! {
        <Modal title=title on_close=on_close>
            <form class="entity-form" on:submit=on_submit>
                <label>
                    "Document name"
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Document type"
                    <MasterAutocomplete values=types value=doc_type placeholder="e.g. License" />
                </label>
                <label>
                    "Category"
                    <select on:change=move |ev| category.set(event_target_value(&ev))>
                        {DocumentCategory::ALL.into_iter().map(|c| view! {
                            <option value=c.as_str() selected=move || category.get() == c.as_str()>
                                {c.as_str()}
                            </option>
                        }).collect_view()}
                    </select>
                </label>
                <label>
                    "Owner / company"
                    <MasterAutocomplete values=companies value=owner placeholder="Company or person" />
                </label>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || needs_renewal.get()
                        on:change=move |ev| needs_renewal.set(event_target_checked(&ev))
                    />
                    "Needs renewal"
                </label>
                <Show when=move || needs_renewal.get()>
                    <label>
                        "Renewal date"
                        <input
                            type="date"
                            prop:value=move || renewal_date.get()
                            on:input=move |ev| renewal_date.set(event_target_value(&ev))
                        />
                    </label>
                </Show>
                <label>
                    "File"
                    <FilePicker on_change={move |url: Option<String>| file.set(url)} current=current_file.clone() />
                </label>
                {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                <div class="form-actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving…" } else { "Save" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
