//! Documents Page
//!
//! Searchable document table with bulk selection, sharing and renewal.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracker_domain::{
    expiry_bucket, filter_documents, format_date, share_link, Document, DocumentCategory,
    DocumentFilter, DocumentSort, RenewDocumentRequest, RenewalRecord, Selection, ShareChannel,
    ShareMessage, ShareRecord,
};

use super::document_form::DocumentForm;
use super::forms::{date_value, input_date};
use crate::api;
use crate::components::{ConfirmButton, FilePicker, Modal};
use crate::config;
use crate::context::{use_app_context, AppContext};
use crate::refresh;
use crate::store::{self, use_app_store, AppStateStoreFields, AppStore};
use crate::time;

/// Which dialog is open over the table
#[derive(Debug, Clone, PartialEq)]
enum DocumentDialog {
    Add,
    Edit(Document),
    Share(Document),
    Renew(Document),
}

fn sort_from_key(key: &str) -> DocumentSort {
    match key {
        "renewal" => DocumentSort::RenewalDate,
        "name" => DocumentSort::Name,
        _ => DocumentSort::Newest,
    }
}

/// Rows re-render whenever any displayed field changes
fn row_key(doc: &Document) -> Document {
    doc.clone()
}

/// A signed-out session fails every remaining delete the same way
fn stops_bulk_delete(err: &api::ApiError) -> bool {
    *err == api::ApiError::Unauthorized
}

/// Delete on the backend, then drop the row locally and from the selection
async fn delete_one(store: AppStore, selection: RwSignal<Selection>, id: u32) -> Result<(), api::ApiError> {
    api::delete_document(id).await?;
    store::store_remove_document(&store, id);
    selection.update(|s| s.remove(id));
    Ok(())
}

#[component]
pub fn DocumentsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let search = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let sort = RwSignal::new(String::from("newest"));
    let selection = RwSignal::new(Selection::new());
    let dialog = RwSignal::new(None::<DocumentDialog>);

    let visible = Memo::new(move |_| {
        let filter = DocumentFilter {
            search: search.get(),
            category: DocumentCategory::parse(&category.get()),
            sort: sort_from_key(&sort.get()),
        };
        store.documents().with(|docs| filter_documents(docs, &filter))
    });

    // Selection never outlives its rows
    Effect::new(move |_| {
        let ids: Vec<u32> = store.documents().with(|docs| docs.iter().map(|d| d.id).collect());
        selection.update(|s| s.retain_existing(ids));
    });

    let all_visible_selected = move || {
        let rows = visible.get();
        !rows.is_empty() && selection.with(|s| rows.iter().all(|d| s.contains(d.id)))
    };

    let delete_selected = move |_: ()| {
        let ids = selection.get_untracked().ids();
        spawn_local(async move {
            let mut deleted = 0;
            for id in ids {
                match delete_one(store, selection, id).await {
                    Ok(()) => deleted += 1,
                    Err(e) => {
                        let stop = stops_bulk_delete(&e);
                        ctx.report_api_error("DOCUMENTS", e);
                        if stop {
                            break;
                        }
                    }
                }
            }
            if deleted > 0 {
                store::persist(&store);
                ctx.success(format!("Deleted {} document(s)", deleted));
            }
        });
    };

    let close = Callback::new(move |_: ()| dialog.set(None));

    view! {
        <section class="page documents">
            <div class="page-header">
                <h2>"Documents"</h2>
                <button class="btn primary" on:click=move |_| dialog.set(Some(DocumentDialog::Add))>"+ Add document"</button>
            </div>

            <div class="filter-bar">
                <input
                    type="search"
                    placeholder="Search name, type, owner or serial"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <select on:change=move |ev| category.set(event_target_value(&ev))>
                    <option value="">"All categories"</option>
                    {DocumentCategory::ALL.into_iter().map(|c| view! {
                        <option value=c.as_str()>{c.as_str()}</option>
                    }).collect_view()}
                </select>
                <select on:change=move |ev| sort.set(event_target_value(&ev))>
                    <option value="newest">"Newest first"</option>
                    <option value="renewal">"Renewal date"</option>
                    <option value="name">"Name"</option>
                </select>
                <Show when=move || selection.with(|s| !s.is_empty())>
                    <span class="selection-count">{move || format!("{} selected", selection.with(Selection::len))}</span>
                    <ConfirmButton button_class="btn danger" label="Delete selected" on_confirm=delete_selected />
                </Show>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>
                            <input
                                type="checkbox"
                                prop:checked=all_visible_selected
                                on:change=move |_| {
                                    let ids: Vec<u32> = visible.get_untracked().iter().map(|d| d.id).collect();
                                    selection.update(|s| s.toggle_all(ids));
                                }
                            />
                        </th>
                        <th>"Serial"</th>
                        <th>"Name"</th>
                        <th>"Type"</th>
                        <th>"Category"</th>
                        <th>"Owner"</th>
                        <th>"Renewal"</th>
                        <th>"File"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || visible.get()
                        key=row_key
                        children=move |doc| view! { <DocumentRow doc=doc selection=selection dialog=dialog /> }
                    />
                </tbody>
            </table>
            <Show when=move || visible.with(Vec::is_empty)>
                <p class="empty">"No documents match."</p>
            </Show>

            {move || dialog.get().map(|open| match open {
                DocumentDialog::Add => view! { <DocumentForm editing=None on_close=close /> }.into_any(),
                DocumentDialog::Edit(doc) => view! { <DocumentForm editing=Some(doc) on_close=close /> }.into_any(),
                DocumentDialog::Share(doc) => view! { <ShareDialog doc=doc on_close=close /> }.into_any(),
                DocumentDialog::Renew(doc) => view! { <RenewDialog doc=doc on_close=close /> }.into_any(),
            })}
        </section>
    }
}

#[component]
fn DocumentRow(doc: Document, selection: RwSignal<Selection>, dialog: RwSignal<Option<DocumentDialog>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = doc.id;
    let needs_renewal = doc.needs_renewal;
    let bucket = expiry_bucket(doc.renewal_date, time::today(), config::current().expiry_window_days);

    let on_delete = move |_: ()| {
        spawn_local(async move {
            match delete_one(store, selection, id).await {
                Ok(()) => {
                    store::persist(&store);
                    ctx.success("Document deleted");
                }
                Err(e) => ctx.report_api_error("DOCUMENTS", e),
            }
        });
    };

    let file_cell = match (doc.file_ref.clone(), doc.file_name().map(str::to_string)) {
        (Some(href), Some(name)) => view! { <a href=href target="_blank" rel="noopener">{name}</a> }.into_any(),
        (Some(_), None) => view! { <span>"attached"</span> }.into_any(),
        _ => view! { <span class="muted">"-"</span> }.into_any(),
    };

    let edit_doc = doc.clone();
    let share_doc = doc.clone();
    let renew_doc = doc.clone();

    view! {
        <tr class=move || if selection.with(|s| s.contains(id)) { "selected" } else { "" }>
            <td>
                <input
                    type="checkbox"
                    prop:checked=move || selection.with(|s| s.contains(id))
                    on:change=move |_| selection.update(|s| s.toggle(id))
                />
            </td>
            <td class="serial">{doc.serial.clone()}</td>
            <td>{doc.name.clone()}</td>
            <td>{doc.doc_type.clone()}</td>
            <td>{doc.category.map(|c| c.as_str()).unwrap_or("-")}</td>
            <td>{doc.owner.clone()}</td>
            <td>
                {format_date(doc.renewal_date)}
                {doc.needs_renewal.then(|| view! {
                    <span class="badge" style=format!("background: {}", bucket.color())>{bucket.as_str()}</span>
                })}
            </td>
            <td>{file_cell}</td>
            <td class="row-actions">
                <button class="btn small" on:click=move |_| dialog.set(Some(DocumentDialog::Edit(edit_doc.clone())))>"Edit"</button>
                <Show when=move || needs_renewal>
                    {
                        let renew_doc = renew_doc.clone();
                        view! {
                            <button class="btn small" on:click=move |_| dialog.set(Some(DocumentDialog::Renew(renew_doc.clone())))>"Renew"</button>
                        }
                    }
                </Show>
                <button class="btn small" on:click=move |_| dialog.set(Some(DocumentDialog::Share(share_doc.clone())))>"Share"</button>
                <ConfirmButton button_class="btn small danger" on_confirm=on_delete />
            </td>
        </tr>
    }
}

/// Record a share locally and open the link
fn share(ctx: AppContext, store: AppStore, doc: &Document, channel: ShareChannel, recipient: &str) {
    let link = share_link(channel, recipient, &ShareMessage::for_document(doc));
    let opened = web_sys::window()
        .map(|w| w.open_with_url_and_target(&link, "_blank").is_ok())
        .unwrap_or(false);
    if !opened {
        ctx.report_error("SHARE", "Could not open the share link");
        return;
    }
    store::store_push_share(&store, ShareRecord::new(doc, channel, recipient, time::now()));
    store::persist(&store);
    log::info!("[SHARE] {} via {}", doc.serial, channel.as_str());
    ctx.success(format!("Shared {} via {}", doc.serial, channel.as_str()));
}

#[component]
fn ShareDialog(doc: Document, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let channel = RwSignal::new(ShareChannel::Email);
    let recipient = RwSignal::new(String::new());
    let title = format!("Share {}", doc.serial);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let to = recipient.get();
        if to.trim().is_empty() {
            ctx.report_error("SHARE", "Enter an email address or phone number");
            return;
        }
        share(ctx, store, &doc, channel.get(), &to);
        on_close.run(());
    };

    view! {
        <Modal title=title on_close=on_close>
            <form class="entity-form" on:submit=on_submit>
                <div class="channel-toggle">
                    {[ShareChannel::Email, ShareChannel::WhatsApp].into_iter().map(|c| view! {
                        <button
                            type="button"
                            class=move || if channel.get() == c { "type-btn active" } else { "type-btn" }
                            on:click=move |_| channel.set(c)
                        >
                            {c.as_str()}
                        </button>
                    }).collect_view()}
                </div>
                <label>
                    {move || if channel.get() == ShareChannel::Email { "Email address" } else { "Phone number" }}
                    <input
                        type="text"
                        prop:value=move || recipient.get()
                        on:input=move |ev| recipient.set(event_target_value(&ev))
                    />
                </label>
                <div class="form-actions">
                    <button type="submit" class="btn primary">"Share"</button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
fn RenewDialog(doc: Document, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let new_date = RwSignal::new(date_value(doc.renewal_date));
    let file = RwSignal::new(None::<String>);
    let (saving, set_saving) = signal(false);
    let title = format!("Renew {}", doc.serial);
    let current_file = doc.file_name().map(str::to_string);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(date) = input_date(&new_date.get()) else {
            ctx.report_error("RENEW", "Pick the new renewal date");
            return;
        };
        let request = RenewDocumentRequest { renewal_date: date, file: file.get() };
        let doc = doc.clone();
        set_saving.set(true);
        spawn_local(async move {
            let result = api::renew_document(doc.id, &request).await;
            set_saving.set(false);
            match result {
                Ok(()) => {
                    let record = RenewalRecord::new(&doc, date, request.file.as_deref(), time::now());
                    store::store_push_renewal(&store, record);
                    store::persist(&store);
                    ctx.success(format!("Renewed {} until {}", doc.serial, format_date(Some(date))));
                    on_close.run(());
                    if let Err(e) = refresh::refresh_documents(store).await {
                        ctx.report_api_error("DOCUMENTS", e);
                    }
                }
                Err(e) => ctx.report_api_error("RENEW", e),
            }
        });
    };

    view! {
        <Modal title=title on_close=on_close>
            <form class="entity-form" on:submit=on_submit>
                <label>
                    "New renewal date"
                    <input
                        type="date"
                        prop:value=move || new_date.get()
                        on:input=move |ev| new_date.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Renewed document"
                    <FilePicker on_change={move |url: Option<String>| file.set(url)} current=current_file.clone() />
                </label>
                <div class="form-actions">
                    <button type="submit" class="btn primary" disabled=move || saving.get()>"Renew"</button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Document {
        Document::from(tracker_domain::DocumentRecord {
            id: 7,
            document_name: "Trade licence".into(),
            document_type: "License".into(),
            category: "Company".into(),
            owner_name: "Acme".into(),
            needs_renewal: None,
            renewal_date: Some("2027-03-31".into()),
            file_url: None,
            created_at: None,
            deleted: None,
        })
    }

    #[test]
    fn test_row_key_tracks_every_field() {
        let before = document();
        let mut edited = before.clone();
        edited.owner = "Acme Holdings".into();
        assert_ne!(row_key(&before), row_key(&edited));

        let mut retyped = before.clone();
        retyped.doc_type = "Permit".into();
        assert_ne!(row_key(&before), row_key(&retyped));

        let mut flagged = before.clone();
        flagged.needs_renewal = true;
        assert_ne!(row_key(&before), row_key(&flagged));

        assert_eq!(row_key(&before), row_key(&document()));
    }

    #[test]
    fn test_bulk_delete_stops_when_signed_out() {
        assert!(stops_bulk_delete(&api::ApiError::Unauthorized));
        assert!(!stops_bulk_delete(&api::ApiError::Status { status: 404, message: "gone".into() }));
        assert!(!stops_bulk_delete(&api::ApiError::Network("offline".into())));
    }

    #[test]
    fn test_sort_keys() {
        assert_eq!(sort_from_key("renewal"), DocumentSort::RenewalDate);
        assert_eq!(sort_from_key("name"), DocumentSort::Name);
        assert_eq!(sort_from_key("newest"), DocumentSort::Newest);
        assert_eq!(sort_from_key("bogus"), DocumentSort::Newest);
    }
}
