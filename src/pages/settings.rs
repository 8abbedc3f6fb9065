//! Settings Page
//!
//! User administration: roles, module access and page access. Admin only.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracker_domain::{Page, User, UserDraft, UserRole, MODULES};

use crate::api;
use crate::components::{ConfirmButton, Modal};
use crate::context::use_app_context;
use crate::refresh;
use crate::store::{self, use_app_store, AppStateStoreFields};

/// Pages whose access is granted per user
fn grantable_pages() -> impl Iterator<Item = Page> {
    Page::ALL
        .into_iter()
        .filter(|p| !matches!(p, Page::Dashboard | Page::Settings))
}

/// Any edited field, including a swapped page grant, re-renders the row
fn row_key(user: &User) -> User {
    user.clone()
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let editing = RwSignal::new(None::<Option<User>>);

    // Users are not cached; fetch whenever the page opens or a reload is requested
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            if let Err(e) = refresh::refresh_users(store).await {
                ctx.report_api_error("SETTINGS", e);
            }
        });
    });

    let delete_user = move |id: u32| {
        spawn_local(async move {
            match api::delete_user(id).await {
                Ok(()) => {
                    store::store_remove_user(&store, id);
                    ctx.success("User deleted");
                }
                Err(e) => ctx.report_api_error("SETTINGS", e),
            }
        });
    };

    let me = move || ctx.user().map(|u| u.id);

    view! {
        <section class="page settings">
            <div class="page-header">
                <h2>"Users"</h2>
                <button class="btn primary" on:click=move |_| editing.set(Some(None))>"+ Add user"</button>
            </div>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Username"</th>
                        <th>"Role"</th>
                        <th>"Department"</th>
                        <th>"Modules"</th>
                        <th>"Pages"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || store.users().get()
                        key=row_key
                        children=move |user| {
                            let id = user.id;
                            let target = user.clone();
                            view! {
                                <tr>
                                    <td>{user.username.clone()}</td>
                                    <td>{user.role.as_str()}</td>
                                    <td>{user.department.clone()}</td>
                                    <td>{user.system_access.join(", ")}</td>
                                    <td>{user.page_access.join(", ")}</td>
                                    <td class="row-actions">
                                        <button class="btn small" on:click=move |_| editing.set(Some(Some(target.clone())))>"Edit"</button>
                                        <Show when=move || me() != Some(id)>
                                            <ConfirmButton button_class="btn small danger" on_confirm=move |_: ()| delete_user(id) />
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            {move || editing.get().map(|user| view! {
                <UserForm user=user on_close=move |_: ()| editing.set(None) />
            })}
            <RecentLog />
        </section>
    }
}

/// Tail of the in-memory log, for support requests
#[component]
fn RecentLog() -> impl IntoView {
    let (lines, set_lines) = signal(console_logger::recent_lines());
    view! {
        <details class="recent-log">
            <summary>"Recent log"</summary>
            <button type="button" class="btn small" on:click=move |_| set_lines.set(console_logger::recent_lines())>
                "Refresh"
            </button>
            <pre>{move || lines.get().join("\n")}</pre>
        </details>
    }
}

#[component]
fn UserForm(user: Option<User>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let user_id = user.as_ref().map(|u| u.id);
    let draft = RwSignal::new(user.as_ref().map(UserDraft::from_user).unwrap_or_default());
    let password = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut body = draft.get();
        body.username = body.username.trim().to_string();
        body.password = Some(password.get()).filter(|p| !p.is_empty());
        if let Err(e) = body.validate(user_id.is_none()) {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_error.set(None);
        spawn_local(async move {
            let result = match user_id {
                Some(id) => api::update_user(id, &body).await,
                None => api::create_user(&body).await,
            };
            match result {
                Ok(()) => {
                    log::info!("[SETTINGS] Saved user {}", body.username);
                    on_close.run(());
                    ctx.success(format!("Saved {}", body.username));
                    if let Err(e) = refresh::refresh_users(store).await {
                        ctx.report_api_error("SETTINGS", e);
                    }
                }
                Err(e) => ctx.report_api_error("SETTINGS", e),
            }
        });
    };

    let title = if user_id.is_some() { "Edit user" } else { "Add user" };

    view! {
        <Modal title=title on_close=on_close>
            <form class="entity-form" on:submit=on_submit>
                <label>
                    "Username"
                    <input
                        type="text"
                        prop:value=move || draft.with(|d| d.username.clone())
                        on:input=move |ev| draft.update(|d| d.username = event_target_value(&ev))
                    />
                </label>
                <label>
                    {if user_id.is_some() { "New password (leave empty to keep)" } else { "Password" }}
                    <input
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Role"
                    <select on:change=move |ev| {
                        let role = if event_target_value(&ev) == "admin" { UserRole::Admin } else { UserRole::Employee };
                        draft.update(|d| d.role = role);
                    }>
                        {[UserRole::Employee, UserRole::Admin].into_iter().map(|r| view! {
                            <option value=r.as_str() selected=move || draft.with(|d| d.role == r)>{r.as_str()}</option>
                        }).collect_view()}
                    </select>
                </label>
                <label>
                    "Department"
                    <input
                        type="text"
                        prop:value=move || draft.with(|d| d.department.clone())
                        on:input=move |ev| draft.update(|d| d.department = event_target_value(&ev))
                    />
                </label>
                <fieldset>
                    <legend>"Modules"</legend>
                    {MODULES.into_iter().map(|module| view! {
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || draft.with(|d| d.system_access.iter().any(|m| m.eq_ignore_ascii_case(module)))
                                on:change=move |_| draft.update(|d| d.toggle_module(module))
                            />
                            {module}
                        </label>
                    }).collect_view()}
                </fieldset>
                <fieldset>
                    <legend>"Pages"</legend>
                    {grantable_pages().map(|page| view! {
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || draft.with(|d| d.page_access.iter().any(|p| p.eq_ignore_ascii_case(page.key())))
                                on:change=move |_| draft.update(|d| d.toggle_page(page))
                            />
                            {page.title()}
                        </label>
                    }).collect_view()}
                </fieldset>
                <Show when=move || draft.with(|d| d.role == UserRole::Admin)>
                    <p class="muted">"Admins can open every page regardless of these boxes."</p>
                </Show>
                {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                <div class="form-actions">
                    <button type="submit" class="btn primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_key_tracks_grants_and_department() {
        let before = User {
            id: 4,
            username: "priya".into(),
            role: UserRole::Employee,
            department: "Finance".into(),
            system_access: vec!["documents".into()],
            page_access: vec!["documents".into()],
        };
        let mut swapped = before.clone();
        swapped.page_access = vec!["history".into()];
        assert_ne!(row_key(&before), row_key(&swapped));

        let mut moved = before.clone();
        moved.department = "Legal".into();
        assert_ne!(row_key(&before), row_key(&moved));
        assert_eq!(row_key(&before), row_key(&before.clone()));
    }

    #[test]
    fn test_grantable_pages_skip_dashboard_and_settings() {
        let pages: Vec<Page> = grantable_pages().collect();
        assert_eq!(pages.len(), 6);
        assert!(!pages.contains(&Page::Dashboard));
        assert!(!pages.contains(&Page::Settings));
    }
}
