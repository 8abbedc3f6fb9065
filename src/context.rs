//! Application Context
//!
//! Shared state provided via Leptos Context API: the signed-in session, the current page,
//! a reload trigger and the toast queue.

use std::fmt::Display;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracker_domain::{Page, Session, User};

use crate::api::ApiError;
use crate::session;

/// How long a toast stays up
const TOAST_MILLIS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload collections from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload collections from backend - write
    set_reload_trigger: WriteSignal<u32>,
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast_id: StoredValue<u32>,
    pub page: ReadSignal<Page>,
    set_page: WriteSignal<Page>,
    pub session: ReadSignal<Option<Session>>,
    set_session: WriteSignal<Option<Session>>,
}

impl AppContext {
    pub fn new(initial_session: Option<Session>) -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let (toasts, set_toasts) = signal(Vec::<Toast>::new());
        let (page, set_page) = signal(Page::Dashboard);
        let (session, set_session) = signal(initial_session);
        Self {
            reload_trigger,
            set_reload_trigger,
            toasts,
            set_toasts,
            next_toast_id: StoredValue::new(0),
            page,
            set_page,
            session,
            set_session,
        }
    }

    /// Trigger a reload of every collection
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.as_ref().map(|s| s.user.clone()))
    }

    pub fn is_admin(&self) -> bool {
        self.session.with(|s| s.as_ref().map(|s| s.user.is_admin()).unwrap_or(false))
    }

    /// Switch page; pages the user may not open are ignored
    pub fn navigate(&self, page: Page) {
        let allowed = self
            .session
            .with_untracked(|s| s.as_ref().map(|s| s.user.can_access(page)).unwrap_or(false));
        if allowed {
            self.set_page.set(page);
        } else {
            log::warn!("[NAV] Blocked navigation to {}", page.key());
        }
    }

    pub fn sign_in(&self, new_session: Session) {
        log::info!("[AUTH] Signed in as {}", new_session.user.username);
        session::save(&new_session);
        self.set_session.set(Some(new_session));
        self.set_page.set(Page::Dashboard);
        self.reload();
    }

    pub fn sign_out(&self) {
        session::clear();
        self.set_session.set(None);
        self.set_page.set(Page::Dashboard);
    }

    fn notify(&self, kind: ToastKind, message: String) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id.wrapping_add(1));
        self.set_toasts.update(|list| list.push(Toast { id, kind, message }));

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MILLIS).await;
            ctx.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|list| list.retain(|t| t.id != id));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(ToastKind::Success, message.into());
    }

    /// Log under `module` and raise an error toast
    pub fn report_error(&self, module: &str, err: impl Display) {
        log::error!("[{}] {}", module, err);
        self.notify(ToastKind::Error, err.to_string());
    }

    /// Like [`report_error`](Self::report_error); an expired session also signs out
    pub fn report_api_error(&self, module: &str, err: ApiError) {
        let expired = err == ApiError::Unauthorized;
        self.report_error(module, err);
        if expired {
            self.sign_out();
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
