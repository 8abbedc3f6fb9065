//! File Picker Component
//!
//! File input that hands the chosen file back as a base64 data URL.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::files;

#[component]
pub fn FilePicker(
    /// Data URL of the picked file, `None` when cleared
    #[prop(into)] on_change: Callback<Option<String>>,
    /// Name of the file already attached, if any
    #[prop(default = None)] current: Option<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (picked, set_picked) = signal::<Option<String>>(None);
    let (reading, set_reading) = signal(false);

    let on_input = move |ev: web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = files::selected_file(&input) else {
            return;
        };
        set_reading.set(true);
        spawn_local(async move {
            match files::read_as_data_url(&file).await {
                Ok(url) => {
                    set_picked.set(Some(file.name()));
                    on_change.run(Some(url));
                }
                Err(e) => {
                    input.set_value("");
                    ctx.report_error("FILES", e);
                }
            }
            set_reading.set(false);
        });
    };

    let clear = move |_| {
        set_picked.set(None);
        on_change.run(None);
    };

    view! {
        <div class="file-picker">
            <input type="file" on:change=on_input />
            {move || {
                if reading.get() {
                    view! { <span class="file-note">"Reading…"</span> }.into_any()
                } else if let Some(name) = picked.get() {
                    view! {
                        <span class="file-note">{name}</span>
                        <button type="button" class="btn small" on:click=clear>"Clear"</button>
                    }.into_any()
                } else {
                    let current = current.clone();
                    view! {
                        <span class="file-note">{current.map(|c| format!("Current: {}", c))}</span>
                    }.into_any()
                }
            }}
        </div>
    }
}
