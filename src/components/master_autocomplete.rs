//! Master Autocomplete Component
//!
//! Text input with typeahead over master lookup values (company names, document types).
//! Free text is always allowed; suggestions only help keep values consistent.

use leptos::prelude::*;
use tracker_domain::suggestions;

const MAX_SUGGESTIONS: usize = 5;

/// Autocomplete input bound to `value`
///
/// Props:
/// - values: every known value for this field
/// - value: the form field the input edits
#[component]
pub fn MasterAutocomplete(
    #[prop(into)] values: Signal<Vec<String>>,
    value: RwSignal<String>,
    #[prop(into, optional)] placeholder: String,
) -> impl IntoView {
    let (selected_idx, set_selected_idx) = signal(0usize);
    let (open, set_open) = signal(false);

    let matches = Memo::new(move |_| {
        let query = value.get();
        if query.trim().is_empty() {
            return vec![];
        }
        values.with(|all| suggestions(all, &query, MAX_SUGGESTIONS))
    });

    let choose = move |name: String| {
        value.set(name);
        set_selected_idx.set(0);
        set_open.set(false);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let sugg = matches.get();
        if !open.get() || sugg.is_empty() {
            return;
        }
        match ev.key().as_str() {
            "Tab" | "Enter" => {
                ev.prevent_default();
                if let Some(name) = sugg.get(selected_idx.get()) {
                    choose(name.clone());
                }
            }
            "ArrowDown" => {
                ev.prevent_default();
                let sel = selected_idx.get();
                if sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                set_selected_idx.update(|sel| *sel = sel.saturating_sub(1));
            }
            "Escape" => set_open.set(false),
            _ => {}
        }
    };

    view! {
        <div class="autocomplete-wrapper">
            <input
                type="text"
                placeholder=placeholder
                autocomplete="off"
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    set_selected_idx.set(0);
                    set_open.set(true);
                }
                on:blur=move |_| set_open.set(false)
                on:keydown=on_keydown
            />
            {move || {
                let sugg = matches.get();
                // Nothing to suggest once the field already holds the only match
                let exact = sugg.len() == 1 && sugg[0] == value.get();
                if !open.get() || sugg.is_empty() || exact {
                    return ().into_any();
                }
                let selected = selected_idx.get();
                view! {
                    <div class="autocomplete-list">
                        {sugg.into_iter().enumerate().map(|(i, name)| {
                            let name_for_click = name.clone();
                            view! {
                                <button
                                    type="button"
                                    class=if i == selected { "autocomplete-item selected" } else { "autocomplete-item" }
                                    // mousedown fires before the input's blur
                                    on:mousedown=move |ev| {
                                        ev.prevent_default();
                                        choose(name_for_click.clone());
                                    }
                                >
                                    {name}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}
