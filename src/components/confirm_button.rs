//! Confirm Button
//!
//! Destructive actions take two clicks. The first click arms the button and shows
//! the prompt with confirm/cancel; an armed button disarms itself after a few seconds.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DISARM_MILLIS: u32 = 5000;

/// Armed state; each arming gets a new generation so a stale timer can't disarm a later one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Arming {
    armed: bool,
    generation: u32,
}

impl Arming {
    fn arm(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.armed = true;
        self.generation
    }

    fn disarm(&mut self) {
        self.armed = false;
    }

    /// Timer for `generation` ran out
    fn expire(&mut self, generation: u32) {
        if self.generation == generation {
            self.armed = false;
        }
    }
}

#[component]
pub fn ConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into, default = "Delete".to_string())] label: String,
    #[prop(into, default = "Delete?".to_string())] prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let arming = RwSignal::new(Arming::default());

    let arm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let mut generation = 0;
        arming.update(|a| generation = a.arm());
        spawn_local(async move {
            TimeoutFuture::new(DISARM_MILLIS).await;
            arming.try_update(|a| a.expire(generation));
        });
    };

    let confirm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        arming.update(Arming::disarm);
        on_confirm.run(());
    };

    let cancel = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        arming.update(Arming::disarm);
    };

    view! {
        {move || {
            if arming.with(|a| a.armed) {
                view! {
                    <span class="delete-confirm">
                        <span class="delete-confirm-text">{prompt.clone()}</span>
                        <button type="button" class="confirm-btn" title="Confirm" on:click=confirm>"✓"</button>
                        <button type="button" class="cancel-btn" title="Cancel" on:click=cancel>"✗"</button>
                    </span>
                }
                .into_any()
            } else {
                view! { <button type="button" class=button_class.clone() on:click=arm>{label.clone()}</button> }.into_any()
            }
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_and_disarm() {
        let mut a = Arming::default();
        assert!(!a.armed);
        a.arm();
        assert!(a.armed);
        a.disarm();
        assert!(!a.armed);
    }

    #[test]
    fn test_stale_timer_leaves_rearmed_button() {
        let mut a = Arming::default();
        let first = a.arm();
        a.disarm();
        let second = a.arm();
        a.expire(first);
        assert!(a.armed);
        a.expire(second);
        assert!(!a.armed);
    }
}
