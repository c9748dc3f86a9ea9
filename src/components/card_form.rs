//! Card Form Component
//!
//! Title and text inputs with remaining-character counters. Used both to
//! create cards and to edit them in place.

use leptos::prelude::*;

use crate::board::{remaining, CardDraft};
use crate::context::use_board;

#[component]
pub fn CardForm(
    /// Starting values when editing
    #[prop(optional)]
    initial: Option<CardDraft>,
    #[prop(into)] submit_label: String,
    /// Receives the validated draft; an `Err` is shown under the form
    on_submit: Callback<CardDraft, Result<(), String>>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let ctx = use_board();
    let limits = ctx.config.with_value(|c| c.limits);
    let editing = initial.is_some();
    let initial = initial.unwrap_or_else(|| CardDraft::new("", ""));

    let (title, set_title) = signal(initial.title);
    let (text, set_text) = signal(initial.text);
    let (error, set_error) = signal(None::<String>);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = CardDraft::new(title.get_untracked(), text.get_untracked());
        let result = draft
            .validate(&limits)
            .map_err(|e| e.to_string())
            .and_then(|draft| on_submit.run(draft));
        match result {
            Ok(()) => {
                set_error.set(None);
                if !editing {
                    set_title.set(String::new());
                    set_text.set(String::new());
                }
            }
            Err(msg) => set_error.set(Some(msg)),
        }
    };

    view! {
        <form class="card-form" on:submit=submit>
            <div class="card-form-row">
                <input
                    type="text"
                    placeholder="Title"
                    maxlength=limits.title_max.to_string()
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <span class="char-counter">{move || remaining(&title.get(), limits.title_max)}</span>
            </div>
            <div class="card-form-row">
                <textarea
                    placeholder="Details"
                    maxlength=limits.text_max.to_string()
                    prop:value=move || text.get()
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                />
                <span class="char-counter">{move || remaining(&text.get(), limits.text_max)}</span>
            </div>
            <div class="card-form-actions">
                <button type="submit">{submit_label}</button>
                {on_cancel.map(|cancel| view! {
                    <button type="button" class="cancel-btn" on:click=move |_| cancel.run(())>
                        "Cancel"
                    </button>
                })}
            </div>
            {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
        </form>
    }
}
