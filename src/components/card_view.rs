//! Card View Component
//!
//! A single card. While dragged it is pinned to the pointer with fixed
//! positioning but keeps its place in the column's list.

use leptos::prelude::*;

use crate::board::CardDraft;
use crate::components::{CardForm, DeleteConfirmButton};
use crate::context::use_board;
use crate::models::Card;

#[component]
pub fn CardView(card: Card, dragged: bool) -> impl IntoView {
    let ctx = use_board();
    let (editing, set_editing) = signal(false);

    let id = card.id().to_string();
    let title = card.title().to_string();
    let text = card.text().to_string();
    let initial = CardDraft::new(card.title(), card.text());

    let floating_style = move || {
        if !dragged {
            return String::new();
        }
        ctx.engine.with(|engine| {
            let state = engine.state();
            let origin = state.floating_origin();
            format!(
                "position: fixed; left: {}px; top: {}px; width: {}px; pointer-events: none; z-index: 1000;",
                origin.x,
                origin.y,
                state.original_width()
            )
        })
    };

    let edit_id = id.clone();
    let on_save = Callback::new(move |draft: CardDraft| {
        let result = ctx.update_card(&edit_id, draft);
        if result.is_ok() {
            set_editing.set(false);
        }
        result
    });
    let on_cancel = Callback::new(move |_: ()| set_editing.set(false));
    let delete_id = id.clone();
    let on_delete = Callback::new(move |_: ()| ctx.delete_card(&delete_id));

    view! {
        <div
            class=if dragged { "card dragging" } else { "card" }
            data-drag-item=id
            style=floating_style
        >
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <div class="card-title">{title.clone()}</div>
                    <div class="card-text">{text.clone()}</div>
                    <div class="card-actions">
                        <button type="button" class="card-edit-btn" on:click=move |_| set_editing.set(true)>
                            "Edit"
                        </button>
                        <span class="card-delete">
                            <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
                        </span>
                    </div>
                }
            >
                <CardForm
                    initial=initial.clone()
                    submit_label="Save"
                    on_submit=on_save
                    on_cancel=on_cancel
                />
            </Show>
        </div>
    }
}
