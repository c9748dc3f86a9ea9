//! Column View Component
//!
//! One board column: header, card list with the drag placeholder, and the
//! add-card form. The whole column is a drop container.

use leptos::prelude::*;

use crate::board::CardDraft;
use crate::components::{CardForm, CardView};
use crate::context::use_board;
use crate::models::Column;
use crate::reorder::{column_entries, ColumnEntry};

#[component]
pub fn ColumnView(column_id: String) -> impl IntoView {
    let ctx = use_board();
    let (adding, set_adding) = signal(false);

    let title_id = column_id.clone();
    let title = move || {
        ctx.board
            .with(|b| b.column(&title_id).map(|c| c.title().to_string()))
            .unwrap_or_default()
    };
    let count_id = column_id.clone();
    let count = move || ctx.board.with(|b| b.column(&count_id).map(Column::len).unwrap_or(0));

    let entries_id = column_id.clone();
    let entries = move || {
        ctx.board.with(|b| match b.column(&entries_id) {
            Some(column) => ctx.engine.with(|e| column_entries(column, e.state())),
            None => Vec::new(),
        })
    };

    let add_id = column_id.clone();
    let on_add = Callback::new(move |draft: CardDraft| ctx.add_card(&add_id, draft));

    view! {
        <section class="column" data-drag-container=column_id>
            <header class="column-header">
                <h2 class="column-title">{title}</h2>
                <span class="column-count">{count}</span>
            </header>

            <div class="card-list">
                <For
                    each=entries
                    key=entry_key
                    children=render_entry
                />
            </div>

            <Show
                when=move || adding.get()
                fallback=move || view! {
                    <button type="button" class="add-card-btn" on:click=move |_| set_adding.set(true)>
                        "+ Add card"
                    </button>
                }
            >
                <CardForm
                    submit_label="Add"
                    on_submit=on_add
                    on_cancel=Callback::new(move |_: ()| set_adding.set(false))
                />
            </Show>
        </section>
    }
}

/// Key on every field that changes what is drawn, so edits re-render
fn entry_key(entry: &ColumnEntry) -> (String, bool, String, String) {
    match entry {
        ColumnEntry::Card(card) | ColumnEntry::Dragged(card) => (
            card.id().to_string(),
            matches!(entry, ColumnEntry::Dragged(_)),
            card.title().to_string(),
            card.text().to_string(),
        ),
        ColumnEntry::Placeholder { .. } => (entry.key(), false, String::new(), String::new()),
    }
}

fn render_entry(entry: ColumnEntry) -> AnyView {
    match entry {
        ColumnEntry::Card(card) => view! { <CardView card=card dragged=false /> }.into_any(),
        ColumnEntry::Dragged(card) => view! { <CardView card=card dragged=true /> }.into_any(),
        ColumnEntry::Placeholder { height } => view! {
            <div class="card-placeholder" style=format!("height: {}px;", height)></div>
        }
        .into_any(),
    }
}
