//! Board View Component
//!
//! Lays out the columns and binds the reorder engine to the board root.
//! A single delegated mousedown handler covers every card, including cards
//! added later; document-level move/up listeners exist only mid-gesture.

use leptos::prelude::*;
use leptos_dragdrop::dom::{self, DomHooks, DomLayout, GlobalPointerListeners};

use crate::components::ColumnView;
use crate::context::{use_board, BoardContext};
use crate::reorder::{DropOutcome, PointerPress, ReorderEngine};

#[component]
pub fn BoardView() -> impl IntoView {
    let ctx = use_board();

    let column_ids = move || {
        ctx.board
            .with(|b| b.columns().iter().map(|c| c.id().to_string()).collect::<Vec<_>>())
    };
    let board_class = move || {
        if ctx.engine.with(ReorderEngine::is_dragging) { "board dragging" } else { "board" }
    };

    view! {
        <div class=board_class on:mousedown=move |ev| start_gesture(ctx, &ev)>
            <For
                each=column_ids
                key=|id| id.clone()
                children=move |id| view! { <ColumnView column_id=id /> }
            />
        </div>
    }
}

fn start_gesture(ctx: BoardContext, ev: &web_sys::MouseEvent) {
    let target = ev.target();
    let Some(card_id) = dom::closest_attr(target.clone(), dom::ITEM_ATTR) else {
        return;
    };
    let on_delete_control = dom::is_within(target.clone(), ".card-delete");
    // Form fields and buttons inside a card keep their own mouse behaviour
    if !on_delete_control && dom::is_within(target, "input, textarea, button, .card-form") {
        return;
    }
    let Some(layout) = DomLayout::from_window() else {
        return;
    };

    let press = PointerPress {
        card_id,
        point: dom::client_point(ev),
        button: ev.button(),
        on_delete_control,
    };
    let started = ctx
        .engine
        .try_update(|engine| {
            ctx.board
                .with_untracked(|board| engine.pointer_down(press, board, &layout, &mut DomHooks))
        })
        .unwrap_or(false);
    if !started {
        return;
    }
    ev.prevent_default();

    let listeners = GlobalPointerListeners::attach(
        move |ev: web_sys::MouseEvent| track_gesture(ctx, &ev),
        move |_: web_sys::MouseEvent| finish_gesture(ctx),
    );
    match listeners {
        Some(listeners) => ctx.hold_listeners(listeners),
        // Nothing would ever end the gesture
        None => finish_gesture(ctx),
    }
}

fn track_gesture(ctx: BoardContext, ev: &web_sys::MouseEvent) {
    let Some(layout) = DomLayout::from_window() else {
        return;
    };
    let point = dom::client_point(ev);
    ctx.engine.update(|engine| {
        ctx.board.with_untracked(|board| {
            engine.pointer_move(point, board, &layout);
        })
    });
}

fn finish_gesture(ctx: BoardContext) {
    ctx.detach_listeners();
    let outcome = ctx
        .engine
        .try_update(|engine| {
            ctx.with_board_and_store(|board, store| engine.pointer_up(board, store, &mut DomHooks))
        })
        .flatten();

    match outcome {
        Some(DropOutcome::Moved { card_id, to, index, persisted: true, .. }) => {
            tracing::info!("[DND] {} -> {}[{}]", card_id, to, index);
        }
        Some(DropOutcome::Moved { card_id, persisted: false, .. }) => {
            tracing::warn!("[DND] {} moved on screen only; reload restores the saved order", card_id);
        }
        Some(other) => tracing::debug!("[DND] drop: {:?}", other),
        None => {}
    }
}
