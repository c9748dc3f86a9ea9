//! Kanban Board App
//!
//! Root component: opens the store, loads the board and provides the
//! board context.

use leptos::prelude::*;
use rolling_logger::RollingLogger;

use crate::board::Board;
use crate::components::{BoardView, DeleteConfirmButton, LogPanel};
use crate::config::BoardConfig;
use crate::context::{BoardContext, BoardStore};
use crate::ids::TimeRandomIds;
use crate::models::Column;
use crate::reorder::ReorderEngine;
use crate::store::{BrowserStorage, JsonColumnStore, KeyValueBackend, MemoryBackend, StoreError};

/// localStorage if the browser allows it, otherwise an in-memory board
fn open_store(config: &BoardConfig) -> BoardStore {
    let backend: Box<dyn KeyValueBackend> = match BrowserStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!("[STORE] {}; changes will not survive a reload", e);
            Box::new(MemoryBackend::default())
        }
    };
    JsonColumnStore::new(backend, &config.storage_key)
}

fn empty_board(config: &BoardConfig) -> Board {
    Board::from_columns(config.columns.iter().map(|c| Column::new(&c.id, &c.title)).collect())
}

/// Load the board; a stored board that no longer decodes is set aside so
/// later writes go to a fresh, readable key
fn load_board<B: KeyValueBackend + 'static>(config: &BoardConfig, store: &mut JsonColumnStore<B>) -> Board {
    let error = match Board::load(&config.columns, &mut *store) {
        Ok(board) => return board,
        Err(e) => e,
    };
    tracing::error!("[STORE] could not load board: {}", error);
    if !matches!(error, StoreError::Decode(_)) {
        return empty_board(config);
    }
    let recovered = store
        .set_aside_unreadable()
        .and_then(|_| Board::load(&config.columns, &mut *store));
    recovered.unwrap_or_else(|e| {
        tracing::error!("[STORE] could not start a fresh board: {}", e);
        empty_board(config)
    })
}

#[component]
pub fn App(
    config: BoardConfig,
    /// Log buffer to expose in the UI, if logging is installed
    logger: Option<RollingLogger>,
) -> impl IntoView {
    let mut store = open_store(&config);
    let board = load_board(&config, &mut store);

    let ctx = BoardContext::new(config, board, store, Box::new(TimeRandomIds));
    provide_context(ctx);

    view! {
        <div class="app-layout">
            <header class="board-header">
                <h1>"Kanban"</h1>
                <span class="card-total">
                    {move || format!("{} cards", ctx.board.with(Board::card_count))}
                </span>
                <label class="drag-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || ctx.engine.with(ReorderEngine::is_enabled)
                        on:change=move |ev| ctx.set_drag_enabled(event_target_checked(&ev))
                    />
                    "Drag to reorder"
                </label>
                <DeleteConfirmButton
                    button_class="clear-board-btn"
                    label="Clear board"
                    on_confirm=Callback::new(move |_: ()| ctx.clear())
                />
            </header>

            <BoardView />

            {logger.map(|logger| view! { <LogPanel logger=logger /> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CardDraft;
    use crate::ids::SequentialIds;
    use crate::store::ColumnStore;

    #[test]
    fn test_unreadable_board_starts_fresh_and_accepts_writes() {
        let mut backend = MemoryBackend::default();
        backend.set("kanban-board", "[{\"id\":").unwrap();
        let mut store = JsonColumnStore::new(backend, "kanban-board");
        let config = BoardConfig::default();

        let mut board = load_board(&config, &mut store);
        assert_eq!(board.columns().len(), 3);
        assert_eq!(board.card_count(), 0);

        let mut ids = SequentialIds::default();
        board.add_card("todo", CardDraft::new("A", ""), &mut ids, &mut store).unwrap();
        assert_eq!(store.get_column("todo").unwrap().unwrap().card_ids(), vec!["card-1"]);
        assert_eq!(
            store.backend_mut().get("kanban-board.unreadable").unwrap().as_deref(),
            Some("[{\"id\":")
        );
    }

    #[test]
    fn test_readable_board_loads_as_stored() {
        let mut store = JsonColumnStore::new(MemoryBackend::default(), "kanban-board");
        let config = BoardConfig::default();
        let mut board = load_board(&config, &mut store);
        let mut ids = SequentialIds::default();
        board.add_card("done", CardDraft::new("A", ""), &mut ids, &mut store).unwrap();

        let reloaded = load_board(&config, &mut store);
        assert_eq!(reloaded.column("done").unwrap().card_ids(), vec!["card-1"]);
    }
}
