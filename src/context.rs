//! Board Context
//!
//! Board state and collaborators provided via the Leptos Context API.

use leptos::prelude::*;
use leptos_dragdrop::dom::GlobalPointerListeners;

use crate::board::{Board, CardDraft};
use crate::config::BoardConfig;
use crate::ids::IdGenerator;
use crate::reorder::ReorderEngine;
use crate::store::{JsonColumnStore, KeyValueBackend};

/// Store type used by the running app
pub type BoardStore = JsonColumnStore<Box<dyn KeyValueBackend>>;

#[derive(Clone, Copy)]
pub struct BoardContext {
    pub config: StoredValue<BoardConfig>,
    /// Cards and columns as shown
    pub board: RwSignal<Board>,
    /// The board's single reorder engine
    pub engine: RwSignal<ReorderEngine>,
    store: StoredValue<BoardStore, LocalStorage>,
    ids: StoredValue<Box<dyn IdGenerator>, LocalStorage>,
    /// Document listeners of the current or last gesture
    listeners: StoredValue<Option<GlobalPointerListeners>, LocalStorage>,
}

impl BoardContext {
    pub fn new(config: BoardConfig, board: Board, store: BoardStore, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            config: StoredValue::new(config),
            board: RwSignal::new(board),
            engine: RwSignal::new(ReorderEngine::new()),
            store: StoredValue::new_local(store),
            ids: StoredValue::new_local(ids),
            listeners: StoredValue::new_local(None),
        }
    }

    /// Run `f` with the store and a mutable board
    pub fn with_board_and_store<R>(&self, f: impl FnOnce(&mut Board, &mut BoardStore) -> R) -> Option<R> {
        self.board
            .try_update(|board| self.store.try_update_value(|store| f(board, store)))
            .flatten()
    }

    pub fn add_card(&self, column_id: &str, draft: CardDraft) -> Result<(), String> {
        let result = self
            .ids
            .try_update_value(|ids| {
                self.with_board_and_store(|board, store| board.add_card(column_id, draft, ids.as_mut(), store))
            })
            .flatten();
        match result {
            Some(Ok(_)) => Ok(()),
            Some(Err(e)) => {
                tracing::error!("[BOARD] add card to {} failed: {}", column_id, e);
                Err(e.to_string())
            }
            None => Err("board is gone".to_string()),
        }
    }

    pub fn update_card(&self, card_id: &str, draft: CardDraft) -> Result<(), String> {
        match self.with_board_and_store(|board, store| board.update_card(card_id, draft, store)) {
            Some(Ok(_)) => Ok(()),
            Some(Err(e)) => {
                tracing::error!("[BOARD] update of {} failed: {}", card_id, e);
                Err(e.to_string())
            }
            None => Err("board is gone".to_string()),
        }
    }

    pub fn delete_card(&self, card_id: &str) {
        if let Some(Err(e)) = self.with_board_and_store(|board, store| board.delete_card(card_id, store)) {
            tracing::error!("[BOARD] delete of {} failed: {}", card_id, e);
        }
    }

    /// Empty every column
    pub fn clear(&self) {
        if let Some(Err(e)) = self.with_board_and_store(|board, store| board.clear(store)) {
            tracing::error!("[BOARD] clear failed: {}", e);
        }
    }

    pub fn set_drag_enabled(&self, enabled: bool) {
        self.engine.update(|engine| engine.set_enabled(enabled));
    }

    /// Keep the gesture's listeners alive; replaces (and drops) the previous set
    pub fn hold_listeners(&self, listeners: GlobalPointerListeners) {
        self.listeners.set_value(Some(listeners));
    }

    /// Stop document-level pointer tracking
    pub fn detach_listeners(&self) {
        self.listeners.with_value(|listeners| {
            if let Some(listeners) = listeners {
                listeners.detach();
            }
        });
    }
}

/// Get the board context
pub fn use_board() -> BoardContext {
    expect_context::<BoardContext>()
}
