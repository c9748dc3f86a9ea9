//! Drop Reconciliation
//!
//! Commits a finished drag: the slot index is read from the drag state
//! before anything moves, then the board is updated, then the store.

use leptos_dragdrop::DragState;

use super::{AbortReason, DropOutcome};
use crate::board::Board;
use crate::models::ColumnRecord;
use crate::store::{ColumnStore, StoreError};

/// A move to write to the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub card_id: String,
    pub origin_column_id: String,
    pub target_column_id: String,
    /// Title used if the target column has no record yet
    pub target_title: String,
    /// Insertion index once the card is out of its list; `None` appends
    pub new_index: Option<usize>,
}

/// Store-side result of a move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved,
    /// No record for the origin column; nothing written
    OriginMissing,
    /// The origin record does not hold the card; nothing written
    CardMissing,
}

/// Splice the card's record out of the origin column and into the target.
///
/// Same column: one save. Across columns: the origin is saved first, then
/// the card takes the target's id and is inserted into the target record,
/// which is created if missing.
pub fn persist_move(store: &mut dyn ColumnStore, req: &MoveRequest) -> Result<PersistOutcome, StoreError> {
    let Some(mut origin) = store.get_column(&req.origin_column_id)? else {
        return Ok(PersistOutcome::OriginMissing);
    };
    let Some(pos) = origin.position_of(&req.card_id) else {
        return Ok(PersistOutcome::CardMissing);
    };
    let mut card = origin.cards.remove(pos);

    if req.target_column_id == req.origin_column_id {
        let index = req.new_index.unwrap_or(origin.cards.len()).min(origin.cards.len());
        origin.cards.insert(index, card);
        store.save_column(&origin)?;
        return Ok(PersistOutcome::Saved);
    }

    store.save_column(&origin)?;

    card.column_id = req.target_column_id.clone();
    let mut target = store
        .get_column(&req.target_column_id)?
        .unwrap_or_else(|| ColumnRecord::new(&req.target_column_id, &req.target_title));
    let index = req.new_index.unwrap_or(target.cards.len()).min(target.cards.len());
    target.cards.insert(index, card);
    store.save_column(&target)?;
    Ok(PersistOutcome::Saved)
}

pub(super) fn reconcile(board: &mut Board, store: &mut dyn ColumnStore, state: &DragState) -> DropOutcome {
    let (Some(card_id), Some(placeholder)) = (state.dragged(), state.placeholder()) else {
        return DropOutcome::Aborted(AbortReason::MissingPlaceholder);
    };
    if board.locate(card_id).is_none() {
        tracing::warn!("[DND] dragged card {} vanished before drop", card_id);
        return DropOutcome::Aborted(AbortReason::CardVanished);
    }
    let Some(target) = board.column(&placeholder.container_id) else {
        tracing::warn!("[DND] placeholder column {} not on board", placeholder.container_id);
        return DropOutcome::Aborted(AbortReason::MissingPlaceholder);
    };

    // Index first, before the board changes under it. A slot past the end
    // of the sibling list means cards left the column mid-gesture and the
    // slot no longer exists: append.
    let siblings = target.cards().iter().filter(|c| c.id() != card_id).count();
    let new_index = if placeholder.index <= siblings {
        Some(placeholder.index)
    } else {
        tracing::warn!(
            "[DND] slot {} gone from {} ({} siblings), appending",
            placeholder.index,
            placeholder.container_id,
            siblings
        );
        None
    };
    let target_column_id = target.id().to_string();
    let target_title = target.title().to_string();
    let origin_column_id = state.original_container_id().to_string();

    let Some(index) = board.move_card(card_id, &target_column_id, new_index.unwrap_or(usize::MAX)) else {
        return DropOutcome::Aborted(AbortReason::CardVanished);
    };

    let request = MoveRequest {
        card_id: card_id.to_string(),
        origin_column_id: origin_column_id.clone(),
        target_column_id: target_column_id.clone(),
        target_title,
        new_index,
    };
    let persisted = match persist_move(store, &request) {
        Ok(PersistOutcome::Saved) => true,
        Ok(skipped) => {
            tracing::warn!("[DND] store out of sync, move of {} not saved: {:?}", card_id, skipped);
            false
        }
        Err(e) => {
            tracing::error!("[DND] failed to save move of {}: {}", card_id, e);
            false
        }
    };

    DropOutcome::Moved {
        card_id: card_id.to_string(),
        from: origin_column_id,
        to: target_column_id,
        index,
        persisted,
    }
}
