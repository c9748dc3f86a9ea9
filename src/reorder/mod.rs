//! Drag-Reorder Engine
//!
//! Turns pointer down/move/up into placeholder feedback while dragging and,
//! on release, a single move applied to both the board and the store.
//!
//! One engine per board. It never touches the document itself: geometry
//! comes through `LayoutQuery` and page-level effects through `GestureHooks`.

mod reconcile;
#[cfg(test)]
mod tests;

use leptos_dragdrop::{insertion_index, DragStart, DragState, GestureHooks, LayoutQuery, Point, Rect};

use crate::board::Board;
use crate::models::{Card, Column};
use crate::store::ColumnStore;

/// Primary mouse button
pub const PRIMARY_BUTTON: i16 = 0;

/// A pointer-down on a card
#[derive(Clone, Debug, PartialEq)]
pub struct PointerPress {
    pub card_id: String,
    pub point: Point,
    pub button: i16,
    /// Pressed on the card's delete control
    pub on_delete_control: bool,
}

#[cfg(test)]
impl PointerPress {
    pub fn primary(card_id: impl Into<String>, point: Point) -> Self {
        Self {
            card_id: card_id.into(),
            point,
            button: PRIMARY_BUTTON,
            on_delete_control: false,
        }
    }
}

/// Why a release changed nothing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbortReason {
    /// No placeholder, or its column is not on the board
    MissingPlaceholder,
    /// The dragged card is no longer on the board
    CardVanished,
}

/// Result of a pointer-up
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// No gesture was in progress
    Ignored,
    Aborted(AbortReason),
    Moved {
        card_id: String,
        from: String,
        to: String,
        index: usize,
        /// False when the store was not updated; the board and the store
        /// then disagree until the next reload
        persisted: bool,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReorderEngine {
    state: DragState,
    enabled: bool,
}

impl Default for ReorderEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReorderEngine {
    pub fn new() -> Self {
        Self { state: DragState::default(), enabled: true }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling does not interrupt a gesture already in progress
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Idle -> Dragging. Returns whether a gesture started.
    pub fn pointer_down(
        &mut self,
        press: PointerPress,
        board: &Board,
        layout: &dyn LayoutQuery,
        hooks: &mut dyn GestureHooks,
    ) -> bool {
        if !self.enabled || self.state.is_dragging() {
            return false;
        }
        if press.button != PRIMARY_BUTTON || press.on_delete_control {
            return false;
        }
        let Some((ci, index)) = board.locate(&press.card_id) else {
            tracing::debug!("[DND] press on unknown card {}", press.card_id);
            return false;
        };
        let rect = layout
            .bounding_box(&press.card_id)
            .unwrap_or_else(|| Rect::new(press.point.x, press.point.y, 0.0, 0.0));

        self.state = DragState::begin(DragStart {
            item_id: press.card_id,
            container_id: board.columns()[ci].id().to_string(),
            index,
            rect,
            pointer: press.point,
        });
        hooks.on_gesture_start(&self.state);
        tracing::debug!(
            "[DND] start: card={:?} column={} index={}",
            self.state.dragged(),
            self.state.original_container_id(),
            index
        );
        true
    }

    /// Track the pointer and re-place the placeholder. Returns whether a
    /// gesture is in progress.
    pub fn pointer_move(&mut self, point: Point, board: &Board, layout: &dyn LayoutQuery) -> bool {
        if !self.state.is_dragging() {
            return false;
        }
        self.state.track_pointer(point);

        // Outside every column the last column and slot stay in effect
        if let Some(column_id) = layout.container_at(point) {
            if board.column(&column_id).is_some() {
                self.state.set_current_container(column_id);
            }
        }
        let Some(column) = self.state.current_container().and_then(|id| board.column(id)) else {
            return true;
        };

        let dragged = self.state.dragged();
        let siblings = column
            .cards()
            .iter()
            .filter(|card| Some(card.id()) != dragged)
            .map(|card| layout.bounding_box(card.id()));
        let index = insertion_index(siblings, point.y);

        let column_id = column.id().to_string();
        self.state.place(&column_id, index);
        true
    }

    /// Dragging -> Idle, committing the move. The engine is idle afterwards
    /// whatever the outcome; store failures are logged, not returned.
    pub fn pointer_up(
        &mut self,
        board: &mut Board,
        store: &mut dyn ColumnStore,
        hooks: &mut dyn GestureHooks,
    ) -> DropOutcome {
        if !self.state.is_dragging() {
            return DropOutcome::Ignored;
        }
        let state = std::mem::take(&mut self.state);
        hooks.on_gesture_end();

        let outcome = reconcile::reconcile(board, store, &state);
        tracing::debug!("[DND] end: {:?}", outcome);
        outcome
    }
}

/// One rendered row of a column's card list
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnEntry {
    Card(Card),
    /// The card being dragged; it floats but keeps its slot in the list
    Dragged(Card),
    Placeholder { height: f64 },
}

impl ColumnEntry {
    /// Stable key for keyed rendering
    pub fn key(&self) -> String {
        match self {
            ColumnEntry::Card(card) | ColumnEntry::Dragged(card) => card.id().to_string(),
            ColumnEntry::Placeholder { .. } => "__placeholder".to_string(),
        }
    }
}

/// Render order of a column: its cards, with the placeholder slotted in
/// among the cards that are not being dragged
pub fn column_entries(column: &Column, state: &DragState) -> Vec<ColumnEntry> {
    let dragged = state.dragged();
    let slot = state
        .placeholder()
        .filter(|ph| ph.container_id == column.id())
        .map(|ph| (ph.index, ph.height));

    let mut entries = Vec::with_capacity(column.len() + 1);
    let mut k = 0;
    for card in column.cards() {
        if Some(card.id()) == dragged {
            entries.push(ColumnEntry::Dragged(card.clone()));
            continue;
        }
        if let Some((index, height)) = slot {
            if index == k {
                entries.push(ColumnEntry::Placeholder { height });
            }
        }
        entries.push(ColumnEntry::Card(card.clone()));
        k += 1;
    }
    if let Some((index, height)) = slot {
        if index >= k {
            entries.push(ColumnEntry::Placeholder { height });
        }
    }
    entries
}
