//! Reorder engine scenarios against synthetic geometry.

use leptos_dragdrop::{DragState, GestureHooks, Point, Rect, StaticLayout};

use super::reconcile::{persist_move, MoveRequest, PersistOutcome};
use super::*;
use crate::board::Board;
use crate::config::BoardConfig;
use crate::models::{CardRecord, ColumnRecord};
use crate::store::{ColumnStore, JsonColumnStore, MemoryBackend};

const COLUMN_WIDTH: f64 = 300.0;
const ROW_HEIGHT: f64 = 60.0;

#[derive(Default)]
struct RecordingHooks {
    starts: usize,
    ends: usize,
}

impl GestureHooks for RecordingHooks {
    fn on_gesture_start(&mut self, _state: &DragState) {
        self.starts += 1;
    }

    fn on_gesture_end(&mut self) {
        self.ends += 1;
    }
}

struct Fixture {
    board: Board,
    store: JsonColumnStore<MemoryBackend>,
    engine: ReorderEngine,
    hooks: RecordingHooks,
}

fn record(column: &str, ids: &[&str]) -> ColumnRecord {
    let mut record = ColumnRecord::new(column, column);
    record.cards = ids
        .iter()
        .map(|id| CardRecord {
            id: id.to_string(),
            title: format!("Card {}", id),
            text: String::new(),
            column_id: column.to_string(),
        })
        .collect();
    record
}

/// Columns side by side, 300px wide; cards stacked 60px tall from y=0
fn fixture(columns: &[(&str, &[&str])]) -> Fixture {
    let mut store = JsonColumnStore::new(MemoryBackend::default(), "board");
    for (column, ids) in columns {
        store.save_column(&record(column, ids)).unwrap();
    }
    let board = Board::load(&BoardConfig::default().columns, &mut store).unwrap();
    Fixture {
        board,
        store,
        engine: ReorderEngine::new(),
        hooks: RecordingHooks::default(),
    }
}

impl Fixture {
    fn layout(&self) -> StaticLayout {
        let mut layout = StaticLayout::new();
        for (i, column) in self.board.columns().iter().enumerate() {
            let rect = Rect::new(i as f64 * COLUMN_WIDTH, 0.0, COLUMN_WIDTH, 1000.0);
            layout = layout
                .with_container(column.id(), rect)
                .stack(rect, &column.card_ids(), ROW_HEIGHT);
        }
        layout
    }

    fn press(&mut self, card: &str) -> bool {
        let layout = self.layout();
        let rect = layout.bounding_box(card).unwrap_or_default();
        let point = Point::new(rect.x + 10.0, rect.mid_y());
        self.engine
            .pointer_down(PointerPress::primary(card, point), &self.board, &layout, &mut self.hooks)
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let layout = self.layout();
        self.engine.pointer_move(Point::new(x, y), &self.board, &layout);
    }

    fn release(&mut self) -> DropOutcome {
        self.engine.pointer_up(&mut self.board, &mut self.store, &mut self.hooks)
    }

    fn drag(&mut self, card: &str, x: f64, y: f64) -> DropOutcome {
        assert!(self.press(card));
        self.move_to(x, y);
        self.release()
    }

    fn stored(&self, column: &str) -> Vec<String> {
        self.store.get_column(column).unwrap().map(|r| r.card_ids()).unwrap_or_default()
    }

    fn visual(&self, column: &str) -> Vec<String> {
        self.board.column(column).unwrap().card_ids()
    }
}

#[test]
fn test_drag_last_card_to_top() {
    let mut f = fixture(&[("todo", &["A", "B", "C"])]);
    let outcome = f.drag("C", 10.0, 10.0);

    assert_eq!(
        outcome,
        DropOutcome::Moved {
            card_id: "C".to_string(),
            from: "todo".to_string(),
            to: "todo".to_string(),
            index: 0,
            persisted: true,
        }
    );
    assert_eq!(f.stored("todo"), vec!["C", "A", "B"]);
    assert_eq!(f.visual("todo"), vec!["C", "A", "B"]);
}

#[test]
fn test_drag_into_empty_column() {
    let mut f = fixture(&[("todo", &["A"]), ("in-progress", &[])]);
    f.drag("A", 350.0, 20.0);

    assert!(f.stored("todo").is_empty());
    assert_eq!(f.stored("in-progress"), vec!["A"]);
    let moved = f.store.get_column("in-progress").unwrap().unwrap();
    assert_eq!(moved.cards[0].column_id, "in-progress");
    assert_eq!(f.board.card("A").unwrap().column_id(), "in-progress");
}

#[test]
fn test_drag_down_past_next_sibling() {
    // Pointer between B's midpoint (90) and C's (150)
    let mut f = fixture(&[("todo", &["A", "B", "C"])]);
    f.drag("A", 10.0, 100.0);
    assert_eq!(f.visual("todo"), vec!["B", "A", "C"]);
    assert_eq!(f.stored("todo"), vec!["B", "A", "C"]);
}

#[test]
fn test_placeholder_between_midpoints() {
    let mut f = fixture(&[("todo", &["A", "B", "C", "D"])]);
    assert!(f.press("D"));
    // Below B's midpoint (90), above C's (150)
    f.move_to(10.0, 100.0);

    let ph = f.engine.state().placeholder().unwrap();
    assert_eq!(ph.container_id, "todo");
    assert_eq!(ph.index, 2);
    assert_eq!(ph.height, ROW_HEIGHT);

    f.release();
    assert_eq!(f.stored("todo"), vec!["A", "B", "D", "C"]);
}

#[test]
fn test_below_all_siblings_appends() {
    let mut f = fixture(&[("todo", &["A", "B", "C"])]);
    assert!(f.press("A"));
    f.move_to(10.0, 900.0);
    assert_eq!(f.engine.state().placeholder().unwrap().index, 2);
    f.release();
    assert_eq!(f.stored("todo"), vec!["B", "C", "A"]);
}

#[test]
fn test_cross_column_counts() {
    let mut f = fixture(&[("todo", &["A", "B"]), ("done", &["X", "Y"])]);
    // Above Y's midpoint (90), below X's (30)
    f.drag("A", 610.0, 70.0);

    assert_eq!(f.stored("todo"), vec!["B"]);
    assert_eq!(f.stored("done"), vec!["X", "A", "Y"]);
    assert_eq!(f.stored("done").iter().filter(|id| *id == "A").count(), 1);
    assert_eq!(f.visual("done"), f.stored("done"));
}

#[test]
fn test_same_column_store_matches_board() {
    for source in ["A", "B", "C", "D"] {
        for y in (0..=260).step_by(10) {
            let mut f = fixture(&[("todo", &["A", "B", "C", "D"])]);
            f.drag(source, 10.0, y as f64);

            let stored = f.stored("todo");
            assert_eq!(stored, f.visual("todo"), "drag {} to y={}", source, y);
            let mut sorted = stored.clone();
            sorted.sort();
            assert_eq!(sorted, vec!["A", "B", "C", "D"]);
        }
    }
}

#[test]
fn test_reload_reproduces_order() {
    let mut f = fixture(&[("todo", &["A", "B", "C"]), ("done", &["X"])]);
    f.drag("B", 610.0, 0.0);
    f.drag("C", 10.0, 0.0);

    let reloaded = Board::load(&BoardConfig::default().columns, &mut f.store).unwrap();
    assert_eq!(reloaded.columns(), f.board.columns());
    assert_eq!(reloaded.column("done").unwrap().card_ids(), vec!["B", "X"]);
}

#[test]
fn test_hooks_bracket_the_gesture() {
    let mut f = fixture(&[("todo", &["A", "B"])]);
    f.drag("A", 10.0, 500.0);
    assert_eq!((f.hooks.starts, f.hooks.ends), (1, 1));
    assert!(!f.engine.is_dragging());
    assert_eq!(f.engine.state(), &DragState::default());
}

#[test]
fn test_press_filters() {
    let mut f = fixture(&[("todo", &["A"])]);
    let layout = f.layout();
    let point = Point::new(10.0, 30.0);

    let secondary = PointerPress { button: 2, ..PointerPress::primary("A", point) };
    assert!(!f.engine.pointer_down(secondary, &f.board, &layout, &mut f.hooks));

    let delete = PointerPress { on_delete_control: true, ..PointerPress::primary("A", point) };
    assert!(!f.engine.pointer_down(delete, &f.board, &layout, &mut f.hooks));

    let unknown = PointerPress::primary("ghost", point);
    assert!(!f.engine.pointer_down(unknown, &f.board, &layout, &mut f.hooks));

    f.engine.set_enabled(false);
    assert!(!f.press("A"));

    assert_eq!(f.hooks.starts, 0);
    assert!(!f.engine.is_dragging());
}

#[test]
fn test_one_gesture_at_a_time() {
    let mut f = fixture(&[("todo", &["A", "B"])]);
    assert!(f.press("A"));
    assert!(!f.press("B"));
    assert_eq!(f.engine.state().dragged(), Some("A"));
    assert_eq!(f.hooks.starts, 1);
}

#[test]
fn test_idle_ignores_move_and_up() {
    let mut f = fixture(&[("todo", &["A"])]);
    let layout = f.layout();
    assert!(!f.engine.pointer_move(Point::new(10.0, 10.0), &f.board, &layout));
    assert_eq!(f.release(), DropOutcome::Ignored);
    assert_eq!(f.hooks.ends, 0);
}

#[test]
fn test_pointer_outside_columns_keeps_last_slot() {
    let mut f = fixture(&[("todo", &["A", "B"])]);
    assert!(f.press("A"));
    f.move_to(350.0, 20.0);
    f.move_to(2000.0, 20.0);
    assert_eq!(f.engine.state().current_container(), Some("in-progress"));

    f.release();
    assert_eq!(f.stored("in-progress"), vec!["A"]);
}

#[test]
fn test_capture_at_grab_time() {
    let mut f = fixture(&[("todo", &["A", "B"])]);
    let layout = f.layout();
    let press = PointerPress::primary("B", Point::new(25.0, 70.0));
    assert!(f.engine.pointer_down(press, &f.board, &layout, &mut f.hooks));

    let state = f.engine.state();
    assert_eq!(state.original_container_id(), "todo");
    assert_eq!(state.original_index(), 1);
    assert_eq!(state.original_width(), COLUMN_WIDTH);
    assert_eq!(state.offset(), (25.0, 10.0));
}

#[test]
fn test_store_failure_still_resets() {
    let mut f = fixture(&[("todo", &["A", "B"])]);
    assert!(f.press("A"));
    f.store.backend_mut().set_fail_writes(true);
    f.move_to(350.0, 20.0);

    let outcome = f.release();
    assert!(matches!(outcome, DropOutcome::Moved { persisted: false, .. }));
    assert!(!f.engine.is_dragging());
    assert_eq!(f.hooks.ends, 1);
    // The board shows the move; the store does not
    assert_eq!(f.visual("in-progress"), vec!["A"]);
    assert_eq!(f.stored("todo"), vec!["A", "B"]);
}

#[test]
fn test_vanished_card_aborts() {
    let mut f = fixture(&[("todo", &["A", "B"])]);
    assert!(f.press("A"));
    f.board.column_mut("todo").unwrap().remove_card("A");

    assert_eq!(f.release(), DropOutcome::Aborted(AbortReason::CardVanished));
    assert!(!f.engine.is_dragging());
    assert_eq!(f.stored("todo"), vec!["A", "B"]);
}

#[test]
fn test_missing_card_record_skips_persist() {
    let mut f = fixture(&[("todo", &["A", "B"])]);
    f.store.remove_card_from_column("todo", "A").unwrap();

    let outcome = f.drag("A", 350.0, 20.0);
    assert!(matches!(outcome, DropOutcome::Moved { persisted: false, .. }));
    assert_eq!(f.visual("in-progress"), vec!["A"]);
    assert!(f.stored("in-progress").is_empty());
}

#[test]
fn test_slot_gone_mid_drag_appends() {
    let mut f = fixture(&[("todo", &["A", "B", "C"])]);
    assert!(f.press("A"));
    f.move_to(10.0, 900.0);
    assert_eq!(f.engine.state().placeholder().unwrap().index, 2);

    // C is deleted while A is still in the air
    f.board.delete_card("C", &mut f.store).unwrap();

    let outcome = f.release();
    assert_eq!(
        outcome,
        DropOutcome::Moved {
            card_id: "A".to_string(),
            from: "todo".to_string(),
            to: "todo".to_string(),
            index: 1,
            persisted: true,
        }
    );
    assert_eq!(f.visual("todo"), vec!["B", "A"]);
    assert_eq!(f.stored("todo"), vec!["B", "A"]);
}

#[test]
fn test_placeholder_column_gone_aborts() {
    let mut f = fixture(&[("todo", &["A", "B"])]);
    assert!(f.press("A"));
    f.move_to(350.0, 20.0);
    assert_eq!(f.engine.state().placeholder().unwrap().container_id, "in-progress");

    let remaining = f
        .board
        .columns()
        .iter()
        .filter(|c| c.id() != "in-progress")
        .cloned()
        .collect();
    f.board = Board::from_columns(remaining);

    assert_eq!(f.release(), DropOutcome::Aborted(AbortReason::MissingPlaceholder));
    assert!(!f.engine.is_dragging());
    assert_eq!(f.hooks.ends, 1);
    assert_eq!(f.visual("todo"), vec!["A", "B"]);
    assert_eq!(f.stored("todo"), vec!["A", "B"]);
}

#[test]
fn test_persist_append_when_index_unknown() {
    let mut store = JsonColumnStore::new(MemoryBackend::default(), "board");
    store.save_column(&record("todo", &["A", "B", "C"])).unwrap();
    let req = MoveRequest {
        card_id: "A".to_string(),
        origin_column_id: "todo".to_string(),
        target_column_id: "todo".to_string(),
        target_title: "To Do".to_string(),
        new_index: None,
    };
    assert_eq!(persist_move(&mut store, &req).unwrap(), PersistOutcome::Saved);
    assert_eq!(store.get_column("todo").unwrap().unwrap().card_ids(), vec!["B", "C", "A"]);
}

#[test]
fn test_persist_creates_target_record() {
    let mut store = JsonColumnStore::new(MemoryBackend::default(), "board");
    store.save_column(&record("todo", &["A"])).unwrap();
    let req = MoveRequest {
        card_id: "A".to_string(),
        origin_column_id: "todo".to_string(),
        target_column_id: "done".to_string(),
        target_title: "Done".to_string(),
        new_index: Some(5),
    };
    assert_eq!(persist_move(&mut store, &req).unwrap(), PersistOutcome::Saved);

    let done = store.get_column("done").unwrap().unwrap();
    assert_eq!(done.title, "Done");
    assert_eq!(done.card_ids(), vec!["A"]);
    assert_eq!(done.cards[0].column_id, "done");
}

#[test]
fn test_persist_inconsistencies() {
    let mut store = JsonColumnStore::new(MemoryBackend::default(), "board");
    let mut req = MoveRequest {
        card_id: "A".to_string(),
        origin_column_id: "todo".to_string(),
        target_column_id: "done".to_string(),
        target_title: "Done".to_string(),
        new_index: Some(0),
    };
    assert_eq!(persist_move(&mut store, &req).unwrap(), PersistOutcome::OriginMissing);

    store.save_column(&record("todo", &["B"])).unwrap();
    assert_eq!(persist_move(&mut store, &req).unwrap(), PersistOutcome::CardMissing);

    req.card_id = "B".to_string();
    assert_eq!(persist_move(&mut store, &req).unwrap(), PersistOutcome::Saved);
}

#[test]
fn test_column_entries_idle() {
    let f = fixture(&[("todo", &["A", "B"])]);
    let entries = column_entries(f.board.column("todo").unwrap(), f.engine.state());
    let keys: Vec<_> = entries.iter().map(ColumnEntry::key).collect();
    assert_eq!(keys, vec!["A", "B"]);
    assert!(entries.iter().all(|e| matches!(e, ColumnEntry::Card(_))));
}

#[test]
fn test_column_entries_while_dragging() {
    let mut f = fixture(&[("todo", &["A", "B", "C"])]);
    assert!(f.press("B"));
    f.move_to(10.0, 10.0);

    let entries = column_entries(f.board.column("todo").unwrap(), f.engine.state());
    assert_eq!(entries[0], ColumnEntry::Placeholder { height: ROW_HEIGHT });
    assert!(matches!(&entries[1], ColumnEntry::Card(c) if c.id() == "A"));
    assert!(matches!(&entries[2], ColumnEntry::Dragged(c) if c.id() == "B"));
    assert!(matches!(&entries[3], ColumnEntry::Card(c) if c.id() == "C"));

    f.move_to(10.0, 900.0);
    let entries = column_entries(f.board.column("todo").unwrap(), f.engine.state());
    assert_eq!(entries.last(), Some(&ColumnEntry::Placeholder { height: ROW_HEIGHT }));
}

#[test]
fn test_column_entries_placeholder_elsewhere() {
    let mut f = fixture(&[("todo", &["A", "B"])]);
    assert!(f.press("A"));
    f.move_to(350.0, 20.0);

    let todo = column_entries(f.board.column("todo").unwrap(), f.engine.state());
    assert_eq!(todo.len(), 2);
    let doing = column_entries(f.board.column("in-progress").unwrap(), f.engine.state());
    assert_eq!(doing, vec![ColumnEntry::Placeholder { height: ROW_HEIGHT }]);
}
