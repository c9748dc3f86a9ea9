//! Layout Query
//!
//! The geometry seam between drag logic and whatever draws the items.

use std::collections::HashMap;

use crate::geometry::{Point, Rect};

/// Read-only geometry queries needed while dragging
pub trait LayoutQuery {
    /// Current bounding box of a draggable item, if it is laid out
    fn bounding_box(&self, item_id: &str) -> Option<Rect>;

    /// Id of the drop container under a point
    fn container_at(&self, point: Point) -> Option<String>;
}

/// Fixed geometry, for driving the drag logic without a rendering surface
#[derive(Clone, Debug, Default)]
pub struct StaticLayout {
    items: HashMap<String, Rect>,
    containers: Vec<(String, Rect)>,
}

impl StaticLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, id: impl Into<String>, rect: Rect) -> Self {
        self.set_item(id, rect);
        self
    }

    pub fn with_container(mut self, id: impl Into<String>, rect: Rect) -> Self {
        self.containers.push((id.into(), rect));
        self
    }

    pub fn set_item(&mut self, id: impl Into<String>, rect: Rect) {
        self.items.insert(id.into(), rect);
    }

    /// Lay items out top to bottom inside a container, `height` each
    pub fn stack<S: AsRef<str>>(mut self, container: Rect, ids: &[S], height: f64) -> Self {
        for (i, id) in ids.iter().enumerate() {
            let rect = Rect::new(container.x, container.y + i as f64 * height, container.width, height);
            self.set_item(id.as_ref(), rect);
        }
        self
    }
}

impl LayoutQuery for StaticLayout {
    fn bounding_box(&self, item_id: &str) -> Option<Rect> {
        self.items.get(item_id).copied()
    }

    fn container_at(&self, point: Point) -> Option<String> {
        self.containers
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(id, _)| id.clone())
    }
}

/// Slot index for a pointer among siblings in visual order.
///
/// Picks the first sibling whose vertical midpoint lies below the pointer,
/// or the end of the list when none does. First match wins, so a tie goes
/// to the earlier sibling. Siblings without geometry never match.
pub fn insertion_index<I>(siblings: I, pointer_y: f64) -> usize
where
    I: IntoIterator<Item = Option<Rect>>,
{
    let mut count = 0;
    for (i, rect) in siblings.into_iter().enumerate() {
        if let Some(rect) = rect {
            if pointer_y < rect.mid_y() {
                return i;
            }
        }
        count = i + 1;
    }
    count
}
