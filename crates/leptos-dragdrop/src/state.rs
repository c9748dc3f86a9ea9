//! Drag State
//!
//! Transient state of one in-progress drag gesture. A value owned by
//! whoever runs the gesture; there is no global instance.

use crate::geometry::{Point, Rect};

/// Empty slot marking where the dragged item lands if released now.
///
/// `index` counts the container's items excluding the dragged one, so it
/// is the insertion index once the item has been taken out.
#[derive(Clone, Debug, PartialEq)]
pub struct Placeholder {
    pub container_id: String,
    pub index: usize,
    pub height: f64,
}

/// What is captured when a gesture starts
#[derive(Clone, Debug)]
pub struct DragStart {
    pub item_id: String,
    pub container_id: String,
    /// Position among siblings at grab time
    pub index: usize,
    /// Item bounding box at grab time
    pub rect: Rect,
    pub pointer: Point,
}

/// State of a drag gesture; `Default` is idle
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragState {
    dragged: Option<String>,
    placeholder: Option<Placeholder>,
    original_container: Option<String>,
    original_index: usize,
    current_container: Option<String>,
    original_width: f64,
    offset_x: f64,
    offset_y: f64,
    pointer: Point,
}

impl DragState {
    /// Idle -> Dragging. The placeholder starts in the item's own slot.
    pub fn begin(start: DragStart) -> Self {
        let (offset_x, offset_y) = start.rect.offset_of(start.pointer);
        Self {
            dragged: Some(start.item_id),
            placeholder: Some(Placeholder {
                container_id: start.container_id.clone(),
                index: start.index,
                height: start.rect.height,
            }),
            original_container: Some(start.container_id.clone()),
            original_index: start.index,
            current_container: Some(start.container_id),
            original_width: start.rect.width,
            offset_x,
            offset_y,
            pointer: start.pointer,
        }
    }

    /// Back to idle
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True iff an item is being dragged
    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn dragged(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    /// Id of the source container, empty when idle
    pub fn original_container_id(&self) -> &str {
        self.original_container.as_deref().unwrap_or_default()
    }

    pub fn original_index(&self) -> usize {
        self.original_index
    }

    pub fn current_container(&self) -> Option<&str> {
        self.current_container.as_deref()
    }

    pub fn original_width(&self) -> f64 {
        self.original_width
    }

    /// Pointer offset inside the item's box at grab time
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Top-left corner of the floating item for the current pointer
    pub fn floating_origin(&self) -> Point {
        Point::new(self.pointer.x - self.offset_x, self.pointer.y - self.offset_y)
    }

    pub fn track_pointer(&mut self, pointer: Point) {
        if self.is_dragging() {
            self.pointer = pointer;
        }
    }

    pub fn set_current_container(&mut self, container_id: String) {
        if self.is_dragging() {
            self.current_container = Some(container_id);
        }
    }

    /// Move the placeholder, keeping the height captured at grab time
    pub fn place(&mut self, container_id: &str, index: usize) {
        if let Some(ph) = self.placeholder.as_mut() {
            if ph.container_id != container_id {
                ph.container_id = container_id.to_string();
            }
            ph.index = index;
        }
    }
}

/// Side effects at gesture boundaries, e.g. page-level styling
pub trait GestureHooks {
    fn on_gesture_start(&mut self, _state: &DragState) {}
    fn on_gesture_end(&mut self) {}
}
