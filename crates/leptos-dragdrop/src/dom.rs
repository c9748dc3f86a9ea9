//! DOM Bindings
//!
//! web-sys implementations of the drag seams. Items are found by the
//! `data-drag-item` attribute and drop containers by `data-drag-container`.

use std::cell::Cell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::geometry::{Point, Rect};
use crate::layout::LayoutQuery;
use crate::state::{DragState, GestureHooks};

/// Attribute carrying a draggable item's id
pub const ITEM_ATTR: &str = "data-drag-item";
/// Attribute carrying a drop container's id
pub const CONTAINER_ATTR: &str = "data-drag-container";

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|win| win.document())
}

/// `[attr="value"]` with the value quoted as a CSS string, so ids holding
/// quotes, backslashes or control characters still select their element
pub fn attr_selector(attr: &str, value: &str) -> String {
    let mut out = String::with_capacity(attr.len() + value.len() + 6);
    out.push('[');
    out.push_str(attr);
    out.push_str("=\"");
    for ch in value.chars() {
        match ch {
            '\0' => out.push('\u{FFFD}'),
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\u{1}'..='\u{1f}' | '\u{7f}' => out.push_str(&format!("\\{:x} ", ch as u32)),
            _ => out.push(ch),
        }
    }
    out.push_str("\"]");
    out
}

/// Geometry read from the live document
#[derive(Clone)]
pub struct DomLayout {
    document: web_sys::Document,
}

impl DomLayout {
    pub fn from_window() -> Option<Self> {
        document().map(|document| Self { document })
    }
}

impl LayoutQuery for DomLayout {
    fn bounding_box(&self, item_id: &str) -> Option<Rect> {
        let selector = attr_selector(ITEM_ATTR, item_id);
        let el = self.document.query_selector(&selector).ok().flatten()?;
        let r = el.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
    }

    fn container_at(&self, point: Point) -> Option<String> {
        let el = self.document.element_from_point(point.x as f32, point.y as f32)?;
        let container = el.closest(&format!("[{}]", CONTAINER_ATTR)).ok().flatten()?;
        container.get_attribute(CONTAINER_ATTR)
    }
}

/// Value of `attr` on the nearest ancestor-or-self of an event target
pub fn closest_attr(target: Option<web_sys::EventTarget>, attr: &str) -> Option<String> {
    let el = target?.dyn_into::<web_sys::Element>().ok()?;
    let found = el.closest(&format!("[{}]", attr)).ok().flatten()?;
    found.get_attribute(attr)
}

/// Whether an event target sits inside an element matching `selector`
pub fn is_within(target: Option<web_sys::EventTarget>, selector: &str) -> bool {
    target
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

/// Pointer position of a mouse event
pub fn client_point(ev: &web_sys::MouseEvent) -> Point {
    Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

/// Document-level mousemove/mouseup listeners for one gesture.
///
/// Attach when a gesture starts and detach when it ends, so a stray
/// move or up event from an earlier gesture never reaches the next one.
/// Do not drop this from inside one of its own callbacks; detach there
/// and let the next gesture replace it.
pub struct GlobalPointerListeners {
    document: web_sys::Document,
    on_move: Closure<dyn FnMut(web_sys::MouseEvent)>,
    on_up: Closure<dyn FnMut(web_sys::MouseEvent)>,
    attached: Cell<bool>,
}

impl GlobalPointerListeners {
    pub fn attach<M, U>(on_move: M, on_up: U) -> Option<Self>
    where
        M: FnMut(web_sys::MouseEvent) + 'static,
        U: FnMut(web_sys::MouseEvent) + 'static,
    {
        let Some(document) = document() else {
            tracing::warn!("[DND] no document, pointer listeners not attached");
            return None;
        };
        let on_move = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(on_move);
        let on_up = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(on_up);
        let _ = document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
        let _ = document.add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref());
        Some(Self {
            document,
            on_move,
            on_up,
            attached: Cell::new(true),
        })
    }

    pub fn detach(&self) {
        if !self.attached.replace(false) {
            return;
        }
        let _ = self
            .document
            .remove_event_listener_with_callback("mousemove", self.on_move.as_ref().unchecked_ref());
        let _ = self
            .document
            .remove_event_listener_with_callback("mouseup", self.on_up.as_ref().unchecked_ref());
    }
}

impl Drop for GlobalPointerListeners {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Page-level styling for the gesture: no text selection, grabbing cursor
#[derive(Clone, Copy, Debug, Default)]
pub struct DomHooks;

impl DomHooks {
    fn body_style() -> Option<web_sys::CssStyleDeclaration> {
        document().and_then(|doc| doc.body()).map(|body| body.style())
    }
}

impl GestureHooks for DomHooks {
    fn on_gesture_start(&mut self, _state: &DragState) {
        if let Some(style) = Self::body_style() {
            let _ = style.set_property("user-select", "none");
            let _ = style.set_property("cursor", "grabbing");
        }
    }

    fn on_gesture_end(&mut self) {
        if let Some(style) = Self::body_style() {
            let _ = style.remove_property("user-select");
            let _ = style.remove_property("cursor");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_selector_plain_id() {
        assert_eq!(attr_selector(ITEM_ATTR, "card-1"), r#"[data-drag-item="card-1"]"#);
    }

    #[test]
    fn test_attr_selector_escapes_quotes_and_backslashes() {
        assert_eq!(attr_selector(ITEM_ATTR, r#"a"b\c"#), r#"[data-drag-item="a\"b\\c"]"#);
    }

    #[test]
    fn test_attr_selector_escapes_control_characters() {
        assert_eq!(attr_selector(ITEM_ATTR, "a\nb\0"), "[data-drag-item=\"a\\a b\u{FFFD}\"]");
    }
}
