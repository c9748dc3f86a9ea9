//! Leptos DragDrop Utilities
//!
//! Pointer-driven drag primitives: geometry, the layout query seam,
//! the midpoint placement rule and the per-gesture `DragState`.
//! The `dom` module binds these to a real document via web-sys;
//! everything else is plain Rust and runs without a browser.
//!
//! The crate itself does not depend on `leptos`. The app wraps these types
//! in its own signals and components, so the engine can be tested without
//! a reactive runtime.

mod geometry;
mod layout;
mod state;
pub mod dom;

pub use geometry::{Point, Rect};
pub use layout::{insertion_index, LayoutQuery, StaticLayout};
pub use state::{DragStart, DragState, GestureHooks, Placeholder};
