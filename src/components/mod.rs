//! UI Components
//!
//! Leptos components for the board.

mod board_view;
mod card_form;
mod card_view;
mod column_view;
mod delete_confirm_button;
mod log_panel;

pub use board_view::BoardView;
pub use card_form::CardForm;
pub use card_view::CardView;
pub use column_view::ColumnView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use log_panel::LogPanel;
