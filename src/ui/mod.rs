//! UI components and rendering
//!
//! The `eframe` front end: the application window, the rain background
//! painter, and the history and prompt views. Markup parsing and palettes
//! are plain functions so they can be tested without a window.

pub mod app;
pub mod colors;
pub mod markup;
pub mod matrix_view;
pub mod terminal_view;

// Re-exports for convenience
pub use app::MatrixTermApp;
pub use colors::{ToEguiColor, UiColors};
pub use markup::{MarkupLine, Span};
