//! Inkpad Application
//!
//! Native shell around the core sketchpad: a window that shows the surface,
//! mouse input, and keyboard shortcuts.

mod app;
mod shortcuts;
mod window;

pub use app::{App, AppConfig, AppError, AppResult, AppState, PointerTracker};
pub use shortcuts::{Shortcut, ShortcutRegistry, UiAction};
