//! Inkpad Core Library
//!
//! Platform-agnostic stroke rendering and snapshot history for the Inkpad
//! freehand drawing surface.

pub mod brush;
pub mod color;
pub mod config;
pub mod export;
pub mod history;
pub mod input;
pub mod pad;
pub mod surface;

pub use brush::{
    BrushColor, BrushConfig, BrushError, BrushMode, CapShape, LinePattern, StrokeState,
    extend_stroke,
};
pub use color::{ColorParseError, GradientDescriptor, GradientStop, PALETTE, Rgba};
pub use config::{ConfigError, PadConfig};
pub use export::{DEFAULT_EXPORT_FILE_NAME, ExportError};
pub use history::HistoryManager;
pub use input::{InputController, PointerEvent, PointerKind};
pub use pad::{PadError, Sketchpad};
pub use surface::{Snapshot, Surface, SurfaceError};
