//! The sketchpad: surface, brush, history and input wired together.

use crate::brush::{BrushConfig, BrushError, BrushMode, BrushResult};
use crate::config::PadConfig;
use crate::export::{self, ExportResult};
use crate::history::HistoryManager;
use crate::input::{InputController, PointerEvent, PointerKind};
use crate::surface::{self, Surface, SurfaceError, SurfaceResult};
use kurbo::Point;
use std::path::Path;
use thiserror::Error;

/// Errors building a sketchpad from configuration.
#[derive(Debug, Error)]
pub enum PadError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Brush(#[from] BrushError),
}

/// A drawing surface with stroke input and undo/redo.
///
/// Every method runs to completion before returning; callers feed it pointer
/// coordinates already translated into surface space.
#[derive(Debug)]
pub struct Sketchpad {
    surface: Surface,
    history: HistoryManager,
    input: InputController,
    /// Brush as last set by the UI.
    brush: BrushConfig,
    /// Eraser toggle, layered over `brush` at composite time.
    eraser: bool,
    export_file_name: String,
}

impl Sketchpad {
    /// Create a sketchpad with default settings at the given size.
    pub fn new(width: i64, height: i64) -> SurfaceResult<Self> {
        let config = PadConfig {
            width,
            height,
            ..PadConfig::default()
        };
        let surface = Surface::new(config.width, config.height, config.background)?;
        Ok(Self::from_parts(surface, config))
    }

    /// Create a sketchpad from configuration.
    pub fn with_config(config: PadConfig) -> Result<Self, PadError> {
        config.brush.validate()?;
        let surface = Surface::new(config.width, config.height, config.background)?;
        Ok(Self::from_parts(surface, config))
    }

    fn from_parts(surface: Surface, config: PadConfig) -> Self {
        let mut history = HistoryManager::with_max_depth(config.history_depth);
        history.seed(surface.read_all());
        log::info!("Sketchpad ready at {}x{}", surface.width(), surface.height());
        Self {
            surface,
            history,
            input: InputController::new(),
            brush: config.brush,
            eraser: false,
            export_file_name: config.export_file_name,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn export_file_name(&self) -> &str {
        &self.export_file_name
    }

    pub fn is_stroking(&self) -> bool {
        self.input.is_stroking()
    }

    // --- Brush ---

    /// Replace the brush. Takes effect at the next segment, mid-stroke too.
    pub fn set_brush_config(&mut self, config: BrushConfig) -> BrushResult<()> {
        config.validate()?;
        self.brush = config;
        Ok(())
    }

    pub fn brush_config(&self) -> &BrushConfig {
        &self.brush
    }

    /// Flip the eraser and return the new state.
    pub fn toggle_eraser(&mut self) -> bool {
        self.eraser = !self.eraser;
        log::debug!("Eraser {}", if self.eraser { "on" } else { "off" });
        self.eraser
    }

    pub fn is_eraser(&self) -> bool {
        self.eraser
    }

    /// The brush a segment is drawn with right now.
    fn effective_brush(&self) -> BrushConfig {
        if self.eraser {
            self.brush.clone().with_mode(BrushMode::Erase)
        } else {
            self.brush.clone()
        }
    }

    // --- Input ---

    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        let brush = self.effective_brush();
        self.input
            .handle_pointer_event(&mut self.surface, &mut self.history, &brush, event);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.handle_pointer_event(PointerEvent::Down {
            position: Point::new(x, y),
            kind: PointerKind::Mouse,
        });
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.handle_pointer_event(PointerEvent::Move {
            position: Point::new(x, y),
            kind: PointerKind::Mouse,
        });
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.handle_pointer_event(PointerEvent::Up {
            position: Point::new(x, y),
            kind: PointerKind::Mouse,
        });
    }

    /// Pointer left the surface; ends any stroke in progress.
    pub fn pointer_leave(&mut self) {
        self.handle_pointer_event(PointerEvent::Leave);
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.handle_pointer_event(PointerEvent::Down {
            position: Point::new(x, y),
            kind: PointerKind::Touch,
        });
    }

    pub fn touch_move(&mut self, x: f64, y: f64) {
        self.handle_pointer_event(PointerEvent::Move {
            position: Point::new(x, y),
            kind: PointerKind::Touch,
        });
    }

    pub fn touch_end(&mut self, x: f64, y: f64) {
        self.handle_pointer_event(PointerEvent::Up {
            position: Point::new(x, y),
            kind: PointerKind::Touch,
        });
    }

    fn finish_stroke(&mut self) {
        self.input.stroke_end(&mut self.surface, &mut self.history);
    }

    // --- Mutations ---

    /// Clear to the background and record it in history.
    pub fn clear(&mut self) {
        self.finish_stroke();
        self.surface.clear();
        self.history.commit(self.surface.read_all());
        log::info!("Surface cleared");
    }

    /// Resize (and clear) the surface, recording it in history.
    ///
    /// Invalid dimensions leave surface, history and any stroke in progress
    /// untouched.
    pub fn resize(&mut self, width: i64, height: i64) -> SurfaceResult<()> {
        surface::validate_dimensions(width, height)?;
        self.finish_stroke();
        let blank = self.surface.resize(width, height)?;
        self.history.commit(blank);
        Ok(())
    }

    /// Restore the previous state. `Ok(false)` at the floor.
    ///
    /// A previous state captured at another size is refused with
    /// `DimensionMismatch`, and history stays where it was.
    pub fn undo(&mut self) -> SurfaceResult<bool> {
        self.finish_stroke();
        let Some(target) = self.history.undo_target() else {
            return Ok(false);
        };
        if let Err(e) = self.surface.write_all(target) {
            log::warn!("Undo refused: {}", e);
            return Err(e);
        }
        self.history.undo();
        Ok(true)
    }

    /// Re-apply the last undone state. `Ok(false)` with nothing to redo.
    pub fn redo(&mut self) -> SurfaceResult<bool> {
        self.finish_stroke();
        let Some(target) = self.history.redo_target() else {
            return Ok(false);
        };
        if let Err(e) = self.surface.write_all(target) {
            log::warn!("Redo refused: {}", e);
            return Err(e);
        }
        self.history.redo();
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Export ---

    /// Encode the current surface as PNG.
    pub fn export_png(&self) -> ExportResult<Vec<u8>> {
        export::encode_png(&self.surface)
    }

    /// Write the current surface to `path` as PNG.
    pub fn save_png(&self, path: &Path) -> ExportResult<()> {
        export::write_png(&self.surface, path)
    }
}
