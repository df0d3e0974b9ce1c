//! Pointer and touch input mapped onto the stroke lifecycle.

use crate::brush::{self, BrushConfig, StrokeState};
use crate::history::HistoryManager;
use crate::surface::Surface;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Where a pointer event came from. Both map to the same stroke lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// Pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, kind: PointerKind },
    Move { position: Point, kind: PointerKind },
    Up { position: Point, kind: PointerKind },
    /// Pointer left the capture region or the platform cancelled the gesture.
    Leave,
}

/// Tracks the in-progress stroke and drives the brush and history.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    /// Active stroke, if a pointer is down.
    stroke: Option<StrokeState>,
    /// Points of the active stroke, in order.
    path: Vec<Point>,
    /// Completed strokes since creation.
    strokes_completed: usize,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stroke is in progress.
    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    /// Points of the stroke in progress.
    pub fn current_path(&self) -> &[Point] {
        &self.path
    }

    pub fn strokes_completed(&self) -> usize {
        self.strokes_completed
    }

    /// Begin a stroke at `point`, drawing its initial dot.
    ///
    /// A stroke that was never ended is ended (and committed) first.
    pub fn stroke_start(
        &mut self,
        surface: &mut Surface,
        history: &mut HistoryManager,
        config: &BrushConfig,
        point: Point,
    ) {
        if self.is_stroking() {
            log::debug!("Stroke start while stroking, ending previous stroke");
            self.stroke_end(surface, history);
        }

        let mut state = StrokeState::new();
        brush::extend_stroke(surface, &mut state, point, config);
        self.stroke = Some(state);
        self.path.clear();
        self.path.push(point);
        log::debug!("Stroke started at ({:.1}, {:.1})", point.x, point.y);
    }

    /// Extend the active stroke to `point`. Ignored with no active stroke.
    pub fn stroke_extend(&mut self, surface: &mut Surface, config: &BrushConfig, point: Point) {
        if let Some(state) = &mut self.stroke {
            brush::extend_stroke(surface, state, point, config);
            self.path.push(point);
        }
    }

    /// Finish the active stroke and commit the surface to history.
    ///
    /// Returns `false` (and commits nothing) when no stroke was active.
    pub fn stroke_end(&mut self, surface: &mut Surface, history: &mut HistoryManager) -> bool {
        let Some(state) = self.stroke.take() else {
            return false;
        };
        history.commit(surface.read_all());
        self.strokes_completed += 1;
        log::debug!(
            "Stroke ended: {} points, {} segments",
            self.path.len(),
            state.segments()
        );
        self.path.clear();
        true
    }

    /// Route a pointer event into the stroke lifecycle.
    ///
    /// `Up` first extends to its position when the pointer moved since the
    /// last event, then ends the stroke.
    pub fn handle_pointer_event(
        &mut self,
        surface: &mut Surface,
        history: &mut HistoryManager,
        config: &BrushConfig,
        event: PointerEvent,
    ) {
        match event {
            PointerEvent::Down { position, .. } => {
                self.stroke_start(surface, history, config, position);
            }
            PointerEvent::Move { position, .. } => {
                self.stroke_extend(surface, config, position);
            }
            PointerEvent::Up { position, .. } => {
                let moved = self
                    .stroke
                    .and_then(|s| s.last_point())
                    .is_some_and(|last| last != position);
                if moved {
                    self.stroke_extend(surface, config, position);
                }
                self.stroke_end(surface, history);
            }
            PointerEvent::Leave => {
                self.stroke_end(surface, history);
            }
        }
    }
}
