//! Application shell: event loop, pointer tracking and shortcut actions.

use crate::shortcuts::{ShortcutRegistry, UiAction};
use crate::window::PadWindow;
use inkpad_core::{
    BrushColor, ConfigError, GradientDescriptor, PALETTE, PadConfig, PadError, PointerEvent,
    PointerKind, Rgba, Sketchpad,
};
use kurbo::Point;
use std::ops::ControlFlow;
use std::path::PathBuf;
use thiserror::Error;

const MIN_BRUSH_WIDTH: f64 = 1.0;
const MAX_BRUSH_WIDTH: f64 = 100.0;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Window error: {0}")]
    Window(String),
    #[error(transparent)]
    Pad(#[from] PadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub pad: PadConfig,
    /// Directory PNG exports are written to.
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Inkpad".to_string(),
            pad: PadConfig::for_viewport(1280, 800),
            export_dir: PathBuf::from("."),
        }
    }
}

/// Turns polled mouse state into pointer events.
///
/// The window is polled once per frame, so button transitions are detected
/// by comparing against the previous frame.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    down: bool,
    last: Option<Point>,
}

impl PointerTracker {
    pub fn update(&mut self, down: bool, position: Option<(f32, f32)>) -> Option<PointerEvent> {
        let position = position.map(|(x, y)| Point::new(f64::from(x), f64::from(y)));
        let kind = PointerKind::Mouse;

        let event = match (self.down, down, position) {
            (false, true, Some(position)) => Some(PointerEvent::Down { position, kind }),
            (true, true, Some(position)) if self.last != Some(position) => {
                Some(PointerEvent::Move { position, kind })
            }
            (true, false, Some(position)) => Some(PointerEvent::Up { position, kind }),
            (true, _, None) => Some(PointerEvent::Leave),
            _ => None,
        };

        // Leaving the window ends the stroke; coming back with the button
        // still held starts a new one.
        self.down = down && position.is_some();
        self.last = position;
        event
    }
}

/// Sketchpad plus the UI-side state the shortcuts act on.
#[derive(Debug)]
pub struct AppState {
    pub pad: Sketchpad,
    /// Color restored when leaving gradient mode.
    last_solid: Rgba,
    export_dir: PathBuf,
}

impl AppState {
    pub fn new(pad: Sketchpad, export_dir: PathBuf) -> Self {
        let last_solid = match &pad.brush_config().color {
            BrushColor::Solid(color) => *color,
            BrushColor::Gradient(_) => Rgba::BLACK,
        };
        Self {
            pad,
            last_solid,
            export_dir,
        }
    }

    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(self.pad.export_file_name())
    }

    /// Apply a shortcut action. `window_size` is the current client size.
    pub fn apply(&mut self, action: UiAction, window_size: (usize, usize)) -> ControlFlow<()> {
        log::debug!("Action: {:?}", action);
        match action {
            UiAction::Undo => {
                if let Err(e) = self.pad.undo() {
                    log::warn!("Undo failed: {}", e);
                }
            }
            UiAction::Redo => {
                if let Err(e) = self.pad.redo() {
                    log::warn!("Redo failed: {}", e);
                }
            }
            UiAction::Clear => self.pad.clear(),
            UiAction::ToggleEraser => {
                let on = self.pad.toggle_eraser();
                log::info!("Eraser {}", if on { "on" } else { "off" });
            }
            UiAction::Save => {
                let path = self.export_path();
                if let Err(e) = self.pad.save_png(&path) {
                    log::error!("Failed to save PNG: {}", e);
                }
            }
            UiAction::ResizeToWindow => {
                let (w, h) = window_size;
                let w = i64::try_from(w).unwrap_or(i64::MAX);
                let h = i64::try_from(h).unwrap_or(i64::MAX);
                if let Err(e) = self.pad.resize(w, h) {
                    log::warn!("Resize failed: {}", e);
                }
            }
            UiAction::SelectColor(index) => {
                if let Some(color) = PALETTE.get(index).copied() {
                    self.last_solid = color;
                    self.update_brush(|brush| brush.color = BrushColor::Solid(color));
                }
            }
            UiAction::ToggleGradient => {
                let next = match self.pad.brush_config().color {
                    BrushColor::Gradient(_) => BrushColor::Solid(self.last_solid),
                    BrushColor::Solid(_) => BrushColor::Gradient(GradientDescriptor::rgb_ramp()),
                };
                self.update_brush(|brush| brush.color = next);
            }
            UiAction::GrowBrush => self.update_brush(|brush| {
                brush.width = (brush.width + 1.0).min(MAX_BRUSH_WIDTH);
            }),
            UiAction::ShrinkBrush => self.update_brush(|brush| {
                brush.width = (brush.width - 1.0).max(MIN_BRUSH_WIDTH);
            }),
            UiAction::CycleCap => self.update_brush(|brush| brush.cap = brush.cap.next()),
            UiAction::CyclePattern => {
                self.update_brush(|brush| brush.pattern = brush.pattern.next())
            }
            UiAction::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn update_brush(&mut self, edit: impl FnOnce(&mut inkpad_core::BrushConfig)) {
        let mut brush = self.pad.brush_config().clone();
        edit(&mut brush);
        if let Err(e) = self.pad.set_brush_config(brush) {
            log::warn!("Brush rejected: {}", e);
        }
    }
}

/// The native application.
pub struct App;

impl App {
    /// Open the window and run until it is closed.
    pub fn run(config: AppConfig) -> AppResult<()> {
        ShortcutRegistry::print_all();

        let pad = Sketchpad::with_config(config.pad.clone())?;
        let mut window =
            PadWindow::new(&config.title, pad.width() as usize, pad.height() as usize)?;
        let mut state = AppState::new(pad, config.export_dir.clone());
        let mut tracker = PointerTracker::default();

        while window.is_open() {
            let (ctrl, shift) = window.modifiers();
            for key in window.pressed_keys() {
                let Some(action) = ShortcutRegistry::lookup(key, ctrl, shift) else {
                    continue;
                };
                if state.apply(action, window.size()).is_break() {
                    log::info!("Quitting");
                    return Ok(());
                }
            }

            if let Some(event) = tracker.update(window.left_down(), window.mouse_pos()) {
                state.pad.handle_pointer_event(event);
            }

            window.present(state.pad.surface())?;
        }
        Ok(())
    }
}
