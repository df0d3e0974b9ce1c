//! Native window that shows the surface and reports mouse and keys.

use crate::app::{AppError, AppResult};
use inkpad_core::Surface;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};

/// Frames per second the event loop is throttled to.
const TARGET_FPS: usize = 60;

pub struct PadWindow {
    window: Window,
    /// Reused 0RGB framebuffer.
    buffer: Vec<u32>,
}

impl PadWindow {
    pub fn new(title: &str, width: usize, height: usize) -> AppResult<Self> {
        let options = WindowOptions {
            resize: true,
            // surface pixels map 1:1 to window pixels, so mouse coordinates are surface-local
            scale_mode: ScaleMode::UpperLeft,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| AppError::Window(e.to_string()))?;
        window.set_target_fps(TARGET_FPS);
        Ok(Self {
            window,
            buffer: Vec::new(),
        })
    }

    /// Push the surface to the screen.
    pub fn present(&mut self, surface: &Surface) -> AppResult<()> {
        self.buffer = surface.to_0rgb();
        self.window
            .update_with_buffer(&self.buffer, surface.width() as usize, surface.height() as usize)
            .map_err(|e| AppError::Window(e.to_string()))
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Window client size in pixels.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Mouse position, `None` when outside the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// (ctrl, shift)
    pub fn modifiers(&self) -> (bool, bool) {
        let down = |key| self.window.is_key_down(key);
        let ctrl = down(Key::LeftCtrl) || down(Key::RightCtrl);
        let shift = down(Key::LeftShift) || down(Key::RightShift);
        (ctrl, shift)
    }

    /// Names of keys pressed since the last frame, as the shortcut registry spells them.
    pub fn pressed_keys(&self) -> Vec<&'static str> {
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(key_name)
            .collect()
    }
}

fn key_name(key: Key) -> Option<&'static str> {
    let name = match key {
        Key::C => "C",
        Key::E => "E",
        Key::G => "G",
        Key::P => "P",
        Key::R => "R",
        Key::S => "S",
        Key::Y => "Y",
        Key::Z => "Z",
        Key::Key1 | Key::NumPad1 => "1",
        Key::Key2 | Key::NumPad2 => "2",
        Key::Key3 | Key::NumPad3 => "3",
        Key::Key4 | Key::NumPad4 => "4",
        Key::Key5 | Key::NumPad5 => "5",
        Key::Key6 | Key::NumPad6 => "6",
        Key::Key7 | Key::NumPad7 => "7",
        Key::LeftBracket => "[",
        Key::RightBracket => "]",
        Key::Escape => "Escape",
        _ => return None,
    };
    Some(name)
}
