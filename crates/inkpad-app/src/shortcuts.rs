//! Keyboard shortcut registry and documentation.

/// Something the user can ask the app to do from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Undo,
    Redo,
    Clear,
    ToggleEraser,
    Save,
    ResizeToWindow,
    /// Pick a preset palette color by index.
    SelectColor(usize),
    ToggleGradient,
    GrowBrush,
    ShrinkBrush,
    CycleCap,
    CyclePattern,
    Quit,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub action: UiAction,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        action: UiAction,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.key == key && self.ctrl == ctrl && self.shift == shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, "Undo", UiAction::Undo),
            Shortcut::new("Z", true, true, "Redo", UiAction::Redo),
            Shortcut::new("Y", true, false, "Redo", UiAction::Redo),
            Shortcut::new("S", true, false, "Save as PNG", UiAction::Save),
            Shortcut::new("C", false, false, "Clear the surface", UiAction::Clear),
            Shortcut::new("E", false, false, "Toggle eraser", UiAction::ToggleEraser),
            Shortcut::new(
                "R",
                false,
                false,
                "Resize surface to window (clears)",
                UiAction::ResizeToWindow,
            ),
            Shortcut::new("G", false, false, "Toggle gradient brush", UiAction::ToggleGradient),
            Shortcut::new("S", false, false, "Cycle brush shape", UiAction::CycleCap),
            Shortcut::new("P", false, false, "Cycle brush style", UiAction::CyclePattern),
            Shortcut::new("]", false, false, "Bigger brush", UiAction::GrowBrush),
            Shortcut::new("[", false, false, "Smaller brush", UiAction::ShrinkBrush),
            Shortcut::new("1", false, false, "Black", UiAction::SelectColor(0)),
            Shortcut::new("2", false, false, "Red", UiAction::SelectColor(1)),
            Shortcut::new("3", false, false, "Green", UiAction::SelectColor(2)),
            Shortcut::new("4", false, false, "Blue", UiAction::SelectColor(3)),
            Shortcut::new("5", false, false, "Yellow", UiAction::SelectColor(4)),
            Shortcut::new("6", false, false, "Magenta", UiAction::SelectColor(5)),
            Shortcut::new("7", false, false, "Cyan", UiAction::SelectColor(6)),
            Shortcut::new("Escape", false, false, "Quit", UiAction::Quit),
        ]
    }

    /// Find the action bound to a key with the given modifiers.
    pub fn lookup(key: &str, ctrl: bool, shift: bool) -> Option<UiAction> {
        Self::all()
            .into_iter()
            .find(|s| s.matches(key, ctrl, shift))
            .map(|s| s.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let shortcut = Shortcut::new("Z", true, true, "Redo", UiAction::Redo);
        assert_eq!(shortcut.format(), "Ctrl+Shift+Z");
    }

    #[test]
    fn test_lookup_respects_modifiers() {
        assert_eq!(ShortcutRegistry::lookup("Z", true, false), Some(UiAction::Undo));
        assert_eq!(ShortcutRegistry::lookup("Z", true, true), Some(UiAction::Redo));
        assert_eq!(ShortcutRegistry::lookup("S", true, false), Some(UiAction::Save));
        assert_eq!(ShortcutRegistry::lookup("S", false, false), Some(UiAction::CycleCap));
        assert_eq!(ShortcutRegistry::lookup("Z", false, false), None);
    }

    #[test]
    fn test_palette_keys() {
        assert_eq!(ShortcutRegistry::lookup("1", false, false), Some(UiAction::SelectColor(0)));
        assert_eq!(ShortcutRegistry::lookup("7", false, false), Some(UiAction::SelectColor(6)));
    }

    #[test]
    fn test_no_duplicate_bindings() {
        let all = ShortcutRegistry::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(
                    !a.matches(b.key, b.ctrl, b.shift),
                    "{} is bound twice",
                    a.format()
                );
            }
        }
    }
}
