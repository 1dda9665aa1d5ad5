//! Pointer and keyboard state for the preview window.
//!
//! [`Input`] folds raw winit events into per-frame state: which keys went down
//! this frame, pointer position in pixels and NDC, drag delta while the left
//! button is held, scroll lines, and a small text line the user can type a
//! date or a body name into (submitted with Enter).

use std::collections::HashSet;

use glam::DVec2;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn from_winit(btn: WinitMouseButton) -> Option<Self> {
        match btn {
            WinitMouseButton::Left => Some(MouseButton::Left),
            WinitMouseButton::Right => Some(MouseButton::Right),
            WinitMouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Keys the viewer binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    F1,
    F2,
    F3,
    PageUp,
    PageDown,
    Plus,
    Minus,
}

impl KeyCode {
    fn from_winit(key: WinitKeyCode) -> Option<Self> {
        Some(match key {
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => KeyCode::Enter,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::Backspace => KeyCode::Backspace,
            WinitKeyCode::Tab => KeyCode::Tab,
            WinitKeyCode::F1 => KeyCode::F1,
            WinitKeyCode::F2 => KeyCode::F2,
            WinitKeyCode::F3 => KeyCode::F3,
            WinitKeyCode::PageUp => KeyCode::PageUp,
            WinitKeyCode::PageDown => KeyCode::PageDown,
            WinitKeyCode::Equal | WinitKeyCode::NumpadAdd => KeyCode::Plus,
            WinitKeyCode::Minus | WinitKeyCode::NumpadSubtract => KeyCode::Minus,
            _ => return None,
        })
    }

    /// Keys that edit the text line instead of triggering a binding.
    fn edits_text(self) -> bool {
        matches!(self, KeyCode::Enter | KeyCode::Backspace)
    }
}

/// Input state tracking for keyboard and mouse.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,

    mouse_held: HashSet<MouseButton>,
    mouse_pressed: HashSet<MouseButton>,

    mouse_position: DVec2,
    mouse_moved: bool,
    drag_delta: DVec2,
    scroll_lines: f64,

    text: String,
    submitted: Option<String>,

    window_size: (u32, u32),
}

impl Input {
    pub fn new() -> Self {
        Self {
            window_size: (1280, 720),
            ..Default::default()
        }
    }

    /// Key went down this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Button went down this frame.
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Pointer position in window pixels.
    pub fn mouse_position(&self) -> DVec2 {
        self.mouse_position
    }

    /// Pointer position in normalized device coordinates. Origin at the window
    /// centre, X right, Y up.
    pub fn mouse_ndc(&self) -> DVec2 {
        let (w, h) = self.window_size;
        if w == 0 || h == 0 {
            return DVec2::ZERO;
        }
        DVec2::new(
            self.mouse_position.x / w as f64 * 2.0 - 1.0,
            1.0 - self.mouse_position.y / h as f64 * 2.0,
        )
    }

    /// Whether the pointer moved this frame.
    pub fn mouse_moved(&self) -> bool {
        self.mouse_moved
    }

    /// Pixels dragged with the left button this frame.
    pub fn drag_delta(&self) -> DVec2 {
        self.drag_delta
    }

    /// Scroll this frame, in lines. Positive is away from the user.
    pub fn scroll_lines(&self) -> f64 {
        self.scroll_lines
    }

    /// Text typed so far on the current line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The line submitted with Enter this frame, if any.
    pub fn take_submitted(&mut self) -> Option<String> {
        self.submitted.take()
    }

    /// Clear per-frame state. Call after the frame has consumed it.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
        self.mouse_moved = false;
        self.drag_delta = DVec2::ZERO;
        self.scroll_lines = 0.0;
        self.submitted = None;
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let key = match event.physical_key {
                    PhysicalKey::Code(code) => KeyCode::from_winit(code),
                    PhysicalKey::Unidentified(_) => None,
                };
                match event.state {
                    ElementState::Pressed => {
                        if let Some(key) = key {
                            self.press_key(key);
                        }
                        if !matches!(key, Some(k) if k.edits_text()) {
                            if let Some(text) = &event.text {
                                self.type_text(text);
                            }
                        }
                    }
                    ElementState::Released => {
                        if let Some(key) = key {
                            self.keys_held.remove(&key);
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(btn) = MouseButton::from_winit(*button) else {
                    return;
                };
                match state {
                    ElementState::Pressed => {
                        self.mouse_pressed.insert(btn);
                        self.mouse_held.insert(btn);
                    }
                    ElementState::Released => {
                        self.mouse_held.remove(&btn);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_pointer(DVec2::new(position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_lines += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y / 100.0,
                };
            }
            WindowEvent::Resized(size) => self.set_window_size(size.width, size.height),
            _ => {}
        }
    }

    fn press_key(&mut self, key: KeyCode) {
        // No auto-repeat
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
        match key {
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.text);
                let line = line.trim();
                if !line.is_empty() {
                    self.submitted = Some(line.to_string());
                }
            }
            KeyCode::Backspace => {
                self.text.pop();
            }
            KeyCode::Escape => self.text.clear(),
            _ => {}
        }
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            if self.text.is_empty() && c.is_whitespace() {
                continue;
            }
            self.text.push(c);
        }
    }

    /// Whether a text line is being typed. Key bindings pause while it is.
    pub fn is_typing(&self) -> bool {
        !self.text.is_empty()
    }

    fn move_pointer(&mut self, position: DVec2) {
        if self.mouse_held(MouseButton::Left) {
            self.drag_delta += position - self.mouse_position;
        }
        self.mouse_position = position;
        self.mouse_moved = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pressed_clears_each_frame() {
        let mut input = Input::new();
        input.press_key(KeyCode::Space);
        assert!(input.key_pressed(KeyCode::Space));
        assert!(input.key_held(KeyCode::Space));

        input.end_frame();
        assert!(input.key_held(KeyCode::Space));
        assert!(!input.key_pressed(KeyCode::Space));

        // Held key repeating does not fire again
        input.press_key(KeyCode::Space);
        assert!(!input.key_pressed(KeyCode::Space));
    }

    #[test]
    fn test_mouse_ndc() {
        let mut input = Input::new();
        input.set_window_size(800, 600);
        input.move_pointer(DVec2::new(400.0, 300.0));
        assert!(input.mouse_ndc().length() < 1e-12);
        input.move_pointer(DVec2::new(800.0, 0.0));
        assert_eq!(input.mouse_ndc(), DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_drag_only_with_left_button() {
        let mut input = Input::new();
        input.move_pointer(DVec2::new(10.0, 10.0));
        input.move_pointer(DVec2::new(20.0, 10.0));
        assert_eq!(input.drag_delta(), DVec2::ZERO);

        input.mouse_held.insert(MouseButton::Left);
        input.move_pointer(DVec2::new(25.0, 4.0));
        input.move_pointer(DVec2::new(30.0, 0.0));
        assert_eq!(input.drag_delta(), DVec2::new(10.0, -10.0));
    }

    #[test]
    fn test_leading_space_does_not_start_typing() {
        let mut input = Input::new();
        input.type_text(" ");
        assert!(!input.is_typing());
        input.type_text("a b");
        assert_eq!(input.text(), "a b");
    }

    #[test]
    fn test_text_line_submit() {
        let mut input = Input::new();
        input.type_text("Siri");
        input.type_text("us\u{8}");
        input.press_key(KeyCode::Backspace);
        input.type_text("s ");
        input.press_key(KeyCode::Enter);
        assert_eq!(input.take_submitted().as_deref(), Some("Sirius"));
        assert_eq!(input.text(), "");

        input.end_frame();
        input.press_key(KeyCode::Enter);
        assert!(input.take_submitted().is_none());
    }
}
