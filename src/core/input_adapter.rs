use std::sync::Arc;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window};

use super::controller::{Button, InputEvent};
use crate::error::CaptureError;
use crate::traits::PointerCapture;

/// Adapter that bridges Winit events to [`InputEvent`]s
pub struct WinitInput;

impl WinitInput {
    /// Translate a window event. `locked` is the current pointer-lock state:
    /// escape while locked revokes capture, as browsers do
    pub fn translate_window_event(event: &WindowEvent, locked: bool) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(keycode) = event.physical_key else {
                    return None;
                };
                let button = Self::keycode_to_button(keycode)?;
                let pressed = event.state == ElementState::Pressed;
                Self::key_event(button, pressed, locked)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = Self::mouse_button_to_button(*button)?;
                Self::mouse_event(button, *state == ElementState::Pressed)
            }
            WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
            _ => None,
        }
    }

    /// Translate a device event (raw mouse motion)
    pub fn translate_device_event(event: &DeviceEvent) -> Option<InputEvent> {
        match event {
            DeviceEvent::MouseMotion { delta: (dx, dy) } => Some(InputEvent::PointerMoved {
                dx: *dx as f32,
                dy: *dy as f32,
            }),
            _ => None,
        }
    }

    fn key_event(button: Button, pressed: bool, locked: bool) -> Option<InputEvent> {
        match button {
            Button::Escape if pressed && locked => Some(InputEvent::CaptureLost),
            Button::Escape => None,
            _ => Some(InputEvent::Key { button, pressed }),
        }
    }

    fn mouse_event(button: Button, pressed: bool) -> Option<InputEvent> {
        match button {
            Button::MouseLeft if pressed => Some(InputEvent::Click),
            _ => None,
        }
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::KeyQ => Some(Button::KeyQ),
            KeyCode::KeyE => Some(Button::KeyE),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    /// Map Winit MouseButton to Button
    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}

/// Pointer capture backed by a winit window cursor grab
pub struct WinitPointerCapture {
    window: Arc<Window>,
}

impl WinitPointerCapture {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl PointerCapture for WinitPointerCapture {
    fn request_capture(&mut self) -> Result<(), CaptureError> {
        // Not every platform supports Locked; Confined still keeps the cursor in
        // the window and raw motion keeps flowing
        self.window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
            .map_err(|e| CaptureError::Denied(e.to_string()))?;
        self.window.set_cursor_visible(false);
        Ok(())
    }

    fn release_capture(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("Failed to release cursor grab: {e}");
        }
        self.window.set_cursor_visible(true);
    }
}
