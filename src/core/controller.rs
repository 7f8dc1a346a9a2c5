use glam::Vec3;

use crate::error::ControlsError;

/// Input button identifier (stable physical key code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    Escape,
    MouseLeft,
    MouseRight,
}

/// Raw input, already decoupled from the windowing library
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Qualifying user gesture for pointer lock
    Click,
    /// Raw, unaccelerated pointer delta in pixels
    PointerMoved { dx: f32, dy: f32 },
    Key { button: Button, pressed: bool },
    /// The input source revoked pointer capture
    CaptureLost,
    /// The window lost keyboard focus; no key-up will follow on every
    /// platform, so held keys must be released
    FocusLost,
}

/// Camera-local translation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub const fn factor(self) -> f32 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// One movement key bound to a local axis and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub button: Button,
    pub axis: Axis,
    pub sign: Sign,
}

impl KeyBinding {
    pub const fn new(button: Button, axis: Axis, sign: Sign) -> Self {
        Self { button, axis, sign }
    }
}

/// Fixed set of movement bindings, at most one per key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: Vec<KeyBinding>,
}

impl KeyBindings {
    pub fn new(bindings: Vec<KeyBinding>) -> Result<Self, ControlsError> {
        for (i, binding) in bindings.iter().enumerate() {
            if bindings[..i].iter().any(|b| b.button == binding.button) {
                return Err(ControlsError::DuplicateBinding(format!("{:?}", binding.button)));
            }
        }
        Ok(Self { bindings })
    }

    pub fn get(&self, button: Button) -> Option<&KeyBinding> {
        self.bindings.iter().find(|b| b.button == button)
    }

    pub fn position(&self, button: Button) -> Option<usize> {
        self.bindings.iter().position(|b| b.button == button)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    /// W/S forward/back, A/D left/right, Q/E down/up
    fn default() -> Self {
        Self {
            bindings: vec![
                KeyBinding::new(Button::KeyW, Axis::Z, Sign::Negative),
                KeyBinding::new(Button::KeyS, Axis::Z, Sign::Positive),
                KeyBinding::new(Button::KeyA, Axis::X, Sign::Negative),
                KeyBinding::new(Button::KeyD, Axis::X, Sign::Positive),
                KeyBinding::new(Button::KeyQ, Axis::Y, Sign::Negative),
                KeyBinding::new(Button::KeyE, Axis::Y, Sign::Positive),
            ],
        }
    }
}
