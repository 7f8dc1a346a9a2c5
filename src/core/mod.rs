pub mod clock;
pub mod controller;
pub mod gpu_context;
pub mod input_adapter;
pub mod signal;
pub mod surface_renderer;
pub mod timer;

pub use clock::Clock;
pub use controller::{Axis, Button, InputEvent, KeyBinding, KeyBindings, Sign};
pub use gpu_context::GpuContext;
pub use input_adapter::{WinitInput, WinitPointerCapture};
pub use signal::{ChangeEvent, ChangeSignal, ListenerId, Subscription};
pub use surface_renderer::SurfaceRenderer;
pub use timer::{HoldTimer, Throttle, ThrottleDecision};
