//! First-person camera controls: pointer-lock mouse look, held-key movement
//! and throttled pose export.

pub mod broadcaster;
pub mod key_hold;
pub mod pointer_lock;
pub mod pose;

pub use broadcaster::ThrottledPoseBroadcaster;
pub use key_hold::KeyHoldIntegrator;
pub use pointer_lock::{LockState, PointerLockSession};
pub use pose::sample_pose;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::camera::SharedCamera;
use crate::config::ControlsConfig;
use crate::core::controller::{InputEvent, KeyBindings};
use crate::core::signal::{ChangeSignal, Subscription};
use crate::error::ControlsError;
use crate::traits::{PointerCapture, PoseSink};

/// Pointer-lock camera controls bound to one shared camera.
///
/// Input producers (pointer session, key integrator) mutate the camera and
/// raise the change signal; the broadcaster is its only subscriber.
/// Dropping the controls disposes them.
pub struct CameraControls {
    camera: SharedCamera,
    signal: ChangeSignal,
    session: PointerLockSession,
    keys: KeyHoldIntegrator,
    broadcaster: Rc<RefCell<ThrottledPoseBroadcaster>>,
    subscription: Subscription,
    disposed: bool,
}

impl CameraControls {
    pub fn new(
        camera: SharedCamera,
        config: &ControlsConfig,
        capture: Box<dyn PointerCapture>,
        sink: Box<dyn PoseSink>,
    ) -> Result<Self, ControlsError> {
        Self::with_bindings(camera, config, KeyBindings::default(), capture, sink)
    }

    /// Fails without registering anything if the camera or config is unusable
    pub fn with_bindings(
        camera: SharedCamera,
        config: &ControlsConfig,
        bindings: KeyBindings,
        capture: Box<dyn PointerCapture>,
        sink: Box<dyn PoseSink>,
    ) -> Result<Self, ControlsError> {
        if let Err(e) = config.validate().and_then(|_| camera.borrow().validate()) {
            log::error!("Camera controls not initialized: {e}");
            return Err(e);
        }

        let signal = ChangeSignal::new();
        let session = PointerLockSession::new(
            Rc::clone(&camera),
            signal.clone(),
            capture,
            config.pointer_speed,
            config.pitch_range(),
        );
        let keys = KeyHoldIntegrator::new(
            Rc::clone(&camera),
            signal.clone(),
            bindings,
            config.move_speed,
            config.hold_interval(),
        );
        let broadcaster = Rc::new(RefCell::new(ThrottledPoseBroadcaster::new(
            Rc::clone(&camera),
            sink,
            config.throttle_interval(),
        )));
        let subscription = ThrottledPoseBroadcaster::attach(&broadcaster, &signal);

        Ok(Self {
            camera,
            signal,
            session,
            keys,
            broadcaster,
            subscription,
            disposed: false,
        })
    }

    /// Route one input event, in delivery order
    pub fn handle_event(&mut self, event: InputEvent, now: Duration) {
        if self.disposed {
            return;
        }

        match event {
            InputEvent::Click => {
                self.session.request_lock();
            }
            InputEvent::CaptureLost => self.session.on_capture_revoked(),
            InputEvent::FocusLost => {
                self.session.on_capture_revoked();
                self.keys.release_all();
            }
            InputEvent::PointerMoved { dx, dy } => {
                self.session.pointer_moved(dx, dy, now);
            }
            InputEvent::Key { button, pressed: true } => {
                self.keys.key_down(button, now);
            }
            InputEvent::Key { button, pressed: false } => {
                self.keys.key_up(button);
            }
        }
    }

    /// Advance held keys, then fire a due deferred send
    pub fn update(&mut self, now: Duration) {
        if self.disposed {
            return;
        }
        self.keys.tick(now);
        self.broadcaster.borrow_mut().poll(now);
    }

    /// Next time [`update`](Self::update) has work to do
    pub fn next_wakeup(&self) -> Option<Duration> {
        if self.disposed {
            return None;
        }
        let deadline = self.broadcaster.borrow().next_deadline();
        match (self.keys.next_due(), deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn camera(&self) -> &SharedCamera {
        &self.camera
    }

    pub fn lock_state(&self) -> LockState {
        self.session.state()
    }

    pub fn keys(&self) -> &KeyHoldIntegrator {
        &self.keys
    }

    /// Messages handed to the transport so far
    pub fn sent(&self) -> u64 {
        self.broadcaster.borrow().sent()
    }

    pub fn listener_count(&self) -> usize {
        self.signal.listener_count()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Cancel the pending send, release capture, detach listeners and stop
    /// all key holds. Idempotent
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.broadcaster.borrow_mut().dispose();
        self.session.dispose();
        self.subscription.dispose();
        self.keys.dispose();
        self.disposed = true;
        log::debug!("Camera controls disposed");
    }
}

impl Drop for CameraControls {
    fn drop(&mut self) {
        self.dispose();
    }
}
