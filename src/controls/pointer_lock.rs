use std::time::Duration;

use crate::camera::SharedCamera;
use crate::core::signal::ChangeSignal;
use crate::traits::PointerCapture;

/// Radians of rotation per pixel of pointer delta at `pointer_speed = 1`
pub const BASE_SENSITIVITY: f32 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked,
}

/// Exclusive pointer capture lifecycle plus mouse-look.
///
/// Pointer deltas rotate the camera only while [`LockState::Locked`].
/// A denied capture request leaves the session unlocked; it is logged, never
/// returned as an error.
pub struct PointerLockSession {
    camera: SharedCamera,
    signal: ChangeSignal,
    capture: Box<dyn PointerCapture>,
    state: LockState,
    pointer_speed: f32,
    min_pitch: f32,
    max_pitch: f32,
    disposed: bool,
}

impl PointerLockSession {
    pub fn new(
        camera: SharedCamera,
        signal: ChangeSignal,
        capture: Box<dyn PointerCapture>,
        pointer_speed: f32,
        (min_pitch, max_pitch): (f32, f32),
    ) -> Self {
        Self {
            camera,
            signal,
            capture,
            state: LockState::Unlocked,
            pointer_speed,
            min_pitch,
            max_pitch,
            disposed: false,
        }
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == LockState::Locked
    }

    /// Radians per pixel of pointer delta
    pub fn sensitivity(&self) -> f32 {
        BASE_SENSITIVITY * self.pointer_speed
    }

    /// Request exclusive capture (after a user gesture). No-op while locked
    pub fn request_lock(&mut self) -> LockState {
        if self.disposed || self.is_locked() {
            return self.state;
        }

        match self.capture.request_capture() {
            Ok(()) => {
                self.state = LockState::Locked;
                log::info!("Pointer locked");
            }
            Err(e) => log::warn!("{e}; staying unlocked"),
        }
        self.state
    }

    /// The input source took capture away (escape, focus loss).
    /// Capture is released on our side too so the system cursor comes back
    pub fn on_capture_revoked(&mut self) {
        if self.is_locked() {
            self.capture.release_capture();
            self.state = LockState::Unlocked;
            log::info!("Pointer unlocked");
        }
    }

    /// Apply a raw pointer delta. Returns whether the camera rotated
    pub fn pointer_moved(&mut self, dx: f32, dy: f32, now: Duration) -> bool {
        if self.disposed || !self.is_locked() {
            return false;
        }

        let sensitivity = self.sensitivity();
        self.camera.borrow_mut().rotate_yaw_pitch(
            -dx * sensitivity,
            -dy * sensitivity,
            self.min_pitch,
            self.max_pitch,
        );
        self.signal.emit(now);
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Release capture if held and stop reacting to input. Idempotent
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if self.is_locked() {
            self.capture.release_capture();
            self.state = LockState::Unlocked;
            log::info!("Pointer unlocked");
        }
        self.disposed = true;
    }
}

impl Drop for PointerLockSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::error::CaptureError;
    use std::cell::Cell;
    use std::f32::consts::FRAC_PI_2;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counters {
        requests: Cell<usize>,
        releases: Cell<usize>,
    }

    struct MockCapture {
        allow: bool,
        counters: Rc<Counters>,
    }

    impl PointerCapture for MockCapture {
        fn request_capture(&mut self) -> Result<(), CaptureError> {
            self.counters.requests.set(self.counters.requests.get() + 1);
            if self.allow {
                Ok(())
            } else {
                Err(CaptureError::Denied("mock".into()))
            }
        }

        fn release_capture(&mut self) {
            self.counters.releases.set(self.counters.releases.get() + 1);
        }
    }

    fn session(allow: bool) -> (SharedCamera, ChangeSignal, Rc<Counters>, PointerLockSession) {
        let camera = PerspectiveCamera::default().into_shared();
        let signal = ChangeSignal::new();
        let counters = Rc::new(Counters::default());
        let capture = MockCapture {
            allow,
            counters: Rc::clone(&counters),
        };
        let session = PointerLockSession::new(
            Rc::clone(&camera),
            signal.clone(),
            Box::new(capture),
            1.0,
            (-FRAC_PI_2, FRAC_PI_2),
        );
        (camera, signal, counters, session)
    }

    #[test]
    fn starts_unlocked() {
        let (_, _, _, session) = session(true);
        assert_eq!(session.state(), LockState::Unlocked);
    }

    #[test]
    fn lock_is_noop_when_locked() {
        let (_, _, counters, mut session) = session(true);
        assert_eq!(session.request_lock(), LockState::Locked);
        assert_eq!(session.request_lock(), LockState::Locked);
        assert_eq!(counters.requests.get(), 1);
    }

    #[test]
    fn denied_capture_stays_unlocked() {
        let (_, _, counters, mut session) = session(false);
        assert_eq!(session.request_lock(), LockState::Unlocked);
        assert_eq!(counters.requests.get(), 1);
    }

    #[test]
    fn moves_ignored_while_unlocked() {
        let (camera, _, _, mut session) = session(true);
        let before = camera.borrow().clone();
        assert!(!session.pointer_moved(10.0, 5.0, Duration::ZERO));
        assert_eq!(*camera.borrow(), before);
    }

    #[test]
    fn horizontal_move_changes_yaw_only() {
        let (camera, _, _, mut session) = session(true);
        session.request_lock();
        assert!(session.pointer_moved(10.0, 0.0, Duration::ZERO));

        let (yaw, pitch, _) = camera.borrow().euler_yxz();
        assert!((yaw - (-10.0 * BASE_SENSITIVITY)).abs() < 1e-6);
        assert!(pitch.abs() < 1e-6);
    }

    #[test]
    fn pitch_clamps_at_pole() {
        let (camera, _, _, mut session) = session(true);
        session.request_lock();
        session.pointer_moved(0.0, -10_000.0, Duration::ZERO);

        let (_, pitch, _) = camera.borrow().euler_yxz();
        assert!(pitch <= FRAC_PI_2 + 1e-4);
        assert!(pitch > FRAC_PI_2 - 1e-2);
    }

    #[test]
    fn move_emits_change() {
        let (_, signal, _, mut session) = session(true);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = signal.subscribe(move |_| h.set(h.get() + 1));

        session.pointer_moved(1.0, 1.0, Duration::ZERO);
        assert_eq!(hits.get(), 0);

        session.request_lock();
        session.pointer_moved(1.0, 1.0, Duration::ZERO);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn revoke_unlocks_and_allows_relock() {
        let (camera, _, counters, mut session) = session(true);
        session.request_lock();
        session.on_capture_revoked();
        assert_eq!(session.state(), LockState::Unlocked);

        let before = camera.borrow().clone();
        session.pointer_moved(50.0, 0.0, Duration::ZERO);
        assert_eq!(*camera.borrow(), before);

        session.request_lock();
        assert!(session.is_locked());
        assert_eq!(counters.requests.get(), 2);
        assert_eq!(counters.releases.get(), 1);
    }

    #[test]
    fn dispose_after_revoke_does_not_release_again() {
        let (_, _, counters, mut session) = session(true);
        session.request_lock();
        session.on_capture_revoked();
        session.on_capture_revoked();
        session.dispose();
        assert_eq!(counters.releases.get(), 1);
    }

    #[test]
    fn dispose_releases_once() {
        let (_, _, counters, mut session) = session(true);
        session.request_lock();
        session.dispose();
        session.dispose();
        drop(session);
        assert_eq!(counters.releases.get(), 1);
    }

    #[test]
    fn dispose_unlocked_does_not_release() {
        let (_, _, counters, mut session) = session(true);
        session.dispose();
        assert_eq!(counters.releases.get(), 0);
        assert_eq!(session.request_lock(), LockState::Unlocked);
        assert_eq!(counters.requests.get(), 0);
    }
}
