use std::time::Duration;

use crate::camera::SharedCamera;
use crate::core::controller::{Button, KeyBindings};
use crate::core::signal::ChangeSignal;
use crate::core::timer::HoldTimer;
use crate::traits::Controller;

/// Turns held movement keys into time-proportional local translation.
///
/// Each bound key has its own [`HoldTimer`]; a single [`tick`](Self::tick)
/// advances all of them. Every hold tick moves the camera by
/// `sign * move_speed * elapsed_ms` along the key's axis. Simultaneous holds
/// are applied independently, so diagonal movement is not normalized.
pub struct KeyHoldIntegrator {
    camera: SharedCamera,
    signal: ChangeSignal,
    bindings: KeyBindings,
    /// Parallel to `bindings`
    trackers: Vec<HoldTimer>,
    held: Vec<Button>,
    move_speed: f32,
    interval: Duration,
    disposed: bool,
}

impl KeyHoldIntegrator {
    pub fn new(
        camera: SharedCamera,
        signal: ChangeSignal,
        bindings: KeyBindings,
        move_speed: f32,
        interval: Duration,
    ) -> Self {
        let trackers = vec![HoldTimer::Idle; bindings.len()];
        Self {
            camera,
            signal,
            bindings,
            trackers,
            held: Vec::new(),
            move_speed,
            interval,
            disposed: false,
        }
    }

    /// Key went down. Returns false for unbound keys. OS key repeat is ignored
    pub fn key_down(&mut self, button: Button, now: Duration) -> bool {
        if self.disposed {
            return false;
        }
        let Some(index) = self.bindings.position(button) else {
            return false;
        };

        if !self.trackers[index].is_holding() {
            self.trackers[index].start(now);
            self.held.push(button);
        }
        true
    }

    /// Key went up. Displacement along its axis stops immediately
    pub fn key_up(&mut self, button: Button) -> bool {
        let Some(index) = self.bindings.position(button) else {
            return false;
        };

        self.trackers[index].stop();
        self.held.retain(|&b| b != button);
        true
    }

    /// Stop every hold without a key-up, e.g. after focus loss.
    /// Returns whether any key was held
    pub fn release_all(&mut self) -> bool {
        let was_holding = !self.held.is_empty();
        for tracker in &mut self.trackers {
            tracker.stop();
        }
        self.held.clear();
        if was_holding {
            log::debug!("Released all held keys");
        }
        was_holding
    }

    /// Advance every hold tracker to `now`, applying due ticks.
    /// Raises one change notification if the camera moved
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.disposed {
            return false;
        }

        let mut moved = false;
        {
            let mut camera = self.camera.borrow_mut();
            for (binding, tracker) in self.bindings.iter().zip(self.trackers.iter_mut()) {
                if let Some(elapsed) = tracker.tick(now, self.interval) {
                    let distance = binding.sign.factor() * self.move_speed * millis(elapsed);
                    camera.translate_on_axis(binding.axis, distance);
                    moved = true;
                }
            }
        }

        if moved {
            self.signal.emit(now);
        }
        moved
    }

    /// Earliest time a held key will tick again
    pub fn next_due(&self) -> Option<Duration> {
        self.trackers
            .iter()
            .filter_map(|tracker| tracker.next_due(self.interval))
            .min()
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Stop every tracker and ignore further input. Idempotent
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.release_all();
        self.disposed = true;
    }
}

impl Controller for KeyHoldIntegrator {
    fn is_down(&self, button: Button) -> bool {
        self.held.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.held
    }
}

/// Milliseconds as f32, exact for whole microseconds
fn millis(duration: Duration) -> f32 {
    duration.as_micros() as f32 / 1000.0
}
