use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::camera::SharedCamera;
use crate::controls::pose::sample_pose;
use crate::core::signal::{ChangeSignal, Subscription};
use crate::core::timer::{Throttle, ThrottleDecision};
use crate::traits::PoseSink;
use crate::types::ViewerMessage;

/// Forwards camera poses to the transport at a bounded rate.
///
/// The first change after a quiet period is sent immediately. Changes inside
/// the throttle window collapse into a single trailing send, sampled when the
/// window closes so it carries the freshest pose.
pub struct ThrottledPoseBroadcaster {
    camera: SharedCamera,
    sink: Box<dyn PoseSink>,
    throttle: Throttle,
    sent: u64,
    disposed: bool,
}

impl ThrottledPoseBroadcaster {
    pub fn new(camera: SharedCamera, sink: Box<dyn PoseSink>, min_interval: Duration) -> Self {
        Self {
            camera,
            sink,
            throttle: Throttle::new(min_interval),
            sent: 0,
            disposed: false,
        }
    }

    /// Subscribe `broadcaster` to `signal`
    pub fn attach(broadcaster: &Rc<RefCell<Self>>, signal: &ChangeSignal) -> Subscription {
        let broadcaster = Rc::clone(broadcaster);
        signal.subscribe(move |event| broadcaster.borrow_mut().on_changed(event.at))
    }

    /// The camera changed at `now`
    pub fn on_changed(&mut self, now: Duration) {
        if self.disposed {
            return;
        }

        match self.throttle.offer(now) {
            ThrottleDecision::SendNow => self.send(),
            ThrottleDecision::Deferred { deadline } => {
                log::trace!("Pose send deferred to {:?}", deadline);
            }
            ThrottleDecision::AlreadyScheduled => {}
        }
    }

    /// Fire the scheduled send if it is due. Returns whether a send happened
    pub fn poll(&mut self, now: Duration) -> bool {
        if self.disposed || !self.throttle.poll(now) {
            return false;
        }
        self.send();
        true
    }

    /// When the scheduled send is due, if one is pending
    pub fn next_deadline(&self) -> Option<Duration> {
        if self.disposed {
            return None;
        }
        self.throttle.deadline()
    }

    /// Number of messages handed to the transport
    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Cancel any scheduled send; nothing is sent afterwards. Idempotent
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if self.throttle.cancel() {
            log::debug!("Cancelled pending pose send");
        }
        self.disposed = true;
    }

    fn send(&mut self) {
        let pose = sample_pose(&self.camera.borrow());
        let message = ViewerMessage::ViewerCameraMessage(pose);

        match self.sink.send(&message) {
            Ok(()) => {
                self.sent += 1;
                log::debug!("Sent camera pose #{}", self.sent);
            }
            Err(e) => log::warn!("Dropped camera pose: {e}"),
        }
    }
}
