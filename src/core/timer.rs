//! Self-contained timers - manage internal state, no clock dependency
//! Callers pass the current timestamp; each timer decides when to fire
use std::time::Duration;

/// Per-key hold tracker: fires periodic ticks while its key is down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldTimer {
    Idle,
    Holding { last_tick: Duration },
}

impl HoldTimer {
    /// Begin holding. A repeated start while already holding is ignored
    pub fn start(&mut self, now: Duration) {
        if let HoldTimer::Idle = self {
            *self = HoldTimer::Holding { last_tick: now };
        }
    }

    /// Stop immediately, discarding any partial interval
    pub fn stop(&mut self) {
        *self = HoldTimer::Idle;
    }

    pub fn is_holding(&self) -> bool {
        matches!(self, HoldTimer::Holding { .. })
    }

    /// Returns elapsed time since the previous tick once at least `interval`
    /// has passed, and restarts the interval from `now`
    pub fn tick(&mut self, now: Duration, interval: Duration) -> Option<Duration> {
        match *self {
            HoldTimer::Holding { last_tick } => {
                let elapsed = now.saturating_sub(last_tick);
                if elapsed >= interval {
                    *self = HoldTimer::Holding { last_tick: now };
                    Some(elapsed)
                } else {
                    None
                }
            }
            HoldTimer::Idle => None,
        }
    }

    /// When the next tick becomes due
    pub fn next_due(&self, interval: Duration) -> Option<Duration> {
        match *self {
            HoldTimer::Holding { last_tick } => Some(last_tick + interval),
            HoldTimer::Idle => None,
        }
    }
}

impl Default for HoldTimer {
    fn default() -> Self {
        HoldTimer::Idle
    }
}

/// Outcome of offering a send to a [`Throttle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// The window is open: send now
    SendNow,
    /// The window is closed: a single send was scheduled for `deadline`
    Deferred { deadline: Duration },
    /// A send is already scheduled; it will pick up the latest state
    AlreadyScheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThrottleState {
    Idle,
    Waiting { deadline: Duration },
}

/// Leading + trailing edge throttle with at most one scheduled send
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    min_interval: Duration,
    last_send: Option<Duration>,
    state: ThrottleState,
}

impl Throttle {
    /// Create throttle with minimum interval between sends. The first offer
    /// always sends immediately
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_send: None,
            state: ThrottleState::Idle,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Offer a send at `now`
    pub fn offer(&mut self, now: Duration) -> ThrottleDecision {
        if let ThrottleState::Waiting { .. } = self.state {
            return ThrottleDecision::AlreadyScheduled;
        }

        match self.last_send {
            Some(last) if now.saturating_sub(last) < self.min_interval => {
                let deadline = last + self.min_interval;
                self.state = ThrottleState::Waiting { deadline };
                ThrottleDecision::Deferred { deadline }
            }
            _ => {
                self.last_send = Some(now);
                ThrottleDecision::SendNow
            }
        }
    }

    /// Returns true (once) when the scheduled send is due
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.state {
            ThrottleState::Waiting { deadline } if now >= deadline => {
                self.state = ThrottleState::Idle;
                self.last_send = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Deadline of the scheduled send, if any
    pub fn deadline(&self) -> Option<Duration> {
        match self.state {
            ThrottleState::Waiting { deadline } => Some(deadline),
            ThrottleState::Idle => None,
        }
    }

    /// Drop the scheduled send. Returns whether one was pending
    pub fn cancel(&mut self) -> bool {
        let was_waiting = self.deadline().is_some();
        self.state = ThrottleState::Idle;
        was_waiting
    }
}
