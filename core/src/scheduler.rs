//! Tick scheduling — an explicit abstraction over "call me every second".
//!
//! The live-game driver owns exactly one registration at a time: created
//! on start/resume, cancelled on pause, auto-pause, reset, and end, so an
//! orphaned timer can never keep mutating a torn-down session.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::thread;
use std::time::Duration;

/// Handle to a repeating registration. Cloneable; cancelling any clone
/// stops further callbacks.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Scheduler: Send {
    /// Invoke `callback` every `interval` until the returned token is
    /// cancelled. The callback may cancel its own token.
    fn schedule_repeating(
        &self,
        interval: Duration,
        callback: Box<dyn FnMut() + Send>,
    ) -> CancelToken;
}

/// Wall-clock scheduler backed by a background thread. Used by the
/// headless runner.
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule_repeating(
        &self,
        interval: Duration,
        mut callback: Box<dyn FnMut() + Send>,
    ) -> CancelToken {
        let token = CancelToken::new();
        let thread_token = token.clone();
        thread::spawn(move || loop {
            thread::sleep(interval);
            if thread_token.is_cancelled() {
                break;
            }
            callback();
        });
        token
    }
}

/// Deterministic scheduler for tests: callbacks fire only when `fire`
/// is called, with no real time involved.
pub struct ManualScheduler {
    slots: Mutex<Vec<(Box<dyn FnMut() + Send>, CancelToken)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Vec::new()),
        }
    }

    /// Fire every live registration once, dropping cancelled ones first.
    pub fn fire(&self) {
        let mut slots = self.slots.lock().expect("scheduler poisoned");
        slots.retain(|(_, token)| !token.is_cancelled());
        for (callback, token) in slots.iter_mut() {
            if !token.is_cancelled() {
                callback();
            }
        }
    }

    /// Fire `n` times in a row.
    pub fn fire_n(&self, n: usize) {
        for _ in 0..n {
            self.fire();
        }
    }

    /// Number of registrations that have not been cancelled.
    pub fn live_registrations(&self) -> usize {
        let slots = self.slots.lock().expect("scheduler poisoned");
        slots.iter().filter(|(_, t)| !t.is_cancelled()).count()
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(
        &self,
        _interval: Duration,
        callback: Box<dyn FnMut() + Send>,
    ) -> CancelToken {
        let token = CancelToken::new();
        self.slots
            .lock()
            .expect("scheduler poisoned")
            .push((callback, token.clone()));
        token
    }
}
