//! One-second countdown driver for timed sessions.
//!
//! A background thread wakes on an `Instant`-anchored cadence and applies
//! `tick()` to the shared session: each tick is exactly one second apart
//! regardless of how long the tick itself took, so the clock neither
//! drifts nor double-fires. The thread exits the moment the session
//! leaves `InProgress`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::{Phase, Session, TestResult, Tick};

const TICK: Duration = Duration::from_secs(1);
/// Poll granularity while waiting for the next tick; keeps stop requests
/// responsive without busy-waiting.
const STOP_POLL: Duration = Duration::from_millis(25);

/// Handle to the timer thread. Stopping (or dropping) the handle halts
/// the cadence; the session itself is left untouched.
pub struct SessionTimer {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SessionTimer {
    /// Spawns the cadence over a shared session. Callers only spawn this
    /// for timed sessions; the thread also exits on its own if the
    /// session turns out not to need ticking.
    pub fn spawn(session: Arc<Mutex<Session>>) -> Self {
        Self::spawn_with(session, |_| {})
    }

    /// Like `spawn`, with a callback invoked (off the session lock) with
    /// the result when the countdown forces submission.
    pub fn spawn_with(
        session: Arc<Mutex<Session>>,
        on_expired: impl FnOnce(&TestResult) + Send + 'static,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::spawn(move || run(session, stop_flag, on_expired));
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stops the cadence and waits for the thread to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(
    session: Arc<Mutex<Session>>,
    stop: Arc<AtomicBool>,
    on_expired: impl FnOnce(&TestResult),
) {
    let mut next = Instant::now() + TICK;
    loop {
        while Instant::now() < next {
            if stop.load(Ordering::SeqCst) {
                return;
            }
            let left = next.saturating_duration_since(Instant::now());
            thread::sleep(left.min(STOP_POLL));
        }
        if stop.load(Ordering::SeqCst) {
            return;
        }
        let Ok(mut guard) = session.lock() else {
            return;
        };
        if guard.phase() != Phase::InProgress {
            return;
        }
        match guard.tick() {
            Ok(Tick::Running { .. }) => {}
            Ok(Tick::Expired) => {
                let result = guard.result().cloned();
                drop(guard);
                if let Some(result) = result {
                    on_expired(&result);
                }
                return;
            }
            // A phase error means someone beat us to a transition; the
            // cadence is done either way.
            Err(_) => return,
        }
        drop(guard);
        next += TICK;
    }
}
