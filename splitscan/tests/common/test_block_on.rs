//! Manually driven block-on: the embassy-time mock clock only moves when
//! this harness advances it, so debounce windows elapse deterministically
//! and tests never sleep for real.

use std::future::Future;
use std::pin::pin;
use std::sync::{Mutex, MutexGuard};
use std::task::{Context, Poll, Waker};

use embassy_time::{Duration, MockDriver};

/// Clock step applied whenever the future is pending.
const STEP: Duration = Duration::from_micros(10);

/// The mock clock is process-global; timing tests serialize on this lock.
static CLOCK: Mutex<()> = Mutex::new(());

pub fn clock_lock() -> MutexGuard<'static, ()> {
    CLOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Poll `fut` to completion, stepping the mock clock while it waits.
pub fn run<F: Future>(fut: F) -> F::Output {
    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(out) => return out,
            Poll::Pending => MockDriver::get().advance(STEP),
        }
    }
}

/// Advance the mock clock between scan cycles.
pub fn advance_ms(ms: u64) {
    MockDriver::get().advance(Duration::from_millis(ms));
}
