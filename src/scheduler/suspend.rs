//! Suspension points understood by the scheduler loop.
//!
//! Both futures report `Pending` exactly once and leave a note in the shared
//! state saying where the task wants to be re-queued. Waking is never used:
//! the scheduler decides when to poll again.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};
use std::time::Duration;

use super::Shared;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Suspension {
    Sleep(Duration),
    Yield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SleepState {
    Init,
    Waiting(Duration),
}

/// Returned by `Scheduler::sleep`.
#[must_use = "futures do nothing unless awaited"]
pub struct Sleep {
    shared: Rc<Shared>,
    duration: Duration,
    state: SleepState,
}

impl Sleep {
    pub(crate) fn new(shared: Rc<Shared>, duration: Duration) -> Self {
        Self {
            shared,
            duration,
            state: SleepState::Init,
        }
    }
}

impl Future for Sleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        let now = self.shared.clock.now();
        let deadline = match self.state {
            SleepState::Init => now + self.duration,
            SleepState::Waiting(deadline) if now >= deadline => return Poll::Ready(()),
            SleepState::Waiting(deadline) => deadline,
        };
        self.state = SleepState::Waiting(deadline);
        self.shared.suspend(Suspension::Sleep(deadline));
        Poll::Pending
    }
}

/// Returned by `Scheduler::yield_once`.
#[must_use = "futures do nothing unless awaited"]
pub struct YieldOnce {
    shared: Rc<Shared>,
    yielded: bool,
}

impl YieldOnce {
    pub(crate) fn new(shared: Rc<Shared>) -> Self {
        Self {
            shared,
            yielded: false,
        }
    }
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        self.shared.suspend(Suspension::Yield);
        Poll::Pending
    }
}

struct NoopWake;

impl Wake for NoopWake {
    fn wake(self: Arc<Self>) {}
}

pub(crate) fn noop_waker() -> Waker {
    Waker::from(Arc::new(NoopWake))
}
