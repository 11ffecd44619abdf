//! Cooperative single-threaded scheduler.
//!
//! Tasks are plain `Future`s driven by the loop in [`Scheduler::run`]. They
//! give up control only at [`Scheduler::sleep`] and [`Scheduler::yield_once`]
//! (any other `Pending` is treated like a yield). Ready tasks run FIFO; sleeping
//! tasks wait in a min-heap ordered by `(deadline, sequence)`. When nothing is
//! ready the whole loop blocks until the earliest deadline.
//!
//! An error returned by any task ends `run` and discards every pending task.

pub mod clock;
mod suspend;
mod task;
mod timer;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

use rustc_hash::FxHashMap;

pub use clock::{Clock, SystemClock, VirtualClock};
pub use suspend::{Sleep, YieldOnce};
pub use task::{LocalTask, TaskError, TaskHandle, TaskId, TaskResult};

use suspend::Suspension;
use task::Task;
use timer::TimerHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Drained,
}

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("scheduler is already running")]
    AlreadyRunning,

    #[error("{task} failed: {source}")]
    TaskFailed {
        task: TaskId,
        #[source]
        source: TaskError,
    },
}

pub(crate) struct Shared {
    clock: Rc<dyn Clock>,
    ready: RefCell<VecDeque<TaskId>>,
    timers: RefCell<TimerHeap>,
    registry: RefCell<FxHashMap<TaskId, Task>>,
    next_id: Cell<u64>,
    phase: Cell<Phase>,
    current: RefCell<Option<(TaskId, Rc<Cell<bool>>)>>,
    suspension: Cell<Option<Suspension>>,
    stop_requested: Cell<bool>,
}

impl Shared {
    pub(crate) fn suspend(&self, how: Suspension) {
        self.suspension.set(Some(how));
    }

    fn clear(&self) {
        self.ready.borrow_mut().clear();
        self.timers.borrow_mut().clear();
        // Dropping task bodies may drop scheduler handles; keep the registry
        // borrow out of that.
        let tasks = std::mem::take(&mut *self.registry.borrow_mut());
        drop(tasks);
    }
}

/// Cheap, cloneable handle to one scheduler. Clone it into task bodies that
/// need to sleep, yield or spawn.
#[derive(Clone)]
pub struct Scheduler {
    shared: Rc<Shared>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock::new()))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            shared: Rc::new(Shared {
                clock,
                ready: RefCell::new(VecDeque::new()),
                timers: RefCell::new(TimerHeap::new()),
                registry: RefCell::new(FxHashMap::default()),
                next_id: Cell::new(1),
                phase: Cell::new(Phase::Idle),
                current: RefCell::new(None),
                suspension: Cell::new(None),
                stop_requested: Cell::new(false),
            }),
        }
    }

    pub fn now(&self) -> Duration {
        self.shared.clock.now()
    }

    pub fn phase(&self) -> Phase {
        self.shared.phase.get()
    }

    /// Number of tasks waiting in either queue.
    pub fn pending(&self) -> usize {
        self.shared.registry.borrow().len()
    }

    pub fn ready_len(&self) -> usize {
        self.shared.ready.borrow().len()
    }

    pub fn sleeping_len(&self) -> usize {
        self.shared.timers.borrow().len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.shared.registry.borrow().contains_key(&id)
    }

    /// Queue a task at the back of the ready queue.
    pub fn run_soon<F>(&self, body: F) -> TaskHandle
    where
        F: Future<Output = TaskResult> + 'static,
    {
        let id = TaskId::raw(self.shared.next_id.get());
        self.shared.next_id.set(id.get() + 1);

        let (task, handle) = Task::new(id, Box::pin(body));
        self.shared.registry.borrow_mut().insert(id, task);
        self.shared.ready.borrow_mut().push_back(id);
        tracing::trace!(task = %id, "task queued");
        handle
    }

    /// Suspend the calling task until at least `dur` has elapsed.
    pub fn sleep(&self, dur: Duration) -> Sleep {
        Sleep::new(self.shared.clone(), dur)
    }

    /// Suspend the calling task for exactly one pass of the ready queue.
    pub fn yield_once(&self) -> YieldOnce {
        YieldOnce::new(self.shared.clone())
    }

    pub fn cancel(&self, handle: &TaskHandle) {
        handle.cancel();
    }

    /// Cancel by id. Returns `false` when the task is unknown (already
    /// finished, already discarded, or never existed).
    pub fn cancel_id(&self, id: TaskId) -> bool {
        if let Some(task) = self.shared.registry.borrow().get(&id) {
            task.cancel();
            return true;
        }
        match &*self.shared.current.borrow() {
            Some((current, flag)) if *current == id => {
                flag.set(true);
                true
            }
            _ => false,
        }
    }

    /// Run `action` `repeat` times (forever when `repeat == 0`), suspending
    /// after each call: `sleep(delay)` when `delay > 0`, otherwise
    /// `yield_once()`.
    pub fn schedule<A>(&self, action: A, delay: Duration, repeat: u32) -> TaskHandle
    where
        A: FnMut() -> TaskResult + 'static,
    {
        self.run_soon(periodic(self.clone(), action, delay, repeat))
    }

    /// Drop every pending task. A `run` in progress returns as soon as the
    /// current task suspends.
    pub fn stop(&self) {
        tracing::debug!(pending = self.pending(), "scheduler stop requested");
        if self.phase() == Phase::Running {
            self.shared.stop_requested.set(true);
        }
        self.shared.clear();
    }

    /// Queue `tasks`, then drive everything until both queues are empty.
    pub fn run<I, F>(&self, tasks: I) -> Result<(), SchedulerError>
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = TaskResult> + 'static,
    {
        if self.phase() == Phase::Running {
            return Err(SchedulerError::AlreadyRunning);
        }
        for body in tasks {
            self.run_soon(body);
        }
        self.drive()
    }

    /// Drive already queued tasks until both queues are empty.
    pub fn run_pending(&self) -> Result<(), SchedulerError> {
        self.run(std::iter::empty::<LocalTask>())
    }

    fn drive(&self) -> Result<(), SchedulerError> {
        let shared = &self.shared;
        shared.phase.set(Phase::Running);
        shared.stop_requested.set(false);
        tracing::debug!(pending = self.pending(), "scheduler running");

        let waker = suspend::noop_waker();
        let mut cx = Context::from_waker(&waker);

        while let Some(id) = self.next_task() {
            let Some(mut task) = shared.registry.borrow_mut().remove(&id) else {
                continue;
            };
            if task.is_canceled() {
                tracing::trace!(task = %id, "discarding canceled task");
                continue;
            }

            *shared.current.borrow_mut() = Some((id, task.cancel_flag()));
            shared.suspension.set(None);
            let step = task.resume(&mut cx);
            *shared.current.borrow_mut() = None;
            let suspension = shared.suspension.take();

            match step {
                Poll::Ready(Ok(())) => {
                    tracing::trace!(task = %task.id(), "task completed");
                }
                Poll::Ready(Err(source)) => {
                    tracing::error!(task = %id, error = %source, "task failed, aborting run");
                    shared.clear();
                    shared.phase.set(Phase::Drained);
                    return Err(SchedulerError::TaskFailed { task: id, source });
                }
                Poll::Pending if shared.stop_requested.get() => {
                    drop(task);
                    shared.clear();
                    break;
                }
                Poll::Pending => self.requeue(task, suspension),
            }
        }

        shared.stop_requested.set(false);
        shared.phase.set(Phase::Drained);
        tracing::debug!("scheduler drained");
        Ok(())
    }

    fn next_task(&self) -> Option<TaskId> {
        let shared = &self.shared;
        let now = shared.clock.now();
        {
            let mut timers = shared.timers.borrow_mut();
            let mut ready = shared.ready.borrow_mut();
            while let Some(id) = timers.pop_due(now) {
                ready.push_back(id);
            }
            if let Some(id) = ready.pop_front() {
                return Some(id);
            }
        }

        let (deadline, id) = shared.timers.borrow_mut().pop()?;
        shared.clock.wait(deadline.saturating_sub(now));
        Some(id)
    }

    fn requeue(&self, mut task: Task, suspension: Option<Suspension>) {
        let id = task.id();
        match suspension {
            Some(Suspension::Sleep(deadline)) => {
                task.set_deadline(Some(deadline));
                self.shared.timers.borrow_mut().push(deadline, id);
                tracing::trace!(task = %id, deadline = ?task.deadline(), "task sleeping");
            }
            Some(Suspension::Yield) | None => {
                task.set_deadline(None);
                self.shared.ready.borrow_mut().push_back(id);
            }
        }
        self.shared.registry.borrow_mut().insert(id, task);
    }
}

async fn periodic<A>(sched: Scheduler, mut action: A, delay: Duration, repeat: u32) -> TaskResult
where
    A: FnMut() -> TaskResult,
{
    let mut calls = 0u32;
    loop {
        action()?;
        if delay.is_zero() {
            sched.yield_once().await;
        } else {
            sched.sleep(delay).await;
        }
        calls = calls.saturating_add(1);
        if repeat != 0 && calls >= repeat {
            return Ok(());
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/mod.rs"]
mod tests;
