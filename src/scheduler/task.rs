use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

/// Error type a task body may return. Anything implementing `Error` converts
/// into it with `?`.
pub type TaskError = Box<dyn std::error::Error>;

pub type TaskResult = Result<(), TaskError>;

/// A boxed task body, handy when handing tasks of different types to
/// `Scheduler::run`.
pub type LocalTask = Pin<Box<dyn Future<Output = TaskResult>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) const fn raw(v: u64) -> Self {
        Self(v)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

pub(crate) struct Task {
    id: TaskId,
    canceled: Rc<Cell<bool>>,
    deadline: Option<Duration>,
    body: LocalTask,
}

impl Task {
    pub(crate) fn new(id: TaskId, body: LocalTask) -> (Self, TaskHandle) {
        let canceled = Rc::new(Cell::new(false));
        let handle = TaskHandle {
            id,
            canceled: canceled.clone(),
        };
        let task = Self {
            id,
            canceled,
            deadline: None,
            body,
        };
        (task, handle)
    }

    pub(crate) fn id(&self) -> TaskId {
        self.id
    }

    pub(crate) fn is_canceled(&self) -> bool {
        self.canceled.get()
    }

    pub(crate) fn cancel(&self) {
        self.canceled.set(true);
    }

    pub(crate) fn cancel_flag(&self) -> Rc<Cell<bool>> {
        self.canceled.clone()
    }

    pub(crate) fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub(crate) fn set_deadline(&mut self, deadline: Option<Duration>) {
        self.deadline = deadline;
    }

    pub(crate) fn resume(&mut self, cx: &mut Context<'_>) -> Poll<TaskResult> {
        self.body.as_mut().poll(cx)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("canceled", &self.canceled.get())
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

/// Caller-side reference to a spawned task.
///
/// Canceling is cooperative and lazy: the flag is checked when the scheduler
/// next dequeues the task, so a body that is mid-execution finishes its
/// current step first.
#[derive(Clone, Debug)]
pub struct TaskHandle {
    id: TaskId,
    canceled: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancel(&self) {
        if !self.canceled.replace(true) {
            tracing::trace!(task = %self.id, "task canceled");
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.get()
    }
}
