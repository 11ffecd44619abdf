//! The screen manager: one scheduler, one root widget, one display.
//!
//! ```no_run
//! # #[cfg(feature = "tui")]
//! # fn main() -> nurses::error::Result<()> {
//! use nurses::{ScreenConfig, ScreenManager, WidgetOptions};
//! use std::time::Duration;
//!
//! let screen = ScreenManager::terminal(ScreenConfig::load_default()?)?;
//! let hello = screen.new_widget(WidgetOptions::new().at(1, 1).size(1, 5))?;
//! hello.write(.., "hello")?;
//! screen.schedule_refresh(Duration::from_millis(100));
//! screen.run(Vec::<nurses::scheduler::LocalTask>::new())?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "tui"))]
//! # fn main() {}
//! ```

use std::cell::RefCell;
use std::future::Future;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crate::config::ScreenConfig;
use crate::core::event::Key;
use crate::error::Result;
use crate::scheduler::{Clock, Scheduler, SchedulerError, SystemClock, TaskHandle, TaskResult};
use crate::ui::backend::Backend;
use crate::ui::core::style::Style;
use crate::ui::widget::{Widget, WidgetOptions, WidgetRegistry};

#[cfg(feature = "tui")]
use crate::tui::terminal_guard::{TerminalGuard, TerminalRestorer};
#[cfg(feature = "tui")]
use crate::ui::backend::ratatui::RatatuiBackend;

type Interrupt = Rc<dyn Fn() -> bool>;

/// Cloneable handle that composites the root and draws it. Tasks capture one
/// of these instead of the whole manager.
#[derive(Clone)]
pub struct Screen {
    root: Widget,
    backend: Rc<RefCell<dyn Backend>>,
}

impl Screen {
    pub fn root(&self) -> &Widget {
        &self.root
    }

    pub fn refresh(&self) -> io::Result<()> {
        self.root.refresh();
        let surface = self.root.surface();
        self.backend.borrow_mut().draw(&surface)
    }
}

pub struct ScreenManager<B: Backend + 'static> {
    scheduler: Scheduler,
    root: Widget,
    backend: Rc<RefCell<B>>,
    registry: WidgetRegistry,
    config: ScreenConfig,
    exit_key: Key,
    interrupt: Option<Interrupt>,
    // Dropped last: the terminal is restored after the backend is gone.
    #[cfg(feature = "tui")]
    guard: Option<TerminalGuard>,
}

#[cfg(feature = "tui")]
impl ScreenManager<RatatuiBackend> {
    /// Take over the terminal: raw mode and the alternate screen until the
    /// manager is dropped.
    pub fn terminal(config: ScreenConfig) -> Result<Self> {
        let guard = TerminalGuard::new()?;
        let backend = RatatuiBackend::new(io::stdout())?;
        let mut manager = Self::new(backend, config)?;
        manager.guard = Some(guard);
        Ok(manager)
    }

    pub fn restorer(&self) -> Option<TerminalRestorer> {
        self.guard.as_ref().map(TerminalGuard::restorer)
    }
}

impl<B: Backend + 'static> ScreenManager<B> {
    pub fn new(backend: B, config: ScreenConfig) -> Result<Self> {
        Self::with_clock(backend, config, Rc::new(SystemClock::new()))
    }

    /// Like [`ScreenManager::new`] with the scheduler driven by `clock`.
    pub fn with_clock(backend: B, config: ScreenConfig, clock: Rc<dyn Clock>) -> Result<Self> {
        let exit_key = config.exit_key()?;
        let (rows, cols) = backend.size()?;
        let root = Widget::new_root(
            i32::from(rows),
            i32::from(cols),
            config.reserved_columns,
            Style::default(),
        );
        tracing::info!(rows, cols, %exit_key, "screen created");
        Ok(Self {
            scheduler: Scheduler::with_clock(clock),
            root,
            backend: Rc::new(RefCell::new(backend)),
            registry: WidgetRegistry::default(),
            config,
            exit_key,
            interrupt: None,
            #[cfg(feature = "tui")]
            guard: None,
        })
    }

    pub fn root(&self) -> &Widget {
        &self.root
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Register additional widget types for `create_with` and layouts.
    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    pub fn backend(&self) -> &Rc<RefCell<B>> {
        &self.backend
    }

    pub fn screen(&self) -> Screen {
        Screen {
            root: self.root.clone(),
            backend: self.backend.clone(),
        }
    }

    /// Create a widget under `options.parent`, or under the root when unset.
    pub fn new_widget(&self, options: WidgetOptions) -> Result<Widget> {
        let parent = options.parent.clone().unwrap_or_else(|| self.root.clone());
        parent.new_widget_in(&self.registry, options)
    }

    /// Attach an existing widget to the root.
    pub fn add_widget(&self, widget: &Widget) {
        self.root.add_widget(widget);
    }

    pub fn group(&self, key: &str) -> Vec<Widget> {
        self.root.group(key)
    }

    pub fn schedule<A>(&self, action: A, delay: Duration, repeat: u32) -> TaskHandle
    where
        A: FnMut() -> TaskResult + 'static,
    {
        self.scheduler.schedule(action, delay, repeat)
    }

    pub fn run_soon<F>(&self, body: F) -> TaskHandle
    where
        F: Future<Output = TaskResult> + 'static,
    {
        self.scheduler.run_soon(body)
    }

    /// Redraw the screen every `delay` until canceled or stopped.
    pub fn schedule_refresh(&self, delay: Duration) -> TaskHandle {
        let screen = self.screen();
        self.scheduler
            .schedule(move || Ok(screen.refresh()?), delay, 0)
    }

    pub fn refresh(&self) -> io::Result<()> {
        self.screen().refresh()
    }

    pub fn dispatch(&self, key: &Key) -> bool {
        self.root.dispatch(key)
    }

    /// Also stop when `check` returns `true`. Checked once per input poll.
    pub fn stop_when<F>(&mut self, check: F)
    where
        F: Fn() -> bool + 'static,
    {
        self.interrupt = Some(Rc::new(check));
    }

    /// Queue `tasks` plus the input loop and drive the scheduler until every
    /// task has finished or the exit key is pressed.
    pub fn run<I, F>(&self, tasks: I) -> std::result::Result<(), SchedulerError>
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = TaskResult> + 'static,
    {
        for body in tasks {
            self.scheduler.run_soon(body);
        }
        let backend: Rc<RefCell<dyn Backend>> = self.backend.clone();
        self.scheduler.run_soon(input_loop(
            self.scheduler.clone(),
            self.root.clone(),
            backend,
            self.exit_key,
            self.config.poll_interval(),
            self.interrupt.clone(),
        ));
        tracing::info!(tasks = self.scheduler.pending(), "screen running");
        let result = self.scheduler.run_pending();
        tracing::info!(ok = result.is_ok(), "screen stopped");
        result
    }
}

async fn input_loop(
    sched: Scheduler,
    root: Widget,
    backend: Rc<RefCell<dyn Backend>>,
    exit_key: Key,
    poll_interval: Duration,
    interrupt: Option<Interrupt>,
) -> TaskResult {
    loop {
        // Nothing else is queued: the screen has nothing left to do.
        if sched.pending() == 0 {
            return Ok(());
        }
        if interrupt.as_ref().is_some_and(|check| check()) {
            tracing::info!("interrupted");
            sched.stop();
            return Ok(());
        }

        let resized = backend.borrow_mut().take_resize();
        if let Some((rows, cols)) = resized {
            tracing::debug!(rows, cols, "display resized");
            root.resize(i32::from(rows), i32::from(cols));
        }

        let key = backend.borrow_mut().poll_key()?;
        if let Some(key) = key {
            if key == exit_key {
                tracing::debug!(%key, "exit key pressed");
                sched.stop();
                return Ok(());
            }
            if !root.dispatch(&key) {
                tracing::trace!(%key, "key not handled");
            }
        }

        sched.sleep(poll_interval).await;
    }
}

#[cfg(test)]
#[path = "../tests/unit/screen.rs"]
mod tests;
