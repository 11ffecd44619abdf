mod logging;

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use nurses::error::Result;
use nurses::scheduler::LocalTask;
use nurses::ui::core::{BorderStyle, Cell, Color, Style};
use nurses::ui::widget::{Widget, WidgetOptions};
use nurses::ui::widgets::{load_layout, schedule_bounce, Bouncing, Vec2};
use nurses::{ScreenConfig, ScreenManager};

const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> ExitCode {
    let Some(path) = std::env::args_os().nth(1) else {
        eprintln!("usage: nurses <layout-file>");
        return ExitCode::from(2);
    };

    match run(Path::new(&path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "nurses failed");
            eprintln!("nurses: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &Path) -> Result<()> {
    let config = ScreenConfig::load_default()?;
    let _logging = logging::init(config.log_filter.as_deref());
    let text = std::fs::read_to_string(path)?;

    let mut screen = ScreenManager::terminal(config)?;
    let layout = load_layout(&text, screen.root(), screen.registry())?;
    for (name, widget) in layout.iter() {
        widget.border(BorderStyle::Light, None);
        label(widget, name)?;
    }

    let ball = screen.new_widget(
        WidgetOptions::new()
            .at(1, 1)
            .size(1, 1)
            .transparent(true),
    )?;
    ball.write(.., Cell::new("●", Style::new().fg(Color::YELLOW)))?;
    schedule_bounce(
        &ball,
        screen.scheduler(),
        Bouncing::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)),
        Bouncing::DEFAULT_DELAY,
    );

    watch_signals(&mut screen)?;
    screen.schedule_refresh(REFRESH_INTERVAL);
    screen.run(Vec::<LocalTask>::new())?;
    Ok(())
}

/// Write `name` into the top border, clipped to fit between the corners.
fn label(widget: &Widget, name: &str) -> Result<()> {
    let room = usize::try_from(widget.width() - 2).unwrap_or(0);
    let text: String = name.chars().take(room).collect();
    let len = text.chars().count();
    if len == 0 || widget.height() < 1 {
        return Ok(());
    }
    widget.write((0, 1..1 + len as i32), text)
}

#[cfg(unix)]
fn watch_signals(screen: &mut ScreenManager<nurses::ui::backend::ratatui::RatatuiBackend>) -> Result<()> {
    use nurses::tui::terminal_guard::install_termination_signals;

    let Some(restorer) = screen.restorer() else {
        return Ok(());
    };
    let (tx, rx) = std::sync::mpsc::channel();
    install_termination_signals(restorer, tx)?;
    screen.stop_when(move || rx.try_recv().is_ok());
    Ok(())
}

#[cfg(not(unix))]
fn watch_signals(_: &mut ScreenManager<nurses::ui::backend::ratatui::RatatuiBackend>) -> Result<()> {
    Ok(())
}
