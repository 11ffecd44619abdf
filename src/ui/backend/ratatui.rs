use crate::core::event::Key;
use crate::tui::crossterm::into_key;
use crate::ui::backend::Backend;
use crate::ui::core::style::{Color, Mod, Style};
use crate::ui::core::surface::Surface;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::style::{Color as RColor, Modifier as RModifier, Style as RStyle};
use ratatui::Terminal;
use std::io;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Terminal backend. Owns the ratatui terminal so nothing else in the crate
/// needs to name ratatui types.
pub struct RatatuiBackend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resize: Option<(u16, u16)>,
}

impl RatatuiBackend {
    pub fn new(stdout: io::Stdout) -> io::Result<Self> {
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            resize: None,
        })
    }
}

impl Backend for RatatuiBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok((rows, cols))
    }

    /// The terminal autoresizes on every draw.
    fn draw(&mut self, surface: &Surface) -> io::Result<()> {
        self.terminal.draw(|frame| paint(frame.buffer_mut(), surface))?;
        Ok(())
    }

    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        use crossterm::event::{self, Event};

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(key) = into_key(key) {
                        return Ok(Some(key));
                    }
                }
                Event::Resize(cols, rows) => self.resize = Some((rows, cols)),
                _ => {}
            }
        }
        Ok(None)
    }

    fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resize.take()
    }
}

fn paint(buf: &mut Buffer, surface: &Surface) {
    let area = buf.area;
    let rows = surface.height().min(area.height as usize);
    let cols = surface.width().min(area.width as usize);
    for row in 0..rows {
        // Columns covered by the tail of a wide glyph.
        let mut covered = 0usize;
        for col in 0..cols {
            let Some(src) = surface.cell(row, col) else {
                break;
            };
            let x = area.x + col as u16;
            let y = area.y + row as u16;
            let Some(dst) = buf.cell_mut((x, y)) else {
                continue;
            };
            dst.set_style(to_ratatui_style(src.style));
            if covered > 0 {
                covered -= 1;
                dst.set_char(' ');
                continue;
            }
            let glyph = src.symbol.width();
            if src.symbol.is_empty() || col + glyph > cols {
                dst.set_char(' ');
            } else {
                dst.set_symbol(&src.symbol);
                covered = glyph.saturating_sub(1);
            }
        }
    }
}

fn to_ratatui_style(s: Style) -> RStyle {
    let mut out = RStyle::default();
    if let Some(fg) = s.fg {
        out = out.fg(to_ratatui_color(fg));
    }
    if let Some(bg) = s.bg {
        out = out.bg(to_ratatui_color(bg));
    }
    out = out.add_modifier(to_ratatui_mods(s.mods));
    out
}

fn to_ratatui_color(c: Color) -> RColor {
    match c {
        Color::Reset => RColor::Reset,
        Color::Rgb(r, g, b) => RColor::Rgb(r, g, b),
        Color::Indexed(i) => RColor::Indexed(i),
    }
}

fn to_ratatui_mods(m: Mod) -> RModifier {
    let mut out = RModifier::empty();
    if m.contains(Mod::BOLD) {
        out |= RModifier::BOLD;
    }
    if m.contains(Mod::DIM) {
        out |= RModifier::DIM;
    }
    if m.contains(Mod::ITALIC) {
        out |= RModifier::ITALIC;
    }
    if m.contains(Mod::UNDERLINE) {
        out |= RModifier::UNDERLINED;
    }
    if m.contains(Mod::REVERSE) {
        out |= RModifier::REVERSED;
    }
    out
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/backend/ratatui.rs"]
mod tests;
