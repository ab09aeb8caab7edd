//! Terminal host: runs one engine inside a crossterm terminal.
//!
//! Row 0 is the menu bar, the canvas starts at row 1, and the row after the
//! canvas is the status bar. Mouse coordinates are translated into canvas
//! cells before they reach the engine.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::{cursor, execute, queue, style, terminal};

use super::raster::{self, Grid};
use super::Surface;
use crate::config::{self, HostConfig};
use crate::engine::Engine;
use crate::types::{Color, Frame, NamedColor, Style};

/// Rows reserved above the canvas for the menu bar.
const CANVAS_OFFSET: u16 = 1;
/// Menu bar plus status bar.
const CHROME_ROWS: u16 = 2;

pub struct Host {
    engine: Engine,
    config: HostConfig,
    out: io::Stdout,
    grid: Grid,
    canvas: (u16, u16),
    too_small: bool,
    fullscreen: bool,
    last_command: Option<String>,
}

impl Host {
    pub fn new(engine: Engine, config: HostConfig) -> Self {
        Host {
            engine,
            config,
            out: io::stdout(),
            grid: Vec::new(),
            canvas: (0, 0),
            too_small: false,
            fullscreen: false,
            last_command: None,
        }
    }

    /// Run until the quit binding is pressed.
    ///
    /// Sets up the terminal, enters the event loop, and restores the terminal
    /// on exit (even on error).
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.run_loop();

        // Always restore terminal state.
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();

        result
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    fn run_loop(&mut self) -> Result<()> {
        let (w, h) = terminal::size()?;
        self.resize(w, h)?;

        let frame_time = Duration::from_secs_f64(1.0 / f64::from(self.config.fps.max(1)));
        let mut last = Instant::now();

        loop {
            if event::poll(frame_budget(frame_time, last.elapsed()))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.config.is_quit(&key) {
                            break;
                        }
                        if self.config.is_fullscreen(&key) {
                            self.toggle_fullscreen()?;
                        } else if let Some(k) = config::to_key(&key) {
                            let cmd = self.engine.on_key(k);
                            self.record(cmd.as_ref().map(|c| c.name()));
                        }
                    }
                    Event::Mouse(mouse) => {
                        let x = f64::from(mouse.column);
                        let y = f64::from(mouse.row) - f64::from(CANVAS_OFFSET);
                        let cmd = match mouse.kind {
                            MouseEventKind::Down(MouseButton::Left) => self.engine.on_pointer_down(x, y),
                            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                                self.engine.on_pointer_move(x, y)
                            }
                            MouseEventKind::Up(MouseButton::Left) => self.engine.on_pointer_up(x, y),
                            _ => None,
                        };
                        self.record(cmd.as_ref().map(|c| c.name()));
                    }
                    Event::Resize(w, h) => self.resize(w, h)?,
                    _ => {}
                }
                if frame_budget(frame_time, last.elapsed()) > Duration::ZERO {
                    continue;
                }
            }

            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f64().min(self.config.max_step);
            last = now;
            self.engine.tick(dt);

            if !self.too_small {
                let frame = self.engine.frame();
                self.present(&frame)?;
                self.render_status()?;
            }
        }

        Ok(())
    }

    fn record(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            self.last_command = Some(name.to_string());
        }
    }

    fn toggle_fullscreen(&mut self) -> Result<()> {
        self.fullscreen = !self.fullscreen;
        if self.fullscreen {
            self.out.write_all(b"\x1b[10;1t")?;
        } else {
            self.out.write_all(b"\x1b[10;0t")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn resize(&mut self, term_w: u16, term_h: u16) -> Result<()> {
        let canvas_h = term_h.saturating_sub(CHROME_ROWS);
        let min = self.engine.config().min_viewport();
        self.too_small = f64::from(term_w) < min.width || f64::from(canvas_h) < min.height;
        queue!(self.out, terminal::Clear(terminal::ClearType::All))?;

        if self.too_small {
            let message = format!(
                "Terminal too small: need {}x{}, have {}x{}",
                min.width,
                min.height + f64::from(CHROME_ROWS),
                term_w,
                term_h,
            );
            tracing::warn!(term_w, term_h, "terminal smaller than the sketch minimum");
            queue!(self.out, cursor::MoveTo(0, 0), style::Print(message))?;
            self.out.flush()?;
            return Ok(());
        }

        self.canvas = (term_w, canvas_h);
        self.engine.on_resize(f64::from(term_w), f64::from(canvas_h));
        // Force a full repaint on the next present.
        self.grid.clear();
        self.render_menubar()?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    fn render_menubar(&mut self) -> Result<()> {
        let mut items: Vec<String> = self
            .engine
            .config()
            .keys
            .iter()
            .map(|b| format!("[{}] {}", b.key, b.command.name()))
            .collect();
        items.push(format!("[{}] quit", self.config.key_bindings.quit.join("/")));

        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(" "),
        )?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                queue!(self.out, style::Print("  "))?;
            }
            print_menu_item(&mut self.out, item)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn render_status(&mut self) -> Result<()> {
        let status_y = self.canvas.1 + CANVAS_OFFSET;
        let state = self.engine.state();
        let mut status = format!(" {}", self.engine.config().name);
        if let Some(clock) = &state.clock {
            let icon = if clock.is_playing() { "▶" } else { "❚❚" };
            status.push_str(&format!(" | {icon} {:.1}s", clock.time));
        }
        if state.selections() > 0 {
            status.push_str(&format!(" | step {}/{}", state.selected() + 1, state.selections()));
        }
        if let Some(name) = &self.last_command {
            status.push_str(&format!(" | last: {name}"));
        }
        status.push(' ');

        let mut cs = style::ContentStyle::default();
        cs.attributes.set(style::Attribute::Dim);

        queue!(
            self.out,
            cursor::MoveTo(0, status_y),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::PrintStyledContent(style::StyledContent::new(cs, status)),
        )?;
        self.out.flush()?;
        Ok(())
    }
}

impl Surface for Host {
    /// Paint a frame, writing only the cells that changed since the last one.
    fn present(&mut self, frame: &Frame) -> Result<()> {
        let next = raster::rasterize(frame);
        let same_shape = self.grid.len() == next.len()
            && self.grid.first().map(Vec::len) == next.first().map(Vec::len);

        if same_shape {
            for change in raster::diff(&self.grid, &next) {
                let cs = to_content_style(&change.cell.style);
                queue!(
                    self.out,
                    cursor::MoveTo(change.x, change.y + CANVAS_OFFSET),
                    style::PrintStyledContent(style::StyledContent::new(cs, change.cell.ch)),
                )?;
            }
        } else {
            for (y, row) in next.iter().enumerate() {
                queue!(self.out, cursor::MoveTo(0, y as u16 + CANVAS_OFFSET))?;
                for cell in row {
                    let cs = to_content_style(&cell.style);
                    queue!(
                        self.out,
                        style::PrintStyledContent(style::StyledContent::new(cs, cell.ch))
                    )?;
                }
            }
        }
        self.out.flush()?;
        self.grid = next;
        Ok(())
    }
}

/// Time left to wait for input before the next frame is due.
fn frame_budget(frame_time: Duration, elapsed: Duration) -> Duration {
    frame_time.saturating_sub(elapsed)
}

/// Print a menu item string, bolding any text inside `[...]` brackets.
/// Text outside brackets is printed dim.
fn print_menu_item(out: &mut impl Write, item: &str) -> Result<()> {
    let mut rest = item;
    while let Some(open) = rest.find('[') {
        if open > 0 {
            queue!(
                out,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(&rest[..open]),
                style::SetAttribute(style::Attribute::Reset),
            )?;
        }
        rest = &rest[open..];
        let Some(close) = rest.find(']') else {
            break;
        };
        queue!(
            out,
            style::SetAttribute(style::Attribute::Bold),
            style::Print(&rest[..=close]),
            style::SetAttribute(style::Attribute::Reset),
        )?;
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        queue!(
            out,
            style::SetAttribute(style::Attribute::Dim),
            style::Print(rest),
            style::SetAttribute(style::Attribute::Reset),
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    if let Some(fg) = &s.fg {
        cs.foreground_color = Some(to_ct_color(fg));
    }
    if let Some(bg) = &s.bg {
        cs.background_color = Some(to_ct_color(bg));
    }
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    if s.dim {
        cs.attributes.set(style::Attribute::Dim);
    }
    cs
}

pub fn to_ct_color(c: &Color) -> style::Color {
    match c {
        Color::Named(n) => match n {
            NamedColor::Black => style::Color::Black,
            NamedColor::Red => style::Color::Red,
            NamedColor::Green => style::Color::Green,
            NamedColor::Yellow => style::Color::Yellow,
            NamedColor::Blue => style::Color::Blue,
            NamedColor::Magenta => style::Color::Magenta,
            NamedColor::Cyan => style::Color::Cyan,
            NamedColor::White => style::Color::White,
            NamedColor::Grey => style::Color::Grey,
        },
        Color::Rgb { r, g, b } => style::Color::Rgb { r: *r, g: *g, b: *b },
    }
}

#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;
