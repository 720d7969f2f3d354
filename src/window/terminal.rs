use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

use crate::{
    draw::{Framebuffer, Rgba, Shape},
    window::{UserAction, Window},
};

/// A window backed by the terminal.
///
/// The drawing surface is rasterized into a framebuffer sized to fit the terminal and shown
/// with upper half block characters, two framebuffer rows per terminal row, in 24-bit color.
/// Only terminal cells that changed since the previous frame are rewritten.
/// The last terminal row is a status bar with the window title and key hints.
pub struct TerminalWindow {
    stdout: Stdout,
    framebuffer: Framebuffer,
    /// Colors last written to each terminal cell, as (upper half, lower half)
    front: Vec<Option<(Color, Color)>>,
    /// Terminal size as (columns, rows)
    term_size: (u16, u16),
    /// First terminal column of the surface, to center it horizontally
    left: u16,
    title: String,
    /// Whether the status bar needs to be redrawn
    status_dirty: bool,
    closed: bool,
    actions: Vec<UserAction>,
}

impl TerminalWindow {
    /// Terminal rows reserved below the surface
    const STATUS_ROWS: u16 = 1;
    const KEY_HINTS: &'static str = "Enter: pause  ↑/↓: speed  Esc: quit";
    const HALF_BLOCK: char = '▀';

    /// Takes over the terminal (raw mode, alternate screen) and sizes the framebuffer to fit
    /// a surface of `width` by `height` pixels.
    /// Fails if the terminal cannot be set up or is too small to show anything.
    pub fn new(title: &str, width: u32, height: u32) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let (surface_width, surface_height) = (width as f32, height as f32);
        let (fb_width, fb_height, left) =
            TerminalWindow::layout(cols, rows, surface_width, surface_height);
        if fb_width == 0 || fb_height == 0 {
            return Err(std::io::Error::other(format!(
                "Terminal size {}x{} is too small to display the maze",
                cols, rows
            )));
        }

        let mut stdout = std::io::stdout();
        TerminalWindow::setup_terminal(&mut stdout)?;
        tracing::info!(
            cols,
            rows,
            fb_width,
            fb_height,
            "Terminal window created"
        );

        let mut window = TerminalWindow {
            stdout,
            framebuffer: Framebuffer::new(fb_width, fb_height, surface_width, surface_height),
            front: vec![None; fb_width * fb_height / 2],
            term_size: (cols, rows),
            left,
            title: String::new(),
            status_dirty: true,
            closed: false,
            actions: Vec::new(),
        };
        window.set_title(title)?;
        Ok(window)
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = TerminalWindow::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        TerminalWindow::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(
            stdout,
            style::ResetColor,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Largest framebuffer that fits the terminal while keeping the surface's aspect ratio.
    /// Returns (framebuffer width, framebuffer height, left margin in columns).
    /// A zero size means the terminal is too small.
    fn layout(cols: u16, rows: u16, surface_width: f32, surface_height: f32) -> (usize, usize, u16) {
        let available_width = cols as f32;
        // Each terminal row holds two framebuffer rows
        let available_height = rows.saturating_sub(TerminalWindow::STATUS_ROWS) as f32 * 2.0;
        let scale = (available_width / surface_width).min(available_height / surface_height);
        let width = (surface_width * scale).floor() as usize;
        // Round down to whole terminal rows
        let height = (surface_height * scale).floor() as usize & !1;
        if width == 0 || height == 0 {
            return (0, 0, 0);
        }
        let left = (cols as usize).saturating_sub(width) / 2;
        (width, height, left as u16)
    }

    fn resize(&mut self, cols: u16, rows: u16) -> std::io::Result<()> {
        let (surface_width, surface_height) = self.framebuffer.surface_size();
        let (width, height, left) =
            TerminalWindow::layout(cols, rows, surface_width, surface_height);
        tracing::debug!(cols, rows, width, height, "Terminal resized");
        self.term_size = (cols, rows);
        self.left = left;
        self.framebuffer.resize(width, height);
        self.front = vec![None; width * height / 2];
        self.status_dirty = true;
        queue!(
            self.stdout,
            style::ResetColor,
            terminal::Clear(ClearType::All)
        )?;
        Ok(())
    }

    fn to_color(rgb: [f32; 3]) -> Color {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::Rgb {
            r: channel(rgb[0]),
            g: channel(rgb[1]),
            b: channel(rgb[2]),
        }
    }

    /// Title on the left, key hints on the right when both fit, otherwise the title cut to width.
    fn status_line(&self, width: usize) -> String {
        let (title_width, hints_width) = (self.title.width(), TerminalWindow::KEY_HINTS.width());
        if title_width + hints_width + 2 <= width {
            let padding = width - title_width - hints_width;
            format!(
                "{}{}{}",
                self.title,
                " ".repeat(padding),
                TerminalWindow::KEY_HINTS
            )
        } else {
            let (truncated, _) = self.title.unicode_truncate(width);
            truncated.to_string()
        }
    }

    fn draw_status(&mut self) -> std::io::Result<()> {
        let (cols, rows) = self.term_size;
        if rows == 0 {
            return Ok(());
        }
        let line = self.status_line(cols as usize);
        queue!(
            self.stdout,
            cursor::MoveTo(0, rows - 1),
            style::ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(line.with(Color::Cyan).attribute(Attribute::Bold))
        )?;
        self.status_dirty = false;
        Ok(())
    }
}

impl Window for TerminalWindow {
    fn closed(&mut self) -> std::io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => self.closed = true,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.closed = true
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        self.actions.push(UserAction::TogglePause)
                    }
                    KeyCode::Up => self.actions.push(UserAction::SpeedUp),
                    KeyCode::Down => self.actions.push(UserAction::SlowDown),
                    _ => {}
                },
                Event::Resize(cols, rows) => self.resize(cols, rows)?,
                _ => {}
            }
        }
        if self.closed {
            tracing::info!("Close requested from the keyboard");
        }
        Ok(self.closed)
    }

    fn clear(&mut self, color: Rgba) {
        self.framebuffer.clear(color);
    }

    fn draw(&mut self, shape: &Shape) {
        self.framebuffer.draw(shape);
    }

    fn present(&mut self) -> std::io::Result<()> {
        let (width, height) = (self.framebuffer.width(), self.framebuffer.height());
        if width == 0 || height == 0 {
            queue!(
                self.stdout,
                style::ResetColor,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(
                    "Terminal is too small to display the maze. Please resize the terminal."
                        .with(Color::Yellow)
                        .attribute(Attribute::Bold)
                )
            )?;
            return self.stdout.flush();
        }

        // Colors currently set on the terminal
        let mut pen: Option<(Color, Color)> = None;
        for row in 0..height / 2 {
            // Column the cursor sits on after the last print in this row
            let mut cursor_col: Option<usize> = None;
            for col in 0..width {
                let cell = (
                    TerminalWindow::to_color(self.framebuffer.pixel(col, row * 2)),
                    TerminalWindow::to_color(self.framebuffer.pixel(col, row * 2 + 1)),
                );
                let i = row * width + col;
                if self.front[i] == Some(cell) {
                    continue;
                }
                self.front[i] = Some(cell);

                if cursor_col != Some(col) {
                    queue!(
                        self.stdout,
                        cursor::MoveTo(self.left + col as u16, row as u16)
                    )?;
                }
                if pen != Some(cell) {
                    queue!(
                        self.stdout,
                        style::SetForegroundColor(cell.0),
                        style::SetBackgroundColor(cell.1)
                    )?;
                    pen = Some(cell);
                }
                queue!(self.stdout, style::Print(TerminalWindow::HALF_BLOCK))?;
                cursor_col = Some(col + 1);
            }
        }

        if self.status_dirty {
            self.draw_status()?;
        }
        self.stdout.flush()
    }

    fn set_title(&mut self, title: &str) -> std::io::Result<()> {
        self.title = title.to_string();
        self.status_dirty = true;
        queue!(self.stdout, terminal::SetTitle(title))?;
        Ok(())
    }

    fn take_actions(&mut self) -> Vec<UserAction> {
        std::mem::take(&mut self.actions)
    }
}

impl Drop for TerminalWindow {
    fn drop(&mut self) {
        let _ = TerminalWindow::restore_terminal(&mut self.stdout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fits_square_surface() {
        // 80 columns, 40 rows for the surface plus one status row
        assert_eq!(TerminalWindow::layout(80, 41, 800.0, 800.0), (80, 80, 0));
        // Height bound: extra columns become a left margin
        assert_eq!(TerminalWindow::layout(120, 21, 800.0, 800.0), (40, 40, 40));
    }

    #[test]
    fn test_layout_rounds_to_whole_rows() {
        let (_, height, _) = TerminalWindow::layout(33, 100, 800.0, 800.0);
        assert_eq!(height, 32);
    }

    #[test]
    fn test_layout_too_small() {
        assert_eq!(TerminalWindow::layout(0, 10, 800.0, 800.0), (0, 0, 0));
        assert_eq!(TerminalWindow::layout(80, 1, 800.0, 800.0), (0, 0, 0));
    }

    #[test]
    fn test_to_color_clamps() {
        assert_eq!(
            TerminalWindow::to_color([1.5, 0.5, -1.0]),
            Color::Rgb {
                r: 255,
                g: 128,
                b: 0
            }
        );
    }
}
