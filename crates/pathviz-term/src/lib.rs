//! Crossterm front end for pathviz.
//!
//! [`TermVisualizer`] is a [`Visualizer`] that repaints the grid in the
//! terminal after every search step and then pumps the keyboard. A quit key
//! cancels its [`Context`], and the running search stops on its next
//! expansion.
//!
//! Each cell is two columns wide so the board looks square. Row 0 of the
//! screen is a status line; the grid starts on row 1.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::{CellKind, Context, Grid};
use pathviz_search::Visualizer;

/// Background colour for a cell kind.
pub fn kind_color(kind: CellKind) -> Color {
    let (r, g, b) = match kind {
        CellKind::Empty => (255, 255, 255),
        CellKind::Start => (255, 165, 0),
        CellKind::End => (64, 224, 208),
        CellKind::Barrier => (0, 0, 0),
        CellKind::Open => (0, 255, 0),
        CellKind::Closed => (255, 0, 0),
        CellKind::Path => (128, 0, 128),
    };
    Color::Rgb { r, g, b }
}

/// Whether a key event asks to stop: `q`, `Esc` or `Ctrl-C`.
pub fn is_quit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Screen position of the top-left corner of grid cell `(row, col)`.
#[inline]
fn cell_origin(row: i32, col: i32) -> (i32, i32) {
    (col * 2, row + 1)
}

/// Terminal visualizer for a running search.
pub struct TermVisualizer {
    ctx: Context,
    delay: Duration,
    title: String,
    // Kind last painted for each cell; `None` forces a repaint.
    painted: Vec<Option<CellKind>>,
    screen: (u16, u16),
    steps: usize,
    error: Option<io::Error>,
    active: bool,
}

impl TermVisualizer {
    /// Create a visualizer reporting cancellation through `ctx`.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            delay: Duration::ZERO,
            title: String::new(),
            painted: Vec::new(),
            screen: (0, 0),
            steps: 0,
            error: None,
            active: false,
        }
    }

    /// Pause this long after every step (builder).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Text shown at the left of the status line (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Number of frames drawn since the last [`init`](Self::init).
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The I/O error that interrupted drawing, if any. Drawing cannot
    /// report errors through [`Visualizer::draw`], so the first one is kept
    /// here and the context is cancelled.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Switch the terminal to raw mode on the alternate screen.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        // From here on `close` has something to undo.
        self.active = true;
        self.enter_screen(&mut io::stdout())
    }

    fn enter_screen<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        self.screen = terminal::size()?;
        self.painted.clear();
        self.steps = 0;
        log::debug!("terminal: {}x{} screen", self.screen.0, self.screen.1);
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }

    /// Repaint `grid` with `status` on the status line, without pumping
    /// input or counting a step.
    pub fn show(&mut self, grid: &Grid, status: &str) -> io::Result<()> {
        self.paint(grid)?;
        self.status(status)
    }

    /// Block until a key is pressed.
    pub fn wait_key(&mut self) -> io::Result<()> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => return Ok(()),
                Event::Resize(w, h) => self.resized(w, h),
                _ => {}
            }
        }
    }

    fn paint(&mut self, grid: &Grid) -> io::Result<()> {
        let mut out = io::stdout().lock();
        if self.painted.len() != grid.len() {
            self.painted = vec![None; grid.len()];
            queue!(out, terminal::Clear(ClearType::All))?;
        }
        let (width, height) = (i32::from(self.screen.0), i32::from(self.screen.1));

        for (i, cell) in grid.cells().enumerate() {
            if self.painted[i] == Some(cell.kind) {
                continue;
            }
            self.painted[i] = Some(cell.kind);
            let (x, y) = cell_origin(cell.row(), cell.col());
            if x + 1 >= width || y >= height {
                continue;
            }
            queue!(
                out,
                cursor::MoveTo(x as u16, y as u16),
                SetBackgroundColor(kind_color(cell.kind)),
                Print("  ")
            )?;
        }
        queue!(out, ResetColor)?;
        out.flush()
    }

    fn status(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        let line: String = text.chars().take(usize::from(self.screen.0)).collect();
        queue!(
            out,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Grey),
            Print(line),
            ResetColor
        )?;
        out.flush()
    }

    /// Read pending events until the step delay has passed.
    fn pump(&mut self) -> io::Result<()> {
        let deadline = Instant::now() + self.delay;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if !event::poll(left)? {
                return Ok(());
            }
            match event::read()? {
                Event::Key(key) if is_quit(&key) => {
                    log::debug!("terminal: quit requested");
                    self.ctx.cancel();
                    return Ok(());
                }
                Event::Resize(w, h) => self.resized(w, h),
                _ => {}
            }
        }
    }

    fn resized(&mut self, w: u16, h: u16) {
        self.screen = (w, h);
        // Repaint everything on the next frame.
        self.painted.clear();
    }

    fn step(&mut self, grid: &Grid) -> io::Result<()> {
        self.steps += 1;
        self.paint(grid)?;
        let status = format!("{}  step {}  (q to stop)", self.title, self.steps);
        self.status(&status)?;
        self.pump()
    }
}

impl Visualizer for TermVisualizer {
    fn draw(&mut self, grid: &Grid) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.step(grid) {
            self.error = Some(err);
            self.ctx.cancel();
        }
    }

    fn is_done(&self) -> bool {
        self.ctx.is_done()
    }
}

impl Drop for TermVisualizer {
    fn drop(&mut self) {
        self.close();
    }
}
