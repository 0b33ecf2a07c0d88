use pathviz_core::{Context, Grid};

/// The per-step callback a search reports to.
///
/// [`draw`](Visualizer::draw) is the only place a running search hands
/// control back to the outside world: it is expected to redraw the grid and
/// pump pending input. [`is_done`](Visualizer::is_done) is polled before
/// every frontier item; once it answers `true` the search stops and
/// reports failure.
///
/// Any `FnMut(&Grid)` closure is a visualizer that never cancels.
pub trait Visualizer {
    /// Redraw after a visible step.
    fn draw(&mut self, grid: &Grid);

    /// Whether the running search should stop.
    fn is_done(&self) -> bool {
        false
    }
}

impl<F: FnMut(&Grid)> Visualizer for F {
    #[inline]
    fn draw(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// A visualizer that draws nothing and never cancels.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl Visualizer for Headless {
    #[inline]
    fn draw(&mut self, _grid: &Grid) {}
}

/// A draw callback paired with a cancellation [`Context`].
///
/// The callback usually keeps its own clone of the context and cancels it
/// when the user asks to quit; the search sees the request on its next
/// expansion.
#[derive(Debug)]
pub struct Watched<F> {
    ctx: Context,
    draw: F,
}

impl<F: FnMut(&Grid)> Watched<F> {
    pub fn new(ctx: Context, draw: F) -> Self {
        Self { ctx, draw }
    }

    /// The token this visualizer reports from.
    pub fn context(&self) -> &Context {
        &self.ctx
    }
}

impl<F: FnMut(&Grid)> Visualizer for Watched<F> {
    #[inline]
    fn draw(&mut self, grid: &Grid) {
        (self.draw)(grid)
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.ctx.is_done()
    }
}
