/*!
Display capability for the drawing/printing opcodes.

The core never talks to a concrete terminal: PRA/PRN/PLOT forward
register values through this injected trait, so the CPU can run
headless (tests, batch execution) or drive the crossterm frontend when
the `terminal` feature is enabled.
*/

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Output device for the machine's drawing/printing instructions.
///
/// `putc` emits one character cell; byte 10 means line-advance. `plot`
/// renders a block at a column/row position. Neither has a return
/// channel to the core.
pub trait Screen {
    fn putc(&mut self, ch: u8);
    fn plot(&mut self, x: u8, y: u8);

    /// Called exactly once when the machine halts; frontends restore
    /// the terminal here.
    fn stop(&mut self) {}
}

/// Headless screen: characters go straight to stdout, plotted points
/// are dropped (there is no cursor addressing without a frontend).
#[derive(Default)]
pub struct StdoutScreen;

impl StdoutScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for StdoutScreen {
    fn putc(&mut self, ch: u8) {
        let mut out = io::stdout();
        let _ = out.write_all(&[ch]);
        let _ = out.flush();
    }

    fn plot(&mut self, _x: u8, _y: u8) {}
}

/// Capturing screen for tests and embedders. Cloning shares the
/// underlying buffers, so a handle kept outside the machine observes
/// everything the program drew.
#[derive(Default, Clone)]
pub struct BufferScreen {
    chars: Rc<RefCell<Vec<u8>>>,
    points: Rc<RefCell<Vec<(u8, u8)>>>,
    stops: Rc<RefCell<u32>>,
}

impl BufferScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted via `putc`, as a lossy string.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.chars.borrow()).into_owned()
    }

    pub fn points(&self) -> Vec<(u8, u8)> {
        self.points.borrow().clone()
    }

    pub fn stop_count(&self) -> u32 {
        *self.stops.borrow()
    }
}

impl Screen for BufferScreen {
    fn putc(&mut self, ch: u8) {
        self.chars.borrow_mut().push(ch);
    }

    fn plot(&mut self, x: u8, y: u8) {
        self.points.borrow_mut().push((x, y));
    }

    fn stop(&mut self) {
        *self.stops.borrow_mut() += 1;
    }
}
