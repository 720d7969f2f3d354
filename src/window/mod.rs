mod headless;
mod terminal;

pub use headless::HeadlessWindow;
pub use terminal::TerminalWindow;

use crate::draw::{Rgba, Shape};

/// Keyboard requests a window forwards to the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// Pause or resume the animation
    TogglePause,
    /// Run more generator steps per frame
    SpeedUp,
    /// Run fewer generator steps per frame
    SlowDown,
}

/// A surface the frame loop presents to. Must only be used from the thread that created it.
pub trait Window {
    /// Whether the user asked to close the window. Also where pending input is processed,
    /// so it should be polled once per frame.
    fn closed(&mut self) -> std::io::Result<bool>;
    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Rgba);
    fn draw(&mut self, shape: &Shape);
    /// Shows everything drawn since the last clear.
    fn present(&mut self) -> std::io::Result<()>;
    fn set_title(&mut self, title: &str) -> std::io::Result<()>;
    /// Drains the user actions received since the last call.
    fn take_actions(&mut self) -> Vec<UserAction> {
        Vec::new()
    }
}
