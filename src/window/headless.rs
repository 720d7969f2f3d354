use crate::{
    draw::{Rgba, Shape},
    window::{UserAction, Window},
};

/// A window that renders nothing. Counts frames, keeps the titles it was given and can be
/// told to close after a number of frames. Used for profiling and tests.
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    /// Close once this many frames have been presented
    max_frames: Option<usize>,
    frames: usize,
    /// Shapes drawn since the last clear
    shapes_drawn: usize,
    titles: Vec<String>,
    actions: Vec<UserAction>,
}

impl HeadlessWindow {
    /// A window that stays open until [`HeadlessWindow::close`] is called.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn closing_after(max_frames: usize) -> Self {
        HeadlessWindow {
            max_frames: Some(max_frames),
            ..Self::default()
        }
    }

    pub fn close(&mut self) {
        self.max_frames = Some(self.frames);
    }

    /// Queues an action as if the user had pressed its key.
    pub fn send_action(&mut self, action: UserAction) {
        self.actions.push(action);
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn shapes_drawn(&self) -> usize {
        self.shapes_drawn
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

impl Window for HeadlessWindow {
    fn closed(&mut self) -> std::io::Result<bool> {
        Ok(self.max_frames.is_some_and(|max| self.frames >= max))
    }

    fn clear(&mut self, _color: Rgba) {
        self.shapes_drawn = 0;
    }

    fn draw(&mut self, _shape: &Shape) {
        self.shapes_drawn += 1;
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> std::io::Result<()> {
        self.titles.push(title.to_string());
        Ok(())
    }

    fn take_actions(&mut self) -> Vec<UserAction> {
        std::mem::take(&mut self.actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closes_after_frames() {
        let mut window = HeadlessWindow::closing_after(2);
        assert!(!window.closed().unwrap());
        window.present().unwrap();
        assert!(!window.closed().unwrap());
        window.present().unwrap();
        assert!(window.closed().unwrap());
    }

    #[test]
    fn test_actions_are_drained() {
        let mut window = HeadlessWindow::new();
        window.send_action(UserAction::SpeedUp);
        assert_eq!(window.take_actions(), vec![UserAction::SpeedUp]);
        assert!(window.take_actions().is_empty());
        window.close();
        assert!(window.closed().unwrap());
    }
}
