/// Current run score and the session high-water mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub current: u32,
    /// Survives resets, not process restarts
    pub high: u32,
}

impl Score {
    pub fn add(&mut self, points: u32) {
        self.current += points;
    }

    /// Fold the finished run into the high score.
    pub fn finish_run(&mut self) {
        self.high = self.high.max(self.current);
    }

    pub fn start_run(&mut self) {
        self.current = 0;
    }
}
