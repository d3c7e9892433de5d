//! Frame rate and render time logging.

use std::{
    cell::Cell,
    fmt,
    time::{Duration, Instant},
};

use itertools::Itertools;

/// Accumulates how long an operation takes.
///
/// Displaying the timer with `{}` prints the average duration since it was last displayed, and
/// resets it.
pub struct Timer {
    name: &'static str,
    total: Cell<Duration>,
    count: Cell<u32>,
}

impl Timer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            total: Cell::new(Duration::ZERO),
            count: Cell::new(0),
        }
    }

    /// Invokes `timee` and records how long it took.
    pub fn time<T>(&mut self, timee: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = timee();
        self.total.set(self.total.get() + start.elapsed());
        self.count.set(self.count.get() + 1);
        result
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.count.replace(0);
        let total = self.total.replace(Duration::ZERO);
        let avg_ms = if count == 0 {
            0.0
        } else {
            total.as_secs_f32() * 1000.0 / count as f32
        };
        write!(f, "{}: {count}x{avg_ms:.01}ms", self.name)
    }
}

/// Counts frames and logs the frame rate once per second.
pub struct FpsCounter {
    name: String,
    frames: u32,
    start: Instant,
}

impl FpsCounter {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            frames: 0,
            start: Instant::now(),
        }
    }

    /// Counts a frame, logging the frame rate if a second has passed.
    pub fn tick(&mut self) {
        self.tick_with(None::<&str>);
    }

    /// Counts a frame, logging the frame rate and `extra` if a second has passed.
    ///
    /// `extra` is only formatted when something is logged.
    pub fn tick_with<D: fmt::Display, I: IntoIterator<Item = D>>(&mut self, extra: I) {
        self.frames += 1;
        if self.start.elapsed() < Duration::from_secs(1) {
            return;
        }

        let extra = extra.into_iter().join(", ");
        if extra.is_empty() {
            log::debug!("{}: {} FPS", self.name, self.frames);
        } else {
            log::debug!("{}: {} FPS ({})", self.name, self.frames, extra);
        }
        self.frames = 0;
        self.start = Instant::now();
    }

    /// Returns the number of frames counted since the frame rate was last logged.
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_resets_when_displayed() {
        let mut timer = Timer::new("render");
        assert_eq!(timer.time(|| 7), 7);
        timer.time(|| {});
        assert!(timer.to_string().starts_with("render: 2x"));
        assert_eq!(timer.to_string(), "render: 0x0.0ms");
    }

    #[test]
    fn fps_counts_frames() {
        let mut fps = FpsCounter::new("test");
        fps.tick();
        fps.tick_with(["extra"]);
        assert_eq!(fps.frames(), 2);
    }
}
