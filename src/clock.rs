use std::time::{Duration, Instant};

/// Caps the loop at a frame rate.
pub trait Clock {
    /// Blocks until the current frame's budget is used up; returns how long
    /// the frame took in total.
    fn tick(&mut self, target_fps: u32) -> Duration;
}

/// Sleeps out whatever remains of the frame budget since the last tick.
#[derive(Debug)]
pub struct FrameClock {
    frame_start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock {
            frame_start: Instant::now(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameClock {
    fn tick(&mut self, target_fps: u32) -> Duration {
        let frame_dur = Duration::from_secs(1) / target_fps.max(1);
        let elapsed = self.frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
        let total = self.frame_start.elapsed();
        self.frame_start = Instant::now();
        total
    }
}

/// Never sleeps; for driving the game as fast as possible.
#[derive(Debug, Default)]
pub struct Unpaced;

impl Clock for Unpaced {
    fn tick(&mut self, _target_fps: u32) -> Duration {
        Duration::ZERO
    }
}
