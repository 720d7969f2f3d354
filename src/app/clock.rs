use std::time::{Duration, Instant};

/// Paces the frame loop.
pub trait FrameClock {
    /// Blocks until the next frame tick.
    fn wait_for_tick(&mut self);
    /// Whether a wall-clock second has passed since it last returned true. Never blocks.
    fn second_elapsed(&mut self) -> bool;
}

/// Real-time clock ticking at a fixed rate. Ticks missed while a frame ran long are dropped
/// rather than replayed.
#[derive(Debug, Clone)]
pub struct TickClock {
    frame_interval: Duration,
    next_frame: Instant,
    next_second: Instant,
}

impl TickClock {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        let frame_interval = Duration::from_secs(1) / fps.max(1);
        TickClock {
            frame_interval,
            next_frame: now + frame_interval,
            next_second: now + Duration::from_secs(1),
        }
    }
}

impl FrameClock for TickClock {
    fn wait_for_tick(&mut self) {
        let now = Instant::now();
        if now < self.next_frame {
            std::thread::sleep(self.next_frame - now);
            self.next_frame += self.frame_interval;
        } else {
            // Running behind: this tick already fired
            self.next_frame = now + self.frame_interval;
        }
    }

    fn second_elapsed(&mut self) -> bool {
        let now = Instant::now();
        if now < self.next_second {
            return false;
        }
        self.next_second += Duration::from_secs(1);
        if self.next_second <= now {
            self.next_second = now + Duration::from_secs(1);
        }
        true
    }
}

/// A clock that never sleeps and reports a second every `frames_per_second` ticks.
#[derive(Debug, Clone)]
pub struct ImmediateClock {
    frames_per_second: usize,
    ticks: usize,
}

impl ImmediateClock {
    pub fn new(frames_per_second: usize) -> Self {
        ImmediateClock {
            frames_per_second: frames_per_second.max(1),
            ticks: 0,
        }
    }
}

impl FrameClock for ImmediateClock {
    fn wait_for_tick(&mut self) {
        self.ticks += 1;
    }

    fn second_elapsed(&mut self) -> bool {
        self.ticks > 0 && self.ticks % self.frames_per_second == 0
    }
}

/// Counts frames between one-second ticks.
#[derive(Debug, Default, Clone)]
pub struct FpsCounter {
    frames: u32,
}

impl FpsCounter {
    /// Records a frame. When a second has elapsed returns the frames counted in it and starts over.
    pub fn tick(&mut self, second_elapsed: bool) -> Option<u32> {
        self.frames += 1;
        if !second_elapsed {
            return None;
        }
        let rate = self.frames;
        self.frames = 0;
        Some(rate)
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_reported_after_second() {
        let mut clock = ImmediateClock::new(12);
        let mut fps = FpsCounter::default();
        let mut reports = Vec::new();
        for _ in 0..30 {
            clock.wait_for_tick();
            if let Some(rate) = fps.tick(clock.second_elapsed()) {
                reports.push(rate);
            }
        }
        assert_eq!(reports, vec![12, 12]);
        assert_eq!(fps.frames(), 6);
    }

    #[test]
    fn test_fps_counter_resets() {
        let mut fps = FpsCounter::default();
        assert_eq!(fps.tick(false), None);
        assert_eq!(fps.tick(false), None);
        assert_eq!(fps.tick(true), Some(3));
        assert_eq!(fps.frames(), 0);
        assert_eq!(fps.tick(true), Some(1));
    }

    #[test]
    fn test_tick_clock_paces_frames() {
        let mut clock = TickClock::new(200);
        let start = Instant::now();
        for _ in 0..4 {
            clock.wait_for_tick();
        }
        // Four ticks at 5ms each
        assert!(start.elapsed() >= Duration::from_millis(15));
        assert!(!clock.second_elapsed());
    }
}
