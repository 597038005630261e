#![forbid(unsafe_code)]

/// Frames-per-second counter, published once per accumulated second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f64,
    fps: u32,
}

impl FpsCounter {
    pub const fn new() -> Self {
        Self {
            frames: 0,
            elapsed: 0.0,
            fps: 0,
        }
    }

    /// Count one frame that took `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.frames += 1;
        self.elapsed += dt.max(0.0);
        if self.elapsed >= 1.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }

    /// Last published value.
    pub const fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_after_one_second() {
        let mut fps = FpsCounter::new();
        for _ in 0..29 {
            fps.tick(1.0 / 30.0);
        }
        assert_eq!(fps.fps(), 0);
        fps.tick(1.0 / 30.0 + 0.001);
        assert_eq!(fps.fps(), 30);
    }

    #[test]
    fn value_holds_until_next_second() {
        let mut fps = FpsCounter::new();
        fps.tick(1.0);
        assert_eq!(fps.fps(), 1);
        fps.tick(0.25);
        fps.tick(0.25);
        assert_eq!(fps.fps(), 1);
        fps.tick(0.5);
        assert_eq!(fps.fps(), 3);
    }
}
