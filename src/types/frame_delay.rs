use std::time::Duration;

pub const NANOS_PER_SECOND: u64 = 1_000_000_000;
pub const MAX_SECONDS: i64 = 2_147_483_647;
pub const MAX_NANOSECONDS: i64 = 999_999_999;
pub const MAX_FPS: i64 = 1_000_000_000;
pub const DEFAULT_FPS: u32 = 10;

/// Delay between two frames of the generated player, as a `struct timespec`
/// would hold it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDelay {
    pub seconds: u32,
    pub nanoseconds: u32,
}

impl FrameDelay {
    /// Caller guarantees `seconds <= MAX_SECONDS` and `nanoseconds <= MAX_NANOSECONDS`.
    pub fn new(seconds: u32, nanoseconds: u32) -> Self {
        Self {
            seconds,
            nanoseconds,
        }
    }

    /// Delay that plays `fps` frames per second, truncated to whole nanoseconds.
    pub fn from_fps(fps: u32) -> Self {
        let total = NANOS_PER_SECOND / u64::from(fps.max(1));
        Self {
            seconds: (total / NANOS_PER_SECOND) as u32,
            nanoseconds: (total % NANOS_PER_SECOND) as u32,
        }
    }

    pub fn as_duration(&self) -> Duration {
        Duration::new(u64::from(self.seconds), self.nanoseconds)
    }
}

impl Default for FrameDelay {
    fn default() -> Self {
        Self::from_fps(DEFAULT_FPS)
    }
}
