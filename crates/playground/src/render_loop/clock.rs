//! Stands in for the display's refresh signal when running headlessly.

/// One second in microseconds.
const ONE_SECOND_IN_MICROSECONDS: u64 = 1_000_000;

/// Ticks at a fixed frame rate.
#[derive(Debug)]
pub struct FrameClock {
    /// Target frame rate
    frame_rate: u32,
    /// When the last tick happened
    last_frame_tick: tokio::time::Instant,
}

impl FrameClock {
    /// Instantiate
    #[must_use]
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_rate: frame_rate.max(1),
            last_frame_tick: tokio::time::Instant::now(),
        }
    }

    /// The time between ticks.
    #[must_use]
    pub fn period(&self) -> std::time::Duration {
        let target = ONE_SECOND_IN_MICROSECONDS.wrapping_div(self.frame_rate.into());
        std::time::Duration::from_micros(target)
    }

    /// Sleep until the next frame render is due.
    pub async fn sleep_until_next_frame_tick(&mut self) {
        if let Some(wait) = self.period().checked_sub(self.last_frame_tick.elapsed()) {
            tokio::time::sleep(wait).await;
        }
        self.last_frame_tick = tokio::time::Instant::now();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn period_follows_frame_rate() {
        assert_eq!(
            FrameClock::new(60).period(),
            std::time::Duration::from_micros(16_666)
        );
        assert_eq!(
            FrameClock::new(0).period(),
            std::time::Duration::from_secs(1)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_are_spaced_out() {
        let mut clock = FrameClock::new(10);
        let start = tokio::time::Instant::now();
        clock.sleep_until_next_frame_tick().await;
        clock.sleep_until_next_frame_tick().await;
        assert!(start.elapsed() >= std::time::Duration::from_millis(200));
    }
}
