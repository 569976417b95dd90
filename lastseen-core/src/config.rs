/// Flush cadence for the presence tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Flush the buffer on heartbeats whose tick count is a multiple of
    /// this. Zero is treated as one.
    pub flush_interval_ticks: u64,
}

impl TrackerConfig {
    /// One game tick is 600ms, so 100 ticks is a minute of play.
    pub const DEFAULT_FLUSH_INTERVAL_TICKS: u64 = 100;

    pub fn with_flush_interval(flush_interval_ticks: u64) -> Self {
        Self { flush_interval_ticks }
    }

    pub(crate) fn is_flush_tick(&self, tick: u64) -> bool {
        tick % self.flush_interval_ticks.max(1) == 0
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::with_flush_interval(Self::DEFAULT_FLUSH_INTERVAL_TICKS)
    }
}
