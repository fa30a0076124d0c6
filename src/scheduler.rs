//! Repeating tick scheduler
//!
//! Each game owns exactly one repeating task. Sessions talk to it through
//! [`TickScheduler`] so the same game logic runs against a browser interval
//! timer or against [`ManualScheduler`] in tests and headless runs.

/// A single repeating task that can be started, cancelled and rescheduled
pub trait TickScheduler {
    /// Start firing every `interval_ms`. Replaces any running schedule.
    fn schedule(&mut self, interval_ms: u32);

    /// Stop firing. No-op when idle.
    fn cancel(&mut self);

    /// Current interval, `None` while idle
    fn interval(&self) -> Option<u32>;

    fn is_active(&self) -> bool {
        self.interval().is_some()
    }

    /// Cancel and start again at a new interval
    fn reschedule(&mut self, interval_ms: u32) {
        self.cancel();
        self.schedule(interval_ms);
    }
}

/// Deterministic scheduler driven by explicit time advances
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    interval_ms: Option<u32>,
    /// Time accumulated since the last firing
    elapsed_ms: u32,
    /// Number of schedule calls (including reschedules)
    pub starts: u32,
    /// Number of cancels of an active schedule
    pub cancels: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock; returns how many ticks are due
    pub fn advance(&mut self, ms: u32) -> u32 {
        let Some(interval) = self.interval_ms else {
            return 0;
        };
        self.elapsed_ms += ms;
        let due = self.elapsed_ms / interval;
        self.elapsed_ms %= interval;
        due
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, interval_ms: u32) {
        self.interval_ms = Some(interval_ms.max(1));
        self.elapsed_ms = 0;
        self.starts += 1;
    }

    fn cancel(&mut self) {
        if self.interval_ms.take().is_some() {
            self.cancels += 1;
        }
        self.elapsed_ms = 0;
    }

    fn interval(&self) -> Option<u32> {
        self.interval_ms
    }
}
