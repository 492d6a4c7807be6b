use std::time::Duration;

use pomotick_core::TickSource;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Tick source backed by a tokio interval.
///
/// Must be armed from inside a tokio runtime. The first tick arrives one
/// period after arming.
#[derive(Debug, Default)]
pub struct IntervalTicks {
    interval: Option<Interval>,
}

impl IntervalTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the next tick. Pends forever while disarmed.
    pub async fn next(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl TickSource for IntervalTicks {
    fn arm(&mut self) {
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn cancel(&mut self) {
        self.interval = None;
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}
