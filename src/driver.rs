//! Fixed-period tick schedule.
//!
//! The engine has no clock of its own. [`TickDriver`] turns a speed in ticks
//! per second into a tokio interval that a mode awaits alongside input events.

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use crate::game::config;

pub struct TickDriver {
    speed: u32,
    interval: Interval,
}

impl TickDriver {
    /// Schedule ticks at `speed` per second, starting one period from now
    pub fn new(speed: u32) -> Self {
        let speed = config::clamp_speed(speed);
        Self {
            speed,
            interval: schedule(config::tick_interval(speed)),
        }
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    /// Wait for the next tick
    pub async fn next_tick(&mut self) {
        self.interval.tick().await;
    }

    /// Switch to a new speed; the next tick is one new period away
    pub fn set_speed(&mut self, speed: u32) {
        let speed = config::clamp_speed(speed);
        if speed == self.speed {
            return;
        }
        self.speed = speed;
        self.interval = schedule(config::tick_interval(speed));
        debug!(speed, period_ms = self.period().as_millis() as u64, "tick rate changed");
    }
}

fn schedule(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    // A stalled frame should not be followed by a burst of catch-up ticks.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
