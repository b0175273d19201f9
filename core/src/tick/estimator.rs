//! Regeneration tick phase estimation.
//!
//! The server regenerates the resource on a fixed period but never reports
//! when. The only evidence is the polled value stepping up, so the first
//! sample that shows a higher value pins the boundary to within one poll
//! interval. Between observed increases the estimate is carried forward by
//! whole periods.

use phasewatch_types::TickConfig;
use serde::Serialize;

use crate::sampling::PollGate;

#[derive(Debug, Clone)]
pub struct TickPhaseEstimator {
    period: f64,
    gate: PollGate,
    /// Integer-truncated value from the last accepted sample
    last_observed: Option<i64>,
    /// Best estimate of the most recent tick boundary
    last_tick: f64,
}

/// Read-only snapshot for renderers and tools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReading {
    pub last_tick: f64,
    pub next_tick: f64,
    pub progress: f64,
}

impl TickPhaseEstimator {
    pub fn new(period: f64, min_poll_interval: f64) -> Self {
        Self {
            period,
            gate: PollGate::new(min_poll_interval),
            last_observed: None,
            last_tick: 0.0,
        }
    }

    pub fn from_config(config: &TickConfig) -> Self {
        Self::new(config.tick_period_secs, config.min_poll_interval_secs)
    }

    /// Feed one polled value.
    ///
    /// `confound_active` marks samples where something other than the tick
    /// may have raised the value; those increases are not trusted.
    pub fn on_sample(&mut self, now: f64, raw_value: f64, confound_active: bool) {
        if !self.gate.accept(now) {
            return;
        }

        let value = raw_value.floor() as i64;

        let Some(previous) = self.last_observed else {
            // Nothing to compare against yet: anchor the phase here
            self.last_observed = Some(value);
            self.last_tick = now;
            tracing::debug!(now, value, "Tick estimator anchored");
            return;
        };

        if !confound_active && value > previous {
            tracing::debug!(now, previous, value, "Tick observed");
            self.last_tick = now;
        } else if self.last_tick + self.period <= now {
            self.last_tick += self.period;
            tracing::trace!(now, last_tick = self.last_tick, "Tick extrapolated");
        }

        self.last_observed = Some(value);
    }

    /// Estimated timestamp of the last hidden tick
    pub fn phase(&self) -> f64 {
        self.last_tick
    }

    pub fn next_tick_at(&self) -> f64 {
        self.last_tick + self.period
    }

    /// Fraction of the current period that has elapsed at `now`, in `[0, 1]`
    pub fn progress(&self, now: f64) -> f64 {
        if self.period <= 0.0 {
            return 0.0;
        }
        ((now - self.last_tick) / self.period).clamp(0.0, 1.0)
    }

    pub fn reading(&self, now: f64) -> TickReading {
        TickReading {
            last_tick: self.phase(),
            next_tick: self.next_tick_at(),
            progress: self.progress(now),
        }
    }

    pub fn last_observed(&self) -> Option<i64> {
        self.last_observed
    }

    pub fn period(&self) -> f64 {
        self.period
    }
}
