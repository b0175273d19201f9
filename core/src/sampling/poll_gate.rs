/// Sampling-rate cap and monotonic-clock guard shared by the estimators.
///
/// The first sample is always accepted. After that a sample is accepted only
/// if at least `min_interval` seconds passed since the last accepted one.
/// Samples stamped earlier than the last accepted sample are rejected: the
/// host promises a monotonic clock, and a backward step (clock adjustment,
/// replayed frame) must not move any estimate.
#[derive(Debug, Clone)]
pub struct PollGate {
    min_interval: f64,
    last_accepted: Option<f64>,
}

impl PollGate {
    pub fn new(min_interval: f64) -> Self {
        Self {
            min_interval: min_interval.max(0.0),
            last_accepted: None,
        }
    }

    /// Gate that only enforces monotonic timestamps
    pub fn unthrottled() -> Self {
        Self::new(0.0)
    }

    /// Returns true and records `now` if the sample should be processed.
    pub fn accept(&mut self, now: f64) -> bool {
        let Some(last) = self.last_accepted else {
            self.last_accepted = Some(now);
            return true;
        };

        if now < last {
            tracing::warn!(now, last, "Rejected sample with backward timestamp");
            return false;
        }
        if now - last < self.min_interval {
            return false;
        }

        self.last_accepted = Some(now);
        true
    }

    /// Timestamp of the last accepted sample
    pub fn last_accepted(&self) -> Option<f64> {
        self.last_accepted
    }

    pub fn min_interval(&self) -> f64 {
        self.min_interval
    }
}
