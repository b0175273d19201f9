use phasewatch_types::{ResourceKind, TickConfig};

use crate::frame::FrameHandler;
use crate::sampling::Subject;

use super::TickPhaseEstimator;

/// Reads the configured resource off a subject each frame and feeds it to
/// a [`TickPhaseEstimator`].
#[derive(Debug, Clone)]
pub struct ResourceTickFeed {
    estimator: TickPhaseEstimator,
    resource: ResourceKind,
    confound_status_ids: Vec<u32>,
}

impl ResourceTickFeed {
    pub fn new(config: &TickConfig) -> Self {
        Self {
            estimator: TickPhaseEstimator::from_config(config),
            resource: config.resource,
            confound_status_ids: config.confound_status_ids.clone(),
        }
    }

    pub fn estimator(&self) -> &TickPhaseEstimator {
        &self.estimator
    }

    pub fn phase(&self) -> f64 {
        self.estimator.phase()
    }

    pub fn resource(&self) -> ResourceKind {
        self.resource
    }
}

impl FrameHandler for ResourceTickFeed {
    fn on_frame(&mut self, now: f64, subject: &dyn Subject) {
        let Some(value) = subject.resource(self.resource) else {
            return;
        };
        let confound_active = subject.has_any_status(&self.confound_status_ids);
        self.estimator.on_sample(now, value, confound_active);
    }
}
