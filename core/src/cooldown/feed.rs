use phasewatch_types::CooldownConfig;

use crate::frame::FrameHandler;
use crate::sampling::Subject;

use super::{CooldownCastStateTracker, CooldownSample};

/// Builds [`CooldownSample`]s from a subject's cooldowns and statuses.
#[derive(Debug, Clone)]
pub struct CooldownFeed {
    id: String,
    ability_id: u32,
    in_flight_status_id: Option<u32>,
    standard_override_status_ids: Vec<u32>,
    dominant_override_status_ids: Vec<u32>,
    tracker: CooldownCastStateTracker,
}

impl CooldownFeed {
    pub fn new(config: &CooldownConfig) -> Self {
        Self {
            id: config.id.clone(),
            ability_id: config.ability_id,
            in_flight_status_id: config.in_flight_status_id,
            standard_override_status_ids: config.standard_override_status_ids.clone(),
            dominant_override_status_ids: config.dominant_override_status_ids.clone(),
            tracker: CooldownCastStateTracker::new(config),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tracker(&self) -> &CooldownCastStateTracker {
        &self.tracker
    }

    /// Read one sample off the subject.
    ///
    /// The discriminant comes from the in-flight status when present, since
    /// it names the exact action; otherwise from the dominant override.
    pub fn sample(&self, subject: &dyn Subject) -> CooldownSample {
        let in_flight = self
            .in_flight_status_id
            .and_then(|id| subject.find_status(id));
        let dominant = subject.find_any_status(&self.dominant_override_status_ids);

        CooldownSample {
            raw_remaining: subject.cooldown_remaining(self.ability_id),
            charges: subject.charges(self.ability_id),
            in_flight: in_flight.is_some(),
            standard_override: subject.has_any_status(&self.standard_override_status_ids),
            dominant_override: dominant.is_some(),
            discriminant: in_flight.or(dominant).map(|s| s.param),
        }
    }
}

impl FrameHandler for CooldownFeed {
    fn on_frame(&mut self, now: f64, subject: &dyn Subject) {
        let sample = self.sample(subject);
        self.tracker.on_sample(now, sample);
    }
}
