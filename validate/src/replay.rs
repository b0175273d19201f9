//! Drive the estimators from a recorded trace, frame by frame.

use phasewatch_core::{
    CooldownFeed, CooldownView, FrameBus, ResourceTickFeed, Subject, TickReading, Tracked,
};
use phasewatch_types::EstimatorConfig;
use serde::Serialize;

use crate::trace::RecordedFrame;

#[derive(Debug, Clone, Serialize)]
pub struct CooldownReport {
    pub id: String,
    #[serde(flatten)]
    pub view: CooldownView,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub t: f64,
    /// Subject was absent; nothing was sampled
    pub skipped: bool,
    pub tick: TickReading,
    pub cooldowns: Vec<CooldownReport>,
}

pub struct Replay {
    bus: FrameBus,
    tick: Tracked<ResourceTickFeed>,
    cooldowns: Vec<Tracked<CooldownFeed>>,
}

impl Replay {
    pub fn new(config: &EstimatorConfig) -> Self {
        let bus = FrameBus::new();
        let tick = Tracked::attach(&bus, ResourceTickFeed::new(&config.tick));
        let cooldowns = config
            .cooldowns
            .iter()
            .map(|c| Tracked::attach(&bus, CooldownFeed::new(c)))
            .collect();

        Self {
            bus,
            tick,
            cooldowns,
        }
    }

    pub fn step(&mut self, frame: &RecordedFrame) -> FrameReport {
        let subject = frame.subject.as_ref().map(|s| s as &dyn Subject);
        let notified = self.bus.dispatch(frame.t, subject);

        FrameReport {
            t: frame.t,
            skipped: notified == 0,
            tick: self.tick.get().estimator().reading(frame.t),
            cooldowns: self
                .cooldowns
                .iter()
                .map(|c| {
                    let feed = c.get();
                    CooldownReport {
                        id: feed.id().to_string(),
                        view: feed.tracker().view(),
                    }
                })
                .collect(),
        }
    }

    /// Detach everything from the bus; later steps report frozen values
    pub fn dispose(&mut self) {
        self.tick.dispose();
        for cooldown in &mut self.cooldowns {
            cooldown.dispose();
        }
    }
}
