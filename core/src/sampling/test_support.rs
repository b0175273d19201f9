//! In-memory subject for tests.

use std::collections::HashMap;

use phasewatch_types::ResourceKind;

use super::{StatusEffect, Subject};

#[derive(Debug, Clone, Default)]
pub struct FakeSubject {
    pub resources: HashMap<ResourceKind, f64>,
    pub statuses: Vec<StatusEffect>,
    /// ability_id -> (remaining, charges)
    pub cooldowns: HashMap<u32, (f32, i32)>,
}

impl FakeSubject {
    pub fn with_mp(mp: f64) -> Self {
        let mut subject = Self::default();
        subject.resources.insert(ResourceKind::Mp, mp);
        subject
    }

    pub fn status(mut self, status_id: u32, param: u32) -> Self {
        self.statuses.push(StatusEffect::new(status_id, param));
        self
    }

    pub fn cooldown(mut self, ability_id: u32, remaining: f32, charges: i32) -> Self {
        self.cooldowns.insert(ability_id, (remaining, charges));
        self
    }
}

impl Subject for FakeSubject {
    fn resource(&self, kind: ResourceKind) -> Option<f64> {
        self.resources.get(&kind).copied()
    }

    fn statuses(&self) -> &[StatusEffect] {
        &self.statuses
    }

    fn cooldown_remaining(&self, ability_id: u32) -> f32 {
        self.cooldowns.get(&ability_id).map_or(0.0, |c| c.0)
    }

    fn charges(&self, ability_id: u32) -> i32 {
        self.cooldowns.get(&ability_id).map_or(0, |c| c.1)
    }
}
