use phasewatch_types::ResourceKind;

/// A status effect currently active on a subject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusEffect {
    pub status_id: u32,
    /// Stack count / parameter byte the client attaches to the status.
    /// For in-flight actions this encodes which variant is being executed.
    pub param: u32,
    pub remaining_secs: f32,
}

impl StatusEffect {
    pub fn new(status_id: u32, param: u32) -> Self {
        Self {
            status_id,
            param,
            remaining_secs: 0.0,
        }
    }
}

/// Read-only view of the tracked actor for the duration of one frame.
///
/// The host hands one of these to the estimators per sample; nothing keeps
/// a reference past the call.
pub trait Subject {
    /// Current value of a polled resource, `None` if the subject has no such pool
    fn resource(&self, kind: ResourceKind) -> Option<f64>;

    fn statuses(&self) -> &[StatusEffect];

    /// Remaining cooldown for an ability, as reported by the client
    fn cooldown_remaining(&self, ability_id: u32) -> f32;

    /// Available charges for an ability (clients may report sentinel values)
    fn charges(&self, ability_id: u32) -> i32;

    fn find_status(&self, status_id: u32) -> Option<&StatusEffect> {
        self.statuses().iter().find(|s| s.status_id == status_id)
    }

    fn find_any_status(&self, status_ids: &[u32]) -> Option<&StatusEffect> {
        self.statuses()
            .iter()
            .find(|s| status_ids.contains(&s.status_id))
    }

    fn has_any_status(&self, status_ids: &[u32]) -> bool {
        self.find_any_status(status_ids).is_some()
    }
}
