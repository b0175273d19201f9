//! Cooldown and cast-state tracking for charge-based abilities.
//!
//! While a multi-stage action is executing, the client's cooldown readout is
//! unreliable: it can dip to near zero as the action draws a charge before
//! the in-progress status shows up. The tracker categorizes each sample and
//! holds the last trustworthy (idle) reading until the action settles.
//!
//! ```text
//!            in-flight / sentinel charges
//!   Idle ─────────────────────────────────► Charging
//!    ▲  ◄─────────────────────────────────     │
//!    │          signals cleared                │ override
//!    │                                         ▼
//!    └──────────── signals cleared ───── Overridden(kind)
//! ```

use phasewatch_types::CooldownConfig;
use serde::Serialize;

use crate::sampling::PollGate;

use super::LabelTable;

/// Which override status is in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideKind {
    Standard,
    /// Wins over every other signal
    Dominant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CastState {
    #[default]
    Idle,
    Charging,
    Overridden(OverrideKind),
}

impl CastState {
    /// Non-idle states expose the frozen value instead of the raw one
    pub fn is_frozen(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// One poll's worth of raw inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CooldownSample {
    pub raw_remaining: f32,
    pub charges: i32,
    pub in_flight: bool,
    pub standard_override: bool,
    pub dominant_override: bool,
    /// Parameter of the in-flight action (selects the label)
    pub discriminant: Option<u32>,
}

/// Stable snapshot for renderers and tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CooldownView {
    pub remaining: f32,
    pub state: CastState,
    pub label: Option<String>,
    pub charges: i32,
    pub fill: f32,
}

#[derive(Debug, Clone)]
pub struct CooldownCastStateTracker {
    gate: PollGate,
    labels: LabelTable,
    mid_consumption_charges: i32,
    total_recharge_secs: f32,

    raw_remaining: f32,
    frozen_remaining: f32,
    charges: i32,
    state: CastState,
    /// (discriminant, standard, dominant) from the last non-idle sample
    label_signals: Option<(Option<u32>, bool, bool)>,
}

impl CooldownCastStateTracker {
    pub fn new(config: &CooldownConfig) -> Self {
        Self {
            gate: PollGate::unthrottled(),
            labels: LabelTable::new(&config.labels),
            mid_consumption_charges: config.mid_consumption_charges,
            total_recharge_secs: config.total_recharge_secs(),
            raw_remaining: 0.0,
            frozen_remaining: 0.0,
            charges: 0,
            state: CastState::Idle,
            label_signals: None,
        }
    }

    /// Map raw signals to a state. Dominant override beats standard override
    /// beats in-flight.
    pub fn categorize(&self, sample: &CooldownSample) -> CastState {
        if sample.dominant_override {
            CastState::Overridden(OverrideKind::Dominant)
        } else if sample.standard_override {
            CastState::Overridden(OverrideKind::Standard)
        } else if sample.in_flight || sample.charges == self.mid_consumption_charges {
            CastState::Charging
        } else {
            CastState::Idle
        }
    }

    pub fn on_sample(&mut self, now: f64, sample: CooldownSample) {
        if !self.gate.accept(now) {
            return;
        }

        let state = self.categorize(&sample);
        if state != self.state {
            tracing::debug!(
                now,
                from = ?self.state,
                to = ?state,
                raw = sample.raw_remaining,
                frozen = self.frozen_remaining,
                "Cast state changed"
            );
        }

        self.raw_remaining = sample.raw_remaining;
        self.charges = sample.charges;
        self.state = state;

        if state.is_frozen() {
            self.label_signals = Some((
                sample.discriminant,
                sample.standard_override,
                sample.dominant_override,
            ));
        } else {
            self.frozen_remaining = sample.raw_remaining;
            self.label_signals = None;
        }
    }

    /// Remaining cooldown to display and the current state.
    ///
    /// While non-idle this is the last value captured in `Idle`.
    pub fn remaining_and_state(&self) -> (f32, CastState) {
        (self.frozen_remaining, self.state)
    }

    pub fn state(&self) -> CastState {
        self.state
    }

    /// Label for the in-flight action, `None` while idle
    pub fn label(&self) -> Option<&str> {
        let (discriminant, standard, dominant) = self.label_signals?;
        self.labels.resolve(discriminant, standard, dominant)
    }

    pub fn charges(&self) -> i32 {
        self.charges
    }

    /// Latest reading from the client, reliable or not
    pub fn raw_remaining(&self) -> f32 {
        self.raw_remaining
    }

    /// Recharge progress across all charges in `[0, 1]`. Full while frozen.
    pub fn recharge_fill(&self) -> f32 {
        if self.state.is_frozen() || self.total_recharge_secs <= 0.0 {
            return 1.0;
        }
        ((self.total_recharge_secs - self.frozen_remaining) / self.total_recharge_secs)
            .clamp(0.0, 1.0)
    }

    pub fn view(&self) -> CooldownView {
        CooldownView {
            remaining: self.frozen_remaining,
            state: self.state,
            label: self.label().map(str::to_string),
            charges: self.charges,
            fill: self.recharge_fill(),
        }
    }
}
