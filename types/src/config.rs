//! Estimator configuration records.
//!
//! These are the fixed values each estimator is constructed with. They are
//! plain serde structs so the same record can come from a builtin TOML
//! preset, a user config file, or be built in code.

use serde::{Deserialize, Serialize};

/// Server regeneration tick period in the observed domain.
pub const DEFAULT_TICK_PERIOD_SECS: f64 = 3.0;

/// Poll cap for the tick estimator (30 samples per second).
pub const DEFAULT_MIN_POLL_INTERVAL_SECS: f64 = 1.0 / 30.0;

/// Charge count some clients report while a charge is being drawn down.
pub const DEFAULT_MID_CONSUMPTION_CHARGES: i32 = -2;

// ═══════════════════════════════════════════════════════════════════════════
// Top-level record
// ═══════════════════════════════════════════════════════════════════════════

/// Complete configuration for one tracked subject.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub tick: TickConfig,

    /// One entry per tracked ability
    #[serde(rename = "cooldown")]
    pub cooldowns: Vec<CooldownConfig>,
}

impl EstimatorConfig {
    /// Find a cooldown config by its ID
    pub fn cooldown(&self, id: &str) -> Option<&CooldownConfig> {
        self.cooldowns.iter().find(|c| c.id == id)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Definition files
// ═══════════════════════════════════════════════════════════════════════════

/// One definition file as written on disk.
///
/// Unlike [`EstimatorConfig`], absent sections and fields stay `None` so a
/// file only changes what it actually sets when merged onto a base.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorOverlay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick: Option<TickOverlay>,

    #[serde(rename = "cooldown", skip_serializing_if = "Vec::is_empty")]
    pub cooldowns: Vec<CooldownConfig>,
}

/// Field-by-field patch for a [`TickConfig`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickOverlay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_period_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_poll_interval_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confound_status_ids: Option<Vec<u32>>,
}

impl TickOverlay {
    /// Overwrite the fields of `base` that this overlay sets
    pub fn apply_to(self, base: &mut TickConfig) {
        if let Some(period) = self.tick_period_secs {
            base.tick_period_secs = period;
        }
        if let Some(interval) = self.min_poll_interval_secs {
            base.min_poll_interval_secs = interval;
        }
        if let Some(resource) = self.resource {
            base.resource = resource;
        }
        if let Some(ids) = self.confound_status_ids {
            base.confound_status_ids = ids;
        }
    }
}

impl From<TickConfig> for TickOverlay {
    fn from(config: TickConfig) -> Self {
        Self {
            tick_period_secs: Some(config.tick_period_secs),
            min_poll_interval_secs: Some(config.min_poll_interval_secs),
            resource: Some(config.resource),
            confound_status_ids: Some(config.confound_status_ids),
        }
    }
}

impl From<EstimatorConfig> for EstimatorOverlay {
    fn from(config: EstimatorConfig) -> Self {
        Self {
            tick: Some(config.tick.into()),
            cooldowns: config.cooldowns,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tick phase
// ═══════════════════════════════════════════════════════════════════════════

/// Which polled quantity the tick estimator watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Mana
    #[default]
    Mp,
    /// Crafting points
    Cp,
    /// Gathering points
    Gp,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mp => "MP",
            Self::Cp => "CP",
            Self::Gp => "GP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Period of the hidden server tick
    pub tick_period_secs: f64,

    /// Samples closer together than this are ignored
    pub min_poll_interval_secs: f64,

    pub resource: ResourceKind,

    /// Status effects that change the resource outside of ticks.
    /// While any is active, increases are not treated as tick evidence.
    pub confound_status_ids: Vec<u32>,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_period_secs: DEFAULT_TICK_PERIOD_SECS,
            min_poll_interval_secs: DEFAULT_MIN_POLL_INTERVAL_SECS,
            resource: ResourceKind::default(),
            confound_status_ids: Vec::new(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Cooldown cast state
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownConfig {
    /// Stable identifier (used by tools and logs)
    pub id: String,

    /// Ability whose cooldown and charges are polled
    pub ability_id: u32,

    pub max_charges: u32,

    /// Recharge time of a single charge
    pub recharge_secs: f32,

    /// Charge count that means "a charge is being consumed right now"
    pub mid_consumption_charges: i32,

    /// Status present while the multi-stage action is executing
    pub in_flight_status_id: Option<u32>,

    /// Override statuses of normal priority (signal A)
    pub standard_override_status_ids: Vec<u32>,

    /// Override statuses that win over everything else (signal B)
    pub dominant_override_status_ids: Vec<u32>,

    pub labels: LabelTableConfig,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            ability_id: 0,
            max_charges: 1,
            recharge_secs: 0.0,
            mid_consumption_charges: DEFAULT_MID_CONSUMPTION_CHARGES,
            in_flight_status_id: None,
            standard_override_status_ids: Vec::new(),
            dominant_override_status_ids: Vec::new(),
            labels: LabelTableConfig::default(),
        }
    }
}

impl CooldownConfig {
    /// Full recharge time across every charge
    pub fn total_recharge_secs(&self) -> f32 {
        self.max_charges as f32 * self.recharge_secs
    }
}

/// Discriminant → label mapping for the in-flight action
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelTableConfig {
    pub entries: Vec<LabelEntry>,
    pub fallback: FallbackLabels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    /// Discriminant values that select this entry
    pub codes: Vec<u32>,
    pub label: String,
    /// Used instead of `label` while a standard override is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empowered_label: Option<String>,
}

/// Labels used when the discriminant is absent or not in the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackLabels {
    /// Unrecognized discriminant, no dominant override
    pub in_flight: String,
    /// No discriminant, standard override active
    pub standard: String,
    /// Dominant override active
    pub dominant: String,
}

impl Default for FallbackLabels {
    fn default() -> Self {
        Self {
            in_flight: "IN PROGRESS".to_string(),
            standard: "OVERRIDE".to_string(),
            dominant: "OVERRIDE".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[tick]
tick_period_secs = 3.0
resource = "mp"
confound_status_ids = [1204]

[[cooldown]]
id = "mudra"
ability_id = 2259
max_charges = 2
recharge_secs = 20.0
in_flight_status_id = 496
standard_override_status_ids = [497]
dominant_override_status_ids = [1186]

[[cooldown.labels.entries]]
codes = [1, 2, 3]
label = "FUMA SHURIKEN"

[[cooldown.labels.entries]]
codes = [6, 7]
label = "KATON"
empowered_label = "GOKA MEKKYAKU"

[cooldown.labels.fallback]
in_flight = "NINJUTSU"
standard = "KASSATSU"
dominant = "TEN CHI JIN"
"#;

        let config: EstimatorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.tick.confound_status_ids, vec![1204]);
        // Unspecified fields keep their defaults
        assert_eq!(config.tick.min_poll_interval_secs, DEFAULT_MIN_POLL_INTERVAL_SECS);

        let mudra = config.cooldown("mudra").unwrap();
        assert_eq!(mudra.ability_id, 2259);
        assert_eq!(mudra.mid_consumption_charges, -2);
        assert_eq!(mudra.total_recharge_secs(), 40.0);
        assert_eq!(mudra.labels.entries.len(), 2);
        assert_eq!(
            mudra.labels.entries[1].empowered_label.as_deref(),
            Some("GOKA MEKKYAKU")
        );
        assert_eq!(mudra.labels.fallback.dominant, "TEN CHI JIN");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: EstimatorConfig = toml::from_str("").unwrap();
        assert_eq!(config, EstimatorConfig::default());
        assert_eq!(config.tick.tick_period_secs, 3.0);
        assert!(config.cooldowns.is_empty());
    }

    #[test]
    fn test_overlay_tracks_which_fields_are_set() {
        let overlay: EstimatorOverlay = toml::from_str("").unwrap();
        assert_eq!(overlay.tick, None);

        let overlay: EstimatorOverlay = toml::from_str("[tick]\nconfound_status_ids = []").unwrap();
        let tick = overlay.tick.unwrap();
        assert_eq!(tick.confound_status_ids, Some(vec![]));
        assert_eq!(tick.tick_period_secs, None);
    }

    #[test]
    fn test_tick_overlay_applies_only_set_fields() {
        let mut base = TickConfig {
            resource: ResourceKind::Gp,
            confound_status_ids: vec![1204],
            ..TickConfig::default()
        };
        TickOverlay {
            tick_period_secs: Some(2.5),
            ..TickOverlay::default()
        }
        .apply_to(&mut base);

        assert_eq!(base.tick_period_secs, 2.5);
        assert_eq!(base.resource, ResourceKind::Gp);
        assert_eq!(base.confound_status_ids, vec![1204]);
    }

    #[test]
    fn test_full_config_converts_to_full_overlay() {
        let overlay = EstimatorOverlay::from(EstimatorConfig::default());
        let mut base = TickConfig {
            tick_period_secs: 9.0,
            confound_status_ids: vec![1],
            ..TickConfig::default()
        };
        overlay.tick.unwrap().apply_to(&mut base);
        assert_eq!(base, TickConfig::default());
    }

    #[test]
    fn test_resource_kind_snake_case() {
        let config: TickConfig = toml::from_str(r#"resource = "gp""#).unwrap();
        assert_eq!(config.resource, ResourceKind::Gp);
        assert_eq!(config.resource.label(), "GP");
    }
}
