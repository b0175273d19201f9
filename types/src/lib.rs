pub mod config;
pub mod formatting;

pub use config::{
    CooldownConfig, EstimatorConfig, EstimatorOverlay, FallbackLabels, LabelEntry,
    LabelTableConfig, ResourceKind, TickConfig, TickOverlay,
};
