pub mod config;
pub mod cooldown;
pub mod frame;
pub mod sampling;
pub mod tick;

// Re-exports for convenience
pub use config::ConfigError;
pub use cooldown::{
    CastState, CooldownCastStateTracker, CooldownFeed, CooldownSample, CooldownView, OverrideKind,
};
pub use frame::{FrameBus, FrameHandler, Registration, Tracked};
pub use sampling::{PollGate, StatusEffect, Subject};
pub use tick::{ResourceTickFeed, TickPhaseEstimator, TickReading};
