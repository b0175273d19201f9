mod feed;
mod labels;
mod tracker;


pub use feed::CooldownFeed;
pub use labels::LabelTable;
pub use tracker::{CastState, CooldownCastStateTracker, CooldownSample, CooldownView, OverrideKind};
