mod estimator;
mod feed;


pub use estimator::{TickPhaseEstimator, TickReading};
pub use feed::ResourceTickFeed;
