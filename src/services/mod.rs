pub mod aggregator;
pub mod stats;
