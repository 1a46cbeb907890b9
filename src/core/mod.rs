pub mod aggregator;
pub mod exclusion;
pub mod specifier;
pub mod types;
