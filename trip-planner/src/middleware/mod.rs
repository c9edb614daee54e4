pub mod metrics;
pub mod planner;
