pub mod emissions;
pub mod factors;
pub mod insights;
pub mod stats;
pub mod streak;
