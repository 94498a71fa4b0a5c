pub mod reporting;
pub mod simulation;
