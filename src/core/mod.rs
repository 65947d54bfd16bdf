pub mod report;
pub mod runner;

pub use crate::domain::ports::{ChallengeSet, RunConfig, Storage};
pub use crate::utils::error::Result;
pub use report::{CampSummary, ReportEntry, SetReport};
pub use runner::CampRunner;
