pub mod challenges;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::CampTomlConfig;
pub use config::CliConfig;
pub use crate::core::{CampRunner, CampSummary, SetReport};
pub use domain::ports::{ChallengeSet, RunConfig, Storage};
pub use domain::sample::{SampleData, SampleProfile};
pub use utils::error::{CampError, Result};
