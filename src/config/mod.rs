pub mod cli;
pub mod toml_config;

use crate::challenges::SET_NAMES;
use crate::domain::ports::RunConfig;
use crate::utils::error::{CampError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_range, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "rustcamp"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Modern-Rust practice katas over a sample learning platform")
)]
pub struct CliConfig {
    /// Which challenge sets to run, comma separated.
    #[cfg_attr(
        feature = "cli",
        arg(
            long,
            value_delimiter = ',',
            default_value = "dates,text,rules,patterns,streams,http,concurrency,files"
        )
    )]
    pub sets: Vec<String>,

    #[cfg_attr(
        feature = "cli",
        arg(long, default_value = "https://jsonplaceholder.typicode.com")
    )]
    pub api_endpoint: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    /// Seed for the sample-data generator; omit for a fresh dataset.
    #[cfg_attr(feature = "cli", arg(long))]
    pub seed: Option<u64>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "40"))]
    pub students: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value = "12"))]
    pub courses: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value = "5"))]
    pub concurrent_requests: usize,

    #[cfg_attr(feature = "cli", arg(long, help = "Skip outbound HTTP calls"))]
    pub offline: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(
        feature = "cli",
        arg(long, help = "Log process stats between challenge sets")
    )]
    pub monitor: bool,
}

impl RunConfig for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn offline(&self) -> bool {
        self.offline
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        validate_range("students", self.students, 1, 10_000)?;
        validate_range("courses", self.courses, 1, 1_000)?;

        for set in &self.sets {
            if !SET_NAMES.contains(&set.as_str()) {
                return Err(CampError::UnknownSetError { name: set.clone() });
            }
        }

        Ok(())
    }
}
