use crate::challenges::SET_NAMES;
use crate::domain::ports::RunConfig;
use crate::domain::sample::SampleProfile;
use crate::utils::error::{CampError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampTomlConfig {
    pub camp: CampSection,
    pub data: Option<DataSection>,
    pub source: SourceSection,
    pub run: Option<RunSection>,
    pub output: OutputSection,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampSection {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSection {
    pub students: Option<usize>,
    pub courses: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSection {
    pub sets: Option<Vec<String>>,
    pub concurrent_requests: Option<usize>,
    pub offline: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: bool,
}

impl CampTomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CampError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CampError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values; unset
    /// variables are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("source.endpoint", &self.source.endpoint)?;
        crate::utils::validation::validate_path("output.path", &self.output.path)?;

        if let Some(concurrent) = self.run.as_ref().and_then(|r| r.concurrent_requests) {
            crate::utils::validation::validate_positive_number(
                "run.concurrent_requests",
                concurrent,
                1,
            )?;
        }

        for set in self.sets() {
            if !SET_NAMES.contains(&set.as_str()) {
                return Err(CampError::UnknownSetError { name: set });
            }
        }

        Ok(())
    }

    /// The sets to run; defaults to the full catalog.
    pub fn sets(&self) -> Vec<String> {
        self.run
            .as_ref()
            .and_then(|r| r.sets.clone())
            .unwrap_or_else(|| SET_NAMES.iter().map(|s| s.to_string()).collect())
    }

    pub fn sample_profile(&self) -> SampleProfile {
        let defaults = SampleProfile::default();
        match &self.data {
            Some(data) => SampleProfile {
                students: data.students.unwrap_or(defaults.students),
                courses: data.courses.unwrap_or(defaults.courses),
                seed: data.seed,
            },
            None => defaults,
        }
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl RunConfig for CampTomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn concurrent_requests(&self) -> usize {
        self.run
            .as_ref()
            .and_then(|r| r.concurrent_requests)
            .unwrap_or(5)
    }

    fn offline(&self) -> bool {
        self.run.as_ref().and_then(|r| r.offline).unwrap_or(false)
    }
}

impl Validate for CampTomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
