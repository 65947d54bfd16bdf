use crate::core::report::SetReport;
use crate::domain::sample::SampleData;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// The knobs a challenge set may need at run time, regardless of whether
/// they came from the CLI or a TOML file.
pub trait RunConfig: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn concurrent_requests(&self) -> usize;
    fn offline(&self) -> bool;
}

/// One self-contained group of exercises. `run` calls a handful of the
/// set's functions against the shared sample data and reports what they
/// returned; the functions themselves stay free and unit-testable.
#[async_trait]
pub trait ChallengeSet: Send + Sync {
    fn name(&self) -> &'static str;
    fn summary(&self) -> &'static str;
    async fn run(&self, data: &SampleData) -> Result<SetReport>;
}
