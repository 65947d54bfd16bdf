use crate::core::report::CampSummary;
use crate::domain::ports::{ChallengeSet, Storage};
use crate::domain::sample::SampleData;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const BUNDLE_NAME: &str = "camp_report.zip";

/// Walks the selected challenge sets over the sample data, logs every
/// result line, and bundles the collected reports into a zip archive.
pub struct CampRunner<S: Storage> {
    sets: Vec<Box<dyn ChallengeSet>>,
    storage: S,
    monitor: SystemMonitor,
}

impl<S: Storage> CampRunner<S> {
    pub fn new(storage: S) -> Self {
        Self::new_with_monitoring(storage, false)
    }

    pub fn new_with_monitoring(storage: S, monitor_enabled: bool) -> Self {
        Self {
            sets: Vec::new(),
            storage,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn register(&mut self, set: Box<dyn ChallengeSet>) {
        self.sets.push(set);
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    pub async fn run(&self, data: &SampleData) -> Result<CampSummary> {
        let mut summary = CampSummary::default();

        tracing::info!(
            "🚀 Starting camp run: {} sets over {} students / {} courses",
            self.sets.len(),
            data.students.len(),
            data.courses.len()
        );

        for set in &self.sets {
            tracing::info!("🏁 {} — {}", set.name(), set.summary());
            let report = set.run(data).await?;
            for entry in &report.entries {
                tracing::info!("   {} = {}", entry.label, entry.value);
            }
            self.monitor.log_stats(set.name());
            summary.push(report);
        }

        self.export_bundle(&summary).await?;
        self.monitor.log_final_stats();

        tracing::info!(
            "✅ Camp run finished: {} result lines across {} sets",
            summary.total_entries(),
            summary.reports.len()
        );

        Ok(summary)
    }

    async fn export_bundle(&self, summary: &CampSummary) -> Result<()> {
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("report.csv", FileOptions::default())?;
            zip.write_all(summary.csv_output().as_bytes())?;

            zip.start_file::<_, ()>("report.json", FileOptions::default())?;
            let json_data = serde_json::to_string_pretty(summary)?;
            zip.write_all(json_data.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing report bundle ({} bytes)", zip_data.len());
        self.storage.write_file(BUNDLE_NAME, &zip_data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::SetReport;
    use crate::domain::sample::{SampleData, SampleProfile};
    use crate::utils::error::CampError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                CampError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct FixedSet {
        name: &'static str,
        lines: usize,
    }

    #[async_trait]
    impl ChallengeSet for FixedSet {
        fn name(&self) -> &'static str {
            self.name
        }

        fn summary(&self) -> &'static str {
            "fixed output for runner tests"
        }

        async fn run(&self, _data: &SampleData) -> Result<SetReport> {
            let mut report = SetReport::new(self.name);
            for i in 0..self.lines {
                report.push(format!("line {}", i), i);
            }
            Ok(report)
        }
    }

    fn tiny_data() -> SampleData {
        SampleData::generate(&SampleProfile {
            students: 3,
            courses: 2,
            seed: Some(7),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_runner_collects_all_reports() {
        let storage = MockStorage::new();
        let mut runner = CampRunner::new(storage.clone());
        runner.register(Box::new(FixedSet {
            name: "alpha",
            lines: 2,
        }));
        runner.register(Box::new(FixedSet {
            name: "beta",
            lines: 3,
        }));

        let summary = runner.run(&tiny_data()).await.unwrap();

        assert_eq!(summary.reports.len(), 2);
        assert_eq!(summary.total_entries(), 5);
    }

    #[tokio::test]
    async fn test_runner_writes_bundle_with_csv_and_json() {
        let storage = MockStorage::new();
        let mut runner = CampRunner::new(storage.clone());
        runner.register(Box::new(FixedSet {
            name: "alpha",
            lines: 1,
        }));

        runner.run(&tiny_data()).await.unwrap();

        let zip_data = storage.get_file(BUNDLE_NAME).await.unwrap();
        let cursor = std::io::Cursor::new(zip_data);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();

        let mut file_names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        file_names.sort();

        assert_eq!(file_names, vec!["report.csv", "report.json"]);
    }

    #[tokio::test]
    async fn test_runner_with_no_sets_still_bundles() {
        let storage = MockStorage::new();
        let runner = CampRunner::new(storage.clone());

        let summary = runner.run(&tiny_data()).await.unwrap();

        assert_eq!(summary.total_entries(), 0);
        assert!(storage.get_file(BUNDLE_NAME).await.is_some());
    }
}
