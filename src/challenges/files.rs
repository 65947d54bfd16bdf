use crate::core::report::SetReport;
use crate::domain::ports::{ChallengeSet, Storage};
use crate::domain::sample::SampleData;
use crate::utils::error::{CampError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const PROGRESS_CSV: &str = "progress.csv";
pub const STUDENTS_JSON: &str = "students.json";
pub const SNAPSHOT_ZIP: &str = "snapshot.zip";
pub const SCRATCH_NOTE: &str = "scratch_note.txt";

/// One row of the progress export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRow {
    pub student: String,
    pub course: String,
    pub status: String,
    pub progress: u8,
}

fn progress_rows(data: &SampleData) -> Vec<ProgressRow> {
    data.enrollments
        .iter()
        .filter_map(|e| {
            let student = data.student(e.student_id)?;
            let course = data.course(e.course_id)?;
            Some(ProgressRow {
                student: student.name.clone(),
                course: course.title.clone(),
                status: format!("{:?}", e.status),
                progress: e.progress,
            })
        })
        .collect()
}

/// Scratch-file exercises routed through the `Storage` port so tests can
/// point them at a temp directory.
pub struct FileChallenges<S: Storage> {
    storage: S,
}

impl<S: Storage> FileChallenges<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Serializes every enrollment into a CSV file.
    pub async fn write_progress_csv(&self, data: &SampleData) -> Result<usize> {
        let rows = progress_rows(data);

        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &rows {
            writer.serialize(row)?;
        }
        let bytes = writer.into_inner().map_err(|e| CampError::DataError {
            message: format!("CSV buffer flush failed: {}", e),
        })?;

        self.storage.write_file(PROGRESS_CSV, &bytes).await?;
        Ok(rows.len())
    }

    /// Reads the CSV back into typed rows, the other half of the exercise.
    pub async fn read_progress_csv(&self) -> Result<Vec<ProgressRow>> {
        let bytes = self.storage.read_file(PROGRESS_CSV).await?;
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }

    /// Bundles the progress CSV and a JSON dump of the students into one
    /// zip archive.
    pub async fn export_snapshot(&self, data: &SampleData) -> Result<String> {
        let rows = progress_rows(data);

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            let mut writer = csv::Writer::from_writer(Vec::new());
            for row in &rows {
                writer.serialize(row)?;
            }
            let csv_bytes = writer.into_inner().map_err(|e| CampError::DataError {
                message: format!("CSV buffer flush failed: {}", e),
            })?;

            zip.start_file::<_, ()>(PROGRESS_CSV, FileOptions::default())?;
            zip.write_all(&csv_bytes)?;

            zip.start_file::<_, ()>(STUDENTS_JSON, FileOptions::default())?;
            let json_data = serde_json::to_string_pretty(&data.students)?;
            zip.write_all(json_data.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        self.storage.write_file(SNAPSHOT_ZIP, &zip_data).await?;
        Ok(SNAPSHOT_ZIP.to_string())
    }

    /// Write-then-read roundtrip of a plain text scratch file.
    pub async fn scratch_roundtrip(&self, note: &str) -> Result<String> {
        self.storage
            .write_file(SCRATCH_NOTE, note.as_bytes())
            .await?;
        let bytes = self.storage.read_file(SCRATCH_NOTE).await?;
        String::from_utf8(bytes).map_err(|e| CampError::DataError {
            message: format!("Scratch note is not valid UTF-8: {}", e),
        })
    }
}

#[async_trait]
impl<S: Storage> ChallengeSet for FileChallenges<S> {
    fn name(&self) -> &'static str {
        "files"
    }

    fn summary(&self) -> &'static str {
        "scratch-file exports under the output directory"
    }

    async fn run(&self, data: &SampleData) -> Result<SetReport> {
        let mut report = SetReport::new(self.name());

        let written = self.write_progress_csv(data).await?;
        report.push("progress rows written", written);

        let rows = self.read_progress_csv().await?;
        report.push("progress rows read back", rows.len());

        let bundle = self.export_snapshot(data).await?;
        report.push("snapshot bundle", bundle);

        let note = self
            .scratch_roundtrip("remember: redo the ownership katas")
            .await?;
        report.push("scratch note roundtrip", note);

        Ok(report)
    }
}
