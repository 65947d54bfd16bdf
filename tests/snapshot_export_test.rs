use rustcamp::challenges::files::{FileChallenges, ProgressRow, PROGRESS_CSV, SNAPSHOT_ZIP};
use rustcamp::{LocalStorage, SampleData, SampleProfile, Storage};
use tempfile::TempDir;

fn seeded_data() -> SampleData {
    SampleData::generate(&SampleProfile {
        students: 10,
        courses: 4,
        seed: Some(9),
    })
    .unwrap()
}

#[tokio::test]
async fn test_progress_csv_roundtrip_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_path_buf());
    let challenges = FileChallenges::new(storage);

    let data = seeded_data();
    let written = challenges.write_progress_csv(&data).await.unwrap();

    // The file is really on disk, with a header and one line per row.
    let on_disk = std::fs::read_to_string(temp_dir.path().join(PROGRESS_CSV)).unwrap();
    assert!(on_disk.starts_with("student,course,status,progress"));
    assert_eq!(on_disk.trim_end().lines().count(), written + 1);

    let rows: Vec<ProgressRow> = challenges.read_progress_csv().await.unwrap();
    assert_eq!(rows.len(), written);
    assert_eq!(rows.len(), data.enrollments.len());
}

#[tokio::test]
async fn test_snapshot_zip_written_through_local_storage() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_path_buf());
    let challenges = FileChallenges::new(storage.clone());

    let data = seeded_data();
    let bundle = challenges.export_snapshot(&data).await.unwrap();
    assert_eq!(bundle, SNAPSHOT_ZIP);

    // Readable both through the port and straight off the filesystem.
    let via_port = storage.read_file(SNAPSHOT_ZIP).await.unwrap();
    let via_fs = std::fs::read(temp_dir.path().join(SNAPSHOT_ZIP)).unwrap();
    assert_eq!(via_port, via_fs);

    let cursor = std::io::Cursor::new(via_fs);
    let archive = zip::ZipArchive::new(cursor).unwrap();
    assert_eq!(archive.len(), 2);
}

#[tokio::test]
async fn test_scratch_note_survives_nested_path() {
    let temp_dir = TempDir::new().unwrap();
    // Point at a directory that does not exist yet; writes must create it.
    let nested = temp_dir.path().join("runs").join("today");
    let storage = LocalStorage::new(nested.clone());
    let challenges = FileChallenges::new(storage);

    let note = challenges.scratch_roundtrip("kata list for friday").await.unwrap();
    assert_eq!(note, "kata list for friday");
    assert!(nested.join("scratch_note.txt").exists());
}
