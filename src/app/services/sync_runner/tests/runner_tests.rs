//! Tests for whole-run orchestration

use super::*;
use crate::Error;
use crate::app::services::sync_runner::runner::SyncRunner;
use crate::config::SyncConfig;
use crate::state::SyncState;
use chrono::NaiveDate;
use tempfile::TempDir;

fn seed_state(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("state.json");
    let last_run = NaiveDate::from_ymd_opt(2021, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    SyncState::new(last_run).save(&path).unwrap();
    path
}

fn collection_export() -> tempfile::NamedTempFile {
    write_export(&[
        header(32),
        collection_row("2019-0001*1", "2021-05-05T10:00:00"),
        collection_row("2019-0002*1", "2020-05-05T10:00:00"),
    ])
}

#[tokio::test]
async fn test_run_without_exports_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let config = SyncConfig::default().with_state_file(dir.path().join("state.json"));

    let result = SyncRunner::new(MockApi::default(), config).run().await;

    assert!(matches!(result, Err(Error::Configuration { .. })));
    assert!(!dir.path().join("state.json").exists());
}

#[tokio::test]
async fn test_run_syncs_modified_rows_and_saves_state() {
    let dir = TempDir::new().unwrap();
    let state_file = seed_state(&dir);
    let export = collection_export();

    let config = SyncConfig::default()
        .with_state_file(state_file.clone())
        .with_plant_data_path(export.path().to_path_buf());
    let runner = SyncRunner::new(MockApi::default(), config);

    let report = runner.run().await.unwrap();

    let collections = report.collections.as_ref().unwrap();
    assert_eq!(collections.posted, 1);
    assert_eq!(collections.unmodified, 1);
    assert!(report.images.is_none());
    assert!(!report.has_failures());
    assert_eq!(runner.api().posted_ids(), vec!["2019-0001*1"]);

    let previous = report.previous_run.unwrap();
    assert_eq!(previous.to_string(), "2021-01-01 00:00:00");

    let saved = SyncState::load(&state_file).unwrap();
    assert_eq!(saved.last_run, report.started_at);
    assert!(saved.last_run > previous);
}

#[tokio::test]
async fn test_full_sync_ignores_last_run() {
    let dir = TempDir::new().unwrap();
    let state_file = seed_state(&dir);
    let export = collection_export();

    let config = SyncConfig::default()
        .with_state_file(state_file)
        .with_plant_data_path(export.path().to_path_buf())
        .with_full_sync();
    let runner = SyncRunner::new(MockApi::default(), config);

    let report = runner.run().await.unwrap();

    assert_eq!(report.previous_run, None);
    assert_eq!(report.collections.unwrap().posted, 2);
}

#[tokio::test]
async fn test_first_run_without_state_file() {
    let dir = TempDir::new().unwrap();
    let state_file = dir.path().join("nested").join("state.json");
    let export = collection_export();

    let config = SyncConfig::default()
        .with_state_file(state_file.clone())
        .with_plant_data_path(export.path().to_path_buf());

    let report = SyncRunner::new(MockApi::default(), config)
        .run()
        .await
        .unwrap();

    // Both rows are newer than the 1900 epoch
    assert_eq!(report.collections.unwrap().posted, 2);
    assert!(state_file.exists());
}

#[tokio::test]
async fn test_fatal_error_leaves_state_untouched() {
    let dir = TempDir::new().unwrap();
    let state_file = seed_state(&dir);
    let before = std::fs::read_to_string(&state_file).unwrap();

    let export = write_export(&[header(5), collection_row("A", "")]);
    let config = SyncConfig::default()
        .with_state_file(state_file.clone())
        .with_plant_data_path(export.path().to_path_buf());

    let result = SyncRunner::new(MockApi::default(), config).run().await;

    assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
    assert_eq!(std::fs::read_to_string(&state_file).unwrap(), before);
}

#[tokio::test]
async fn test_collections_and_images_in_one_run() {
    let dir = TempDir::new().unwrap();
    let collections = collection_export();
    let images = write_export(&[
        header(7),
        image_row("acer.jpg", "Acer", ""),
        image_row("abies.jpg", "Abies", ""),
    ]);

    let config = SyncConfig::default()
        .with_state_file(dir.path().join("state.json"))
        .with_plant_data_path(collections.path().to_path_buf())
        .with_image_data_path(images.path().to_path_buf());
    let api = MockApi::default().with_species("Acer", &[11]);

    let report = SyncRunner::new(api, config).run().await.unwrap();

    let images = report.images.unwrap();
    assert_eq!(images.images_matched, 1);
    assert_eq!(images.images_unmatched, 1);
    assert_eq!(report.collections.unwrap().posted, 2);
}
