//! Whole-run orchestration
//!
//! A run loads the last-run state, syncs the collection export and then the
//! image export (whichever are configured), and records the run's start time
//! as the new last run once both have finished without a fatal error.

use chrono::{Local, NaiveDateTime};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;

use super::collections::sync_collections;
use super::filter::ModifiedFilter;
use super::images::sync_images;
use super::stats::SyncStats;
use crate::app::services::garden_api::GardenApi;
use crate::config::SyncConfig;
use crate::state::SyncState;
use crate::{Error, Result};

/// Outcome of one sync run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Last run the filter compared against; `None` for a full sync
    pub previous_run: Option<NaiveDateTime>,
    pub started_at: NaiveDateTime,
    pub collections: Option<SyncStats>,
    pub images: Option<SyncStats>,
    pub duration: Duration,
}

impl SyncReport {
    pub fn has_failures(&self) -> bool {
        self.collections
            .iter()
            .chain(&self.images)
            .any(SyncStats::has_failures)
    }
}

/// Syncs configured exports against one API session
pub struct SyncRunner<A> {
    api: A,
    config: SyncConfig,
    progress: Option<ProgressBar>,
}

impl<A: GardenApi> SyncRunner<A> {
    pub fn new(api: A, config: SyncConfig) -> Self {
        Self {
            api,
            config,
            progress: None,
        }
    }

    /// Report per-row progress on a spinner
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub async fn run(&self) -> Result<SyncReport> {
        let input = &self.config.input;
        if input.plant_data_path.is_none() && input.image_data_path.is_none() {
            return Err(Error::configuration(
                "Nothing to sync: give a plant data path, an image data path or both",
            ));
        }

        let timer = Instant::now();
        let started_at = Local::now().naive_local();
        let state = SyncState::load(&self.config.state_file)?;
        let filter = ModifiedFilter::new(state.last_run, self.config.full_sync);

        match filter.since() {
            Some(since) => info!("Syncing rows modified after {}", since),
            None => info!("Full sync, ignoring last-modified values"),
        }

        let progress = self.progress.as_ref();

        let collections = match &input.plant_data_path {
            Some(path) => {
                Some(sync_collections(&self.api, path, &self.config, filter, progress).await?)
            }
            None => None,
        };

        let images = match &input.image_data_path {
            Some(path) => Some(sync_images(&self.api, path, &self.config, filter, progress).await?),
            None => None,
        };

        SyncState::new(started_at).save(&self.config.state_file)?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(SyncReport {
            previous_run: filter.since(),
            started_at,
            collections,
            images,
            duration: timer.elapsed(),
        })
    }
}
