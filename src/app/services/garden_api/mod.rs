//! Client for the Red Butte Garden plant API
//!
//! Authenticates once per run with the token endpoint and then exposes the
//! three calls the sync needs: species search, collection creation and
//! species image upload. The [`GardenApi`] trait is the seam the sync runner
//! is written against, so runs can be exercised without a live server.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use brahms_sync::app::services::garden_api::{Credentials, GardenApi, GardenApiClient};
//! use brahms_sync::config::ApiConfig;
//!
//! # async fn example() -> brahms_sync::Result<()> {
//! let credentials = Credentials::from_env()?;
//! let client = GardenApiClient::connect(&ApiConfig::default(), &credentials).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod responses;

pub use client::{Credentials, GardenApiClient};
pub use responses::{SpeciesSearch, SpeciesSummary, TokenResponse};

use crate::Result;
use crate::app::models::{CollectionPayload, ImageQuery, ImageRecord};

/// Operations the sync runner performs against the remote API
#[allow(async_fn_in_trait)]
pub trait GardenApi {
    /// Search species matching an image query
    async fn find_species(&self, query: &ImageQuery) -> Result<SpeciesSearch>;

    /// Create one collection; anything but `201 Created` is an error
    async fn post_collection(&self, payload: &CollectionPayload) -> Result<()>;

    /// Attach an image file and its copyright to a species
    async fn set_species_image(&self, species_id: u64, record: &ImageRecord) -> Result<()>;
}
