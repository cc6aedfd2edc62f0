// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::debug;

use crate::error::CatalogError;
use crate::http::HttpClient;
use crate::source::DataSource;

use super::record::{PodcastRecord, RawPodcast, enrich_catalog};

/// Path of the catalog resource relative to the data source
pub const CATALOG_RESOURCE: &str = "podcasts.json";

/// Parse catalog JSON bytes and enrich each entry
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<PodcastRecord>, CatalogError> {
    let raw: Vec<RawPodcast> = serde_json::from_slice(bytes)?;
    Ok(enrich_catalog(raw))
}

/// Fetch and enrich the podcast catalog
pub async fn fetch_catalog<C: HttpClient>(
    client: &C,
    source: &DataSource,
) -> Result<Vec<PodcastRecord>, CatalogError> {
    let bytes = source.load(client, CATALOG_RESOURCE).await?;
    let records = parse_catalog(&bytes)?;
    debug!(count = records.len(), "catalog loaded");
    Ok(records)
}
