// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::episode::null_as_empty;
use crate::error::IdentifierError;
use crate::navigation::ProgramId;

/// A catalog entry exactly as it appears in `podcasts.json`
#[derive(Debug, Clone, Deserialize)]
pub struct RawPodcast {
    pub brand_id: Option<u64>,
    pub rubric_id: Option<u64>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub feed: String,
}

/// A catalog entry after enrichment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodcastRecord {
    pub program: ProgramId,
    pub title: Option<String>,
    pub image: String,
    pub description: String,
    /// URL of the generated RSS feed
    pub feed: String,
    /// Navigation URL of the episode view, derived from `program`
    pub listen_url: String,
}

impl PodcastRecord {
    /// Resolve the identifier and derive the navigation URL
    pub fn enrich(raw: RawPodcast) -> Result<Self, IdentifierError> {
        let program = ProgramId::from_fields(raw.brand_id, raw.rubric_id)?;

        Ok(Self {
            program,
            title: raw.title,
            image: raw.image,
            description: raw.description,
            feed: raw.feed,
            listen_url: program.listen_url(),
        })
    }
}

/// Enrich every raw entry, dropping those without exactly one identifier
pub fn enrich_catalog(raw: Vec<RawPodcast>) -> Vec<PodcastRecord> {
    raw.into_iter()
        .filter_map(|entry| {
            let feed = entry.feed.clone();
            PodcastRecord::enrich(entry)
                .inspect_err(|e| warn!(%feed, "skipping catalog entry: {e}"))
                .ok()
        })
        .collect()
}
