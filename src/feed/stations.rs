// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{IdentifierError, StationsError};
use crate::navigation::ProgramId;

/// Root of the station list file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationList {
    #[serde(default)]
    pub stations: Vec<Station>,
}

/// A radio station and the programs published from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub id: u64,
    pub website: Url,
    #[serde(default)]
    pub podcasts: Vec<PodcastEntry>,
}

/// One program to publish as a podcast feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastEntry {
    pub title: String,
    pub description: String,
    pub brand_id: Option<u64>,
    pub rubric_id: Option<u64>,
    pub category: String,
    pub sub_category: Option<String>,
    pub website: Url,
    /// Output path of the feed, relative to the output directory
    pub feed: String,
    pub image: Url,
}

impl PodcastEntry {
    pub fn program(&self) -> Result<ProgramId, IdentifierError> {
        ProgramId::from_fields(self.brand_id, self.rubric_id)
    }
}

/// Parse a station list from TOML text
pub fn parse_stations(text: &str, path: &Path) -> Result<StationList, StationsError> {
    toml::from_str(text).map_err(|e| StationsError::ParseFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read and parse a station list file
pub fn load_stations(path: &Path) -> Result<StationList, StationsError> {
    let text = std::fs::read_to_string(path).map_err(|e| StationsError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_stations(&text, path)
}
