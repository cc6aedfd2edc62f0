// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading a resource from the data source
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to fetch {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid resource URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A raw record that does not carry exactly one program identifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Neither brand_id nor rubric_id is provided")]
    Missing,

    #[error("Both brand_id ({brand_id}) and rubric_id ({rubric_id}) are provided")]
    Ambiguous { brand_id: u64, rubric_id: u64 },
}

/// Errors that can occur when loading the podcast catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Data(#[from] DataError),

    #[error("Failed to parse catalog JSON: {0}")]
    ParseFailed(#[from] serde_json::Error),
}

/// Errors that can occur when loading an episode list
#[derive(Error, Debug)]
pub enum EpisodeError {
    #[error("Episode list unavailable: {0}")]
    Data(#[from] DataError),

    #[error("Failed to parse episode list JSON: {0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error("Episode response has no content block")]
    MissingContentBlock,
}

/// Errors that can occur when resolving a navigation target
#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Invalid navigation target '{target}': {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("No view for path {0}")]
    UnknownRoute(String),
}

/// Errors that can occur when driving the audio output
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("No source has been set")]
    NoSource,

    #[error("Failed to start {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid streaming URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors that can occur when loading the station list
#[derive(Error, Debug)]
pub enum StationsError {
    #[error("Failed to read station list {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse station list {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors that can occur while generating a single podcast feed
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    #[error("Failed to fetch episodes: {0}")]
    Episodes(#[from] EpisodeError),

    #[error("Failed to parse date '{value}'")]
    InvalidDate { value: String },

    #[error("Failed to parse duration '{value}'")]
    InvalidDuration { value: String },

    #[error("Failed to render RSS: {0}")]
    Render(#[from] rss::Error),

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write feed {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
