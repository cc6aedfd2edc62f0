// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{error, info, warn};
use url::Url;

use crate::error::GenerateError;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};

use super::api::{API_ENDPOINT, fetch_raw_episodes};
use super::build::{FeedLocation, build_channel, render_channel};
use super::dates::today_in_moscow;
use super::enrich::enrich_episodes;
use super::stations::{PodcastEntry, Station, StationList};

/// Options for feed generation
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory the `feed` paths of the station list are relative to
    pub output_dir: PathBuf,
    /// Number of latest episodes per feed
    pub limit: usize,
    /// Upstream audio listing endpoint
    pub api_endpoint: Url,
    /// Public base URL the output directory is served from
    pub public_base: Option<Url>,
}

impl GenerateOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, url::ParseError> {
        Ok(Self {
            output_dir: output_dir.into(),
            limit: 10,
            api_endpoint: Url::parse(API_ENDPOINT)?,
            public_base: None,
        })
    }

    fn location(&self, podcast: &PodcastEntry) -> FeedLocation {
        let self_url = self
            .public_base
            .as_ref()
            .and_then(|base| base.join(&podcast.feed).ok())
            .map(|url| url.to_string())
            .unwrap_or_else(|| podcast.feed.clone());
        FeedLocation { self_url }
    }
}

/// Result of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateSummary {
    /// Number of feeds written
    pub written: usize,
    /// Number of podcasts whose feed could not be produced
    pub failed: usize,
    /// Details of failed podcasts (title, error message)
    pub failed_podcasts: Vec<(String, String)>,
}

async fn write_feed(path: &Path, xml: &[u8]) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| GenerateError::CreateDirectoryFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
    }

    tokio::fs::write(path, xml)
        .await
        .map_err(|e| GenerateError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Produce the feed file of one podcast.
///
/// Returns the written path and the number of episodes in the feed. An
/// upstream failure yields a feed without episodes rather than an error.
pub async fn generate_feed<C: HttpClient>(
    client: &C,
    station: &Station,
    podcast: &PodcastEntry,
    options: &GenerateOptions,
    reporter: &SharedProgressReporter,
    today: NaiveDate,
) -> Result<(PathBuf, usize), GenerateError> {
    let program = podcast.program()?;

    reporter.report(ProgressEvent::FetchingEpisodes {
        podcast_title: podcast.title.clone(),
        program: program.to_string(),
    });

    let raw = fetch_raw_episodes(client, &options.api_endpoint, program, options.limit)
        .await
        .unwrap_or_else(|e| {
            warn!(%program, "no episodes fetched: {e}");
            Vec::new()
        });

    reporter.report(ProgressEvent::ProbingMedia {
        podcast_title: podcast.title.clone(),
        episodes: raw.len(),
    });

    let episodes = enrich_episodes(client, &raw, today).await;

    let channel = build_channel(station, podcast, &options.location(podcast), &episodes);
    let xml = render_channel(&channel)?;

    let path = options.output_dir.join(&podcast.feed);
    write_feed(&path, &xml).await?;

    info!("-- {:<6} {:<24} \t {}", program.id(), podcast.title, path.display());
    Ok((path, episodes.len()))
}

/// Generate the feeds of every podcast of every station.
///
/// A failing podcast is reported and skipped; the others still run.
pub async fn generate_all<C: HttpClient>(
    client: &C,
    stations: &StationList,
    options: &GenerateOptions,
    reporter: SharedProgressReporter,
) -> GenerateSummary {
    let today = today_in_moscow();
    let mut summary = GenerateSummary::default();

    for station in &stations.stations {
        info!("- {}", station.name);
        reporter.report(ProgressEvent::StationStarted {
            name: station.name.clone(),
            podcasts: station.podcasts.len(),
        });

        for podcast in &station.podcasts {
            match generate_feed(client, station, podcast, options, &reporter, today).await {
                Ok((path, episodes)) => {
                    summary.written += 1;
                    reporter.report(ProgressEvent::FeedWritten {
                        podcast_title: podcast.title.clone(),
                        path,
                        episodes,
                    });
                }
                Err(e) => {
                    error!("Can't create feed for \"{}\": {e}", podcast.title);
                    summary.failed += 1;
                    summary
                        .failed_podcasts
                        .push((podcast.title.clone(), e.to_string()));
                    reporter.report(ProgressEvent::FeedFailed {
                        podcast_title: podcast.title.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    reporter.report(ProgressEvent::GenerationCompleted {
        written: summary.written,
        failed: summary.failed,
    });

    summary
}
