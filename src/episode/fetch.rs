// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::debug;

use crate::error::EpisodeError;
use crate::http::HttpClient;
use crate::navigation::ProgramId;
use crate::source::DataSource;

use super::record::{Episode, EpisodeResponse};

/// Parse an episode response, keeping the first content block's list.
///
/// Announcements are normalized on the way out.
pub fn parse_episode_list(bytes: &[u8]) -> Result<Vec<Episode>, EpisodeError> {
    let response: EpisodeResponse = serde_json::from_slice(bytes)?;

    let block = response
        .contents
        .into_iter()
        .next()
        .ok_or(EpisodeError::MissingContentBlock)?;

    Ok(block.list.into_iter().map(Episode::normalized).collect())
}

/// Fetch the episode list of a program from the data source
pub async fn fetch_episodes<C: HttpClient>(
    client: &C,
    source: &DataSource,
    program: ProgramId,
) -> Result<Vec<Episode>, EpisodeError> {
    let bytes = source.load(client, &program.episodes_resource()).await?;
    let episodes = parse_episode_list(&bytes)?;
    debug!(%program, count = episodes.len(), "episodes loaded");
    Ok(episodes)
}
