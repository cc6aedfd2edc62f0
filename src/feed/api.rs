// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::debug;
use url::Url;

use crate::episode::{Episode, parse_episode_list};
use crate::error::{DataError, EpisodeError};
use crate::http::HttpClient;
use crate::navigation::ProgramId;

/// Upstream listing of a program's audio episodes
pub const API_ENDPOINT: &str = "https://smotrim.ru/api/audios";

/// URL of the first page of a program's episodes
pub fn episodes_api_url(endpoint: &Url, program: ProgramId, limit: usize) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("page", "1")
        .append_pair("limit", &limit.to_string())
        .append_pair(program.api_param(), &program.id().to_string());
    url
}

/// Fetch the latest episodes of a program straight from the upstream API
pub async fn fetch_raw_episodes<C: HttpClient>(
    client: &C,
    endpoint: &Url,
    program: ProgramId,
    limit: usize,
) -> Result<Vec<Episode>, EpisodeError> {
    let url = episodes_api_url(endpoint, program, limit);
    debug!(%url, "querying audio API");

    let response = client
        .get(url.as_str())
        .await
        .map_err(|e| DataError::FetchFailed {
            url: url.to_string(),
            source: e,
        })?;

    if !response.is_success() {
        return Err(DataError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        }
        .into());
    }

    parse_episode_list(&response.body)
}
