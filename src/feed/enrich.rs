// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, FixedOffset, NaiveDate};
use tracing::warn;
use url::Url;

use crate::episode::Episode;
use crate::error::GenerateError;
use crate::http::HttpClient;
use crate::playback::stream_url;

use super::dates::{parse_api_date, parse_duration};
use super::media::{probe_media_sizes, resolve_picture};

/// An episode with everything an RSS item needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEpisode {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub published: DateTime<FixedOffset>,
    /// Length in seconds
    pub duration: u64,
    pub media_url: Url,
    /// Size in bytes, 0 when unknown
    pub media_size: u64,
    pub picture_url: Option<String>,
}

impl FeedEpisode {
    /// Combine an upstream episode with the probed media details
    pub fn from_parts(
        episode: &Episode,
        media_url: Url,
        media_size: u64,
        picture_url: Option<String>,
        today: NaiveDate,
    ) -> Result<Self, GenerateError> {
        let published = parse_api_date(&episode.published, today)?;
        let duration = parse_duration(episode.duration.as_deref().unwrap_or_default())?;

        // The announcement is the episode headline; the title is the program name
        let title = if episode.anons.is_empty() {
            episode.title.clone()
        } else {
            episode.anons.clone()
        };

        Ok(Self {
            id: episode.id,
            title,
            description: episode.description.clone(),
            published,
            duration,
            media_url,
            media_size,
            picture_url,
        })
    }
}

/// Probe media and pictures for every episode.
///
/// Episodes whose date or duration cannot be parsed are skipped.
pub async fn enrich_episodes<C: HttpClient>(
    client: &C,
    episodes: &[Episode],
    today: NaiveDate,
) -> Vec<FeedEpisode> {
    let with_urls: Vec<(&Episode, Url)> = episodes
        .iter()
        .filter_map(|episode| match stream_url(episode.id) {
            Ok(url) => Some((episode, url)),
            Err(e) => {
                warn!(id = episode.id, "skipping episode: {e}");
                None
            }
        })
        .collect();

    let urls: Vec<Url> = with_urls.iter().map(|(_, url)| url.clone()).collect();
    let sizes = probe_media_sizes(client, &urls).await;

    let mut enriched = Vec::with_capacity(with_urls.len());
    for ((episode, media_url), size) in with_urls.into_iter().zip(sizes) {
        let media_size = size.unwrap_or_else(|| {
            warn!(id = episode.id, %media_url, "invalid or missing media size");
            0
        });

        let picture_url = match episode.preview_image() {
            Some(preview) => Some(resolve_picture(client, preview).await),
            None => {
                warn!(id = episode.id, "episode has no preview picture");
                None
            }
        };

        match FeedEpisode::from_parts(episode, media_url, media_size, picture_url, today) {
            Ok(feed_episode) => enriched.push(feed_episode),
            Err(e) => warn!(id = episode.id, "skipping episode: {e}"),
        }
    }

    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::episode::{Player, Preview, PreviewSource};
    use crate::testing::MockHttpClient;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn episode(id: u64, published: &str, duration: Option<&str>) -> Episode {
        Episode {
            id,
            title: "Национальный интерес".to_string(),
            published: published.to_string(),
            anons: format!("Выпуск {id}"),
            description: "Описание".to_string(),
            duration: duration.map(String::from),
            player: Some(Player {
                preview: Preview {
                    source: PreviewSource {
                        main: format!("https://example.com/preview/{id}"),
                    },
                },
            }),
        }
    }

    #[tokio::test]
    async fn enrich_combines_probes_and_parsing() {
        let client = MockHttpClient::new()
            .with_head(
                "https://vgtrk-podcast.cdnvideo.ru/audio/listen?id=1",
                Some(5_000_000),
                "https://vgtrk-podcast.cdnvideo.ru/audio/listen?id=1",
            )
            .with_head(
                "https://example.com/preview/1",
                None,
                "https://img.example.com/1.jpg",
            );

        let enriched =
            enrich_episodes(&client, &[episode(1, "12 марта 2024", Some("00:52:10"))], today())
                .await;

        assert_eq!(enriched.len(), 1);
        let ep = &enriched[0];
        assert_eq!(ep.title, "Выпуск 1");
        assert_eq!(ep.duration, 3130);
        assert_eq!(ep.media_size, 5_000_000);
        assert_eq!(ep.picture_url.as_deref(), Some("https://img.example.com/1.jpg"));
        assert_eq!(ep.published.to_rfc3339(), "2024-03-12T00:00:00+03:00");
    }

    #[tokio::test]
    async fn missing_size_becomes_zero() {
        let enriched = enrich_episodes(
            &MockHttpClient::new(),
            &[episode(2, "14:05", Some("10:00"))],
            today(),
        )
        .await;

        assert_eq!(enriched[0].media_size, 0);
        assert_eq!(
            enriched[0].picture_url.as_deref(),
            Some("https://example.com/preview/2")
        );
    }

    #[tokio::test]
    async fn unparseable_episodes_are_skipped() {
        let enriched = enrich_episodes(
            &MockHttpClient::new(),
            &[
                episode(1, "когда-то", Some("10:00")),
                episode(2, "14:05", None),
                episode(3, "14:05", Some("01:00")),
            ],
            today(),
        )
        .await;

        let ids: Vec<_> = enriched.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn empty_announcement_falls_back_to_title() {
        let mut source = episode(4, "14:05", Some("01:00"));
        source.anons.clear();

        let ep = FeedEpisode::from_parts(
            &source,
            stream_url(4).unwrap(),
            0,
            None,
            today(),
        )
        .unwrap();

        assert_eq!(ep.title, "Национальный интерес");
    }
}
